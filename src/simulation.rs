//! Simulation builder and loop.
//!
//! A [`Simulation`] stacks effect layers over one viewport, one pointer and
//! one random source. It does not own a clock or a window: the host calls
//! [`tick`](Simulation::tick) once per display refresh and forwards input
//! through [`handle_event`](Simulation::handle_event).
//!
//! # Lifecycle
//!
//! | Call | Effect |
//! |------|--------|
//! | `start()` | allocate layer canvases, seed effects, register listeners |
//! | `tick()` | one frame for every running layer; no-op when stopped or the viewport is empty |
//! | `stop()` | unregister listeners, stop ticking; idempotent, also run on drop |
//!
//! ```ignore
//! let mut sim = Simulation::new(Viewport::new(1280, 720))
//!     .with_seed(7)
//!     .with_layer(Fireworks::new(config.fireworks.clone()), 0.8)
//!     .with_layer(ParticleText::from_config(config.text.clone())?, 1.0);
//! sim.start();
//! loop {
//!     sim.tick();
//!     sim.composite(&mut frame)?;
//! }
//! ```

use crate::canvas::Canvas;
use crate::effect::{Effect, EffectSlot, EffectState};
use crate::error::SurfaceError;
use crate::input::{InputEvent, ListenerKind, Pointer};
use crate::rng::SimRng;
use crate::viewport::Viewport;
use std::collections::HashSet;

/// Input kinds a simulation currently accepts.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    registered: HashSet<ListenerKind>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `kind` was already registered.
    pub fn register(&mut self, kind: ListenerKind) -> bool {
        self.registered.insert(kind)
    }

    pub fn unregister(&mut self, kind: ListenerKind) -> bool {
        self.registered.remove(&kind)
    }

    /// Drop every listener, returning how many were registered.
    pub fn unregister_all(&mut self) -> usize {
        let count = self.registered.len();
        self.registered.clear();
        count
    }

    pub fn is_registered(&self, kind: ListenerKind) -> bool {
        self.registered.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Layered particle simulation.
#[derive(Debug)]
pub struct Simulation {
    viewport: Viewport,
    pointer: Pointer,
    rng: SimRng,
    layers: Vec<EffectSlot>,
    listeners: Listeners,
    running: bool,
    ticks: u64,
}

impl Simulation {
    /// Empty simulation over `viewport`, seeded from entropy.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: Pointer::new(),
            rng: SimRng::from_entropy(),
            layers: Vec::new(),
            listeners: Listeners::new(),
            running: false,
            ticks: 0,
        }
    }

    /// Use a fixed seed so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SimRng::seeded(seed);
        self
    }

    pub fn with_rng(mut self, rng: SimRng) -> Self {
        self.rng = rng;
        self
    }

    /// Add a layer on top of the existing ones.
    ///
    /// `opacity` applies when layers are composited.
    pub fn with_layer<E: Effect + 'static>(mut self, effect: E, opacity: f32) -> Self {
        self.layers.push(EffectSlot::new(Box::new(effect), opacity));
        self
    }

    // ========== Lifecycle ==========

    /// Initialize every layer and begin accepting ticks and input.
    ///
    /// Returns `false` if no layer could start. A layer that fails is
    /// disabled on its own. Calling `start` on a running simulation does
    /// nothing.
    pub fn start(&mut self) -> bool {
        if self.running {
            return true;
        }

        let mut started = 0;
        for slot in &mut self.layers {
            if slot.activate(self.viewport, &mut self.rng).is_ok() {
                started += 1;
            }
        }
        if started == 0 {
            log::warn!(
                "simulation not started: no layer could initialize at {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            return false;
        }

        self.listeners.register(ListenerKind::Resize);
        self.listeners.register(ListenerKind::PointerMove);
        self.listeners.register(ListenerKind::TouchMove);
        self.running = true;
        log::info!(
            "simulation started: {} of {} layers at {}x{}",
            started,
            self.layers.len(),
            self.viewport.width,
            self.viewport.height
        );
        true
    }

    /// Adopt `viewport` if stopped, then [`start`](Self::start).
    ///
    /// Hosts that only learn the real size once a window exists use this to
    /// retry after an earlier `start` failed on an empty viewport. A running
    /// simulation keeps its viewport; resize it through
    /// [`handle_event`](Self::handle_event).
    pub fn start_at(&mut self, viewport: Viewport) -> bool {
        if !self.running {
            self.viewport = viewport;
        }
        self.start()
    }

    /// Stop ticking and release every listener. Safe to call repeatedly.
    pub fn stop(&mut self) {
        let released = self.listeners.unregister_all();
        if !self.running {
            return;
        }
        self.running = false;
        for slot in &mut self.layers {
            slot.deactivate();
        }
        log::info!(
            "simulation stopped after {} ticks, {} listeners released",
            self.ticks,
            released
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========== Frame ==========

    /// Run one frame of every running layer.
    ///
    /// Returns `false` without touching anything if the simulation is stopped
    /// or the viewport has no area.
    pub fn tick(&mut self) -> bool {
        if !self.running || !self.viewport.is_valid() {
            return false;
        }
        for slot in &mut self.layers {
            slot.tick(&self.pointer, &mut self.rng);
        }
        self.ticks += 1;
        true
    }

    /// Clear `target` and stack every running layer onto it, bottom first.
    pub fn composite(&self, target: &mut Canvas) -> Result<(), SurfaceError> {
        target.clear();
        for slot in &self.layers {
            if let (true, Some(canvas)) = (slot.is_running(), slot.canvas()) {
                target.composite_over(canvas, slot.opacity())?;
            }
        }
        Ok(())
    }

    // ========== Input ==========

    /// Deliver an input event.
    ///
    /// Events whose listener is not registered (before `start`, after
    /// `stop`) are dropped; returns whether the event was delivered.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.listeners.is_registered(event.listener()) {
            log::trace!("dropped {:?}: no listener", event);
            return false;
        }
        match event {
            InputEvent::Resized(viewport) => self.resize(viewport),
            _ => {
                self.pointer.apply(&event);
            }
        }
        true
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        if !viewport.is_valid() {
            // Ticks are suspended until a usable size arrives
            return;
        }
        for slot in &mut self.layers {
            slot.resize(viewport, &mut self.rng);
        }
    }

    /// Pass a new message to every layer that shows text.
    pub fn set_text(&mut self, text: &str) {
        for slot in &mut self.layers {
            slot.effect_mut().set_text(text, &mut self.rng);
        }
    }

    // ========== Accessors ==========

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn layers(&self) -> &[EffectSlot] {
        &self.layers
    }

    pub fn layer_state(&self, index: usize) -> Option<&EffectState> {
        self.layers.get(index).map(EffectSlot::state)
    }

    /// Live particles across all layers.
    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(|s| s.effect().particle_count()).sum()
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use glam::Vec2;

    struct Flood;

    impl Effect for Flood {
        fn name(&self) -> &str {
            "flood"
        }

        fn tick(&mut self, canvas: &mut Canvas, _pointer: &crate::input::Pointer, _rng: &mut SimRng) {
            self.render(canvas);
        }

        fn render(&self, canvas: &mut Canvas) {
            canvas.clear();
            canvas.fill(Rgba::WHITE);
        }

        fn resize(&mut self, _viewport: Viewport, _rng: &mut SimRng) {}

        fn particle_count(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_listeners_registry() {
        let mut l = Listeners::new();
        assert!(l.register(ListenerKind::Resize));
        assert!(!l.register(ListenerKind::Resize));
        assert!(l.register(ListenerKind::TouchMove));
        assert!(l.unregister(ListenerKind::TouchMove));
        assert_eq!(l.unregister_all(), 1);
        assert!(l.is_empty());
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut sim = Simulation::new(Viewport::new(10, 10))
            .with_seed(1)
            .with_layer(Flood, 1.0);
        assert!(!sim.tick());
        assert!(sim.start());
        assert!(sim.start());
        assert_eq!(sim.listeners().len(), 3);
        assert!(sim.tick());

        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
        assert!(sim.listeners().is_empty());
        assert!(!sim.tick());
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_zero_viewport_does_not_start() {
        let mut sim = Simulation::new(Viewport::new(0, 0)).with_layer(Flood, 1.0);
        assert!(!sim.start());
        assert!(matches!(sim.layer_state(0), Some(EffectState::Disabled(_))));
        assert!(!sim.handle_event(InputEvent::PointerMoved(Vec2::ONE)));
    }

    #[test]
    fn test_start_at_recovers_from_empty_viewport() {
        let mut sim = Simulation::new(Viewport::new(0, 0)).with_layer(Flood, 1.0);
        assert!(!sim.start());
        assert!(!sim.handle_event(InputEvent::Resized(Viewport::new(12, 8))));

        assert!(sim.start_at(Viewport::new(12, 8)));
        assert_eq!(sim.viewport(), Viewport::new(12, 8));
        assert_eq!(sim.layer_state(0), Some(&EffectState::Running));
        assert_eq!(sim.listeners().len(), 3);
        assert!(sim.tick());

        // Running: size changes go through resize events
        assert!(sim.start_at(Viewport::new(1, 1)));
        assert_eq!(sim.viewport(), Viewport::new(12, 8));
    }

    #[test]
    fn test_events_dropped_when_stopped() {
        let mut sim = Simulation::new(Viewport::new(10, 10)).with_layer(Flood, 1.0);
        assert!(!sim.handle_event(InputEvent::PointerMoved(Vec2::new(3.0, 3.0))));
        assert!(!sim.pointer().is_present());

        sim.start();
        assert!(sim.handle_event(InputEvent::PointerMoved(Vec2::new(3.0, 3.0))));
        assert_eq!(sim.pointer().position(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_empty_resize_suspends_ticks() {
        let mut sim = Simulation::new(Viewport::new(10, 10)).with_layer(Flood, 1.0);
        sim.start();
        sim.handle_event(InputEvent::Resized(Viewport::new(0, 10)));
        assert!(sim.is_running());
        assert!(!sim.tick());

        sim.handle_event(InputEvent::Resized(Viewport::new(20, 5)));
        assert!(sim.tick());
        assert_eq!(sim.layers()[0].canvas().unwrap().viewport(), Viewport::new(20, 5));
    }

    #[test]
    fn test_composite_applies_opacity() {
        let mut sim = Simulation::new(Viewport::new(4, 4)).with_layer(Flood, 0.5);
        sim.start();
        sim.tick();
        let mut frame = Canvas::new(Viewport::new(4, 4)).unwrap();
        sim.composite(&mut frame).unwrap();
        assert!((frame.pixel(2, 2).a - 0.5).abs() < 1e-6);
    }
}
