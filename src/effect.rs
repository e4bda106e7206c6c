//! The effect contract and per-layer bookkeeping.
//!
//! An [`Effect`] owns its particles and knows how to draw one frame of
//! itself. The [`Simulation`](crate::simulation::Simulation) gives every
//! effect its own [`EffectSlot`]: a private canvas, a layer opacity and a
//! run state. A slot that fails to initialize is disabled on its own; the
//! other layers keep running.
//!
//! # Frame order
//!
//! | Effect | Per tick |
//! |--------|----------|
//! | [`Fireworks`](crate::fireworks::Fireworks) | fade (erase 20%) → additive draw → advance |
//! | [`ParticleText`](crate::text::ParticleText) | clear → advance → draw |

use crate::canvas::Canvas;
use crate::error::SurfaceError;
use crate::input::Pointer;
use crate::rng::SimRng;
use crate::viewport::Viewport;

/// A self-contained particle effect.
pub trait Effect {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run one frame: advance the simulation and paint it into `canvas`, in
    /// whatever order the effect needs.
    fn tick(&mut self, canvas: &mut Canvas, pointer: &Pointer, rng: &mut SimRng);

    /// Paint the current state without advancing it.
    fn render(&self, canvas: &mut Canvas);

    /// The viewport changed (or was set for the first time).
    fn resize(&mut self, viewport: Viewport, rng: &mut SimRng);

    /// New message for effects that display text. Ignored by default.
    fn set_text(&mut self, _text: &str, _rng: &mut SimRng) {}

    /// Live particles.
    fn particle_count(&self) -> usize;
}

/// Whether a layer takes part in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectState {
    /// Added but not started yet.
    Idle,
    Running,
    /// Initialization failed; the layer is skipped.
    Disabled(String),
}

/// One layer of a simulation.
pub struct EffectSlot {
    effect: Box<dyn Effect>,
    canvas: Option<Canvas>,
    opacity: f32,
    state: EffectState,
}

impl EffectSlot {
    pub fn new(effect: Box<dyn Effect>, opacity: f32) -> Self {
        Self {
            effect,
            canvas: None,
            opacity: opacity.clamp(0.0, 1.0),
            state: EffectState::Idle,
        }
    }

    pub fn name(&self) -> &str {
        self.effect.name()
    }

    pub fn state(&self) -> &EffectState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EffectState::Running
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn effect_mut(&mut self) -> &mut dyn Effect {
        self.effect.as_mut()
    }

    /// The layer's canvas, once activated.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Allocate the canvas and size the effect. Disables the slot on failure.
    pub fn activate(&mut self, viewport: Viewport, rng: &mut SimRng) -> Result<(), SurfaceError> {
        match Canvas::new(viewport) {
            Ok(canvas) => {
                self.canvas = Some(canvas);
                self.effect.resize(viewport, rng);
                self.state = EffectState::Running;
                Ok(())
            }
            Err(err) => {
                log::warn!("disabling layer '{}': {}", self.effect.name(), err);
                self.canvas = None;
                self.state = EffectState::Disabled(err.to_string());
                Err(err)
            }
        }
    }

    /// Follow a viewport change. Invalid viewports leave the slot untouched.
    pub fn resize(&mut self, viewport: Viewport, rng: &mut SimRng) {
        if !self.is_running() || !viewport.is_valid() {
            return;
        }
        if let Some(canvas) = &mut self.canvas {
            if canvas.resize(viewport).is_ok() {
                self.effect.resize(viewport, rng);
            }
        }
    }

    /// Run one frame of the effect into its canvas.
    pub fn tick(&mut self, pointer: &Pointer, rng: &mut SimRng) {
        if !self.is_running() {
            return;
        }
        if let Some(canvas) = &mut self.canvas {
            self.effect.tick(canvas, pointer, rng);
        }
    }

    /// Drop the canvas and return to idle. Particles stay with the effect.
    pub fn deactivate(&mut self) {
        if self.is_running() {
            self.state = EffectState::Idle;
        }
        self.canvas = None;
    }
}

impl std::fmt::Debug for EffectSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSlot")
            .field("effect", &self.effect.name())
            .field("opacity", &self.opacity)
            .field("state", &self.state)
            .field("particles", &self.effect.particle_count())
            .finish()
    }
}
