//! Pointer state and window-event translation.
//!
//! The simulation never sees raw `winit` events. [`InputTranslator`] turns
//! them into [`InputEvent`]s, and [`Pointer`] holds the one piece of input
//! state the effects read: where the cursor (or primary finger) last was.
//!
//! ```ignore
//! let mut translator = InputTranslator::new();
//! if let Some(event) = translator.translate(&window_event) {
//!     simulation.handle_event(event);
//! }
//! ```

use crate::viewport::Viewport;
use glam::Vec2;
use winit::event::{TouchPhase, WindowEvent};

/// Pointer position used while no pointer is over the viewport.
///
/// Far enough outside any viewport that no particle is within an influence
/// radius of it.
pub const OFFSCREEN: Vec2 = Vec2::new(-9999.0, -9999.0);

/// Kinds of input a running simulation subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerMove,
    TouchMove,
}

/// Input delivered to a simulation, in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse cursor moved.
    PointerMoved(Vec2),
    /// Primary touch point moved.
    TouchMoved(Vec2),
    /// Cursor left the viewport.
    PointerLeft,
    /// Viewport changed size.
    Resized(Viewport),
}

impl InputEvent {
    /// Listener that must be registered for this event to be delivered.
    pub fn listener(&self) -> ListenerKind {
        match self {
            InputEvent::PointerMoved(_) | InputEvent::PointerLeft => ListenerKind::PointerMove,
            InputEvent::TouchMoved(_) => ListenerKind::TouchMove,
            InputEvent::Resized(_) => ListenerKind::Resize,
        }
    }
}

/// Last known pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    position: Vec2,
}

impl Pointer {
    /// Pointer parked at [`OFFSCREEN`].
    pub fn new() -> Self {
        Self { position: OFFSCREEN }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer has a real position.
    pub fn is_present(&self) -> bool {
        self.position != OFFSCREEN
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Park the pointer off-screen.
    pub fn leave(&mut self) {
        self.position = OFFSCREEN;
    }

    /// Apply a pointer event. Returns `true` if the position changed.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let before = self.position;
        match *event {
            InputEvent::PointerMoved(p) | InputEvent::TouchMoved(p) => self.move_to(p),
            InputEvent::PointerLeft => self.leave(),
            InputEvent::Resized(_) => {}
        }
        before != self.position
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps `winit` window events to [`InputEvent`]s.
///
/// Only the first finger down is followed; other touches are ignored until it
/// lifts.
#[derive(Debug, Default)]
pub struct InputTranslator {
    primary_touch: Option<u64>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the touch currently driving the pointer.
    pub fn primary_touch(&self) -> Option<u64> {
        self.primary_touch
    }

    /// Translate one window event, or `None` if the simulation ignores it.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(Vec2::new(
                position.x as f32,
                position.y as f32,
            ))),
            WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
            WindowEvent::Resized(size) => Some(InputEvent::Resized(Viewport::from(*size))),
            WindowEvent::Touch(touch) => {
                let location = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        self.primary_touch.get_or_insert(touch.id);
                        None
                    }
                    TouchPhase::Moved => {
                        let primary = *self.primary_touch.get_or_insert(touch.id);
                        (primary == touch.id).then_some(InputEvent::TouchMoved(location))
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        if self.primary_touch == Some(touch.id) {
                            self.primary_touch = None;
                        }
                        None
                    }
                }
            }
            _ => None,
        }
    }
}
