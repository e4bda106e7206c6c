//! # Sparkfield - layered 2D particle effects
//!
//! A small real-time particle engine with two effects built on one tick-based
//! simulation contract:
//!
//! - **Fireworks**: shells launched from the bottom edge accelerate toward a
//!   target and burst into 150 sparks that slow, fall and fade. Frames are
//!   erased at 20% and redrawn additively, which leaves glowing trails.
//! - **Particle text**: a message is rasterized, sampled on a 4px grid and
//!   turned into discs that spring toward their sample point and scatter
//!   away from the pointer.
//!
//! Everything renders on the CPU into a [`Canvas`]; the optional window
//! runner uploads the result with `wgpu`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sparkfield::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     env_logger::init();
//!     let config = SceneConfig::default();
//!     let viewport = Viewport::new(config.window.width, config.window.height);
//!
//!     let simulation = Simulation::new(viewport)
//!         .with_layer(Fireworks::new(config.fireworks.clone()), config.fireworks.opacity);
//!
//!     sparkfield::window::run(simulation, &config.window)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! | Piece | Role |
//! |-------|------|
//! | [`LaunchEmitter`], [`FieldEmitter`], [`SparkBurst`] | create particles |
//! | [`ParticleStore`] | dense storage with removal during update |
//! | [`BallisticDecay`], [`RepulsionHoming`], [`advance_projectile`] | per-tick motion |
//! | [`Canvas`] | persistent raster with `SourceOver`, `Lighter` and `DestinationOut` |
//! | [`Effect`] | one layer's frame: [`Fireworks`], [`ParticleText`] |
//! | [`Simulation`] | layers, pointer, viewport, start/stop lifecycle |
//!
//! All randomness flows through [`SimRng`]; a seeded simulation replays
//! exactly.

pub mod burst;
pub mod canvas;
pub mod color;
pub mod config;
pub mod effect;
pub mod emitter;
pub mod error;
pub mod fireworks;
pub mod force;
pub mod glyph;
mod gpu;
pub mod input;
pub mod particle;
pub mod rng;
pub mod simulation;
pub mod store;
pub mod text;
pub mod time;
pub mod trail;
pub mod viewport;
pub mod window;

pub use burst::SparkBurst;
pub use canvas::{Canvas, CompositeOp};
pub use color::{Hsla, Rgba};
pub use config::{FireworksConfig, SceneConfig, TextConfig, WindowConfig};
pub use effect::{Effect, EffectSlot, EffectState};
pub use emitter::{FieldEmitter, LaunchEmitter, MaskSample};
pub use error::{ConfigError, FontError, PresentError, SurfaceError};
pub use fireworks::{Fireworks, TickReport};
pub use force::{advance_projectile, BallisticDecay, Flight, RepulsionHoming};
pub use glam::Vec2;
pub use glyph::{FontRasterizer, GlyphMask, TextRasterizer};
pub use input::{InputEvent, InputTranslator, ListenerKind, Pointer, OFFSCREEN};
pub use particle::{FireworkParticle, Projectile, Spark, TextParticle};
pub use rng::SimRng;
pub use simulation::{Listeners, Simulation};
pub use store::{Fate, ParticleStore};
pub use text::ParticleText;
pub use time::FrameClock;
pub use trail::Trail;
pub use viewport::Viewport;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sparkfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, CompositeOp};
    pub use crate::color::{Hsla, Rgba};
    pub use crate::config::{FireworksConfig, SceneConfig, TextConfig, WindowConfig};
    pub use crate::effect::{Effect, EffectState};
    pub use crate::fireworks::Fireworks;
    pub use crate::glyph::{FontRasterizer, GlyphMask, TextRasterizer};
    pub use crate::input::{InputEvent, Pointer};
    pub use crate::rng::SimRng;
    pub use crate::simulation::Simulation;
    pub use crate::text::ParticleText;
    pub use crate::viewport::Viewport;
    pub use crate::Vec2;
}
