//! Fireworks: shells launched from the bottom edge that burst into sparks.
//!
//! One [`ParticleStore`] holds both kinds of particle. Every tick:
//!
//! 1. The global hue drifts by `hue_drift` degrees (wrapping at 360).
//! 2. Each projectile ramps its speed; one that has covered its launch
//!    distance is removed and a [`SparkBurst`] is released at its target.
//! 3. Each spark slows, falls and fades; a spark too faint for another tick
//!    is removed.
//! 4. The launch timer counts up and may fire a new projectile tagged with
//!    the current hue.
//!
//! Sparks released in step 2 join the store after the update pass, so they
//! start moving on the following tick.
//!
//! ```ignore
//! let mut fireworks = Fireworks::new(FireworksConfig::default());
//! fireworks.resize(Viewport::new(800, 600), &mut rng);
//! let report = fireworks.advance(&mut rng);
//! ```

use crate::burst::SparkBurst;
use crate::canvas::{Canvas, CompositeOp};
use crate::color::{wrap_hue, Hsla, Rgba};
use crate::config::FireworksConfig;
use crate::effect::Effect;
use crate::emitter::LaunchEmitter;
use crate::force::{advance_projectile, BallisticDecay, Flight};
use crate::input::Pointer;
use crate::particle::{FireworkParticle, Projectile};
use crate::rng::SimRng;
use crate::store::{Fate, ParticleStore};
use crate::viewport::Viewport;
use glam::Vec2;

/// What happened during one [`Fireworks::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A new projectile left the bottom edge.
    pub launched: bool,
    /// Projectiles that reached their target and burst.
    pub explosions: usize,
    /// Sparks that faded out.
    pub expired: usize,
}

/// The fireworks effect.
#[derive(Debug, Clone)]
pub struct Fireworks {
    config: FireworksConfig,
    viewport: Viewport,
    launcher: LaunchEmitter,
    burst: SparkBurst,
    decay: BallisticDecay,
    hue: f32,
    store: ParticleStore<FireworkParticle>,
}

impl Fireworks {
    pub fn new(config: FireworksConfig) -> Self {
        Self {
            launcher: LaunchEmitter::from_config(&config),
            burst: SparkBurst::from_config(&config),
            decay: BallisticDecay::new(config.friction, config.gravity),
            hue: wrap_hue(config.start_hue),
            viewport: Viewport::default(),
            store: ParticleStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    /// Global hue in degrees, always in `[0, 360)`.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn launcher(&self) -> &LaunchEmitter {
        &self.launcher
    }

    pub fn store(&self) -> &ParticleStore<FireworkParticle> {
        &self.store
    }

    /// Number of projectiles still climbing.
    pub fn projectile_count(&self) -> usize {
        self.store.iter().filter(|p| p.is_projectile()).count()
    }

    /// Number of live sparks.
    pub fn spark_count(&self) -> usize {
        self.store.iter().filter(|p| p.is_spark()).count()
    }

    /// Add a projectile by hand, bypassing the launch timer.
    pub fn spawn(&mut self, projectile: Projectile) {
        self.store.insert(projectile.into());
    }

    /// Advance the simulation one tick without drawing.
    pub fn advance(&mut self, rng: &mut SimRng) -> TickReport {
        self.hue = wrap_hue(self.hue + self.config.hue_drift);

        let decay = self.decay;
        let mut bursts: Vec<(Vec2, f32)> = Vec::new();
        let removed = self.store.update(|particle| match particle {
            FireworkParticle::Projectile(shell) => match advance_projectile(shell) {
                Flight::Cruising => Fate::Keep,
                Flight::Arrived => {
                    bursts.push((shell.target, shell.hue));
                    Fate::Remove
                }
            },
            FireworkParticle::Spark(spark) => decay.apply(spark),
        });

        for &(target, hue) in &bursts {
            log::trace!("burst at ({:.0}, {:.0}) hue {:.1}", target.x, target.y, hue);
            self.store
                .extend(self.burst.emit(target, hue, rng).map(FireworkParticle::from));
        }

        let launched = match self.launcher.tick(self.viewport, self.hue, rng) {
            Some(shell) => {
                self.store.insert(shell.into());
                true
            }
            None => false,
        };

        TickReport {
            launched,
            explosions: bursts.len(),
            expired: removed - bursts.len(),
        }
    }

    /// Erase a fraction of everything on the canvas so old strokes fade.
    pub fn fade(&self, canvas: &mut Canvas) {
        canvas.set_composite(CompositeOp::DestinationOut);
        canvas.fill(Rgba::BLACK.with_alpha(self.config.fade_alpha));
    }

    /// Stroke every particle from its oldest trail point to its position
    /// using the canvas' current composite op.
    pub fn draw(&self, canvas: &mut Canvas) {
        let width = self.config.line_width;
        for particle in &self.store {
            let color: Rgba = match particle {
                FireworkParticle::Projectile(p) => Hsla::vivid(p.hue, p.brightness, 1.0).into(),
                FireworkParticle::Spark(s) => Hsla::vivid(s.hue, s.brightness, s.alpha).into(),
            };
            canvas.stroke_line(particle.trail().oldest(), particle.position(), width, color);
        }
    }
}

impl Effect for Fireworks {
    fn name(&self) -> &str {
        "fireworks"
    }

    fn tick(&mut self, canvas: &mut Canvas, _pointer: &Pointer, rng: &mut SimRng) {
        self.fade(canvas);
        canvas.set_composite(CompositeOp::Lighter);
        self.draw(canvas);
        self.advance(rng);
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.set_composite(CompositeOp::Lighter);
        self.draw(canvas);
    }

    /// Only the launch bounds change; live particles keep their coordinates.
    fn resize(&mut self, viewport: Viewport, _rng: &mut SimRng) {
        self.viewport = viewport;
    }

    fn particle_count(&self) -> usize {
        self.store.len()
    }
}
