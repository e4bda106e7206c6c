//! Per-particle motion rules.
//!
//! Two policies drive the effects:
//!
//! - **Ballistic** for fireworks: projectiles ramp their speed along a fixed
//!   heading until they cover the launch distance; sparks slow by friction,
//!   fall under gravity and fade by a fixed decay per tick.
//! - **Repulsion-homing** for text: inside the pointer's influence radius a
//!   particle is pushed away with a linear falloff scaled by its density,
//!   outside it springs a fixed fraction of the way back home each tick.
//!
//! All rules are unit-less and tick-based: one call equals one display frame.

use crate::particle::{Projectile, Spark, TextParticle};
use crate::store::Fate;
use glam::Vec2;

/// Outcome of a projectile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    /// Still travelling; position advanced this tick.
    Cruising,
    /// Covered the launch distance; should burst at its target.
    Arrived,
}

/// Advance a projectile by one tick.
///
/// Records the trail, ramps the speed, then measures how far the shell is
/// from its launch point. Once that distance reaches the launch-to-target
/// distance the shell stops moving and reports [`Flight::Arrived`].
pub fn advance_projectile(p: &mut Projectile) -> Flight {
    p.trail.push(p.position);
    p.speed *= p.acceleration;
    let velocity = p.velocity();

    p.distance_traveled = p.start.distance(p.position);
    if p.distance_traveled >= p.distance_to_target {
        return Flight::Arrived;
    }

    p.position += velocity;
    Flight::Cruising
}

/// Friction, gravity and fade applied to sparks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticDecay {
    /// Multiplied into speed every tick.
    pub friction: f32,
    /// Added to the downward displacement every tick.
    pub gravity: f32,
}

impl BallisticDecay {
    pub fn new(friction: f32, gravity: f32) -> Self {
        Self { friction, gravity }
    }

    /// Advance a spark by one tick.
    ///
    /// The spark is removed once its remaining alpha is no larger than its
    /// decay, i.e. the next tick would take it to zero or below. Alpha is
    /// therefore always positive while the spark is alive.
    pub fn apply(&self, s: &mut Spark) -> Fate {
        s.trail.push(s.position);
        s.speed *= self.friction;
        s.position += Vec2::from_angle(s.angle) * s.speed + Vec2::new(0.0, self.gravity);
        s.alpha -= s.decay;

        if s.alpha <= s.decay {
            Fate::Remove
        } else {
            Fate::Keep
        }
    }
}

impl Default for BallisticDecay {
    fn default() -> Self {
        Self::new(0.95, 1.0)
    }
}

/// Pointer push plus spring return used by text particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionHoming {
    /// Distance within which the pointer pushes.
    pub radius: f32,
    /// Fraction of the home offset recovered per tick.
    pub return_rate: f32,
}

impl RepulsionHoming {
    pub fn new(radius: f32, return_rate: f32) -> Self {
        Self {
            radius,
            return_rate,
        }
    }

    /// Displacement the pointer applies to a particle at `position`.
    ///
    /// Returns `None` outside the influence radius. Inside, the magnitude is
    /// `(radius - distance) / radius * density` pointing away from the
    /// pointer. A particle exactly under the pointer has no direction and is
    /// not moved.
    pub fn repulsion(&self, position: Vec2, pointer: Vec2, density: f32) -> Option<Vec2> {
        let toward_pointer = pointer - position;
        let distance = toward_pointer.length();
        if !(distance < self.radius) {
            return None;
        }
        if distance <= f32::EPSILON {
            return Some(Vec2::ZERO);
        }

        let falloff = (self.radius - distance) / self.radius;
        Some(-(toward_pointer / distance) * falloff * density)
    }

    /// Displacement that pulls a particle back toward `home`.
    pub fn spring(&self, position: Vec2, home: Vec2) -> Vec2 {
        (home - position) * self.return_rate
    }

    /// Advance a text particle by one tick against the pointer at `pointer`.
    pub fn apply(&self, p: &mut TextParticle, pointer: Vec2) {
        match self.repulsion(p.position, pointer, p.density) {
            Some(push) => p.position += push,
            None => p.position += self.spring(p.position, p.home),
        }
    }
}

impl Default for RepulsionHoming {
    fn default() -> Self {
        Self::new(80.0, 0.1)
    }
}
