//! Particle records for both effects.
//!
//! Fireworks keep rising projectiles and falling sparks in one homogeneous
//! store, tagged by [`FireworkParticle`]. Text particles are a separate record
//! living in their own store.
//!
//! | Kind | Motion | Dies when |
//! |------|--------|-----------|
//! | [`Projectile`] | straight line, exponential speed ramp | it has covered the launch distance |
//! | [`Spark`] | friction + gravity along a random heading | alpha would fade past zero |
//! | [`TextParticle`] | pointer repulsion, spring back home | never (replaced on re-seed) |

use crate::color::Rgba;
use crate::trail::Trail;
use glam::Vec2;

/// Default number of trail points for projectiles.
pub const PROJECTILE_TRAIL: usize = 3;
/// Default number of trail points for sparks.
pub const SPARK_TRAIL: usize = 5;

/// A rising firework shell travelling toward its burst point.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Current position.
    pub position: Vec2,
    /// Launch point.
    pub start: Vec2,
    /// Burst point.
    pub target: Vec2,
    /// Straight-line distance from `start` to `target`.
    pub distance_to_target: f32,
    /// Distance from `start` measured at the last update.
    pub distance_traveled: f32,
    /// Heading in radians, fixed at launch.
    pub angle: f32,
    pub speed: f32,
    /// Multiplied into `speed` every tick.
    pub acceleration: f32,
    /// Hue in degrees; sparks inherit it.
    pub hue: f32,
    /// Lightness percentage used for the stroke.
    pub brightness: f32,
    pub trail: Trail,
}

impl Projectile {
    /// Shell launched from `start` toward `target`.
    ///
    /// Defaults: speed 2, acceleration 1.05, brightness 60%, 3-point trail.
    pub fn new(start: Vec2, target: Vec2, hue: f32) -> Self {
        let delta = target - start;
        Self {
            position: start,
            start,
            target,
            distance_to_target: delta.length(),
            distance_traveled: 0.0,
            angle: delta.y.atan2(delta.x),
            speed: 2.0,
            acceleration: 1.05,
            hue,
            brightness: 60.0,
            trail: Trail::new(start, PROJECTILE_TRAIL),
        }
    }

    /// Set the initial speed and per-tick acceleration factor.
    pub fn with_speed(mut self, speed: f32, acceleration: f32) -> Self {
        self.speed = speed;
        self.acceleration = acceleration;
        self
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_trail_length(mut self, len: usize) -> Self {
        self.trail = Trail::new(self.position, len);
        self
    }

    /// Velocity for the current speed along the fixed heading.
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.speed
    }
}

/// A burst fragment: fades out while falling under gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    /// Heading in radians.
    pub angle: f32,
    pub speed: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Lightness percentage.
    pub brightness: f32,
    /// Opacity, starts at 1.
    pub alpha: f32,
    /// Subtracted from `alpha` every tick.
    pub decay: f32,
    pub trail: Trail,
}

impl Spark {
    /// Spark at `origin` moving along `angle` at `speed`.
    ///
    /// Defaults: brightness 65%, decay 0.0125, 5-point trail.
    pub fn new(origin: Vec2, hue: f32, angle: f32, speed: f32) -> Self {
        Self {
            position: origin,
            angle,
            speed,
            hue,
            brightness: 65.0,
            alpha: 1.0,
            decay: 0.0125,
            trail: Trail::new(origin, SPARK_TRAIL),
        }
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_trail_length(mut self, len: usize) -> Self {
        self.trail = Trail::new(self.position, len);
        self
    }
}

/// Tagged particle record held by the fireworks store.
#[derive(Debug, Clone, PartialEq)]
pub enum FireworkParticle {
    Projectile(Projectile),
    Spark(Spark),
}

impl FireworkParticle {
    pub fn position(&self) -> Vec2 {
        match self {
            FireworkParticle::Projectile(p) => p.position,
            FireworkParticle::Spark(s) => s.position,
        }
    }

    pub fn trail(&self) -> &Trail {
        match self {
            FireworkParticle::Projectile(p) => &p.trail,
            FireworkParticle::Spark(s) => &s.trail,
        }
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self, FireworkParticle::Projectile(_))
    }

    pub fn is_spark(&self) -> bool {
        matches!(self, FireworkParticle::Spark(_))
    }
}

impl From<Projectile> for FireworkParticle {
    fn from(p: Projectile) -> Self {
        FireworkParticle::Projectile(p)
    }
}

impl From<Spark> for FireworkParticle {
    fn from(s: Spark) -> Self {
        FireworkParticle::Spark(s)
    }
}

/// One sample of the text mask, drifting around its home coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParticle {
    pub position: Vec2,
    /// Resting coordinate the spring pulls toward.
    pub home: Vec2,
    /// Disc radius in pixels.
    pub size: f32,
    pub color: Rgba,
    /// Scales how far the pointer pushes this particle.
    pub density: f32,
}

impl TextParticle {
    pub fn new(position: Vec2, home: Vec2, color: Rgba, density: f32) -> Self {
        Self {
            position,
            home,
            size: 2.0,
            color,
            density,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Distance still to cover before resting at home.
    pub fn offset_from_home(&self) -> Vec2 {
        self.position - self.home
    }
}
