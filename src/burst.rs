//! Spark bursts spawned where a projectile arrives.
//!
//! A burst is the fireworks' secondary emitter: when a shell reaches its
//! target it is removed from the store and replaced by `count` sparks at the
//! same point. Each spark picks its own heading, speed, hue offset,
//! brightness and decay.
//!
//! # Example
//!
//! ```ignore
//! let burst = SparkBurst::new(150)
//!     .hue_spread(20.0)
//!     .speed(1.0..15.0)
//!     .decay(0.005..0.02);
//! store.extend(burst.emit(target, shell.hue, &mut rng).map(Into::into));
//! ```

use crate::config::FireworksConfig;
use crate::particle::{Spark, SPARK_TRAIL};
use crate::rng::SimRng;
use glam::Vec2;
use std::f32::consts::TAU;
use std::ops::Range;

/// Configuration for the sparks released by one explosion.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkBurst {
    /// Number of sparks per explosion.
    pub count: u32,
    /// Spark hue is drawn within `± hue_spread` degrees of the shell's hue.
    pub hue_spread: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub brightness_min: f32,
    pub brightness_max: f32,
    /// Alpha lost per tick; sets the spark's lifespan.
    pub decay_min: f32,
    pub decay_max: f32,
    pub trail: usize,
}

impl SparkBurst {
    /// Burst of `count` sparks with the classic firework ranges.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            hue_spread: 20.0,
            speed_min: 1.0,
            speed_max: 15.0,
            brightness_min: 50.0,
            brightness_max: 80.0,
            decay_min: 0.005,
            decay_max: 0.02,
            trail: SPARK_TRAIL,
        }
    }

    pub fn from_config(config: &FireworksConfig) -> Self {
        Self::new(config.sparks_per_burst)
            .hue_spread(config.spark_hue_spread)
            .speed(config.spark_speed.clone())
            .brightness(config.spark_brightness.clone())
            .decay(config.spark_decay.clone())
            .trail(config.spark_trail)
    }

    pub fn hue_spread(mut self, degrees: f32) -> Self {
        self.hue_spread = degrees;
        self
    }

    pub fn speed(mut self, range: Range<f32>) -> Self {
        self.speed_min = range.start;
        self.speed_max = range.end;
        self
    }

    pub fn brightness(mut self, range: Range<f32>) -> Self {
        self.brightness_min = range.start;
        self.brightness_max = range.end;
        self
    }

    pub fn decay(mut self, range: Range<f32>) -> Self {
        self.decay_min = range.start;
        self.decay_max = range.end;
        self
    }

    pub fn trail(mut self, len: usize) -> Self {
        self.trail = len;
        self
    }

    /// Sparks for one explosion at `origin`.
    pub fn emit<'a>(
        &'a self,
        origin: Vec2,
        hue: f32,
        rng: &'a mut SimRng,
    ) -> impl Iterator<Item = Spark> + 'a {
        (0..self.count).map(move |_| {
            let spark_hue = rng.random_range(hue - self.hue_spread, hue + self.hue_spread);
            let angle = rng.random_range(0.0, TAU);
            let speed = rng.random_range(self.speed_min, self.speed_max);
            Spark::new(origin, spark_hue, angle, speed)
                .with_brightness(rng.random_range(self.brightness_min, self.brightness_max))
                .with_decay(rng.random_range(self.decay_min, self.decay_max))
                .with_trail_length(self.trail)
        })
    }
}

impl Default for SparkBurst {
    fn default() -> Self {
        Self::new(150)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_builder() {
        let burst = SparkBurst::new(50)
            .hue_spread(10.0)
            .speed(2.0..4.0)
            .decay(0.01..0.02)
            .trail(7);
        assert_eq!(burst.count, 50);
        assert_eq!(burst.speed_min, 2.0);
        assert_eq!(burst.speed_max, 4.0);
        assert_eq!(burst.trail, 7);
    }

    #[test]
    fn test_emit_ranges() {
        let burst = SparkBurst::default();
        let mut rng = SimRng::seeded(17);
        let origin = Vec2::new(200.0, 100.0);
        let sparks: Vec<Spark> = burst.emit(origin, 180.0, &mut rng).collect();

        assert_eq!(sparks.len(), 150);
        for s in &sparks {
            assert_eq!(s.position, origin);
            assert_eq!(s.alpha, 1.0);
            assert_eq!(s.trail.len(), 5);
            assert!((160.0..200.0).contains(&s.hue));
            assert!((0.0..TAU).contains(&s.angle));
            assert!((1.0..15.0).contains(&s.speed));
            assert!((50.0..80.0).contains(&s.brightness));
            assert!((0.005..0.02).contains(&s.decay));
        }
    }
}
