//! Particle emitters.
//!
//! | Type | Trigger | Produces |
//! |------|---------|----------|
//! | [`LaunchEmitter`] | tick counter reaching a random threshold | one [`Projectile`] from the bottom edge |
//! | [`FieldEmitter`] | text or viewport change | one [`TextParticle`] per retained mask sample |
//!
//! Bursts of sparks at a projectile's target come from
//! [`SparkBurst`](crate::burst::SparkBurst).
//!
//! # Example
//!
//! ```ignore
//! let mut launcher = LaunchEmitter::from_config(&FireworksConfig::default());
//! if let Some(shell) = launcher.tick(viewport, hue, &mut rng) {
//!     store.insert(shell.into());
//! }
//! ```

use crate::color::Rgba;
use crate::config::{FireworksConfig, TextConfig};
use crate::glyph::GlyphMask;
use crate::particle::{Projectile, TextParticle};
use crate::rng::SimRng;
use crate::viewport::Viewport;
use glam::Vec2;
use std::ops::{Range, RangeInclusive};

/// Spawns a projectile every few ticks.
///
/// Each launch starts at a random x on the bottom edge and aims at a random
/// point in the upper half of the viewport. The wait before the next launch
/// is re-drawn after every launch.
#[derive(Debug, Clone)]
pub struct LaunchEmitter {
    ticks_since_launch: u32,
    next_interval: u32,
    interval: RangeInclusive<u32>,
    speed: f32,
    acceleration: f32,
    brightness: Range<f32>,
    trail: usize,
}

impl LaunchEmitter {
    pub fn from_config(config: &FireworksConfig) -> Self {
        Self {
            ticks_since_launch: 0,
            next_interval: config.first_launch_interval,
            interval: config.launch_interval.clone(),
            speed: config.launch_speed,
            acceleration: config.launch_acceleration,
            brightness: config.projectile_brightness.clone(),
            trail: config.projectile_trail,
        }
    }

    /// Ticks counted since the last launch.
    pub fn ticks_since_launch(&self) -> u32 {
        self.ticks_since_launch
    }

    /// Threshold the counter must reach before the next launch.
    pub fn next_interval(&self) -> u32 {
        self.next_interval
    }

    /// Advance the launch timer by one tick.
    ///
    /// Launches when the counter has reached the threshold, resetting the
    /// counter and drawing a new threshold; otherwise counts up.
    pub fn tick(&mut self, viewport: Viewport, hue: f32, rng: &mut SimRng) -> Option<Projectile> {
        if self.ticks_since_launch >= self.next_interval {
            let shell = self.launch(viewport, hue, rng);
            self.next_interval = rng.sample_ticks(&self.interval);
            self.ticks_since_launch = 0;
            Some(shell)
        } else {
            self.ticks_since_launch += 1;
            None
        }
    }

    /// Build one projectile without touching the timer.
    pub fn launch(&self, viewport: Viewport, hue: f32, rng: &mut SimRng) -> Projectile {
        let (w, h) = (viewport.width_f32(), viewport.height_f32());
        let start = Vec2::new(rng.random_range(0.0, w), h);
        let target = Vec2::new(rng.random_range(0.0, w), rng.random_range(0.0, h / 2.0));

        log::debug!(
            "launch from ({:.0}, {:.0}) toward ({:.0}, {:.0}) hue {:.1}",
            start.x,
            start.y,
            target.x,
            target.y,
            hue
        );

        Projectile::new(start, target, hue)
            .with_speed(self.speed, self.acceleration)
            .with_brightness(rng.sample(&self.brightness))
            .with_trail_length(self.trail)
    }
}

/// A retained sample of a glyph mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSample {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Straight RGBA of the sampled pixel.
    pub rgba: [u8; 4],
}

impl MaskSample {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Seeds one particle per sufficiently opaque sample of a glyph mask.
///
/// Sampling is a pure function of the mask; only start positions, colors and
/// densities draw from the random source.
#[derive(Debug, Clone)]
pub struct FieldEmitter {
    step: u32,
    alpha_threshold: u8,
    accent: Rgba,
    accent_probability: f32,
    density: Range<f32>,
    particle_radius: f32,
}

impl FieldEmitter {
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            step: config.grid_step.max(1),
            alpha_threshold: config.alpha_threshold,
            accent: config.accent,
            accent_probability: config.accent_probability,
            density: config.density.clone(),
            particle_radius: config.particle_radius,
        }
    }

    /// Grid stride in pixels.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Walk the mask on the sampling grid, keeping samples whose alpha
    /// exceeds the threshold. Row-major, top to bottom.
    pub fn samples(&self, mask: &GlyphMask) -> Vec<MaskSample> {
        let step = self.step as usize;
        let mut kept = Vec::new();
        for y in (0..mask.height()).step_by(step) {
            for x in (0..mask.width()).step_by(step) {
                let rgba = mask.rgba(x, y);
                if rgba[3] > self.alpha_threshold {
                    kept.push(MaskSample { x, y, rgba });
                }
            }
        }
        kept
    }

    /// Build the particle population for `mask`.
    ///
    /// Every particle starts at a uniformly random point of `viewport` and is
    /// homed on its sample. Colors take the accent with the configured
    /// probability and the sampled pixel otherwise.
    pub fn seed(&self, mask: &GlyphMask, viewport: Viewport, rng: &mut SimRng) -> Vec<TextParticle> {
        self.samples(mask)
            .into_iter()
            .map(|sample| {
                let color = if rng.chance(self.accent_probability) {
                    self.accent
                } else {
                    let [r, g, b, _] = sample.rgba;
                    Rgba::from_rgb8(r, g, b)
                };
                let start = rng.point_in(viewport);
                let density = rng.sample(&self.density);
                TextParticle::new(start, sample.position(), color, density).with_size(self.particle_radius)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(vp: Viewport, min: u32, max: u32) -> GlyphMask {
        let mut mask = GlyphMask::new(vp);
        for y in min..max {
            for x in min..max {
                mask.cover(x, y, [255, 255, 255], 255);
            }
        }
        mask
    }

    #[test]
    fn test_first_launch_after_initial_interval() {
        let config = FireworksConfig::default();
        let mut launcher = LaunchEmitter::from_config(&config);
        let mut rng = SimRng::seeded(5);
        let vp = Viewport::new(800, 600);

        for _ in 0..30 {
            assert!(launcher.tick(vp, 120.0, &mut rng).is_none());
        }
        let shell = launcher.tick(vp, 120.0, &mut rng).expect("launch on tick 31");
        assert_eq!(shell.start.y, 600.0);
        assert!(shell.target.y >= 0.0 && shell.target.y < 300.0);
        assert!((50.0..70.0).contains(&shell.brightness));
        assert_eq!(launcher.ticks_since_launch(), 0);
        assert!((15..=40).contains(&launcher.next_interval()));
    }

    #[test]
    fn test_launch_cadence_stays_in_range() {
        let config = FireworksConfig::default().with_first_launch(0);
        let mut launcher = LaunchEmitter::from_config(&config);
        let mut rng = SimRng::seeded(11);
        let vp = Viewport::new(800, 600);

        let mut last = None;
        for tick in 0..2000u32 {
            if launcher.tick(vp, 0.0, &mut rng).is_some() {
                if let Some(prev) = last {
                    let gap = tick - prev;
                    assert!((16..=41).contains(&gap), "gap {gap}");
                }
                last = Some(tick);
            }
        }
    }

    #[test]
    fn test_samples_on_grid_above_threshold() {
        let vp = Viewport::new(64, 64);
        let mask = square_mask(vp, 10, 30);
        let emitter = FieldEmitter::from_config(&TextConfig::default());
        let samples = emitter.samples(&mask);

        // Grid columns/rows in [10, 30) with stride 4: 12, 16, 20, 24, 28
        assert_eq!(samples.len(), 25);
        assert!(samples.iter().all(|s| s.x % 4 == 0 && s.y % 4 == 0));
    }

    #[test]
    fn test_threshold_is_strict() {
        let vp = Viewport::new(8, 8);
        let mut mask = GlyphMask::new(vp);
        mask.cover(0, 0, [255, 255, 255], 128);
        mask.cover(4, 0, [255, 255, 255], 129);
        let emitter = FieldEmitter::from_config(&TextConfig::default());
        let samples = emitter.samples(&mask);
        assert_eq!(samples.len(), 1);
        assert_eq!((samples[0].x, samples[0].y), (4, 0));
    }

    #[test]
    fn test_seed_homes_and_colors() {
        let vp = Viewport::new(64, 64);
        let mask = square_mask(vp, 0, 64);
        let config = TextConfig::default().with_accent(Rgba::new(1.0, 0.0, 0.0, 1.0), 0.0);
        let emitter = FieldEmitter::from_config(&config);
        let mut rng = SimRng::seeded(2);
        let particles = emitter.seed(&mask, vp, &mut rng);

        assert_eq!(particles.len(), 16 * 16);
        for p in &particles {
            assert_eq!(p.color, Rgba::WHITE);
            assert!(p.position.x < 64.0 && p.position.y < 64.0);
            assert!((1.0..31.0).contains(&p.density));
            assert_eq!(p.size, 2.0);
        }
    }

    #[test]
    fn test_accent_probability_one() {
        let vp = Viewport::new(16, 16);
        let mask = square_mask(vp, 0, 16);
        let accent = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let emitter = FieldEmitter::from_config(&TextConfig::default().with_accent(accent, 1.0));
        let particles = emitter.seed(&mask, vp, &mut SimRng::seeded(0));
        assert!(particles.iter().all(|p| p.color == accent));
    }
}
