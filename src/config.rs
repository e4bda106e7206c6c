//! Scene configuration.
//!
//! Every tunable constant of the effects lives here with its default value,
//! so a scene can be reshaped from a JSON file without touching code.
//! Missing fields fall back to their defaults.
//!
//! ```ignore
//! let config = SceneConfig::load("scene.json")?;
//! let fireworks = Fireworks::new(config.fireworks.clone());
//! ```
//!
//! A minimal file:
//!
//! ```json
//! {
//!   "fireworks": { "sparks_per_burst": 200, "gravity": 0.6 },
//!   "text": { "text": "HELLO", "accent_probability": 0.35 }
//! }
//! ```

use crate::color::Rgba;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};
use std::path::{Path, PathBuf};

/// Launch, burst and fade settings for the fireworks layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Ticks between launches, re-drawn after every launch.
    pub launch_interval: RangeInclusive<u32>,
    /// Ticks before the first launch.
    pub first_launch_interval: u32,
    /// Global hue at start, in degrees.
    pub start_hue: f32,
    /// Degrees added to the global hue every tick.
    pub hue_drift: f32,
    /// Initial projectile speed.
    pub launch_speed: f32,
    /// Factor multiplied into projectile speed every tick.
    pub launch_acceleration: f32,
    /// Projectile stroke lightness in percent.
    pub projectile_brightness: Range<f32>,
    pub projectile_trail: usize,
    /// Sparks spawned by each burst.
    pub sparks_per_burst: u32,
    /// Sparks pick a hue within this many degrees of the shell's hue.
    pub spark_hue_spread: f32,
    pub spark_speed: Range<f32>,
    pub friction: f32,
    pub gravity: f32,
    /// Spark stroke lightness in percent.
    pub spark_brightness: Range<f32>,
    /// Alpha lost per tick, drawn per spark.
    pub spark_decay: Range<f32>,
    pub spark_trail: usize,
    /// Opacity of the per-tick erase that produces motion trails.
    pub fade_alpha: f32,
    pub line_width: f32,
    /// Opacity of the whole layer when composited.
    pub opacity: f32,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            launch_interval: 15..=40,
            first_launch_interval: 30,
            start_hue: 120.0,
            hue_drift: 0.5,
            launch_speed: 2.0,
            launch_acceleration: 1.05,
            projectile_brightness: 50.0..70.0,
            projectile_trail: 3,
            sparks_per_burst: 150,
            spark_hue_spread: 20.0,
            spark_speed: 1.0..15.0,
            friction: 0.95,
            gravity: 1.0,
            spark_brightness: 50.0..80.0,
            spark_decay: 0.005..0.02,
            spark_trail: 5,
            fade_alpha: 0.2,
            line_width: 1.0,
            opacity: 0.8,
        }
    }
}

impl FireworksConfig {
    pub fn with_launch_interval(mut self, ticks: RangeInclusive<u32>) -> Self {
        self.launch_interval = ticks;
        self
    }

    pub fn with_first_launch(mut self, ticks: u32) -> Self {
        self.first_launch_interval = ticks;
        self
    }

    pub fn with_sparks_per_burst(mut self, count: u32) -> Self {
        self.sparks_per_burst = count;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_spark_decay(mut self, decay: Range<f32>) -> Self {
        self.spark_decay = decay;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Check ranges and factors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launch_interval.start() > self.launch_interval.end() {
            return Err(invalid("fireworks.launch_interval start exceeds end"));
        }
        check_range("fireworks.projectile_brightness", &self.projectile_brightness)?;
        check_range("fireworks.spark_speed", &self.spark_speed)?;
        check_range("fireworks.spark_brightness", &self.spark_brightness)?;
        check_range("fireworks.spark_decay", &self.spark_decay)?;
        if self.spark_decay.start <= 0.0 {
            return Err(invalid("fireworks.spark_decay must be positive"));
        }
        if self.launch_acceleration < 1.0 || self.launch_speed <= 0.0 {
            return Err(invalid(
                "fireworks.launch_speed must be positive and launch_acceleration at least 1",
            ));
        }
        check_unit("fireworks.fade_alpha", self.fade_alpha)?;
        check_unit("fireworks.opacity", self.opacity)?;
        check_unit("fireworks.friction", self.friction)?;
        Ok(())
    }
}

/// Rasterization, sampling and force settings for the particle text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Initial message.
    pub text: String,
    /// Bold TrueType/OpenType font used to rasterize the message.
    pub font_path: Option<PathBuf>,
    /// Sampling stride in pixels, both axes.
    pub grid_step: u32,
    /// Samples with alpha strictly above this become particles.
    pub alpha_threshold: u8,
    /// Font size as a fraction of viewport width.
    pub font_scale: f32,
    /// Upper bound on font size in pixels.
    pub max_font_size: f32,
    /// Pointer influence radius in pixels.
    pub influence_radius: f32,
    /// Fraction of the home offset recovered per tick.
    pub return_rate: f32,
    /// Per-particle repulsion weight.
    pub density: Range<f32>,
    /// Disc radius in pixels.
    pub particle_radius: f32,
    /// Color used to rasterize glyphs; only coverage matters.
    pub fill: Rgba,
    /// Occasional highlight color.
    pub accent: Rgba,
    /// Probability a particle takes the accent color.
    pub accent_probability: f32,
    /// Opacity of the whole layer when composited.
    pub opacity: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "HELLO".to_string(),
            font_path: None,
            grid_step: 4,
            alpha_threshold: 128,
            font_scale: 0.15,
            max_font_size: 150.0,
            influence_radius: 80.0,
            return_rate: 0.1,
            density: 1.0..31.0,
            particle_radius: 2.0,
            fill: Rgba::WHITE,
            accent: Rgba::new(1.0, 107.0 / 255.0, 107.0 / 255.0, 1.0),
            accent_probability: 0.2,
            opacity: 1.0,
        }
    }
}

impl TextConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_grid_step(mut self, step: u32) -> Self {
        self.grid_step = step;
        self
    }

    pub fn with_accent(mut self, color: Rgba, probability: f32) -> Self {
        self.accent = color;
        self.accent_probability = probability;
        self
    }

    pub fn with_influence_radius(mut self, radius: f32) -> Self {
        self.influence_radius = radius;
        self
    }

    /// Font size in pixels for a viewport of the given width.
    pub fn font_size(&self, viewport_width: u32) -> f32 {
        (viewport_width as f32 * self.font_scale).min(self.max_font_size)
    }

    /// Check ranges and factors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_step == 0 {
            return Err(invalid("text.grid_step must be at least 1"));
        }
        if self.influence_radius <= 0.0 {
            return Err(invalid("text.influence_radius must be positive"));
        }
        check_range("text.density", &self.density)?;
        check_unit("text.return_rate", self.return_rate)?;
        check_unit("text.accent_probability", self.accent_probability)?;
        check_unit("text.opacity", self.opacity)?;
        Ok(())
    }
}

/// Presentation window settings used by the demos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Seed for a reproducible run; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sparkfield".to_string(),
            width: 1280,
            height: 720,
            seed: None,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("window.width and window.height must be non-zero"));
        }
        Ok(())
    }
}

/// Complete scene: both layers plus the window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fireworks: FireworksConfig,
    pub text: TextConfig,
    pub window: WindowConfig,
}

impl SceneConfig {
    /// Parse and validate a JSON scene description.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded scene config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fireworks.validate()?;
        self.text.validate()?;
        self.window.validate()
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

fn check_range(name: &str, range: &Range<f32>) -> Result<(), ConfigError> {
    if range.start > range.end || !range.start.is_finite() || !range.end.is_finite() {
        return Err(ConfigError::Invalid(format!(
            "{name} must be a finite range with start <= end"
        )));
    }
    Ok(())
}

fn check_unit(name: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!("{name} must be within [0, 1]")));
    }
    Ok(())
}
