//! Particle text: a message drawn as a cloud of discs that flee the pointer.
//!
//! Whenever the message or the viewport changes, the text is rasterized, the
//! mask is sampled on a coarse grid and the whole particle set is replaced.
//! Each particle then springs toward its sample point, unless the pointer is
//! close enough to push it away.
//!
//! ```ignore
//! let raster = FontRasterizer::load("fonts/Bold.ttf")?;
//! let mut text = ParticleText::new(raster, TextConfig::default().with_text("HELLO"));
//! text.resize(Viewport::new(800, 600), &mut rng);
//! text.advance(pointer.position());
//! ```

use crate::canvas::{Canvas, CompositeOp};
use crate::config::TextConfig;
use crate::effect::Effect;
use crate::emitter::FieldEmitter;
use crate::error::FontError;
use crate::force::RepulsionHoming;
use crate::glyph::{FontRasterizer, TextRasterizer};
use crate::input::Pointer;
use crate::particle::TextParticle;
use crate::rng::SimRng;
use crate::store::ParticleStore;
use crate::viewport::Viewport;
use glam::Vec2;

/// The particle text effect.
pub struct ParticleText {
    config: TextConfig,
    rasterizer: Box<dyn TextRasterizer>,
    emitter: FieldEmitter,
    force: RepulsionHoming,
    text: String,
    viewport: Viewport,
    store: ParticleStore<TextParticle>,
}

impl ParticleText {
    /// Effect rendering `config.text` with `rasterizer`.
    ///
    /// No particles exist until the first [`resize`](Effect::resize) supplies
    /// a viewport.
    pub fn new(rasterizer: impl TextRasterizer + 'static, config: TextConfig) -> Self {
        Self {
            rasterizer: Box::new(rasterizer),
            emitter: FieldEmitter::from_config(&config),
            force: RepulsionHoming::new(config.influence_radius, config.return_rate),
            text: config.text.clone(),
            viewport: Viewport::default(),
            store: ParticleStore::new(),
            config,
        }
    }

    /// Effect using the font named by `config.font_path`.
    pub fn from_config(config: TextConfig) -> Result<Self, FontError> {
        let path = config.font_path.as_ref().ok_or(FontError::NoFontPath)?;
        let raster = FontRasterizer::load(path)?;
        Ok(Self::new(raster, config))
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Message currently displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn store(&self) -> &ParticleStore<TextParticle> {
        &self.store
    }

    /// Replace the message. Re-seeds only if it actually changed.
    pub fn replace_text(&mut self, text: &str, rng: &mut SimRng) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text.to_string();
        self.reseed(rng);
        true
    }

    /// Discard every particle and seed a fresh set from the current message
    /// and viewport. Returns the new particle count.
    pub fn reseed(&mut self, rng: &mut SimRng) -> usize {
        if !self.viewport.is_valid() {
            self.store.clear();
            return 0;
        }

        let font_size = self.config.font_size(self.viewport.width);
        let mask = self
            .rasterizer
            .rasterize(&self.text, font_size, self.viewport, self.config.fill);
        let particles = self.emitter.seed(&mask, self.viewport, rng);
        log::debug!(
            "seeded {} particles for {:?} at {}x{} ({:.0}px)",
            particles.len(),
            self.text,
            self.viewport.width,
            self.viewport.height,
            font_size
        );
        self.store.replace(particles);
        self.store.len()
    }

    /// Move every particle one tick against the pointer at `pointer`.
    pub fn advance(&mut self, pointer: Vec2) {
        let force = self.force;
        for particle in self.store.iter_mut() {
            force.apply(particle, pointer);
        }
    }

    /// Paint every particle as a disc using the canvas' current composite op.
    pub fn draw(&self, canvas: &mut Canvas) {
        for p in &self.store {
            canvas.fill_disc(p.position, p.size, p.color);
        }
    }
}

impl Effect for ParticleText {
    fn name(&self) -> &str {
        "particle-text"
    }

    fn tick(&mut self, canvas: &mut Canvas, pointer: &Pointer, _rng: &mut SimRng) {
        canvas.clear();
        canvas.set_composite(CompositeOp::SourceOver);
        self.advance(pointer.position());
        self.draw(canvas);
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.set_composite(CompositeOp::SourceOver);
        self.draw(canvas);
    }

    fn resize(&mut self, viewport: Viewport, rng: &mut SimRng) {
        self.viewport = viewport;
        self.reseed(rng);
    }

    fn set_text(&mut self, text: &str, rng: &mut SimRng) {
        self.replace_text(text, rng);
    }

    fn particle_count(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for ParticleText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleText")
            .field("text", &self.text)
            .field("viewport", &self.viewport)
            .field("particles", &self.store.len())
            .finish_non_exhaustive()
    }
}
