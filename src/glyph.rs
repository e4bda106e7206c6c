//! Text rasterization into coverage masks.
//!
//! A [`TextRasterizer`] renders a string centered in a viewport-sized RGBA
//! buffer. The field emitter only looks at the alpha channel, so the fill
//! color is a neutral constant.
//!
//! [`FontRasterizer`] uses `rusttype` with a caller-supplied font. Characters
//! the font lacks (emoji, CJK in a Latin font) are dropped before layout, so
//! they leave no coverage and take no space.
//!
//! ```ignore
//! let raster = FontRasterizer::load("assets/NotoSans-Bold.ttf")?;
//! let mask = raster.rasterize("OK", 120.0, Viewport::new(800, 600), Rgba::WHITE);
//! ```

use crate::color::Rgba;
use crate::error::FontError;
use crate::viewport::Viewport;
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Straight-alpha RGBA8 raster of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl GlyphMask {
    /// Fully transparent mask covering `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            pixels: vec![[0; 4]; viewport.area()],
        }
    }

    /// Wrap existing RGBA8 data. Returns `None` if the length does not match.
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: bytemuck::cast_slice(bytes).to_vec(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`; transparent outside the mask.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels[self.index(x, y)]
    }

    /// Paint `rgb` at `(x, y)` with coverage `alpha`, keeping the strongest
    /// coverage where glyphs overlap. Out-of-bounds writes are ignored.
    pub fn cover(&mut self, x: u32, y: u32, rgb: [u8; 3], alpha: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        if alpha > self.pixels[i][3] {
            self.pixels[i] = [rgb[0], rgb[1], rgb[2], alpha];
        }
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|px| px[3] > 0).count()
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Renders a string into a [`GlyphMask`].
pub trait TextRasterizer {
    /// Render `text` at `font_size` pixels, centered horizontally and
    /// vertically in a buffer the size of `viewport`, painted with `fill`.
    fn rasterize(&self, text: &str, font_size: f32, viewport: Viewport, fill: Rgba) -> GlyphMask;
}

/// `rusttype`-backed rasterizer.
pub struct FontRasterizer {
    font: Font<'static>,
}

impl FontRasterizer {
    /// Parse a TrueType/OpenType font from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let font = Font::try_from_vec(bytes).ok_or(FontError::Parse)?;
        Ok(Self { font })
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let bytes = std::fs::read(path.as_ref())?;
        let raster = Self::from_bytes(bytes)?;
        log::debug!("loaded font {}", path.as_ref().display());
        Ok(raster)
    }
}

impl TextRasterizer for FontRasterizer {
    fn rasterize(&self, text: &str, font_size: f32, viewport: Viewport, fill: Rgba) -> GlyphMask {
        let mut mask = GlyphMask::new(viewport);
        if !viewport.is_valid() || font_size <= 0.0 {
            return mask;
        }

        // rusttype maps unknown characters to .notdef, which draws as a box
        let text: String = text
            .chars()
            .filter(|&c| self.font.glyph(c).id().0 != 0)
            .collect();
        if text.trim().is_empty() {
            return mask;
        }

        let scale = Scale::uniform(font_size);
        let v_metrics = self.font.v_metrics(scale);

        // Measure at the origin, then lay out again centered
        let text_width = self
            .font
            .layout(&text, scale, point(0.0, 0.0))
            .last()
            .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
        let text_height = v_metrics.ascent - v_metrics.descent;

        let center = viewport.center();
        let origin = point(
            center.x - text_width / 2.0,
            center.y - text_height / 2.0 + v_metrics.ascent,
        );

        let [r, g, b, _] = fill.to_rgba8();
        for glyph in self.font.layout(&text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * fill.a * 255.0).round() as u8;
                mask.cover(px as u32, py as u32, [r, g, b], alpha);
            });
        }
        mask
    }
}
