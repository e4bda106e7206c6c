//! Shared helpers for integration tests.

#![allow(dead_code)]

use sparkfield::{GlyphMask, Rgba, TextRasterizer, Viewport};

/// Deterministic stand-in for a font.
///
/// Every non-whitespace character is a solid block `0.6 * size` wide and
/// `size` tall, ringed by a 1px half-covered edge. The line is centered in
/// the viewport like real text.
pub struct BlockRasterizer;

impl BlockRasterizer {
    pub fn glyph_width(font_size: f32) -> u32 {
        (font_size * 0.6).round() as u32
    }
}

impl TextRasterizer for BlockRasterizer {
    fn rasterize(&self, text: &str, font_size: f32, viewport: Viewport, fill: Rgba) -> GlyphMask {
        let mut mask = GlyphMask::new(viewport);
        let chars: Vec<char> = text.chars().collect();
        if text.trim().is_empty() || !viewport.is_valid() || font_size <= 0.0 {
            return mask;
        }

        let glyph_w = Self::glyph_width(font_size);
        let glyph_h = font_size.round() as u32;
        let advance = glyph_w + glyph_w / 4;
        let line_w = advance * chars.len() as u32;
        let left = viewport.width.saturating_sub(line_w) / 2;
        let top = viewport.height.saturating_sub(glyph_h) / 2;
        let [r, g, b, _] = fill.to_rgba8();

        for (i, c) in chars.iter().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x0 = left + i as u32 * advance;
            for y in top.saturating_sub(1)..=top + glyph_h {
                for x in x0.saturating_sub(1)..=x0 + glyph_w {
                    let inside = y >= top && y < top + glyph_h && x >= x0 && x < x0 + glyph_w;
                    mask.cover(x, y, [r, g, b], if inside { 255 } else { 100 });
                }
            }
        }
        mask
    }
}
