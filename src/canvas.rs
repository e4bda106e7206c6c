//! Software render surface.
//!
//! [`Canvas`] is a persistent premultiplied-RGBA raster the size of the
//! viewport. Effects draw into it every tick; what is not explicitly cleared
//! or erased survives into the next frame, which is what gives fireworks
//! their trails.
//!
//! # Composite operations
//!
//! | Op | Result | Used for |
//! |----|--------|----------|
//! | [`CompositeOp::SourceOver`] | normal alpha blending | text discs, layer stacking |
//! | [`CompositeOp::Lighter`] | colors add, clamped | overlapping sparks brighten |
//! | [`CompositeOp::DestinationOut`] | destination fades by source alpha | per-tick trail fade |
//!
//! The fireworks frame is always erase first (`DestinationOut` fill at 20%
//! alpha), then draw (`Lighter`).

use crate::color::Rgba;
use crate::error::SurfaceError;
use crate::viewport::Viewport;
use glam::Vec2;
use std::path::Path;

/// How new paint combines with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    /// Standard alpha blending (default).
    #[default]
    SourceOver,

    /// Additive blending.
    ///
    /// Source and destination add up, so overlapping strokes glow.
    Lighter,

    /// Erase.
    ///
    /// The destination keeps `1 - source alpha` of itself; source color is
    /// ignored.
    DestinationOut,
}

/// Premultiplied RGBA raster.
#[derive(Debug, Clone)]
pub struct Canvas {
    viewport: Viewport,
    pixels: Vec<[f32; 4]>,
    composite: CompositeOp,
}

impl Canvas {
    /// Transparent canvas covering `viewport`.
    pub fn new(viewport: Viewport) -> Result<Self, SurfaceError> {
        let viewport = viewport.validate()?;
        Ok(Self {
            viewport,
            pixels: vec![[0.0; 4]; viewport.area()],
            composite: CompositeOp::SourceOver,
        })
    }

    /// Reallocate for a new viewport. Contents are discarded.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        let viewport = viewport.validate()?;
        self.viewport = viewport;
        self.pixels = vec![[0.0; 4]; viewport.area()];
        Ok(())
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    pub fn composite(&self) -> CompositeOp {
        self.composite
    }

    pub fn set_composite(&mut self, op: CompositeOp) {
        self.composite = op;
    }

    /// Make every pixel transparent. Ignores the composite op.
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Paint the whole canvas with `color` using the current composite op.
    pub fn fill(&mut self, color: Rgba) {
        let src = premultiply(color, 1.0);
        let op = self.composite;
        for px in &mut self.pixels {
            blend(px, src, op);
        }
    }

    /// Paint an axis-aligned rectangle with `color`.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, x + w, y + h) else {
            return;
        };
        let src = premultiply(color, 1.0);
        let op = self.composite;
        let width = self.viewport.width as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                blend(&mut self.pixels[py * width + px], src, op);
            }
        }
    }

    /// Stroke a segment from `from` to `to` with anti-aliased edges.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let half = width.max(0.0) * 0.5;
        let pad = half + 1.0;
        let Some((x0, y0, x1, y1)) = self.clip(
            from.x.min(to.x) - pad,
            from.y.min(to.y) - pad,
            from.x.max(to.x) + pad,
            from.y.max(to.y) + pad,
        ) else {
            return;
        };

        let op = self.composite;
        let stride = self.viewport.width as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                let center = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(center, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(&mut self.pixels[py * stride + px], premultiply(color, coverage), op);
                }
            }
        }
    }

    /// Fill a disc with anti-aliased edge.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let pad = radius + 1.0;
        let Some((x0, y0, x1, y1)) =
            self.clip(center.x - pad, center.y - pad, center.x + pad, center.y + pad)
        else {
            return;
        };

        let op = self.composite;
        let stride = self.viewport.width as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(&mut self.pixels[py * stride + px], premultiply(color, coverage), op);
                }
            }
        }
    }

    /// Stack `layer` on top of this canvas at `opacity`, source-over.
    pub fn composite_over(&mut self, layer: &Canvas, opacity: f32) -> Result<(), SurfaceError> {
        if layer.viewport != self.viewport {
            return Err(SurfaceError::SizeMismatch {
                expected: (self.viewport.width, self.viewport.height),
                actual: (layer.viewport.width, layer.viewport.height),
            });
        }
        let opacity = opacity.clamp(0.0, 1.0);
        for (dst, src) in self.pixels.iter_mut().zip(&layer.pixels) {
            let s = src.map(|c| c * opacity);
            blend(dst, s, CompositeOp::SourceOver);
        }
        Ok(())
    }

    /// Straight-alpha color at `(x, y)`; transparent outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.viewport.width || y >= self.viewport.height {
            return Rgba::TRANSPARENT;
        }
        let [r, g, b, a] = self.pixels[y as usize * self.viewport.width as usize + x as usize];
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        Rgba::new(r / a, g / a, b / a, a)
    }

    /// Sum of alpha over every pixel; a cheap measure of how much is drawn.
    pub fn total_alpha(&self) -> f32 {
        self.pixels.iter().map(|p| p[3]).sum()
    }

    /// Straight-alpha RGBA8 bytes, row-major, for upload or encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &[r, g, b, a] in &self.pixels {
            let straight = if a > 0.0 {
                Rgba::new(r / a, g / a, b / a, a)
            } else {
                Rgba::TRANSPARENT
            };
            out.extend_from_slice(&straight.to_rgba8());
        }
        out
    }

    /// Write the canvas as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let buffer = image::RgbaImage::from_raw(self.width(), self.height(), self.to_rgba8())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        buffer.save(path)
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` of a float rectangle, clipped.
    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(usize, usize, usize, usize)> {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return None;
        }
        let w = self.viewport.width_f32();
        let h = self.viewport.height_f32();
        let cx0 = x0.floor().clamp(0.0, w) as usize;
        let cy0 = y0.floor().clamp(0.0, h) as usize;
        let cx1 = x1.ceil().clamp(0.0, w) as usize;
        let cy1 = y1.ceil().clamp(0.0, h) as usize;
        (cx0 < cx1 && cy0 < cy1).then_some((cx0, cy0, cx1, cy1))
    }
}

fn premultiply(color: Rgba, coverage: f32) -> [f32; 4] {
    let a = (color.a * coverage).clamp(0.0, 1.0);
    [color.r * a, color.g * a, color.b * a, a]
}

fn blend(dst: &mut [f32; 4], src: [f32; 4], op: CompositeOp) {
    match op {
        CompositeOp::SourceOver => {
            let keep = 1.0 - src[3];
            for c in 0..4 {
                dst[c] = src[c] + dst[c] * keep;
            }
        }
        CompositeOp::Lighter => {
            for c in 0..4 {
                dst[c] = (dst[c] + src[c]).min(1.0);
            }
        }
        CompositeOp::DestinationOut => {
            let keep = 1.0 - src[3];
            for c in dst.iter_mut() {
                *c *= keep;
            }
        }
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> Canvas {
        Canvas::new(Viewport::new(w, h)).unwrap()
    }

    #[test]
    fn test_zero_sized_rejected() {
        assert!(matches!(
            Canvas::new(Viewport::new(0, 10)),
            Err(SurfaceError::ZeroSized { .. })
        ));
        let mut c = canvas(4, 4);
        assert!(c.resize(Viewport::new(4, 0)).is_err());
        assert_eq!(c.viewport(), Viewport::new(4, 4));
    }

    #[test]
    fn test_destination_out_fades() {
        let mut c = canvas(2, 2);
        c.fill(Rgba::new(1.0, 0.0, 0.0, 1.0));
        c.set_composite(CompositeOp::DestinationOut);
        c.fill(Rgba::new(0.0, 0.0, 0.0, 0.2));
        let px = c.pixel(0, 0);
        assert!((px.a - 0.8).abs() < 1e-6);
        // Color is untouched, only coverage fades
        assert!((px.r - 1.0).abs() < 1e-6);

        for _ in 0..60 {
            c.fill(Rgba::new(0.0, 0.0, 0.0, 0.2));
        }
        assert!(c.pixel(0, 0).a < 1e-5);
    }

    #[test]
    fn test_lighter_adds() {
        let mut c = canvas(1, 1);
        c.set_composite(CompositeOp::Lighter);
        c.fill(Rgba::new(0.5, 0.0, 0.0, 0.5));
        c.fill(Rgba::new(0.5, 0.0, 0.0, 0.5));
        let px = c.pixel(0, 0);
        assert!((px.a - 1.0).abs() < 1e-6);
        assert!((px.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_stroke_line_covers_segment_only() {
        let mut c = canvas(20, 20);
        c.stroke_line(Vec2::new(2.0, 10.5), Vec2::new(18.0, 10.5), 1.0, Rgba::WHITE);
        assert!(c.pixel(10, 10).a > 0.9);
        assert_eq!(c.pixel(10, 2).a, 0.0);
        assert_eq!(c.pixel(0, 10).a, 0.0);
    }

    #[test]
    fn test_fill_disc() {
        let mut c = canvas(20, 20);
        c.fill_disc(Vec2::new(10.0, 10.0), 2.0, Rgba::WHITE);
        assert!(c.pixel(9, 9).a > 0.99);
        assert_eq!(c.pixel(15, 15).a, 0.0);
        let total = c.total_alpha();
        // Roughly the disc area, pi * r^2
        assert!((total - std::f32::consts::PI * 4.0).abs() < 2.0);
    }

    #[test]
    fn test_offscreen_and_nan_ignored() {
        let mut c = canvas(10, 10);
        c.fill_disc(Vec2::new(-50.0, -50.0), 2.0, Rgba::WHITE);
        c.stroke_line(Vec2::new(f32::NAN, 0.0), Vec2::ONE, 1.0, Rgba::WHITE);
        assert_eq!(c.total_alpha(), 0.0);
    }

    #[test]
    fn test_composite_over_with_opacity() {
        let mut base = canvas(2, 2);
        let mut layer = canvas(2, 2);
        layer.fill(Rgba::WHITE);
        base.composite_over(&layer, 0.8).unwrap();
        assert!((base.pixel(1, 1).a - 0.8).abs() < 1e-6);

        let other = canvas(3, 3);
        assert!(matches!(
            base.composite_over(&other, 1.0),
            Err(SurfaceError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_to_rgba8_straight_alpha() {
        let mut c = canvas(1, 1);
        c.fill(Rgba::new(1.0, 0.0, 0.0, 0.5));
        assert_eq!(c.to_rgba8(), vec![255, 0, 0, 128]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut c = canvas(8, 8);
        c.fill_disc(Vec2::new(4.0, 4.0), 2.0, Rgba::WHITE);
        c.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
    }
}
