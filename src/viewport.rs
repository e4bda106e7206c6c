//! Viewport dimensions shared by every effect layer.

use crate::error::SurfaceError;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport. Zero sizes are allowed here and rejected by [`Viewport::validate`].
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the viewport has a drawable area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Reject zero-sized viewports.
    pub fn validate(self) -> Result<Self, SurfaceError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SurfaceError::ZeroSized {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Center point of the viewport.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width_f32() * 0.5, self.height_f32() * 0.5)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}
