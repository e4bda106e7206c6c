//! Error types for Sparkfield.
//!
//! The per-tick simulation never fails. Errors only surface while setting
//! things up: allocating a raster, loading a font, reading configuration, or
//! opening a window and GPU device for presentation.

use thiserror::Error;

/// Errors raised when a raster target cannot be allocated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The viewport has no drawable area.
    #[error("viewport {width}x{height} has no drawable area")]
    ZeroSized {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Two rasters that must match in size did not.
    #[error("raster size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        /// Size of the destination raster.
        expected: (u32, u32),
        /// Size of the source raster.
        actual: (u32, u32),
    },
}

/// Errors that can occur while loading a font for text rasterization.
#[derive(Debug, Error)]
pub enum FontError {
    /// Failed to read the font file from disk.
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes are not a font `rusttype` can parse.
    #[error("font data could not be parsed")]
    Parse,
    /// The text configuration names no font file.
    #[error("no font path configured")]
    NoFontPath,
}

/// Errors that can occur while loading a scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur when opening the presentation window.
#[derive(Debug, Error)]
pub enum PresentError {
    /// Failed to create the event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// Failed to create a GPU surface for the window.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// Failed to create the GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_message() {
        let err = SurfaceError::ZeroSized { width: 0, height: 600 };
        assert_eq!(err.to_string(), "viewport 0x600 has no drawable area");
    }

    #[test]
    fn test_config_error_from_json() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
