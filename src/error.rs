//! Error types for the fire renderer.

use std::io;
use thiserror::Error;

/// Errors that can occur while configuring or running the fire effect
#[derive(Debug, Error)]
pub enum FireError {
    /// Palette table length is not a multiple of 3
    #[error("incorrect number of color values: {0} is not a multiple of 3")]
    InvalidPaletteLength(usize),

    /// Palette table has no entries (a background entry is required)
    #[error("palette table is empty")]
    EmptyPalette,

    /// Screen width or height is zero, or the frame is too large
    #[error("invalid screen size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Screen scale outside of 1..=4
    #[error("invalid screen scale {0} (expected 1 to 4)")]
    InvalidScale(f32),

    /// Lateral randomness factor of zero
    #[error("lateral randomness factor must be at least 1")]
    InvalidLateral,

    /// All-zero seed, which xorshift never leaves
    #[error("RNG seed must have at least one non-zero word")]
    InvalidSeed,

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Frame could not be encoded
    #[error("capture error: {0}")]
    Capture(#[from] image::ImageError),

    /// SDL2 reported an error
    #[error("display error: {0}")]
    Display(String),

    /// MQTT broker unreachable or subscription refused
    #[error("mqtt error: {0}")]
    Mqtt(String),
}

/// Result type for fire operations
pub type Result<T> = std::result::Result<T, FireError>;
