//! Color ramps for the fire effect
//!
//! A palette is built from a flat `r, g, b` triplet table. Entry 0 is the
//! background and carries its own alpha; every other entry shares the
//! effect alpha.

use crate::error::{FireError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classic Doom fire ramp (black -> red -> orange -> yellow -> white)
pub const FIRE_TABLE: [u8; 111] = [
    0x00, 0x00, 0x00,
    0x1F, 0x07, 0x07,
    0x2F, 0x0F, 0x07,
    0x47, 0x0F, 0x07,
    0x57, 0x17, 0x07,
    0x67, 0x1F, 0x07,
    0x77, 0x1F, 0x07,
    0x8F, 0x27, 0x07,
    0x9F, 0x2F, 0x07,
    0xAF, 0x3F, 0x07,
    0xBF, 0x47, 0x07,
    0xC7, 0x47, 0x07,
    0xDF, 0x4F, 0x07,
    0xDF, 0x57, 0x07,
    0xDF, 0x57, 0x07,
    0xD7, 0x5F, 0x07,
    0xD7, 0x5F, 0x07,
    0xD7, 0x67, 0x0F,
    0xCF, 0x6F, 0x0F,
    0xCF, 0x77, 0x0F,
    0xCF, 0x7F, 0x0F,
    0xCF, 0x87, 0x17,
    0xC7, 0x87, 0x17,
    0xC7, 0x8F, 0x17,
    0xC7, 0x97, 0x1F,
    0xBF, 0x9F, 0x1F,
    0xBF, 0x9F, 0x1F,
    0xBF, 0xA7, 0x27,
    0xBF, 0xA7, 0x27,
    0xBF, 0xAF, 0x2F,
    0xB7, 0xAF, 0x2F,
    0xB7, 0xB7, 0x2F,
    0xB7, 0xB7, 0x37,
    0xCF, 0xCF, 0x6F,
    0xDF, 0xDF, 0x9F,
    0xEF, 0xEF, 0xC7,
    0xFF, 0xFF, 0xFF,
];

/// Blue/violet alternate ramp
pub const BLUE_TABLE: [u8; 108] = [
    0x00, 0x00, 0x00,
    0x00, 0x1B, 0x33,
    0x00, 0x27, 0x52,
    0x00, 0x31, 0x68,
    0x00, 0x3A, 0x7D,
    0x00, 0x43, 0x92,
    0x00, 0x50, 0xAF,
    0x00, 0x5A, 0xC4,
    0x00, 0x65, 0xD8,
    0x00, 0x6F, 0xEC,
    0x00, 0x73, 0xF6,
    0x00, 0x81, 0xFF,
    0x00, 0x81, 0xFF,
    0x00, 0x81, 0xFF,
    0x00, 0x83, 0xFF,
    0x00, 0x83, 0xFF,
    0x3B, 0x80, 0xFF,
    0x54, 0x82, 0xFF,
    0x70, 0x80, 0xFF,
    0x82, 0x81, 0xFF,
    0x92, 0x83, 0xFF,
    0x9F, 0x85, 0xFF,
    0xA3, 0x81, 0xF9,
    0xBF, 0x86, 0xFB,
    0xD1, 0x83, 0xF5,
    0xDD, 0x87, 0xF6,
    0xDD, 0x87, 0xF6,
    0xE9, 0x8A, 0xF6,
    0xE9, 0x8A, 0xF6,
    0xE9, 0x8A, 0xF6,
    0xEB, 0x86, 0xEE,
    0xF9, 0x88, 0xF2,
    0xF7, 0x8A, 0xEF,
    0xFF, 0xAD, 0xF9,
    0xFF, 0xC8, 0xFA,
    0xFF, 0xE0, 0xFF,
];

/// Named palettes, resolved to their triplet table by lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaletteId {
    #[default]
    Fire,
    Blue,
}

impl PaletteId {
    /// Triplet table backing this palette
    pub fn table(self) -> &'static [u8] {
        match self {
            PaletteId::Fire => &FIRE_TABLE,
            PaletteId::Blue => &BLUE_TABLE,
        }
    }

    /// Next palette in the cycle
    pub fn next(self) -> Self {
        match self {
            PaletteId::Fire => PaletteId::Blue,
            PaletteId::Blue => PaletteId::Fire,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteId::Fire => "fire",
            PaletteId::Blue => "blue",
        }
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in R, G, B, A byte order
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Ordered color ramp indexed by fire intensity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgba>,
}

impl Palette {
    /// Build a palette from a flat triplet table.
    ///
    /// Every entry gets `effect_opacity`, then entry 0 (background) is
    /// overwritten with `background_opacity`.
    pub fn build(table: &[u8], effect_opacity: u8, background_opacity: u8) -> Result<Self> {
        if table.len() % 3 != 0 {
            return Err(FireError::InvalidPaletteLength(table.len()));
        }
        if table.is_empty() {
            return Err(FireError::EmptyPalette);
        }

        let entries = table
            .chunks_exact(3)
            .map(|rgb| Rgba::new(rgb[0], rgb[1], rgb[2], effect_opacity))
            .collect();

        let mut palette = Self { entries };
        palette.apply_background_opacity(background_opacity);
        Ok(palette)
    }

    /// Build one of the named palettes
    pub fn named(id: PaletteId, effect_opacity: u8, background_opacity: u8) -> Result<Self> {
        Self::build(id.table(), effect_opacity, background_opacity)
    }

    /// Overwrite the background entry's alpha, leaving the rest untouched
    pub fn apply_background_opacity(&mut self, opacity: u8) -> &mut Self {
        if let Some(background) = self.entries.first_mut() {
            background.a = opacity;
        }
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest valid intensity index
    #[inline]
    pub fn max_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    /// Color for an intensity index, clamped to the last entry
    #[inline]
    pub fn color_at(&self, index: usize) -> Rgba {
        self.entries[index.min(self.max_index())]
    }

    pub fn background(&self) -> Rgba {
        self.entries[0]
    }
}
