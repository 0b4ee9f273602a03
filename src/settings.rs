//! Startup configuration
//!
//! Read once before the first frame from an optional JSON file, then
//! overridden by command line flags. Missing keys fall back to defaults.

use crate::error::{FireError, Result};
use crate::palette::PaletteId;
use crate::util::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;
pub const MAX_SCALE: f32 = 4.0;
/// Upper bound on width * height (a 4096x4096 frame)
pub const MAX_CELLS: u64 = 1 << 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    /// Window magnification of the frame (1 to 4)
    pub scale: f32,
    /// Lateral randomness factor
    pub lateral: u32,
    pub palette: PaletteId,
    pub effect_opacity: u8,
    pub background_opacity: u8,
    pub vsync: bool,
    /// Capture from the first frame
    pub capture: bool,
    pub capture_dir: PathBuf,
    pub capture_prefix: String,
    pub mqtt_host: Option<String>,
    pub mqtt_topic: String,
    pub seed: [u32; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: 1.0,
            lateral: 1,
            palette: PaletteId::Fire,
            effect_opacity: 0xFF,
            background_opacity: 0xFF,
            vsync: true,
            capture: false,
            capture_dir: PathBuf::from("./var"),
            capture_prefix: "out".to_string(),
            mqtt_host: None,
            mqtt_topic: "doomfire".to_string(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        let cells = u64::from(self.width) * u64::from(self.height);
        if cells == 0 || cells > MAX_CELLS {
            return Err(FireError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(1.0..=MAX_SCALE).contains(&self.scale) {
            return Err(FireError::InvalidScale(self.scale));
        }
        if self.lateral == 0 {
            return Err(FireError::InvalidLateral);
        }
        if self.seed == [0; 4] {
            return Err(FireError::InvalidSeed);
        }
        Ok(())
    }
}
