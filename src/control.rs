//! Live tuning of the fire
//!
//! Keyboard, mouse, touch and remote messages all turn into [`Command`]s.
//! [`FireTuning::apply`] runs the matching reaction against the tuning
//! state and the fire before the next simulation pass.

use crate::error::Result;
use crate::fire::{DoomFire, WindDirection, MAX_WIND_POWER};
use crate::palette::{Palette, PaletteId};
use crate::settings::Settings;

/// Background opacity change per key press
pub const OPACITY_STEP: u8 = 5;

/// Printed at startup
pub const KEY_BINDINGS: &str = "Key binding :

[space]\t\ttoggle effect
[p]\t\tSwitch between color palette
[Arr left]\tDecrease wind
[Arr right]\tIncrease wind
[D]\t\tWind direction
[Pg Up]\t\tIncrease background opacity
[Pg Down]\tDecrease background opacity
[Up]\t\tIncrease fire effect
[Down]\t\tDecrease fire effect
[F]\t\tToggle FPS display
[S]\t\tToggle frame capture
[Escape]\tQuit
";

/// Discrete control events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleEffect,
    SwitchPalette,
    WindDown,
    WindUp,
    FlipWind,
    BackgroundOpacityUp,
    BackgroundOpacityDown,
    IntensityUp,
    IntensityDown,
    ToggleFps,
    ToggleCapture,
    Quit,
}

impl Command {
    /// Parse a remote command word (case and surrounding whitespace ignored)
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "toggle" | "space" => Some(Command::ToggleEffect),
            "palette" | "p" => Some(Command::SwitchPalette),
            "wind-" | "left" => Some(Command::WindDown),
            "wind+" | "right" => Some(Command::WindUp),
            "direction" | "d" => Some(Command::FlipWind),
            "opacity+" | "pgup" => Some(Command::BackgroundOpacityUp),
            "opacity-" | "pgdown" => Some(Command::BackgroundOpacityDown),
            "intensity+" | "up" => Some(Command::IntensityUp),
            "intensity-" | "down" => Some(Command::IntensityDown),
            "fps" | "f" => Some(Command::ToggleFps),
            "capture" | "s" => Some(Command::ToggleCapture),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Tunable parameters consumed by every tick
#[derive(Debug, Clone, PartialEq)]
pub struct FireTuning {
    pub wind_power: u32,
    pub wind_direction: WindDirection,
    /// Scales the random lateral jitter (1 = classic 0..3)
    pub lateral: u32,
    /// Distance of the source-row seed below the hottest palette entry
    pub intensity_offset: usize,
    pub effect_opacity: u8,
    pub background_opacity: u8,
    pub palette: PaletteId,
    pub enabled: bool,
    pub show_fps: bool,
    pub capture: bool,
}

impl FireTuning {
    /// Initial tuning for the given startup settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            wind_power: 0,
            wind_direction: WindDirection::default(),
            lateral: settings.lateral,
            intensity_offset: 1,
            effect_opacity: settings.effect_opacity,
            background_opacity: settings.background_opacity,
            palette: settings.palette,
            enabled: true,
            show_fps: false,
            capture: settings.capture,
        }
    }

    /// Signed wind contribution to the lateral offset
    #[inline]
    pub fn wind_offset(&self) -> i32 {
        self.wind_power as i32 * self.wind_direction.sign()
    }

    /// Build the palette currently selected by this tuning
    pub fn build_palette(&self) -> Result<Palette> {
        Palette::named(self.palette, self.effect_opacity, self.background_opacity)
    }

    /// Source-row value for the current intensity offset
    pub fn source_seed(&self, palette_len: usize) -> u8 {
        to_intensity(palette_len.saturating_sub(self.intensity_offset))
    }

    /// Run the reaction for `command`. `Quit` is left to the caller.
    pub fn apply(&mut self, command: Command, fire: &mut DoomFire) -> Result<()> {
        match command {
            Command::ToggleEffect => {
                self.enabled = !self.enabled;
                let seed = if self.enabled {
                    to_intensity(fire.palette().max_index())
                } else {
                    0
                };
                fire.seed_source_row(seed);
                log::debug!("effect {}", if self.enabled { "on" } else { "off" });
            },
            Command::SwitchPalette => {
                self.palette = self.palette.next();
                fire.set_palette(self.build_palette()?);
                self.intensity_offset = self.intensity_offset.min(max_offset(fire.palette().len()));
                log::debug!("palette {}", self.palette);
            },
            Command::WindDown => {
                self.wind_power = self.wind_power.saturating_sub(1);
                log::debug!("wind power {}", self.wind_power);
            },
            Command::WindUp => {
                self.wind_power = (self.wind_power + 1).min(MAX_WIND_POWER);
                log::debug!("wind power {}", self.wind_power);
            },
            Command::FlipWind => {
                self.wind_direction = self.wind_direction.flipped();
                log::debug!("wind direction {:?}", self.wind_direction);
            },
            Command::BackgroundOpacityUp | Command::BackgroundOpacityDown => {
                self.background_opacity = if command == Command::BackgroundOpacityUp {
                    self.background_opacity.saturating_add(OPACITY_STEP)
                } else {
                    self.background_opacity.saturating_sub(OPACITY_STEP)
                };
                fire.palette_mut()
                    .apply_background_opacity(self.background_opacity);
                log::debug!("background opacity {}", self.background_opacity);
            },
            Command::IntensityUp | Command::IntensityDown => {
                let len = fire.palette().len();
                self.intensity_offset = if command == Command::IntensityUp {
                    self.intensity_offset.saturating_sub(1).max(1)
                } else {
                    (self.intensity_offset + 1).min(max_offset(len))
                };
                self.enabled = true;
                fire.seed_source_row(self.source_seed(len));
                log::debug!("fire intensity offset {}", self.intensity_offset);
            },
            Command::ToggleFps => self.show_fps = !self.show_fps,
            Command::ToggleCapture => {
                self.capture = !self.capture;
                log::info!("frame capture {}", if self.capture { "on" } else { "off" });
            },
            Command::Quit => {},
        }
        Ok(())
    }
}

/// Largest intensity offset that still leaves a burning seed
fn max_offset(palette_len: usize) -> usize {
    palette_len.saturating_sub(2).max(1)
}

fn to_intensity(value: usize) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;

    fn setup() -> (FireTuning, DoomFire) {
        let tuning = FireTuning::from_settings(&Settings::default());
        let palette = tuning.build_palette().unwrap();
        let mut fire = DoomFire::new(8, 6, palette, Rng::default());
        fire.seed_source_row(tuning.source_seed(fire.palette().len()));
        (tuning, fire)
    }

    fn source_row(fire: &DoomFire) -> Vec<u8> {
        let buffer = fire.intensity();
        buffer.row(buffer.source_row()).to_vec()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  Wind+ \n"), Some(Command::WindUp));
        assert_eq!(Command::parse("pgdown"), Some(Command::BackgroundOpacityDown));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("effect 3"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_initial_seed_is_hottest_entry() {
        let (_, fire) = setup();
        assert_eq!(source_row(&fire), vec![36; 8]);
    }

    #[test]
    fn test_toggle_effect() {
        let (mut tuning, mut fire) = setup();
        tuning.apply(Command::ToggleEffect, &mut fire).unwrap();
        assert!(!tuning.enabled);
        assert_eq!(source_row(&fire), vec![0; 8]);

        tuning.apply(Command::ToggleEffect, &mut fire).unwrap();
        assert!(tuning.enabled);
        assert_eq!(source_row(&fire), vec![36; 8]);
    }

    #[test]
    fn test_wind_bounds() {
        let (mut tuning, mut fire) = setup();
        tuning.apply(Command::WindDown, &mut fire).unwrap();
        assert_eq!(tuning.wind_power, 0);
        for _ in 0..10 {
            tuning.apply(Command::WindUp, &mut fire).unwrap();
        }
        assert_eq!(tuning.wind_power, MAX_WIND_POWER);
        assert_eq!(tuning.wind_offset(), 6);

        tuning.apply(Command::FlipWind, &mut fire).unwrap();
        assert_eq!(tuning.wind_offset(), -6);
    }

    #[test]
    fn test_background_opacity_saturates() {
        let (mut tuning, mut fire) = setup();
        tuning.apply(Command::BackgroundOpacityUp, &mut fire).unwrap();
        assert_eq!(tuning.background_opacity, 255);

        tuning.apply(Command::BackgroundOpacityDown, &mut fire).unwrap();
        assert_eq!(tuning.background_opacity, 250);
        assert_eq!(fire.palette().background().a, 250);
        assert!(fire.palette().entries()[1..].iter().all(|c| c.a == 255));

        for _ in 0..60 {
            tuning.apply(Command::BackgroundOpacityDown, &mut fire).unwrap();
        }
        assert_eq!(fire.palette().background().a, 0);
    }

    #[test]
    fn test_intensity_range() {
        let (mut tuning, mut fire) = setup();
        tuning.apply(Command::IntensityUp, &mut fire).unwrap();
        assert_eq!(tuning.intensity_offset, 1);
        assert_eq!(source_row(&fire), vec![36; 8]);

        for _ in 0..100 {
            tuning.apply(Command::IntensityDown, &mut fire).unwrap();
        }
        assert_eq!(tuning.intensity_offset, 35);
        assert_eq!(source_row(&fire), vec![2; 8]);
    }

    #[test]
    fn test_intensity_relights() {
        let (mut tuning, mut fire) = setup();
        tuning.apply(Command::ToggleEffect, &mut fire).unwrap();
        tuning.apply(Command::IntensityDown, &mut fire).unwrap();
        assert!(tuning.enabled);
        assert_eq!(source_row(&fire), vec![35; 8]);
    }

    #[test]
    fn test_switch_palette_clamps_offset() {
        let (mut tuning, mut fire) = setup();
        for _ in 0..100 {
            tuning.apply(Command::IntensityDown, &mut fire).unwrap();
        }
        tuning.apply(Command::SwitchPalette, &mut fire).unwrap();
        assert_eq!(tuning.palette, PaletteId::Blue);
        assert_eq!(fire.palette().len(), 36);
        assert_eq!(tuning.intensity_offset, 34);
    }

    #[test]
    fn test_pure_flags() {
        let (mut tuning, mut fire) = setup();
        let before = fire.intensity().clone();
        tuning.apply(Command::ToggleFps, &mut fire).unwrap();
        tuning.apply(Command::ToggleCapture, &mut fire).unwrap();
        tuning.apply(Command::Quit, &mut fire).unwrap();
        assert!(tuning.show_fps && tuning.capture);
        assert_eq!(fire.intensity(), &before);
    }
}
