//! Command line arguments

use crate::palette::PaletteId;
use crate::settings::Settings;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Doom-style fire effect
#[derive(Debug, Parser)]
#[command(name = "doomfire", version, about, disable_help_flag = true)]
pub struct Cli {
    /// Screen width in pixels
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Screen height in pixels
    #[arg(short = 'h', long)]
    pub height: Option<u32>,

    /// Screen scale (max: 4)
    #[arg(short = 's', long)]
    pub scale: Option<f32>,

    /// Lateral randomness factor
    #[arg(short = 'l', long)]
    pub lateral: Option<u32>,

    /// Initial color palette
    #[arg(short = 'p', long, value_enum)]
    pub palette: Option<PaletteId>,

    /// JSON settings file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable VSync for uncapped framerate
    #[arg(long)]
    pub no_vsync: bool,

    /// Capture frames to disk from the start
    #[arg(long)]
    pub capture: bool,

    /// Directory for captured frames
    #[arg(long)]
    pub capture_dir: Option<PathBuf>,

    /// RNG seed as four comma separated words
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<[u32; 4]>,

    /// MQTT broker for remote control
    #[arg(long)]
    pub mqtt_host: Option<String>,

    /// MQTT topic carrying control commands
    #[arg(long)]
    pub mqtt_topic: Option<String>,

    /// Frames to render before exiting when running without a window
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Layer the flags that were given on top of `settings`
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(lateral) = self.lateral {
            settings.lateral = lateral;
        }
        if let Some(palette) = self.palette {
            settings.palette = palette;
        }
        if self.no_vsync {
            settings.vsync = false;
        }
        if self.capture {
            settings.capture = true;
        }
        if let Some(dir) = &self.capture_dir {
            settings.capture_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(host) = &self.mqtt_host {
            settings.mqtt_host = Some(host.clone());
        }
        if let Some(topic) = &self.mqtt_topic {
            settings.mqtt_topic = topic.clone();
        }
        settings
    }

    /// Log level implied by -v
    pub fn log_filter(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn parse_seed(value: &str) -> Result<[u32; 4], String> {
    let words = value
        .split(',')
        .map(|word| word.trim().parse::<u32>().map_err(|e| format!("{}: {}", word, e)))
        .collect::<Result<Vec<_>, _>>()?;
    <[u32; 4]>::try_from(words).map_err(|w| format!("expected 4 words, got {}", w.len()))
}
