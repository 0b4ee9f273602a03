//! One fire instance wired to its tuning, frame and capture writer

use crate::capture::FrameCapture;
use crate::control::{Command, FireTuning};
use crate::display::PixelBuffer;
use crate::error::Result;
use crate::fire::DoomFire;
use crate::settings::Settings;
use crate::util::Rng;

pub struct FireApp {
    fire: DoomFire,
    tuning: FireTuning,
    frame: PixelBuffer,
    capture: FrameCapture,
}

impl FireApp {
    /// Validate the settings, build the palette and light the source row
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let tuning = FireTuning::from_settings(settings);
        let palette = tuning.build_palette()?;
        let mut fire = DoomFire::new(
            settings.width as usize,
            settings.height as usize,
            palette,
            Rng::new(settings.seed),
        );
        fire.seed_source_row(tuning.source_seed(fire.palette().len()));

        log::info!(
            "{} {}x{}, palette {} ({} colors)",
            fire.name(),
            settings.width,
            settings.height,
            tuning.palette,
            fire.palette().len()
        );

        Ok(Self {
            fire,
            tuning,
            frame: PixelBuffer::with_size(settings.width, settings.height),
            capture: FrameCapture::new(&settings.capture_dir, settings.capture_prefix.clone()),
        })
    }

    /// React to a control event before the next tick
    pub fn handle(&mut self, command: Command) -> Result<()> {
        self.tuning.apply(command, &mut self.fire)
    }

    /// Simulate, composite, and capture if enabled. Returns the finished frame.
    pub fn tick(&mut self) -> &PixelBuffer {
        self.fire.update(&self.tuning);
        self.fire.render(&mut self.frame);

        if self.tuning.capture {
            if let Err(e) = self.capture.save(&self.frame) {
                log::warn!(
                    "capture to {} failed, disabling: {}",
                    self.capture.dir().display(),
                    e
                );
                self.tuning.capture = false;
            }
        }

        &self.frame
    }

    /// Composite the current grid without advancing the simulation
    pub fn redraw(&mut self) -> &PixelBuffer {
        self.fire.render(&mut self.frame);
        &self.frame
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn tuning(&self) -> &FireTuning {
        &self.tuning
    }

    pub fn fire(&self) -> &DoomFire {
        &self.fire
    }

    pub fn fire_mut(&mut self) -> &mut DoomFire {
        &mut self.fire
    }

    pub fn captured_frames(&self) -> u64 {
        self.capture.frame_counter()
    }
}
