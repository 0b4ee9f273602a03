//! Frame capture to numbered PNG files

use crate::display::PixelBuffer;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes frames as `<dir>/<prefix>_<n>.png`, counting from 1
pub struct FrameCapture {
    dir: PathBuf,
    prefix: String,
    frame_counter: u64,
}

impl FrameCapture {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            frame_counter: 0,
        }
    }

    /// Encode and write one frame, returning the file it went to
    pub fn save(&mut self, frame: &PixelBuffer) -> Result<PathBuf> {
        self.frame_counter += 1;
        fs::create_dir_all(&self.dir)?;

        let path = self.frame_path(self.frame_counter);
        image::save_buffer(
            &path,
            frame.as_bytes(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
        )?;
        log::trace!("captured {}", path.display());
        Ok(path)
    }

    fn frame_path(&self, n: u64) -> PathBuf {
        self.dir.join(format!("{}_{}.png", self.prefix, n))
    }

    /// Number of frames written so far
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("doomfire-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_frames_are_numbered_from_one() {
        let dir = scratch_dir("numbering");
        let mut capture = FrameCapture::new(&dir, "out");
        let frame = PixelBuffer::with_size(4, 3);

        let first = capture.save(&frame).unwrap();
        let second = capture.save(&frame).unwrap();
        assert_eq!(first, dir.join("out_1.png"));
        assert_eq!(second, dir.join("out_2.png"));
        assert_eq!(capture.frame_counter(), 2);
        assert!(second.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_png_holds_rgba() {
        let dir = scratch_dir("pixels");
        let mut capture = FrameCapture::new(&dir, "frame");
        let mut frame = PixelBuffer::with_size(2, 2);
        frame.set_pixel_rgba(1, 0, Rgba::new(255, 64, 7, 128));

        let path = capture.save(&frame).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [255, 64, 7, 128]);
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 0, 0]);

        let _ = fs::remove_dir_all(&dir);
    }
}
