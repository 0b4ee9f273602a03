//! Shared utilities

use std::collections::VecDeque;
use std::time::Instant;

/// Seed used when nothing else is configured
pub const DEFAULT_SEED: [u32; 4] = [12345678, 4185243, 776511, 45411];

/// Deterministic xorshift128 RNG.
/// Cheap enough to draw twice per cell every frame; the sequence depends only on the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Rng {
    /// Create a new RNG from a four word seed
    pub fn new(seed: [u32; 4]) -> Self {
        let [x, y, z, w] = seed;
        Self { x, y, z, w }
    }

    /// Get the next random u32
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> 19)) ^ (t ^ (t >> 8));
        self.w
    }

    /// Current state words, in seed order
    pub fn state(&self) -> [u32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Call once per frame. Returns the average FPS over the window.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt)
    }

    /// Push a frame duration into the window
    fn record(&mut self, dt: f32) -> f32 {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let avg_dt = self.avg_frame_time();
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    fn avg_frame_time(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_frame_time() * 1000.0
    }
}
