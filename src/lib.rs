//! Classic Doom-style fire effect.
//!
//! A grid of palette indices is seeded along its bottom row, propagated
//! upward with random decay and wind drift, and mapped through a color ramp
//! into an RGBA frame every tick.

pub mod app;
pub mod capture;
pub mod cli;
pub mod control;
pub mod display;
pub mod error;
pub mod fire;
pub mod intensity;
pub mod mqtt;
pub mod palette;
pub mod settings;
pub mod util;

pub use error::{FireError, Result};
