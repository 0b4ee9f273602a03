mod pixel_buffer;
#[cfg(feature = "window")]
mod window;

pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "window")]
pub use window::{Display, InputEvent, RenderTarget};
