use super::PixelBuffer;
use crate::control::Command;
use crate::error::{FireError, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    title: String,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

/// Input already resolved to what the app should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Command(Command),
}

impl Display {
    /// Create a window of `width*scale` x `height*scale`.
    /// vsync=true locks presentation to the monitor refresh.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        scale: f32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(FireError::Display)?;
        let video_subsystem = sdl_context.video().map_err(FireError::Display)?;

        let window_w = (width as f32 * scale).round() as u32;
        let window_h = (height as f32 * scale).round() as u32;
        let window = video_subsystem
            .window(title, window_w, window_h)
            .position_centered()
            .build()
            .map_err(|e| FireError::Display(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| FireError::Display(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(FireError::Display)?;

        log::info!(
            "window {}x{} (frame {}x{}, vsync {})",
            window_w,
            window_h,
            width,
            height,
            if vsync { "on" } else { "off" }
        );

        Ok((
            Self {
                canvas,
                event_pump,
                title: title.to_string(),
            },
            texture_creator,
        ))
    }

    /// Upload the frame and show it, stretched to the window
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| FireError::Display(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(&target.texture, None, None)
            .map_err(FireError::Display)?;
        self.canvas.present();
        Ok(())
    }

    /// Append a status string to the window title (None restores the plain title)
    pub fn set_status(&mut self, status: Option<&str>) -> Result<()> {
        let title = match status {
            Some(status) => format!("{} - {}", self.title, status),
            None => self.title.clone(),
        };
        self.canvas
            .window_mut()
            .set_title(&title)
            .map_err(|e| FireError::Display(e.to_string()))
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(InputEvent::Quit),
                // Held keys repeat; only the initial press counts
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => {
                    if let Some(command) = map_key(k) {
                        events.push(InputEvent::Command(command));
                    }
                },
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                }
                | Event::FingerDown { .. } => {
                    events.push(InputEvent::Command(Command::ToggleEffect));
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the frame size.
    /// RGBA32 is the R, G, B, A byte layout on any host.
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
            .map_err(|e| FireError::Display(e.to_string()))?;
        texture.set_blend_mode(BlendMode::Blend);
        Ok(Self { texture })
    }
}

fn map_key(key: Keycode) -> Option<Command> {
    match key {
        Keycode::Space => Some(Command::ToggleEffect),
        Keycode::P => Some(Command::SwitchPalette),
        Keycode::Left => Some(Command::WindDown),
        Keycode::Right => Some(Command::WindUp),
        Keycode::D => Some(Command::FlipWind),
        Keycode::PageUp => Some(Command::BackgroundOpacityUp),
        Keycode::PageDown => Some(Command::BackgroundOpacityDown),
        Keycode::Up => Some(Command::IntensityUp),
        Keycode::Down => Some(Command::IntensityDown),
        Keycode::F => Some(Command::ToggleFps),
        Keycode::S => Some(Command::ToggleCapture),
        _ => None,
    }
}
