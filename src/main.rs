use clap::Parser;
use doomfire::app::FireApp;
use doomfire::cli::Cli;
use doomfire::control::{Command, KEY_BINDINGS};
use doomfire::mqtt::MqttClient;
use doomfire::settings::Settings;
use doomfire::Result;

#[cfg(feature = "window")]
const WINDOW_TITLE: &str = concat!("Fire effect - v", env!("CARGO_PKG_VERSION"));

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose > 0 {
        logger.filter_level(cli.log_filter());
    }
    logger.init();

    let base = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = cli.apply(base);
    let mut app = FireApp::new(&settings)?;

    let remote = settings.mqtt_host.as_deref().and_then(|host| {
        match MqttClient::new(host, &settings.mqtt_topic) {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("{}; continuing without remote control", e);
                None
            },
        }
    });

    println!("{}", KEY_BINDINGS);

    run(&mut app, &settings, cli.frames, remote.as_ref())?;

    if app.captured_frames() > 0 {
        log::info!(
            "captured {} frames to {}",
            app.captured_frames(),
            settings.capture_dir.display()
        );
    }
    log::info!("done.");
    Ok(())
}

/// Apply queued commands. Returns false once a quit was requested.
fn apply_commands(app: &mut FireApp, commands: impl IntoIterator<Item = Command>) -> Result<bool> {
    for command in commands {
        if command == Command::Quit {
            return Ok(false);
        }
        app.handle(command)?;
    }
    Ok(true)
}

#[cfg(feature = "window")]
fn run(
    app: &mut FireApp,
    settings: &Settings,
    _frames: u64,
    remote: Option<&MqttClient>,
) -> Result<()> {
    use doomfire::display::{Display, InputEvent, RenderTarget};
    use doomfire::util::FpsCounter;

    let (mut display, texture_creator) = Display::with_options(
        WINDOW_TITLE,
        settings.width,
        settings.height,
        settings.scale,
        settings.vsync,
    )?;
    let mut target = RenderTarget::with_size(&texture_creator, settings.width, settings.height)?;

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut fps_shown = false;
    let mut frame_count: u64 = 0;

    'main: loop {
        let avg_fps = fps_counter.tick();

        let mut commands = Vec::new();
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::Command(command) => commands.push(command),
            }
        }
        if let Some(remote) = remote {
            commands.extend(remote.poll());
        }
        if !apply_commands(app, commands)? {
            break 'main;
        }

        let frame = app.tick();
        display.present(&mut target, frame)?;
        frame_count += 1;

        // Title updates are slow on some window managers; refresh twice a second
        if app.tuning().show_fps {
            if !fps_shown || frame_count % 30 == 0 {
                let status = format!(
                    "TPS: {:.2} ({:.1}ms)",
                    avg_fps,
                    fps_counter.avg_frame_time_ms()
                );
                display.set_status(Some(&status))?;
                fps_shown = true;
            }
        } else if fps_shown {
            display.set_status(None)?;
            fps_shown = false;
        }
    }

    Ok(())
}

#[cfg(not(feature = "window"))]
fn run(
    app: &mut FireApp,
    _settings: &Settings,
    frames: u64,
    remote: Option<&MqttClient>,
) -> Result<()> {
    log::info!("built without window support, rendering {} frames headless", frames);
    for _ in 0..frames {
        let commands = remote.map(MqttClient::poll).unwrap_or_default();
        if !apply_commands(app, commands)? {
            break;
        }
        app.tick();
    }
    Ok(())
}
