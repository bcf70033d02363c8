//! Headless menu demo
//!
//! Drives the screen stack with scripted input: type a player name, start a
//! game through the loading screen, flip the hints, pause, then confirm
//! quitting from the pause menu.
//! Frames are drawn into a recording backend and summarized in the log.

mod screens;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use screenkit::config::{Config, ConfigError};
use screenkit::foundation::logging;
use screenkit::prelude::*;

use screens::{MainMenuScreen, QuitFlag};

const FRAME: Duration = Duration::from_millis(50);
const MAX_FRAMES: u32 = 200;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Screen(#[from] ScreenError),
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn config_path() -> String {
    data_dir().join("screenkit.toml").to_string_lossy().into_owned()
}

fn prepare_config(loaded: Result<GuiConfig, ConfigError>) -> Result<GuiConfig, DemoError> {
    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("Using default configuration ({e})");
        GuiConfig::default().with_screen_size(800, 600)
    });
    config.content_root = data_dir().to_string_lossy().into_owned();
    config.validate().map_err(DemoError::Config)?;
    Ok(config)
}

fn content() -> MemoryContent {
    MemoryContent::new()
        .with_sprite("Main", "Background", Rect::new(0, 0, 800, 600))
        .with_sprite("Main", "Button", Rect::new(0, 600, 200, 40))
        .with_sprite("Main", "ButtonDisabled", Rect::new(0, 640, 200, 40))
        .with_sprite("Main", "Box", Rect::new(200, 600, 32, 32))
        .with_sprite("Main", "Tick", Rect::new(232, 600, 32, 32))
        .with_sprite("Main", "Blank", Rect::new(264, 600, 4, 4))
        .with_sprite("Main", "gradient", Rect::new(268, 600, 64, 64))
        .with_font("Menu", 10.0, 20.0)
        .with_font("System", 8.0, 16.0)
}

fn click(tracker: &mut InputTracker, x: f32, y: f32, frame: u32, at: u32) {
    if frame == at {
        tracker.update_mouse_position(x, y);
        tracker.update_mouse_button(MouseButton::Left, true);
    } else if frame == at + 1 {
        tracker.update_mouse_button(MouseButton::Left, false);
    }
}

/// Feed this frame's scripted events
fn script(tracker: &mut InputTracker, frame: u32) {
    // Player name box, then the Play button
    click(tracker, 330.0, 460.0, frame, 5);
    if frame == 8 {
        "Ace".chars().for_each(|c| tracker.push_char(c));
    }
    click(tracker, 400.0, 228.0, frame, 12);

    match frame {
        70 | 72 => tracker.push_key(Key::Right),
        90 => tracker.push_key(Key::Escape),
        95 => tracker.push_key(Key::Down),
        100 | 110 => tracker.push_key(Key::Enter),
        _ => {}
    }
}

fn main() -> Result<(), DemoError> {
    let loaded = GuiConfig::load_from_file(&config_path());
    let level = loaded
        .as_ref()
        .map_or_else(|_| "info".to_string(), |config| config.log_level.clone());
    logging::init_with_level(&level);
    log::info!("Starting menu demo...");

    let config = prepare_config(loaded)?;
    let (width, height) = (config.screen_width, config.screen_height);
    let services = Services::new(config, Box::new(content()), Box::new(NullAudio::new()));

    let quit: QuitFlag = Rc::new(Cell::new(false));
    let mut manager = ScreenManager::new(services);
    manager.add_screen(Box::new(MainMenuScreen::new(Rc::clone(&quit))))?;
    manager.initialize()?;

    let mut backend = RecordingBackend::new(width.unsigned_abs(), height.unsigned_abs());
    let mut tracker = InputTracker::new();
    let mut frame = 0;

    while frame < MAX_FRAMES && !quit.get() && !manager.is_empty() {
        script(&mut tracker, frame);
        let input = tracker.snapshot();

        manager.update(FRAME, &input)?;
        manager.draw(&mut backend)?;

        let commands = backend.take_commands();
        let names: Vec<_> = manager.screens().map(|screen| screen.core().name()).collect();
        log::debug!("Frame {frame}: {} draw commands, stack {names:?}", commands.len());
        frame += 1;
    }

    manager.shutdown();
    log::info!("Menu demo finished after {frame} frames (quit confirmed: {})", quit.get());
    Ok(())
}
