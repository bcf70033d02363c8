//! # Screenkit
//!
//! Screen-stack state machine and markup-driven retained-mode GUI for 2D games.
//!
//! ## Features
//!
//! - **Screen Stack**: Screens transition on and off, popups overlay, input goes to the top
//! - **Markup Windows**: Controls, visuals and templates declared in XML
//! - **Layout Solver**: Alignment and percent geometry resolved against parent bounds
//! - **Backend Agnostic**: Drawing goes through the [`ui::RenderBackend`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use screenkit::prelude::*;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut manager = ScreenManager::new(Services::default());
//!     manager.add_screen(Box::new(GuiScreen::new("MainMenu")))?;
//!     manager.initialize()?;
//!
//!     let mut backend = RecordingBackend::new(1280, 720);
//!     manager.update(Duration::from_millis(16), &InputSnapshot::new())?;
//!     manager.draw(&mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod input;
pub mod audio;
pub mod ui;
pub mod screens;

mod services;

pub use services::Services;

/// Common imports for screenkit users
pub mod prelude {
    pub use crate::{
        audio::{AudioPlayer, NullAudio},
        config::GuiConfig,
        events::{ControlEvent, ControlEventKind},
        foundation::math::{colors, Color, Point, Rect},
        input::{InputSnapshot, InputTracker, Key, MouseButton},
        screens::{
            GuiScreen, LoadingScreen, MenuEntry, MenuScreen, MessageBoxScreen, Screen, ScreenContext, ScreenCore,
            ScreenError, ScreenId, ScreenManager, ScreenState,
        },
        ui::{
            ContentProvider, Control, ControlKind, GuiError, MemoryContent, RecordingBackend, RenderBackend, Window,
        },
        Services,
    };
}
