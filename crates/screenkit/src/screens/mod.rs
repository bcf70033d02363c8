//! Screen stack module
//!
//! Architecture:
//! - transition: per-screen fade state machine
//! - screen: [`Screen`] trait, [`ScreenCore`] and the markup-backed [`GuiScreen`]
//! - manager: [`ScreenManager`] owning the stack and shared services
//! - loading / menu / message_box: stock screens built on the above

pub mod error;
pub mod loading;
pub mod manager;
pub mod menu;
pub mod message_box;
pub mod screen;
pub mod transition;


pub use error::ScreenError;
pub use loading::LoadingScreen;
pub use manager::{ScreenId, ScreenManager};
pub use menu::{MenuEntry, MenuHandler, MenuScreen};
pub use message_box::{MessageBoxHandler, MessageBoxScreen, Padding};
pub use screen::{GuiScreen, Screen, ScreenCommand, ScreenContext, ScreenCore};
pub use transition::{ScreenState, Transition};
