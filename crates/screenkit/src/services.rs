//! Shared services handed to every screen
//!
//! Registries, configuration and the content/audio collaborators are
//! constructed once by the application and owned by the screen manager.

use crate::audio::{AudioPlayer, NullAudio};
use crate::config::GuiConfig;
use crate::ui::content::{ContentProvider, MemoryContent};
use crate::ui::controls::ControlRegistry;
use crate::ui::markup::MarkupLoader;
use crate::ui::visuals::VisualRegistry;

/// Application-wide collaborators
pub struct Services {
    /// GUI configuration
    pub config: GuiConfig,
    /// Control variants available to markup
    pub controls: ControlRegistry,
    /// Visual variants available to markup
    pub visuals: VisualRegistry,
    /// Sprite and font lookups
    pub content: Box<dyn ContentProvider>,
    /// Music and sound effects
    pub audio: Box<dyn AudioPlayer>,
}

impl Services {
    /// Services with built-in registries and the given collaborators
    pub fn new(config: GuiConfig, content: Box<dyn ContentProvider>, audio: Box<dyn AudioPlayer>) -> Self {
        Self {
            config,
            controls: ControlRegistry::with_builtins(),
            visuals: VisualRegistry::with_builtins(),
            content,
            audio,
        }
    }

    /// Markup loader over these registries
    pub fn markup_loader(&self) -> MarkupLoader<'_> {
        MarkupLoader::new(&self.controls, &self.visuals, &self.config)
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(
            GuiConfig::default(),
            Box::new(MemoryContent::new()),
            Box::new(NullAudio::new()),
        )
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .field("controls", &self.controls)
            .field("visuals", &self.visuals)
            .finish_non_exhaustive()
    }
}
