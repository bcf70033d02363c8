//! Configuration system

pub use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # GUI Configuration
///
/// Screen geometry, content locations and screen defaults shared by every
/// screen on the stack. Every field has a serde default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Virtual screen width in pixels
    pub screen_width: i32,
    /// Virtual screen height in pixels
    pub screen_height: i32,
    /// Side length of the square hit-test probe around the pointer
    pub probe_size: i32,
    /// Root directory for content
    pub content_root: String,
    /// Directory below the content root holding window markup
    pub gui_directory: String,
    /// File extension of window markup files
    pub gui_extension: String,
    /// Sprite sheet used by images that do not name one
    pub default_sprite_sheet: String,
    /// Default transition-on duration in seconds
    pub transition_on_seconds: f32,
    /// Default transition-off duration in seconds
    pub transition_off_seconds: f32,
    /// Whether menus follow the pointer
    pub mouse_enabled: bool,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl GuiConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            probe_size: 2,
            content_root: "Content".to_string(),
            gui_directory: "Data/GUI".to_string(),
            gui_extension: "GUI".to_string(),
            default_sprite_sheet: "Main".to_string(),
            transition_on_seconds: 0.5,
            transition_off_seconds: 0.5,
            mouse_enabled: true,
            log_level: "info".to_string(),
        }
    }

    /// Set the virtual screen size
    pub fn with_screen_size(mut self, width: i32, height: i32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the content root directory
    pub fn with_content_root(mut self, root: impl Into<String>) -> Self {
        self.content_root = root.into();
        self
    }

    /// Virtual screen size as a point
    pub fn screen_size(&self) -> crate::foundation::math::Point {
        crate::foundation::math::Point::new(self.screen_width, self.screen_height)
    }

    /// Default transition-on duration
    pub fn transition_on(&self) -> Duration {
        Duration::from_secs_f32(self.transition_on_seconds.max(0.0))
    }

    /// Default transition-off duration
    pub fn transition_off(&self) -> Duration {
        Duration::from_secs_f32(self.transition_off_seconds.max(0.0))
    }

    /// Resolve `<content>/<gui dir>/<asset>.<ext>`
    pub fn window_asset_path(&self, asset: &str) -> PathBuf {
        PathBuf::from(&self.content_root)
            .join(&self.gui_directory)
            .join(format!("{asset}.{}", self.gui_extension))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(format!(
                "Screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }

        if self.probe_size <= 0 {
            return Err("Probe size must be at least 1 pixel".to_string());
        }

        if self.transition_on_seconds < 0.0 || self.transition_off_seconds < 0.0 {
            return Err("Transition durations cannot be negative".to_string());
        }

        Ok(())
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for GuiConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuiConfig::default();
        assert_eq!(config.screen_size(), crate::foundation::math::Point::new(1280, 720));
        assert_eq!(config.probe_size, 2);
        assert_eq!(config.transition_on(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GuiConfig = toml::from_str("screen_width = 800\nscreen_height = 600\n").unwrap();
        assert_eq!(config.screen_width, 800);
        assert_eq!(config.default_sprite_sheet, "Main");
        assert!(config.mouse_enabled);
    }

    #[test]
    fn test_ron_round_trip_keeps_paths() {
        let config = GuiConfig::new().with_content_root("assets");
        let text = ron::ser::to_string(&config).unwrap();
        let back: GuiConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_window_asset_path() {
        let config = GuiConfig::new();
        let path = config.window_asset_path("MainMenu");
        assert_eq!(path, PathBuf::from("Content").join("Data/GUI").join("MainMenu.GUI"));
    }

    #[test]
    fn test_validate_rejects_bad_probe() {
        let mut config = GuiConfig::new();
        config.probe_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = GuiConfig::load_from_file("settings.ini");
        assert!(matches!(result, Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))));
    }
}
