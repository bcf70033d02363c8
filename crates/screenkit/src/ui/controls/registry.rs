//! Control registry
//!
//! Markup element names are looked up here (case-insensitive). Built-ins are
//! registered by [`ControlRegistry::with_builtins`].

use std::collections::HashMap;

use crate::ui::controls::{CheckBox, ControlKind, ProgressBar, Slideshow, TextInput};
use crate::ui::GuiError;

type ControlFactory = Box<dyn Fn() -> ControlKind>;

/// String key to control variant table
#[derive(Default)]
pub struct ControlRegistry {
    factories: HashMap<String, ControlFactory>,
}

impl ControlRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `WINDOW`, `BUTTON`, `CHECKBOX`, `INPUT`, `PROGRESSBAR` and `SLIDESHOW`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("WINDOW", || ControlKind::Window);
        registry.register("BUTTON", || ControlKind::Button);
        registry.register("CHECKBOX", || ControlKind::CheckBox(CheckBox::default()));
        registry.register("INPUT", || ControlKind::Input(TextInput::default()));
        registry.register("PROGRESSBAR", || ControlKind::ProgressBar(ProgressBar::default()));
        registry.register("SLIDESHOW", || ControlKind::Slideshow(Slideshow::default()));
        registry
    }

    /// Register a factory; the first registration of a key wins
    pub fn register<F>(&mut self, key: &str, factory: F) -> bool
    where
        F: Fn() -> ControlKind + 'static,
    {
        let key = key.to_ascii_uppercase();
        if self.factories.contains_key(&key) {
            log::warn!("Control key {key} is already registered, keeping the first");
            return false;
        }
        self.factories.insert(key, Box::new(factory));
        true
    }

    /// Whether a key is registered (case-insensitive)
    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(&key.to_ascii_uppercase())
    }

    /// Construct the variant registered under `key` (case-insensitive)
    pub fn create(&self, key: &str) -> Result<ControlKind, GuiError> {
        self.factories
            .get(&key.to_ascii_uppercase())
            .map(|factory| factory())
            .ok_or_else(|| GuiError::UnknownControl(key.to_string()))
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRegistry").field("keys", &self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::{ControlBehavior, ControlCore};

    struct Knob;

    impl ControlBehavior for Knob {
        fn key(&self) -> &str {
            "KNOB"
        }

        fn handle_input(&mut self, _core: &mut ControlCore, _input: &crate::input::InputSnapshot) {}
    }

    #[test]
    fn test_builtins() {
        let registry = ControlRegistry::with_builtins();
        assert!(matches!(registry.create("checkbox").unwrap(), ControlKind::CheckBox(_)));
        assert!(matches!(registry.create("ProgressBar").unwrap(), ControlKind::ProgressBar(_)));
        assert_eq!(registry.keys().len(), 6);
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ControlRegistry::with_builtins();
        assert!(registry.register("Knob", || ControlKind::Custom(Box::new(Knob))));
        assert_eq!(registry.create("knob").unwrap().key(), "KNOB");
        assert!(!registry.register("KNOB", || ControlKind::Button));
    }

    #[test]
    fn test_unknown_control() {
        let registry = ControlRegistry::new();
        assert!(matches!(registry.create("Slider"), Err(GuiError::UnknownControl(_))));
    }
}
