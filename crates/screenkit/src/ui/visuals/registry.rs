//! Visual registry
//!
//! Maps an upper-case markup key to a factory. Built-ins are registered by
//! [`VisualRegistry::with_builtins`]; applications add their own keys before
//! loading markup.

use std::collections::HashMap;

use crate::ui::visuals::{BarVisual, CircleVisual, ImageVisual, TextVisual, VisualKind};
use crate::ui::GuiError;

type VisualFactory = Box<dyn Fn() -> VisualKind>;

/// String key to visual variant table
#[derive(Default)]
pub struct VisualRegistry {
    factories: HashMap<String, VisualFactory>,
}

impl VisualRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `IMAGE`, `TEXT`, `CIRCLE` and `BAR`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("IMAGE", || VisualKind::Image(ImageVisual::default()));
        registry.register("TEXT", || VisualKind::Text(TextVisual::default()));
        registry.register("CIRCLE", || VisualKind::Circle(CircleVisual::default()));
        registry.register("BAR", || VisualKind::Bar(BarVisual::default()));
        registry
    }

    /// Register a factory; the first registration of a key wins
    pub fn register<F>(&mut self, key: &str, factory: F) -> bool
    where
        F: Fn() -> VisualKind + 'static,
    {
        let key = key.to_ascii_uppercase();
        if self.factories.contains_key(&key) {
            log::warn!("Visual key {key} is already registered, keeping the first");
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
    pub fn create(&self, key: &str) -> Result<VisualKind, GuiError> {
        self.factories
            .get(&key.to_ascii_uppercase())
            .map(|factory| factory())
            .ok_or_else(|| GuiError::UnknownVisual(key.to_string()))
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for VisualRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualRegistry").field("keys", &self.keys()).finish()
    }
}
