//! Markup attribute access
//!
//! Controls and visuals read their settings from an [`Attributes`] set, which
//! is filled from a markup element or built in code.

use std::str::FromStr;

use crate::foundation::math::{colors, Color, Point};
use crate::ui::layout::parse_point;
use crate::ui::GuiError;

/// Attribute set of one markup element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    element: String,
    values: Vec<(String, String)>,
}

impl Attributes {
    /// Empty attribute set for an element tag
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            values: Vec::new(),
        }
    }

    /// Attributes of an XML element
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        Self {
            element: node.tag_name().name().to_string(),
            values: node
                .attributes()
                .map(|attr| (attr.name().to_string(), attr.value().to_string()))
                .collect(),
        }
    }

    /// Add or replace an attribute (builder pattern)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Add or replace an attribute
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Element tag these attributes came from
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Raw attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Value that must be present
    pub fn require(&self, name: &str) -> Result<&str, GuiError> {
        self.get(name)
            .ok_or_else(|| GuiError::missing_attribute(&self.element, name))
    }

    /// Parse an optional value with `FromStr`
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, GuiError> {
        self.get(name)
            .map(|text| {
                text.trim()
                    .parse()
                    .map_err(|_| GuiError::invalid_attribute(name, text))
            })
            .transpose()
    }

    /// Parse a value, falling back to `default` when absent
    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, GuiError> {
        Ok(self.parse(name)?.unwrap_or(default))
    }

    /// Case-insensitive `true`/`false`
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, GuiError> {
        match self.get(name) {
            None => Ok(default),
            Some(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(GuiError::invalid_attribute(name, text)),
            },
        }
    }

    /// `"r,g,b,a"` colour, falling back to `default` when absent
    pub fn color_or(&self, name: &str, default: Color) -> Result<Color, GuiError> {
        match self.get(name) {
            None => Ok(default),
            Some(text) => colors::parse(text).ok_or_else(|| GuiError::invalid_attribute(name, text)),
        }
    }

    /// `"x,y"` point resolved against `relative_to`, `None` when absent or blank
    pub fn point(&self, name: &str, relative_to: Point) -> Result<Option<Point>, GuiError> {
        self.get(name)
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                parse_point(text, relative_to).map_err(|_| GuiError::invalid_attribute(name, text))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_require_names_element() {
        let attrs = Attributes::new("Visual").with("Type", "Text");
        assert_eq!(attrs.require("Type").unwrap(), "Text");

        let err = attrs.require("Font").unwrap_err();
        assert!(err.to_string().contains("Visual"));
        assert!(err.to_string().contains("Font"));
    }

    #[test]
    fn test_bool_is_case_insensitive_and_strict() {
        let attrs = Attributes::new("CheckBox")
            .with("Enabled", "FALSE")
            .with("Visible", "yes");
        assert!(!attrs.bool_or("Enabled", true).unwrap());
        assert!(attrs.bool_or("Missing", true).unwrap());
        assert!(attrs.bool_or("Visible", true).is_err());
    }

    #[test]
    fn test_numbers_and_colors() {
        let attrs = Attributes::new("Visual")
            .with("Density", "12")
            .with("Value", "0.25")
            .with("Color", "0,255,0,255")
            .with("Tint", "bad");
        assert_eq!(attrs.parse_or("Density", 8).unwrap(), 12);
        assert_relative_eq!(attrs.parse_or("Value", f32::NAN).unwrap(), 0.25);
        assert_relative_eq!(attrs.color_or("Color", colors::white()).unwrap().y, 1.0);
        assert!(attrs.color_or("Tint", colors::white()).is_err());
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let mut attrs = Attributes::new("Button").with("Text", "Old");
        attrs.set("Text", "New");
        assert_eq!(attrs.get("Text"), Some("New"));
    }

    #[test]
    fn test_point_relative_to_parent() {
        let attrs = Attributes::new("Button").with("Location", "10%,50%");
        let point = attrs.point("Location", Point::new(200, 100)).unwrap();
        assert_eq!(point, Some(Point::new(20, 50)));
        assert_eq!(attrs.point("Size", Point::new(200, 100)).unwrap(), None);
    }
}
