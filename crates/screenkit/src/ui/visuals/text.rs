//! Text visual
//!
//! The string is chosen at draw time from a literal, the owner's text or the
//! owner's value, so owner-bound text is always live. Escaped `\n` sequences
//! become line breaks before measuring.

use crate::config::GuiConfig;
use crate::foundation::math::{colors, Color, Point, Rect};
use crate::ui::attributes::Attributes;
use crate::ui::content::ContentProvider;
use crate::ui::rendering::DrawContext;
use crate::ui::visuals::{Drawable, OwnerView, VisualLayout};
use crate::ui::GuiError;

/// Where a text visual takes its string from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Fixed string from markup
    Literal(String),
    /// Owner's `Text` (`{TEXT}`)
    OwnerText,
    /// Owner's `Value` formatted as a number (`{VALUE}`)
    OwnerValue,
}

impl TextSource {
    /// Parse the markup form
    pub fn parse(text: &str) -> Self {
        match text {
            "{TEXT}" => Self::OwnerText,
            "{VALUE}" => Self::OwnerValue,
            literal => Self::Literal(literal.to_string()),
        }
    }
}

/// Draws a string, optionally with an offset outline
#[derive(Debug, Clone, PartialEq)]
pub struct TextVisual {
    /// String source
    pub source: TextSource,
    /// Font key
    pub font: String,
    /// Colour while the owner is enabled
    pub color: Color,
    /// Colour while the owner is disabled
    pub disabled_color: Color,
    /// Grow the owner to fit the measured text
    pub allow_parent_resize: bool,
    /// Outline colour; fully transparent disables the outline
    pub stroke_color: Color,
    /// Outline offset
    pub stroke_offset: Point,
}

impl Default for TextVisual {
    fn default() -> Self {
        Self {
            source: TextSource::Literal(String::new()),
            font: String::new(),
            color: colors::black(),
            disabled_color: colors::gray(),
            allow_parent_resize: false,
            stroke_color: colors::transparent(),
            stroke_offset: Point::new(1, 1),
        }
    }
}

impl TextVisual {
    /// Text in `font` from `source`
    pub fn new(source: TextSource, font: impl Into<String>) -> Self {
        Self {
            source,
            font: font.into(),
            ..Self::default()
        }
    }

    /// String to draw for this owner, with escaped line breaks expanded
    pub fn resolve_text(&self, owner: &OwnerView) -> String {
        let raw = match &self.source {
            TextSource::Literal(text) => text.clone(),
            TextSource::OwnerText => owner.text.clone(),
            TextSource::OwnerValue if owner.value.is_nan() => String::new(),
            TextSource::OwnerValue => owner.value.to_string(),
        };
        raw.replace("\\\\n", "\n").replace("\\n", "\n")
    }

    #[allow(clippy::cast_possible_truncation)]
    fn measure(&self, owner: &OwnerView, content: &dyn ContentProvider) -> Option<Point> {
        let text = self.resolve_text(owner);
        if text.is_empty() {
            return None;
        }
        content
            .measure_text(&self.font, &text)
            .map(|size| Point::new(size.x as i32, size.y as i32))
    }

    fn has_stroke(&self) -> bool {
        self.stroke_color.w > 0.0
    }
}

impl Drawable for TextVisual {
    fn key(&self) -> &str {
        "TEXT"
    }

    fn process_attributes(&mut self, attrs: &Attributes, _config: &GuiConfig) -> Result<(), GuiError> {
        self.source = TextSource::parse(attrs.require("Text")?);
        self.font = attrs.require("Font")?.to_string();
        self.color = attrs.color_or("Color", self.color)?;
        self.allow_parent_resize = attrs.bool_or("AllowParentResize", self.allow_parent_resize)?;
        self.disabled_color = attrs.color_or("DisabledColor", self.disabled_color)?;
        self.stroke_color = attrs.color_or("StrokeColor", self.stroke_color)?;
        if let Some(offset) = attrs.parse::<i32>("StrokeOffset")? {
            self.stroke_offset = Point::new(offset, offset);
        }
        Ok(())
    }

    fn load(&mut self, _layout: &mut VisualLayout, content: &dyn ContentProvider) -> Result<(), GuiError> {
        if content.has_font(&self.font) {
            Ok(())
        } else {
            Err(GuiError::MissingAsset(format!("font {}", self.font)))
        }
    }

    fn requested_size(&self, _layout: &VisualLayout, owner: &OwnerView, content: &dyn ContentProvider) -> Point {
        self.measure(owner, content).unwrap_or_else(Point::zeros)
    }

    fn owner_growth(&self, owner: &OwnerView, content: &dyn ContentProvider) -> Option<Point> {
        if !self.allow_parent_resize {
            return None;
        }

        let measured = self.measure(owner, content)?;
        let grown = owner.size.sup(&measured);
        (grown != owner.size).then_some(grown)
    }

    fn draw(&self, rect: Rect, owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        let text = self.resolve_text(owner);
        if text.is_empty() {
            return Ok(());
        }

        let position = rect.location();
        if self.has_stroke() {
            ctx.backend
                .draw_text(&self.font, &text, position + self.stroke_offset, self.stroke_color)?;
        }

        let color = if owner.enabled { self.color } else { self.disabled_color };
        ctx.backend.draw_text(&self.font, &text, position, color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::content::MemoryContent;

    fn owner(text: &str, value: f32, size: Point) -> OwnerView {
        OwnerView {
            location: Point::new(10, 10),
            size,
            bounds: Rect::from_location_size(Point::new(10, 10), size),
            enabled: true,
            visible: true,
            text: text.to_string(),
            value,
            checked: None,
            progress: None,
        }
    }

    #[test]
    fn test_source_selection_is_live() {
        let visual = TextVisual::new(TextSource::OwnerText, "Menu");
        assert_eq!(visual.resolve_text(&owner("Play", f32::NAN, Point::zeros())), "Play");
        assert_eq!(visual.resolve_text(&owner("Quit", f32::NAN, Point::zeros())), "Quit");

        let value = TextVisual::new(TextSource::OwnerValue, "Menu");
        assert_eq!(value.resolve_text(&owner("", 2.5, Point::zeros())), "2.5");
        assert_eq!(value.resolve_text(&owner("", f32::NAN, Point::zeros())), "");
    }

    #[test]
    fn test_escaped_newlines_expand() {
        let visual = TextVisual::new(TextSource::parse("one\\ntwo\\\\nthree"), "Menu");
        assert_eq!(visual.resolve_text(&owner("", f32::NAN, Point::zeros())), "one\ntwo\nthree");
    }

    #[test]
    fn test_growth_only_when_allowed_and_larger() {
        let content = MemoryContent::new().with_font("Menu", 10.0, 20.0);
        let mut visual = TextVisual::new(TextSource::OwnerText, "Menu");
        let small = owner("Hello", f32::NAN, Point::new(20, 40));

        assert_eq!(visual.owner_growth(&small, &content), None);

        visual.allow_parent_resize = true;
        assert_eq!(visual.owner_growth(&small, &content), Some(Point::new(50, 40)));

        let large = owner("Hello", f32::NAN, Point::new(100, 40));
        assert_eq!(visual.owner_growth(&large, &content), None);
    }

    #[test]
    fn test_text_and_font_are_required() {
        let mut visual = TextVisual::default();
        let attrs = Attributes::new("Text").with("Font", "Menu");
        assert!(matches!(
            visual.process_attributes(&attrs, &GuiConfig::default()),
            Err(GuiError::MissingAttribute { ref attribute, .. }) if attribute == "Text"
        ));

        let attrs = Attributes::new("Text").with("Text", "{VALUE}").with("Font", "Menu").with("StrokeOffset", "2");
        visual.process_attributes(&attrs, &GuiConfig::default()).unwrap();
        assert_eq!(visual.source, TextSource::OwnerValue);
        assert_eq!(visual.stroke_offset, Point::new(2, 2));
    }
}
