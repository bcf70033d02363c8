//! Sprite-sheet image visual

use crate::config::GuiConfig;
use crate::foundation::math::{colors, Color, Point, Rect};
use crate::ui::attributes::Attributes;
use crate::ui::content::{ContentProvider, SpriteRegion};
use crate::ui::rendering::DrawContext;
use crate::ui::visuals::{Drawable, OwnerView, VisualLayout};
use crate::ui::GuiError;

/// Draws one sprite stretched into its resolved rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVisual {
    /// Sprite sheet key
    pub sheet: String,
    /// Sprite key; empty draws nothing
    pub src: String,
    /// Tint while the owner is enabled
    pub tint: Color,
    /// Tint while the owner is disabled
    pub disabled_tint: Color,
    /// Follow the owner's size instead of the declared size
    pub use_parent_size: bool,
    region: Option<SpriteRegion>,
}

impl Default for ImageVisual {
    fn default() -> Self {
        Self {
            sheet: String::new(),
            src: String::new(),
            tint: colors::white(),
            disabled_tint: colors::white(),
            use_parent_size: false,
            region: None,
        }
    }
}

impl ImageVisual {
    /// Image of `src` in `sheet`
    pub fn new(sheet: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            src: src.into(),
            ..Self::default()
        }
    }

    /// Sprite resolved at load time
    pub fn region(&self) -> Option<SpriteRegion> {
        self.region
    }
}

impl Drawable for ImageVisual {
    fn key(&self) -> &str {
        "IMAGE"
    }

    fn process_attributes(&mut self, attrs: &Attributes, config: &GuiConfig) -> Result<(), GuiError> {
        self.disabled_tint = attrs.color_or("DisabledTint", self.disabled_tint)?;
        self.tint = attrs.color_or("Tint", self.tint)?;
        self.src = attrs.get("Src").unwrap_or_default().to_string();
        self.sheet = attrs
            .get("Sheet")
            .unwrap_or(config.default_sprite_sheet.as_str())
            .to_string();
        self.use_parent_size = attrs.bool_or("UseParentSize", self.use_parent_size)?;
        Ok(())
    }

    fn load(&mut self, layout: &mut VisualLayout, content: &dyn ContentProvider) -> Result<(), GuiError> {
        if self.src.is_empty() {
            return Ok(());
        }

        let region = content
            .sprite(&self.sheet, &self.src)
            .ok_or_else(|| GuiError::MissingAsset(format!("{}/{}", self.sheet, self.src)))?;

        if layout.size == Point::zeros() && !self.use_parent_size {
            layout.size = region.source.size();
        }
        self.region = Some(region);
        Ok(())
    }

    fn unload(&mut self) {
        self.region = None;
    }

    fn requested_size(&self, layout: &VisualLayout, owner: &OwnerView, _content: &dyn ContentProvider) -> Point {
        if self.use_parent_size {
            owner.size
        } else {
            layout.size
        }
    }

    fn draw(&self, rect: Rect, owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        let Some(region) = self.region else {
            return Ok(());
        };

        let tint = if owner.enabled { self.tint } else { self.disabled_tint };
        ctx.backend.draw_sprite(region.page, rect, region.source, tint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::content::MemoryContent;

    #[test]
    fn test_defaults_sheet_from_config() {
        let mut image = ImageVisual::default();
        let attrs = Attributes::new("Image").with("Src", "Logo");
        image.process_attributes(&attrs, &GuiConfig::default()).unwrap();
        assert_eq!(image.sheet, "Main");
        assert_eq!(image.src, "Logo");
    }

    #[test]
    fn test_load_takes_sprite_size_when_unsized() {
        let content = MemoryContent::new().with_sprite("Main", "Logo", Rect::new(0, 0, 48, 24));
        let mut image = ImageVisual::new("Main", "Logo");
        let mut layout = VisualLayout::default();

        image.load(&mut layout, &content).unwrap();
        assert_eq!(layout.size, Point::new(48, 24));
        assert!(image.region().is_some());
    }

    #[test]
    fn test_load_keeps_size_when_following_parent() {
        let content = MemoryContent::new().with_sprite("Main", "Blank", Rect::new(0, 0, 4, 4));
        let mut image = ImageVisual::new("Main", "Blank");
        image.use_parent_size = true;
        let mut layout = VisualLayout::default();

        image.load(&mut layout, &content).unwrap();
        assert_eq!(layout.size, Point::zeros());
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let content = MemoryContent::new();
        let mut image = ImageVisual::new("Main", "Nope");
        let err = image.load(&mut VisualLayout::default(), &content).unwrap_err();
        assert!(matches!(err, GuiError::MissingAsset(ref key) if key == "Main/Nope"));
    }
}
