//! Content collaborator interface
//!
//! The GUI only needs two capabilities from the content pipeline: resolving a
//! sprite in a sheet to a page texture plus source rectangle, and measuring
//! text in a named font.

use std::collections::HashMap;

use crate::foundation::math::{Rect, Vec2};

/// Handle to a texture page owned by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// A sprite's location in its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRegion {
    /// Texture page holding the sprite
    pub page: TextureHandle,
    /// Source rectangle within the page
    pub source: Rect,
}

/// Content pipeline interface
pub trait ContentProvider {
    /// Resolve a sprite by sheet and sprite key
    fn sprite(&self, sheet: &str, name: &str) -> Option<SpriteRegion>;

    /// Measure text in a font, `None` when the font is unknown
    fn measure_text(&self, font: &str, text: &str) -> Option<Vec2>;

    /// Whether the font can be resolved
    fn has_font(&self, font: &str) -> bool {
        self.measure_text(font, "").is_some()
    }
}

#[derive(Debug, Clone)]
struct SheetEntry {
    page: TextureHandle,
    sprites: HashMap<String, Rect>,
}

#[derive(Debug, Clone, Copy)]
struct FixedFont {
    char_width: f32,
    line_height: f32,
}

/// In-memory content with fixed-metric fonts
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    sheets: HashMap<String, SheetEntry>,
    fonts: HashMap<String, FixedFont>,
    next_page: u64,
}

impl MemoryContent {
    /// Create empty content
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite, creating its sheet on first use (builder pattern)
    pub fn with_sprite(mut self, sheet: &str, name: &str, source: Rect) -> Self {
        self.add_sprite(sheet, name, source);
        self
    }

    /// Add a monospaced font (builder pattern)
    pub fn with_font(mut self, name: &str, char_width: f32, line_height: f32) -> Self {
        self.fonts.insert(
            name.to_string(),
            FixedFont { char_width, line_height },
        );
        self
    }

    /// Add a sprite, creating its sheet on first use
    pub fn add_sprite(&mut self, sheet: &str, name: &str, source: Rect) {
        if !self.sheets.contains_key(sheet) {
            self.next_page += 1;
            self.sheets.insert(
                sheet.to_string(),
                SheetEntry {
                    page: TextureHandle(self.next_page),
                    sprites: HashMap::new(),
                },
            );
        }

        if let Some(entry) = self.sheets.get_mut(sheet) {
            entry.sprites.insert(name.to_string(), source);
        }
    }

    /// Texture page of a sheet
    pub fn page(&self, sheet: &str) -> Option<TextureHandle> {
        self.sheets.get(sheet).map(|entry| entry.page)
    }
}

impl ContentProvider for MemoryContent {
    fn sprite(&self, sheet: &str, name: &str) -> Option<SpriteRegion> {
        let entry = self.sheets.get(sheet)?;
        entry.sprites.get(name).map(|source| SpriteRegion {
            page: entry.page,
            source: *source,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, font: &str, text: &str) -> Option<Vec2> {
        let font = self.fonts.get(font)?;
        if text.is_empty() {
            return Some(Vec2::zeros());
        }

        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });

        Some(Vec2::new(
            widest as f32 * font.char_width,
            count as f32 * font.line_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sprites_share_sheet_page() {
        let content = MemoryContent::new()
            .with_sprite("Main", "Button", Rect::new(0, 0, 64, 32))
            .with_sprite("Main", "Blank", Rect::new(64, 0, 4, 4))
            .with_sprite("Icons", "Star", Rect::new(0, 0, 16, 16));

        let button = content.sprite("Main", "Button").unwrap();
        let blank = content.sprite("Main", "Blank").unwrap();
        let star = content.sprite("Icons", "Star").unwrap();
        assert_eq!(button.page, blank.page);
        assert_ne!(button.page, star.page);
        assert!(content.sprite("Main", "Missing").is_none());
    }

    #[test]
    fn test_fixed_font_measures_multiline() {
        let content = MemoryContent::new().with_font("Menu", 8.0, 16.0);
        let size = content.measure_text("Menu", "abc\nlonger").unwrap();
        assert_relative_eq!(size.x, 48.0);
        assert_relative_eq!(size.y, 32.0);
        assert!(content.has_font("Menu"));
        assert!(!content.has_font("Other"));
    }
}
