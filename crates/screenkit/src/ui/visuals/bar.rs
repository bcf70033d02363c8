//! Progress bar visual

use crate::config::GuiConfig;
use crate::foundation::math::{colors, Color, Rect};
use crate::ui::attributes::Attributes;
use crate::ui::rendering::DrawContext;
use crate::ui::visuals::{Drawable, OwnerView};
use crate::ui::GuiError;

/// Base rectangle with a fill rectangle proportional to the owner's progress
#[derive(Debug, Clone, PartialEq)]
pub struct BarVisual {
    /// Background colour
    pub base_color: Color,
    /// Fill colour
    pub fill_color: Color,
}

impl Default for BarVisual {
    fn default() -> Self {
        Self {
            base_color: colors::gray(),
            fill_color: colors::white(),
        }
    }
}

impl BarVisual {
    /// Bar with the given colours
    pub fn new(base_color: Color, fill_color: Color) -> Self {
        Self { base_color, fill_color }
    }

    /// Fill fraction for an owner: its progress, else its value, else zero
    pub fn fraction(owner: &OwnerView) -> f32 {
        owner
            .progress
            .or_else(|| (!owner.value.is_nan()).then_some(owner.value))
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    /// Fill rectangle for `rect` at `fraction`
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn fill_rect(rect: Rect, fraction: f32) -> Rect {
        Rect {
            width: (rect.width as f32 * fraction) as i32,
            ..rect
        }
    }
}

impl Drawable for BarVisual {
    fn key(&self) -> &str {
        "BAR"
    }

    fn process_attributes(&mut self, attrs: &Attributes, _config: &GuiConfig) -> Result<(), GuiError> {
        self.base_color = attrs.color_or("BaseColor", self.base_color)?;
        self.fill_color = attrs.color_or("FillColor", self.fill_color)?;
        Ok(())
    }

    fn draw(&self, rect: Rect, owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        ctx.backend.fill_rect(rect, self.base_color)?;

        let fill = Self::fill_rect(rect, Self::fraction(owner));
        if fill.width > 0 {
            ctx.backend.fill_rect(fill, self.fill_color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point;

    fn owner(progress: Option<f32>, value: f32) -> OwnerView {
        OwnerView {
            location: Point::zeros(),
            size: Point::new(100, 10),
            bounds: Rect::new(0, 0, 100, 10),
            enabled: true,
            visible: true,
            text: String::new(),
            value,
            checked: None,
            progress,
        }
    }

    #[test]
    fn test_fraction_prefers_progress_then_value() {
        assert!((BarVisual::fraction(&owner(Some(0.25), 0.9)) - 0.25).abs() < f32::EPSILON);
        assert!((BarVisual::fraction(&owner(None, 0.9)) - 0.9).abs() < f32::EPSILON);
        assert!(BarVisual::fraction(&owner(None, f32::NAN)).abs() < f32::EPSILON);
        assert!((BarVisual::fraction(&owner(Some(3.0), 0.0)) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fill_rect_scales_width_only() {
        let fill = BarVisual::fill_rect(Rect::new(10, 20, 200, 8), 0.5);
        assert_eq!(fill, Rect::new(10, 20, 100, 8));
    }
}
