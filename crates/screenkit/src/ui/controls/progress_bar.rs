//! Progress bar control

use crate::foundation::math::{colors, Color, Point};
use crate::ui::attributes::Attributes;
use crate::ui::controls::ControlCore;
use crate::ui::visuals::{BarVisual, Visual, VisualKind};
use crate::ui::GuiError;

/// Shows a 0..=1 progress with a bar visual it builds itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    progress: f32,
    /// Background colour
    pub base_color: Color,
    /// Fill colour
    pub fill_color: Color,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            progress: 0.0,
            base_color: colors::gray(),
            fill_color: colors::white(),
        }
    }
}

impl ProgressBar {
    /// Current progress
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set progress, clamped to 0..=1 (NaN becomes 0)
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    }

    pub(crate) fn process_attributes(
        &mut self,
        core: &ControlCore,
        attrs: &Attributes,
    ) -> Result<Vec<Visual>, GuiError> {
        self.set_progress(attrs.parse_or("Progress", self.progress)?);
        self.base_color = attrs.color_or("BaseColor", self.base_color)?;
        self.fill_color = attrs.color_or("FillColor", self.fill_color)?;

        let bar = BarVisual::new(self.base_color, self.fill_color);
        Ok(vec![Visual::new(VisualKind::Bar(bar)).with_rect(Point::zeros(), core.size)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        let mut bar = ProgressBar::default();
        bar.set_progress(1.5);
        assert!((bar.progress() - 1.0).abs() < f32::EPSILON);
        bar.set_progress(-2.0);
        assert!(bar.progress().abs() < f32::EPSILON);
        bar.set_progress(f32::NAN);
        assert!(bar.progress().abs() < f32::EPSILON);
    }
}
