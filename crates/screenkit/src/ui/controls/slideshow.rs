//! Slideshow control
//!
//! Shows exactly one of its visuals at a time. Navigation clamps at both
//! ends; it never wraps.

use crate::ui::controls::ControlKind;
use crate::ui::visuals::Visibility;
use crate::ui::{ControlId, GuiTree};

/// Index of the visual currently shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slideshow {
    current: usize,
}

impl Slideshow {
    /// Index of the current slide
    pub fn current(&self) -> usize {
        self.current
    }
}

impl GuiTree {
    fn slideshow(&self, id: ControlId) -> Option<(usize, usize)> {
        let control = self.control(id)?;
        match control.kind() {
            ControlKind::Slideshow(show) => Some((show.current, control.core().visuals.len())),
            _ => None,
        }
    }

    fn set_slide(&mut self, id: ControlId, index: usize) {
        if let Some(ControlKind::Slideshow(show)) = self.control_mut(id).map(|control| control.kind_mut()) {
            show.current = index;
        }
        self.apply_slide_visibility(id);
    }

    /// Show the current slide and force every other slide to `Disabled`
    pub fn apply_slide_visibility(&mut self, id: ControlId) {
        let Some((current, _)) = self.slideshow(id) else {
            return;
        };
        let slides: Vec<_> = self.control(id).map(|c| c.core().visuals.clone()).unwrap_or_default();
        for (index, visual_id) in slides.into_iter().enumerate() {
            if let Some(visual) = self.visual_mut(visual_id) {
                visual.visibility = if index == current {
                    Visibility::EnabledDisabled
                } else {
                    Visibility::Disabled
                };
            }
        }
    }

    /// Whether a slideshow has a slide after the current one
    pub fn can_advance(&self, id: ControlId) -> bool {
        self.slideshow(id)
            .is_some_and(|(current, count)| current + 1 < count)
    }

    /// Whether a slideshow has a slide before the current one
    pub fn can_go_back(&self, id: ControlId) -> bool {
        self.slideshow(id).is_some_and(|(current, _)| current > 0)
    }

    /// Advance one slide; returns whether the slide changed
    pub fn next_slide(&mut self, id: ControlId) -> bool {
        if !self.can_advance(id) {
            return false;
        }
        let current = self.slideshow(id).map_or(0, |(current, _)| current);
        self.set_slide(id, current + 1);
        true
    }

    /// Go back one slide; returns whether the slide changed
    pub fn prev_slide(&mut self, id: ControlId) -> bool {
        if !self.can_go_back(id) {
            return false;
        }
        let current = self.slideshow(id).map_or(0, |(current, _)| current);
        self.set_slide(id, current - 1);
        true
    }

    /// Return to the first slide
    pub fn reset_slideshow(&mut self, id: ControlId) {
        if self.slideshow(id).is_some() {
            self.set_slide(id, 0);
        }
    }
}
