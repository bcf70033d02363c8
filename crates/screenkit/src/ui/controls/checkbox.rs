//! Checkbox control

use crate::ui::attributes::Attributes;
use crate::ui::GuiError;

/// Two-state control toggled by a left click
///
/// The toggle happens before `LeftClicked` subscribers run, so they observe
/// the new state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckBox {
    /// Current state
    pub checked: bool,
}

impl CheckBox {
    /// Checkbox with an initial state
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    /// Flip the state
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub(crate) fn process_attributes(&mut self, attrs: &Attributes) -> Result<(), GuiError> {
        self.checked = attrs.bool_or("Checked", self.checked)?;
        Ok(())
    }
}
