//! Controls
//!
//! A control is a node in the GUI tree. Shared state lives in [`ControlCore`];
//! variant state lives in [`ControlKind`]. Geometry setters and the enabled /
//! visible parent chain are resolved by [`GuiTree`](crate::ui::GuiTree)
//! because they need the parent.

pub mod checkbox;
pub mod input;
pub mod progress_bar;
pub mod registry;
pub mod slideshow;

pub use checkbox::CheckBox;
pub use input::TextInput;
pub use progress_bar::ProgressBar;
pub use registry::ControlRegistry;
pub use slideshow::Slideshow;

use std::collections::HashMap;

use crate::config::GuiConfig;
use crate::foundation::math::{Point, Rect};
use crate::input::InputSnapshot;
use crate::ui::attributes::Attributes;
use crate::ui::visuals::Visual;
use crate::ui::{ControlId, GuiError, VisualId};

/// State shared by every control variant
#[derive(Debug, Clone)]
pub struct ControlCore {
    pub(crate) name: String,
    pub(crate) parent: Option<ControlId>,
    pub(crate) location: Point,
    pub(crate) size: Point,
    pub(crate) bounds: Rect,
    pub(crate) touch_bounds: Rect,
    /// Free-form text, bound by `{TEXT}` visuals
    pub text: String,
    /// Numeric value, NaN when unset
    pub value: f32,
    /// Application tag
    pub tag: String,
    pub(crate) enabled: bool,
    pub(crate) visible: bool,
    pub(crate) has_focus: bool,
    pub(crate) visuals: Vec<VisualId>,
    pub(crate) named_visuals: HashMap<String, VisualId>,
    pub(crate) children: Vec<ControlId>,
}

impl ControlCore {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            location: Point::zeros(),
            size: Point::zeros(),
            bounds: Rect::EMPTY,
            touch_bounds: Rect::EMPTY,
            text: String::new(),
            value: f32::NAN,
            tag: String::new(),
            enabled: true,
            visible: true,
            has_focus: false,
            visuals: Vec::new(),
            named_visuals: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Control name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent control; `None` for a window root
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Location relative to the parent
    pub fn location(&self) -> Point {
        self.location
    }

    /// Size
    pub fn size(&self) -> Point {
        self.size
    }

    /// Absolute bounds
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Absolute hit-test bounds
    pub fn touch_bounds(&self) -> Rect {
        self.touch_bounds
    }

    /// Own enabled flag, ignoring the parent chain
    pub fn own_enabled(&self) -> bool {
        self.enabled
    }

    /// Own visible flag, ignoring the parent chain
    pub fn own_visible(&self) -> bool {
        self.visible
    }

    /// Set the own enabled flag
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set the own visible flag
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether this control holds its window's focus
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Visuals in draw order
    pub fn visuals(&self) -> &[VisualId] {
        &self.visuals
    }

    /// Visual registered under `name`
    pub fn named_visual(&self, name: &str) -> Option<VisualId> {
        self.named_visuals.get(name).copied()
    }

    /// Child controls
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }
}

/// Behaviour hooks for application-defined controls
pub trait ControlBehavior {
    /// Registry key (upper case)
    fn key(&self) -> &str;

    /// Read variant attributes; returned visuals are attached before markup visuals
    fn process_attributes(
        &mut self,
        _core: &mut ControlCore,
        _attrs: &Attributes,
        _config: &GuiConfig,
    ) -> Result<Vec<Visual>, GuiError> {
        Ok(Vec::new())
    }

    /// Per-frame update
    fn update(&mut self, _core: &mut ControlCore, _elapsed_seconds: f32) {}

    /// Input while focused
    fn handle_input(&mut self, _core: &mut ControlCore, _input: &InputSnapshot) {}

    /// Runs before `LeftClicked` subscribers
    fn on_left_click(&mut self, _core: &mut ControlCore) {}

    /// Runs before `RightClicked` subscribers
    fn on_right_click(&mut self, _core: &mut ControlCore) {}

    /// Focus gained
    fn gain_focus(&mut self, _core: &mut ControlCore) {}

    /// Focus lost
    fn lose_focus(&mut self, _core: &mut ControlCore) {}

    /// Checked state for `Checked`/`Unchecked` visuals
    fn checked(&self) -> Option<bool> {
        None
    }

    /// Progress for bar visuals
    fn progress(&self) -> Option<f32> {
        None
    }
}

/// Control variants
pub enum ControlKind {
    /// Root container of a screen
    Window,
    /// Plain clickable control
    Button,
    /// Toggles on left click
    CheckBox(CheckBox),
    /// Single-line text entry
    Input(TextInput),
    /// Progress display
    ProgressBar(ProgressBar),
    /// One visual shown at a time
    Slideshow(Slideshow),
    /// Application-defined control
    Custom(Box<dyn ControlBehavior>),
}

impl ControlKind {
    /// Registry key of the variant
    pub fn key(&self) -> &str {
        match self {
            Self::Window => "WINDOW",
            Self::Button => "BUTTON",
            Self::CheckBox(_) => "CHECKBOX",
            Self::Input(_) => "INPUT",
            Self::ProgressBar(_) => "PROGRESSBAR",
            Self::Slideshow(_) => "SLIDESHOW",
            Self::Custom(behavior) => behavior.key(),
        }
    }
}

impl std::fmt::Debug for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckBox(checkbox) => f.debug_tuple("CheckBox").field(checkbox).finish(),
            Self::Input(input) => f.debug_tuple("Input").field(input).finish(),
            Self::ProgressBar(bar) => f.debug_tuple("ProgressBar").field(bar).finish(),
            Self::Slideshow(show) => f.debug_tuple("Slideshow").field(show).finish(),
            other => write!(f, "{}", other.key()),
        }
    }
}

/// A node in the GUI tree
#[derive(Debug)]
pub struct Control {
    core: ControlCore,
    kind: ControlKind,
}

impl Control {
    /// Create a detached control
    pub fn new(name: &str, kind: ControlKind) -> Self {
        Self {
            core: ControlCore::new(name),
            kind,
        }
    }

    /// Set location and size before insertion (builder pattern)
    pub fn with_rect(mut self, location: Point, size: Point) -> Self {
        self.core.location = location;
        self.core.size = size;
        self
    }

    /// Shared state
    pub fn core(&self) -> &ControlCore {
        &self.core
    }

    /// Mutable shared state
    pub fn core_mut(&mut self) -> &mut ControlCore {
        &mut self.core
    }

    /// Variant state
    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Mutable variant state
    pub fn kind_mut(&mut self) -> &mut ControlKind {
        &mut self.kind
    }

    /// Registry key
    pub fn key(&self) -> &str {
        self.kind.key()
    }

    /// Control name
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Raw text
    pub fn text(&self) -> &str {
        &self.core.text
    }

    /// Absolute bounds
    pub fn bounds(&self) -> Rect {
        self.core.bounds
    }

    /// Absolute hit-test bounds
    pub fn touch_bounds(&self) -> Rect {
        self.core.touch_bounds
    }

    /// Whether this control holds focus
    pub fn has_focus(&self) -> bool {
        self.core.has_focus
    }

    /// Checked state, `Some` only for checkable variants
    pub fn checked(&self) -> Option<bool> {
        match &self.kind {
            ControlKind::CheckBox(checkbox) => Some(checkbox.checked),
            ControlKind::Custom(behavior) => behavior.checked(),
            _ => None,
        }
    }

    /// Progress, `Some` only for progress variants
    pub fn progress(&self) -> Option<f32> {
        match &self.kind {
            ControlKind::ProgressBar(bar) => Some(bar.progress()),
            ControlKind::Custom(behavior) => behavior.progress(),
            _ => None,
        }
    }

    /// Text as visuals display it
    pub fn display_text(&self) -> String {
        match &self.kind {
            ControlKind::Input(input) => input.display_text(&self.core.text),
            _ => self.core.text.clone(),
        }
    }

    /// Read the attributes every control shares
    ///
    /// `Location` and `Size` resolve against `parent_size`; a missing size
    /// becomes `default_size`.
    pub fn apply_attributes(
        &mut self,
        attrs: &Attributes,
        parent_size: Point,
        default_size: Point,
    ) -> Result<(), GuiError> {
        let core = &mut self.core;
        core.location = attrs.point("Location", parent_size)?.unwrap_or_else(Point::zeros);
        core.size = attrs.point("Size", parent_size)?.unwrap_or(default_size);
        core.name = attrs.get("Name").unwrap_or_default().to_string();
        core.text = attrs.get("Text").unwrap_or_default().to_string();
        core.value = attrs.parse_or("Value", f32::NAN)?;
        core.enabled = attrs.bool_or("Enabled", true)?;
        core.visible = attrs.bool_or("Visible", true)?;
        core.tag = attrs.get("Tag").unwrap_or_default().to_string();
        Ok(())
    }

    /// Read variant attributes, returning visuals the variant builds itself
    pub fn process_attributes(&mut self, attrs: &Attributes, config: &GuiConfig) -> Result<Vec<Visual>, GuiError> {
        let Self { core, kind } = self;
        match kind {
            ControlKind::CheckBox(checkbox) => {
                checkbox.process_attributes(attrs)?;
                Ok(Vec::new())
            }
            ControlKind::Input(input) => input.process_attributes(core, attrs, config),
            ControlKind::ProgressBar(bar) => bar.process_attributes(core, attrs),
            ControlKind::Custom(behavior) => behavior.process_attributes(core, attrs, config),
            ControlKind::Window | ControlKind::Button | ControlKind::Slideshow(_) => Ok(Vec::new()),
        }
    }

    /// Per-frame update
    pub fn update(&mut self, elapsed_seconds: f32) {
        if let ControlKind::Custom(behavior) = &mut self.kind {
            behavior.update(&mut self.core, elapsed_seconds);
        }
    }

    /// Input for the focused control
    pub fn handle_input(&mut self, input: &InputSnapshot) {
        match &mut self.kind {
            ControlKind::Input(text_input) => text_input.handle_input(&mut self.core, input),
            ControlKind::Custom(behavior) => behavior.handle_input(&mut self.core, input),
            _ => {}
        }
    }

    /// Variant reaction to a left click, before subscribers run
    pub fn on_left_click(&mut self) {
        match &mut self.kind {
            ControlKind::CheckBox(checkbox) => checkbox.toggle(),
            ControlKind::Custom(behavior) => behavior.on_left_click(&mut self.core),
            _ => {}
        }
    }

    /// Variant reaction to a right click, before subscribers run
    pub fn on_right_click(&mut self) {
        if let ControlKind::Custom(behavior) = &mut self.kind {
            behavior.on_right_click(&mut self.core);
        }
    }

    /// Set the focus flag, running the gain/lose hook on a change
    ///
    /// Returns whether the flag changed.
    pub fn set_focus(&mut self, focused: bool) -> bool {
        if self.core.has_focus == focused {
            return false;
        }

        match &mut self.kind {
            ControlKind::Input(input) => input.set_selected(focused),
            ControlKind::Custom(behavior) if focused => behavior.gain_focus(&mut self.core),
            ControlKind::Custom(behavior) => behavior.lose_focus(&mut self.core),
            _ => {}
        }
        self.core.has_focus = focused;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_attributes_defaults() {
        let mut control = Control::new("", ControlKind::Button);
        let attrs = Attributes::new("Button").with("Location", "10%,20").with("Name", "Play");
        control
            .apply_attributes(&attrs, Point::new(800, 600), Point::zeros())
            .unwrap();

        let core = control.core();
        assert_eq!(core.location(), Point::new(80, 20));
        assert_eq!(core.size(), Point::zeros());
        assert_eq!(core.name(), "Play");
        assert!(core.value.is_nan());
        assert!(core.own_enabled() && core.own_visible());
    }

    #[test]
    fn test_apply_attributes_rejects_bad_bool() {
        let mut control = Control::new("", ControlKind::Button);
        let attrs = Attributes::new("Button").with("Enabled", "maybe");
        assert!(control.apply_attributes(&attrs, Point::zeros(), Point::zeros()).is_err());
    }

    #[test]
    fn test_set_focus_reports_change_once() {
        let mut control = Control::new("Field", ControlKind::Input(TextInput::default()));
        assert!(control.set_focus(true));
        assert!(!control.set_focus(true));
        assert!(control.has_focus());
        assert!(control.set_focus(false));
    }

    struct Counter {
        clicks: u32,
    }

    impl ControlBehavior for Counter {
        fn key(&self) -> &str {
            "COUNTER"
        }

        fn on_left_click(&mut self, core: &mut ControlCore) {
            self.clicks += 1;
            core.text = self.clicks.to_string();
        }
    }

    #[test]
    fn test_custom_behavior_hooks() {
        let mut control = Control::new("Count", ControlKind::Custom(Box::new(Counter { clicks: 0 })));
        control.on_left_click();
        control.on_left_click();
        assert_eq!(control.text(), "2");
        assert_eq!(control.key(), "COUNTER");
        assert_eq!(control.checked(), None);
    }
}
