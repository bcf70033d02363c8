//! Text input control
//!
//! Builds its own background image and text visuals from attributes. While
//! focused it appends the frame's typed characters to the control text;
//! Backspace removes the last character.

use crate::config::GuiConfig;
use crate::foundation::math::{colors, Point};
use crate::input::{InputSnapshot, Key};
use crate::ui::attributes::Attributes;
use crate::ui::controls::ControlCore;
use crate::ui::layout::{HorizontalAlignment, VerticalAlignment};
use crate::ui::visuals::{ImageVisual, TextSource, TextVisual, Visual, VisualKind};
use crate::ui::GuiError;

/// Sprite used for the input background
pub const BACKGROUND_SPRITE: &str = "Blank";

const PASSWORD_MASK: char = '*';

/// Single-line text entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Display `*` per character
    pub password: bool,
    selected: bool,
}

impl TextInput {
    /// Plain or password input
    pub fn new(password: bool) -> Self {
        Self {
            password,
            selected: false,
        }
    }

    /// Whether keyboard input is routed here
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Text as shown to the player
    pub fn display_text(&self, text: &str) -> String {
        if self.password {
            std::iter::repeat(PASSWORD_MASK).take(text.chars().count()).collect()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn process_attributes(
        &mut self,
        core: &ControlCore,
        attrs: &Attributes,
        config: &GuiConfig,
    ) -> Result<Vec<Visual>, GuiError> {
        self.password = attrs.bool_or("Password", self.password)?;

        let tint = attrs.color_or("background-color", colors::white())?;
        let mut background = ImageVisual::new(config.default_sprite_sheet.as_str(), BACKGROUND_SPRITE);
        background.tint = tint;
        background.disabled_tint = colors::lerp(tint, colors::black(), 0.5);
        background.use_parent_size = true;

        let mut text = TextVisual::new(TextSource::OwnerText, attrs.require("Font")?);
        text.color = attrs.color_or("Color", text.color)?;
        text.allow_parent_resize = true;

        Ok(vec![
            Visual::new(VisualKind::Image(background)).with_rect(Point::zeros(), core.size),
            Visual::new(VisualKind::Text(text))
                .with_rect(Point::zeros(), core.size)
                .with_alignment(HorizontalAlignment::None, VerticalAlignment::Middle),
        ])
    }

    pub(crate) fn handle_input(&mut self, core: &mut ControlCore, input: &InputSnapshot) {
        if !self.selected {
            return;
        }

        for key in input.pressed_keys() {
            if *key == Key::Backspace {
                core.text.pop();
            }
        }
        core.text.push_str(input.typed_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::{Control, ControlKind};
    use approx::assert_relative_eq;

    fn input_control(attrs: &Attributes) -> (Control, Vec<Visual>) {
        let mut control = Control::new("Name", ControlKind::Input(TextInput::default()))
            .with_rect(Point::new(10, 10), Point::new(200, 30));
        let visuals = control.process_attributes(attrs, &GuiConfig::default()).unwrap();
        (control, visuals)
    }

    #[test]
    fn test_builds_background_and_text() {
        let attrs = Attributes::new("Input")
            .with("Font", "Menu")
            .with("background-color", "200,200,200,255");
        let (_, visuals) = input_control(&attrs);

        assert_eq!(visuals.len(), 2);
        match visuals[0].kind() {
            VisualKind::Image(image) => {
                assert_eq!(image.src, BACKGROUND_SPRITE);
                assert!(image.use_parent_size);
                assert_relative_eq!(image.disabled_tint.x, image.tint.x * 0.5);
            }
            other => panic!("expected image, got {other:?}"),
        }
        match visuals[1].kind() {
            VisualKind::Text(text) => {
                assert_eq!(text.source, TextSource::OwnerText);
                assert!(text.allow_parent_resize);
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(visuals[1].layout.v_align, VerticalAlignment::Middle);
    }

    #[test]
    fn test_font_is_required() {
        let mut control = Control::new("Name", ControlKind::Input(TextInput::default()));
        let result = control.process_attributes(&Attributes::new("Input"), &GuiConfig::default());
        assert!(matches!(result, Err(GuiError::MissingAttribute { .. })));
    }

    #[test]
    fn test_typing_only_when_selected() {
        let attrs = Attributes::new("Input").with("Font", "Menu");
        let (mut control, _) = input_control(&attrs);
        let typed = InputSnapshot::new().with_text("abc");

        control.handle_input(&typed);
        assert_eq!(control.text(), "");

        control.set_focus(true);
        control.handle_input(&typed);
        control.handle_input(&InputSnapshot::new().with_key(Key::Backspace));
        assert_eq!(control.text(), "ab");
    }

    #[test]
    fn test_password_masks_display_only() {
        let attrs = Attributes::new("Input").with("Font", "Menu").with("Password", "true");
        let (mut control, _) = input_control(&attrs);
        control.core_mut().text = "hunter2".to_string();

        assert_eq!(control.display_text(), "*******");
        assert_eq!(control.text(), "hunter2");
    }
}
