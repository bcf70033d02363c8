//! Per-frame input snapshot
//!
//! The application feeds raw window events into an [`InputTracker`] and hands
//! the resulting [`InputSnapshot`] to the screen stack once per frame. A click
//! is the release edge of a button that was held on an earlier event.

use bitflags::bitflags;

use crate::foundation::math::Point;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags! {
    /// Set of mouse buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left button
        const LEFT = 0b001;
        /// Right button
        const RIGHT = 0b010;
        /// Middle button
        const MIDDLE = 0b100;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

/// Non-character keys the GUI and screens react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Tab
    Tab,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
}

/// Read-only input state for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pointer: Point,
    clicked: MouseButtons,
    held: MouseButtons,
    typed: String,
    pressed: Vec<Key>,
}

impl InputSnapshot {
    /// Empty snapshot with the pointer at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pointer position (builder pattern)
    pub fn with_pointer(mut self, x: i32, y: i32) -> Self {
        self.pointer = Point::new(x, y);
        self
    }

    /// Mark a click edge for `button` (builder pattern)
    pub fn with_click(mut self, button: MouseButton) -> Self {
        self.clicked |= button.into();
        self
    }

    /// Mark `button` as held down (builder pattern)
    pub fn with_held(mut self, button: MouseButton) -> Self {
        self.held |= button.into();
        self
    }

    /// Append typed characters (builder pattern)
    pub fn with_text(mut self, text: &str) -> Self {
        self.typed.push_str(text);
        self
    }

    /// Add a newly pressed key (builder pattern)
    pub fn with_key(mut self, key: Key) -> Self {
        self.pressed.push(key);
        self
    }

    /// Pointer position in screen coordinates
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Buttons released this frame after being held
    pub fn clicks(&self) -> MouseButtons {
        self.clicked
    }

    /// Buttons currently held down
    pub fn held(&self) -> MouseButtons {
        self.held
    }

    /// Characters typed this frame, in order
    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    /// Keys pressed this frame, in order
    pub fn pressed_keys(&self) -> &[Key] {
        &self.pressed
    }

    /// Whether `key` went down this frame
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Left click edge
    pub fn is_left_click(&self) -> bool {
        self.clicked.contains(MouseButtons::LEFT)
    }

    /// Right click edge
    pub fn is_right_click(&self) -> bool {
        self.clicked.contains(MouseButtons::RIGHT)
    }

    /// Middle click edge
    pub fn is_middle_click(&self) -> bool {
        self.clicked.contains(MouseButtons::MIDDLE)
    }

    /// Any click edge at all
    pub fn any_click(&self) -> bool {
        !self.clicked.is_empty()
    }

    /// Enter or Space
    pub fn is_menu_select(&self) -> bool {
        self.is_key_pressed(Key::Enter) || self.is_key_pressed(Key::Space)
    }

    /// Escape
    pub fn is_menu_cancel(&self) -> bool {
        self.is_key_pressed(Key::Escape)
    }

    /// Arrow up
    pub fn is_menu_up(&self) -> bool {
        self.is_key_pressed(Key::Up)
    }

    /// Arrow down
    pub fn is_menu_down(&self) -> bool {
        self.is_key_pressed(Key::Down)
    }

    /// Arrow left
    pub fn is_menu_left(&self) -> bool {
        self.is_key_pressed(Key::Left)
    }

    /// Arrow right
    pub fn is_menu_right(&self) -> bool {
        self.is_key_pressed(Key::Right)
    }
}

/// Input tracker
///
/// Accumulates window events between frames. Call [`InputTracker::snapshot`]
/// once per frame; it resets the per-frame edges.
#[derive(Debug, Default)]
pub struct InputTracker {
    pointer: Point,
    held: MouseButtons,
    released_this_frame: MouseButtons,
    typed: String,
    pressed: Vec<Key>,
}

impl InputTracker {
    /// Create a new tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Update pointer position (fractional window coordinates are truncated)
    #[allow(clippy::cast_possible_truncation)]
    pub fn update_mouse_position(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x as i32, y as i32);
    }

    /// Update mouse button state
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let flag = MouseButtons::from(button);
        let was_down = self.held.contains(flag);

        // Click is the release edge
        if was_down && !pressed {
            self.released_this_frame |= flag;
        }
        self.held.set(flag, pressed);
    }

    /// Record a typed character
    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.typed.push(c);
        }
    }

    /// Record a key press
    pub fn push_key(&mut self, key: Key) {
        self.pressed.push(key);
    }

    /// Build this frame's snapshot and reset per-frame edges
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            clicked: std::mem::take(&mut self.released_this_frame),
            held: self.held,
            typed: std::mem::take(&mut self.typed),
            pressed: std::mem::take(&mut self.pressed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_release_after_press() {
        let mut tracker = InputTracker::new();
        tracker.update_mouse_position(10.7, 20.2);
        tracker.update_mouse_button(MouseButton::Left, true);

        let pressed = tracker.snapshot();
        assert!(!pressed.is_left_click());
        assert!(pressed.held().contains(MouseButtons::LEFT));

        tracker.update_mouse_button(MouseButton::Left, false);
        let released = tracker.snapshot();
        assert!(released.is_left_click());
        assert_eq!(released.pointer(), Point::new(10, 20));

        // Edge lasts one frame only
        assert!(!tracker.snapshot().is_left_click());
    }

    #[test]
    fn test_release_without_press_is_not_a_click() {
        let mut tracker = InputTracker::new();
        tracker.update_mouse_button(MouseButton::Right, false);
        assert!(!tracker.snapshot().is_right_click());
    }

    #[test]
    fn test_typed_text_and_keys_reset_each_frame() {
        let mut tracker = InputTracker::new();
        tracker.push_char('a');
        tracker.push_char('\u{8}');
        tracker.push_char('b');
        tracker.push_key(Key::Enter);

        let frame = tracker.snapshot();
        assert_eq!(frame.typed_text(), "ab");
        assert!(frame.is_menu_select());

        let next = tracker.snapshot();
        assert!(next.typed_text().is_empty());
        assert!(!next.is_menu_select());
    }

    #[test]
    fn test_menu_helpers() {
        let input = InputSnapshot::new().with_key(Key::Space).with_key(Key::Escape);
        assert!(input.is_menu_select());
        assert!(input.is_menu_cancel());
        assert!(!input.is_menu_up());
    }
}
