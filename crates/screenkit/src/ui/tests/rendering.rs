//! Render engine passes over loaded windows

use std::cell::Cell;
use std::rc::Rc;

use super::{content, left_click, load_menu, render, sprite_sources, SCREEN};
use crate::foundation::math::{Color, Point, Rect, Vec2};
use crate::ui::content::{MemoryContent, TextureHandle};
use crate::ui::controls::{Control, ControlKind};
use crate::ui::rendering::{
    BatchMode, DrawCommand, DrawContext, PrimitiveVertex, RecordingBackend, RenderBackend, RenderEngine,
};
use crate::ui::visuals::{BarVisual, CircleVisual, Drawable, OwnerView, TextSource, TextVisual, Visual, VisualKind};
use crate::ui::window::Window;
use crate::ui::{GuiError, RenderError};

/// Visual adding up the time it is updated with
struct Clock(Rc<Cell<f32>>);

impl Drawable for Clock {
    fn key(&self) -> &str {
        "CLOCK"
    }

    fn update(&mut self, elapsed_seconds: f32) {
        self.0.set(self.0.get() + elapsed_seconds);
    }

    fn draw(&self, _rect: Rect, _owner: &OwnerView, _ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        Ok(())
    }
}

/// Recording backend whose primitive draws fail
struct NoPrimitives(RecordingBackend);

impl RenderBackend for NoPrimitives {
    fn begin_batch(&mut self, mode: BatchMode) -> Result<(), RenderError> {
        self.0.begin_batch(mode)
    }

    fn end_batch(&mut self) -> Result<(), RenderError> {
        self.0.end_batch()
    }

    fn clip_rect(&self) -> Rect {
        self.0.clip_rect()
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.0.set_clip_rect(rect);
    }

    fn draw_sprite(&mut self, page: TextureHandle, dest: Rect, source: Rect, tint: Color) -> Result<(), RenderError> {
        self.0.draw_sprite(page, dest, source, tint)
    }

    fn draw_text(&mut self, font: &str, text: &str, position: Point, color: Color) -> Result<(), RenderError> {
        self.0.draw_text(font, text, position, color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.0.fill_rect(rect, color)
    }

    fn draw_primitives(&mut self, _: &[PrimitiveVertex], _: &[u16], _: Vec2) -> Result<(), RenderError> {
        Err(RenderError::Backend("device lost".to_string()))
    }

    fn screen_size(&self) -> (u32, u32) {
        self.0.screen_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Rect = Rect::new(0, 600, 200, 40);
    const BUTTON_DISABLED: Rect = Rect::new(0, 640, 200, 40);
    const TICK: Rect = Rect::new(232, 600, 32, 32);

    fn screen_rect() -> Rect {
        Rect::new(0, 0, SCREEN.0, SCREEN.1)
    }

    #[test]
    fn test_frame_is_one_immediate_batch() {
        let mut window = load_menu();
        let commands = render(&mut window, &content());

        assert_eq!(commands.first(), Some(&DrawCommand::BeginBatch(BatchMode::Immediate)));
        assert_eq!(commands.last(), Some(&DrawCommand::EndBatch));
        // Clip is restored before the batch ends
        assert_eq!(commands[commands.len() - 2], DrawCommand::SetClip(screen_rect()));
    }

    #[test]
    fn test_enabled_and_disabled_visuals() {
        let mut window = load_menu();
        let sources = sprite_sources(&render(&mut window, &content()));
        assert!(sources.contains(&BUTTON));
        assert!(!sources.contains(&BUTTON_DISABLED));

        let mut window = load_menu();
        window.control_mut("Play").unwrap().core_mut().set_enabled(false);
        window.control_mut("Quit").unwrap().core_mut().set_enabled(false);
        let sources = sprite_sources(&render(&mut window, &content()));
        assert!(!sources.contains(&BUTTON));
        assert!(sources.contains(&BUTTON_DISABLED));
    }

    #[test]
    fn test_checked_visual_follows_checkbox() {
        let mut window = load_menu();
        assert!(!sprite_sources(&render(&mut window, &content())).contains(&TICK));

        window.bubble_input(&left_click(110, 230));
        assert!(sprite_sources(&render(&mut window, &content())).contains(&TICK));
    }

    #[test]
    fn test_invisible_owner_skips_its_visuals() {
        let mut window = load_menu();
        let root = window.root();
        window.tree_mut()[root].core_mut().set_visible(false);

        let commands = render(&mut window, &content());
        assert_eq!(commands.len(), 3);
        assert!(sprite_sources(&commands).is_empty());
    }

    #[test]
    fn test_clip_uses_visual_rect_or_owner_bounds() {
        let mut window = Window::new(Point::new(SCREEN.0, SCREEN.1), 2);
        let owner = Rect::new(20, 30, 100, 50);
        window
            .add_control(
                Control::new("Bar", ControlKind::Button).with_rect(owner.location(), owner.size()),
                vec![
                    Visual::new(VisualKind::Bar(BarVisual::default())),
                    Visual::new(VisualKind::Bar(BarVisual::default()))
                        .with_rect(Point::new(10, 10), Point::new(30, 20)),
                ],
            )
            .unwrap();

        let clips: Vec<_> = render(&mut window, &MemoryContent::new())
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::SetClip(rect) => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(clips, vec![owner, Rect::new(30, 40, 30, 20), screen_rect()]);
    }

    #[test]
    fn test_circle_suspends_batch() {
        let mut window = Window::new(Point::new(SCREEN.0, SCREEN.1), 2);
        window
            .add_control(
                Control::new("Ring", ControlKind::Button).with_rect(Point::new(100, 100), Point::new(40, 40)),
                vec![Visual::new(VisualKind::Circle(CircleVisual::default()))],
            )
            .unwrap();

        let commands = render(&mut window, &MemoryContent::new());
        let primitives = commands
            .iter()
            .position(|command| matches!(command, DrawCommand::Primitives { .. }))
            .unwrap();
        assert_eq!(commands[primitives - 1], DrawCommand::EndBatch);
        assert_eq!(commands[primitives + 1], DrawCommand::BeginBatch(BatchMode::Immediate));
        assert_eq!(commands.last(), Some(&DrawCommand::EndBatch));
    }

    #[test]
    fn test_visuals_update_once_per_frame() {
        let elapsed = Rc::new(Cell::new(0.0));
        let mut window = Window::new(Point::new(SCREEN.0, SCREEN.1), 2);
        window
            .add_control(
                Control::new("Timer", ControlKind::Button).with_rect(Point::new(0, 0), Point::new(10, 10)),
                vec![Visual::new(VisualKind::Custom(Box::new(Clock(Rc::clone(&elapsed)))))],
            )
            .unwrap();
        let mut engine = RenderEngine::new();
        window.register_visuals(&mut engine);

        window.update(1.0);
        engine.update(window.tree_mut(), 1.0);
        assert_eq!(elapsed.get(), 1.0);
    }

    #[test]
    fn test_primitive_failure_is_reported() {
        let mut window = Window::new(Point::new(SCREEN.0, SCREEN.1), 2);
        window
            .add_control(
                Control::new("Ring", ControlKind::Button).with_rect(Point::new(100, 100), Point::new(40, 40)),
                vec![Visual::new(VisualKind::Circle(CircleVisual::default()))],
            )
            .unwrap();
        let content = MemoryContent::new();
        let mut engine = RenderEngine::new();
        window.register_visuals(&mut engine);
        engine.load(window.tree_mut(), &content).unwrap();

        #[allow(clippy::cast_sign_loss)]
        let mut backend = NoPrimitives(RecordingBackend::new(SCREEN.0 as u32, SCREEN.1 as u32));
        let mut ctx = DrawContext::new(&mut backend, &content);
        let err = engine.draw(window.tree_mut(), &mut ctx).unwrap_err();

        assert!(matches!(err, GuiError::Render(RenderError::Backend(ref message)) if message == "device lost"));
        assert!(!backend.0.in_batch());
    }

    #[test]
    fn test_text_grows_owner_when_allowed() {
        let mut window = Window::new(Point::new(SCREEN.0, SCREEN.1), 2);
        let mut text = TextVisual::new(TextSource::OwnerText, "Menu");
        text.allow_parent_resize = true;
        let mut label = Control::new("Label", ControlKind::Button).with_rect(Point::zeros(), Point::new(40, 10));
        label.core_mut().text = "Twelve chars".to_string();
        let id = window
            .add_control(label, vec![Visual::new(VisualKind::Text(text))])
            .unwrap();

        let commands = render(&mut window, &content());
        assert_eq!(window.tree()[id].core().size(), Point::new(96, 16));
        assert!(commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "Twelve chars")));
    }

    #[test]
    fn test_password_input_draws_mask() {
        let mut window = load_menu();
        window.bubble_input(&left_click(150, 290));
        if let Some(ControlKind::Input(input)) = window.control_mut("Player").map(Control::kind_mut) {
            input.password = true;
        }
        window.control_mut("Player").unwrap().core_mut().text = "abc".to_string();

        let commands = render(&mut window, &content());
        assert!(commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "***")));
    }
}
