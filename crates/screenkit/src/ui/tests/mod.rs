//! Window, markup and render scenarios across the GUI modules

mod markup_loading;
mod rendering;

use crate::config::GuiConfig;
use crate::foundation::math::{Point, Rect};
use crate::input::{InputSnapshot, MouseButton};
use crate::ui::content::MemoryContent;
use crate::ui::controls::ControlRegistry;
use crate::ui::markup::MarkupLoader;
use crate::ui::rendering::{DrawCommand, DrawContext, RecordingBackend, RenderEngine};
use crate::ui::visuals::VisualRegistry;
use crate::ui::window::Window;
use crate::ui::GuiError;

pub(super) const SCREEN: (i32, i32) = (800, 600);

pub(super) const MENU: &str = r#"
<Window MUSIC="Theme, Menu">
    <Visual>
        <Image Src="Background" />
    </Visual>
    <Templates>
        <Template Name="MenuButton">
            <Image Src="Button" Visibility="Enabled" />
            <Image Src="ButtonDisabled" Visibility="Disabled" />
            <Text Text="{TEXT}" Font="Menu" Align="Center" VAlign="Middle" />
        </Template>
    </Templates>
    <Button Name="Play" Location="100,100" Size="200,40" Text="Play" Template="MenuButton" />
    <Button Name="Quit" Location="100,160" Size="200,40" Text="Quit" Template="MenuButton" />
    <CheckBox Name="Sound" Location="100,220" Size="32,32">
        <Visual>
            <Image Src="Box" />
            <Image Src="Tick" Visibility="Checked" />
        </Visual>
    </CheckBox>
    <Input Name="Player" Location="100,280" Size="200,30" Font="Menu" />
</Window>
"#;

pub(super) fn screen_size() -> Point {
    Point::new(SCREEN.0, SCREEN.1)
}

pub(super) fn content() -> MemoryContent {
    MemoryContent::new()
        .with_sprite("Main", "Background", Rect::new(0, 0, 800, 600))
        .with_sprite("Main", "Button", Rect::new(0, 600, 200, 40))
        .with_sprite("Main", "ButtonDisabled", Rect::new(0, 640, 200, 40))
        .with_sprite("Main", "Box", Rect::new(200, 600, 32, 32))
        .with_sprite("Main", "Tick", Rect::new(232, 600, 32, 32))
        .with_sprite("Main", "Blank", Rect::new(264, 600, 4, 4))
        .with_font("Menu", 8.0, 16.0)
}

pub(super) fn load(markup: &str) -> Result<Window, GuiError> {
    let config = GuiConfig::default();
    let controls = ControlRegistry::with_builtins();
    let visuals = VisualRegistry::with_builtins();
    MarkupLoader::new(&controls, &visuals, &config).load_str(markup, screen_size())
}

pub(super) fn load_menu() -> Window {
    load(MENU).unwrap()
}

pub(super) fn hover(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot::new().with_pointer(x, y)
}

pub(super) fn left_click(x: i32, y: i32) -> InputSnapshot {
    hover(x, y).with_click(MouseButton::Left)
}

pub(super) fn right_click(x: i32, y: i32) -> InputSnapshot {
    hover(x, y).with_click(MouseButton::Right)
}

/// Register, load and draw one frame, returning the recorded commands
pub(super) fn render(window: &mut Window, content: &MemoryContent) -> Vec<DrawCommand> {
    let mut engine = RenderEngine::new();
    window.register_visuals(&mut engine);
    engine.load(window.tree_mut(), content).unwrap();

    #[allow(clippy::cast_sign_loss)]
    let mut backend = RecordingBackend::new(SCREEN.0 as u32, SCREEN.1 as u32);
    let mut ctx = DrawContext::new(&mut backend, content);
    engine.draw(window.tree_mut(), &mut ctx).unwrap();
    backend.take_commands()
}

/// Source rectangles of every sprite drawn, in draw order
pub(super) fn sprite_sources(commands: &[DrawCommand]) -> Vec<Rect> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Sprite { source, .. } => Some(*source),
            _ => None,
        })
        .collect()
}
