//! Modal message box
//!
//! A popup that darkens the screens beneath it and shows a centred message on
//! a padded background sprite. Menu select accepts, menu cancel cancels;
//! either way the box exits after its handlers run.

use std::time::Duration;

use crate::foundation::math::{colors, Point, Rect, Vec2};
use crate::input::InputSnapshot;
use crate::screens::{Screen, ScreenContext, ScreenCore, ScreenError, ScreenManager};
use crate::ui::content::ContentProvider;
use crate::ui::rendering::{BatchMode, RenderBackend};
use crate::ui::GuiError;

/// Hint drawn in the bottom-right corner
pub const USAGE_TEXT: &str = "Enter = OK Esc = cancel";

/// Handler run when the box is accepted or cancelled
pub type MessageBoxHandler = Box<dyn FnMut(&mut ScreenContext<'_>)>;

/// Space between the message and the edges of its background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// Left padding
    pub left: i32,
    /// Top padding
    pub top: i32,
    /// Right padding
    pub right: i32,
    /// Bottom padding
    pub bottom: i32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 32,
            top: 16,
            right: 32,
            bottom: 16,
        }
    }
}

/// Popup asking the player to confirm or cancel
pub struct MessageBoxScreen {
    core: ScreenCore,
    message: String,
    include_usage_text: bool,
    /// Background padding around the message
    pub padding: Padding,
    /// Sheet holding the background sprite
    pub sprite_sheet: String,
    /// Background sprite
    pub sprite: String,
    /// Font for the message and usage text
    pub font: String,
    accepted: Vec<MessageBoxHandler>,
    cancelled: Vec<MessageBoxHandler>,
}

impl MessageBoxScreen {
    /// Message box with the usage hint
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_usage_text(message, true)
    }

    /// Message box, optionally without the usage hint
    pub fn with_usage_text(message: impl Into<String>, include_usage_text: bool) -> Self {
        let transition = Duration::from_millis(200);
        Self {
            core: ScreenCore::new("MessageBox")
                .with_popup(true)
                .with_transition(transition, transition),
            message: message.into(),
            include_usage_text,
            padding: Padding::default(),
            sprite_sheet: "Main".to_string(),
            sprite: "gradient".to_string(),
            font: "System".to_string(),
            accepted: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run `handler` when the box is accepted
    pub fn on_accepted<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.accepted.push(Box::new(handler));
        self
    }

    /// Run `handler` when the box is cancelled
    pub fn on_cancelled<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.cancelled.push(Box::new(handler));
        self
    }

    fn measure(&self, content: &dyn ContentProvider, text: &str) -> Result<Point, GuiError> {
        content
            .measure_text(&self.font, text)
            .map(to_point)
            .ok_or_else(|| GuiError::MissingAsset(format!("font {}", self.font)))
    }

    fn draw_box(&self, backend: &mut dyn RenderBackend, content: &dyn ContentProvider) -> Result<(), GuiError> {
        let alpha = self.core.transition_alpha();
        ScreenManager::fade_back_buffer_to_black(backend, alpha * 2.0 / 3.0)?;

        let (width, height) = backend.screen_size();
        let viewport = Point::new(width as i32, height as i32);
        let text_size = self.measure(content, &self.message)?;
        let text_position = (viewport - text_size) / 2;

        let padding = self.padding;
        let background = Rect::new(
            text_position.x - padding.left,
            text_position.y - padding.top,
            text_size.x + padding.left + padding.right,
            text_size.y + padding.top + padding.bottom,
        );
        let color = colors::white() * alpha;

        backend.begin_batch(BatchMode::Deferred)?;
        match content.sprite(&self.sprite_sheet, &self.sprite) {
            Some(region) => backend.draw_sprite(region.page, background, region.source, color)?,
            None => log::warn!("Message box sprite {}/{} not found", self.sprite_sheet, self.sprite),
        }
        backend.draw_text(&self.font, &self.message, text_position, color)?;

        if self.include_usage_text {
            let usage_size = self.measure(content, USAGE_TEXT)?;
            let usage_position = Point::new(
                viewport.x - (usage_size.x + padding.right),
                viewport.y - (usage_size.y + padding.bottom),
            );
            backend.draw_text(&self.font, USAGE_TEXT, usage_position, color)?;
        }
        backend.end_batch()?;
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_point(size: Vec2) -> Point {
    Point::new(size.x as i32, size.y as i32)
}

impl Screen for MessageBoxScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>, input: &InputSnapshot) {
        if input.is_menu_select() {
            for handler in &mut self.accepted {
                handler(ctx);
            }
            ctx.exit_screen();
        } else if input.is_menu_cancel() {
            for handler in &mut self.cancelled {
                handler(ctx);
            }
            ctx.exit_screen();
        }
    }

    fn draw(&mut self, ctx: &mut ScreenContext<'_>, backend: &mut dyn RenderBackend) -> Result<(), ScreenError> {
        self.draw_box(backend, ctx.services.content.as_ref())
            .map_err(|source| ScreenError::Draw {
                screen: self.core.name().to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for MessageBoxScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBoxScreen")
            .field("core", &self.core)
            .field("message", &self.message)
            .field("include_usage_text", &self.include_usage_text)
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}
