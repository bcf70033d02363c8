//! Menu screen
//!
//! A titled list of text entries. Up and down move the selection with
//! wraparound, the pointer selects whatever entry it is over, and select or
//! cancel run the entry's or the menu's handlers. The selected entry sits on
//! a highlight box that slides toward it a few pixels per frame.

use std::time::Duration;

use crate::foundation::math::{colors, Color, Point, Rect, Vec2};
use crate::input::InputSnapshot;
use crate::screens::{Screen, ScreenContext, ScreenCore, ScreenError};
use crate::services::Services;
use crate::ui::content::ContentProvider;
use crate::ui::rendering::{BatchMode, RenderBackend};
use crate::ui::GuiError;

/// Handler run when an entry is selected or the menu is cancelled
pub type MenuHandler = Box<dyn FnMut(&mut ScreenContext<'_>)>;

/// Selection fade change per second
const SELECTION_FADE_RATE: f32 = 4.0;

/// Highlight box movement per frame; size changes up to five times this
const HIGHLIGHT_SPEED: i32 = 3;

/// Share of the transition each entry spends sliding
const SLIDE_OVERLAP: f32 = 0.5;

/// X coordinate entries slide in from
const OFFSCREEN_X: f32 = -200.0;

/// Distance the title drops in from
const TITLE_DROP: f32 = 100.0;

/// One line of a [`MenuScreen`]
pub struct MenuEntry {
    text: String,
    target_position: Point,
    position: Point,
    hotbox: Rect,
    /// Text colour of the selected entry
    pub text_color: Color,
    /// Text colour of entries that are not selected
    pub highlight_color: Color,
    /// Colour of the highlight box behind the selected entry
    pub background_color: Color,
    selection_fade: f32,
    selected: Vec<MenuHandler>,
}

impl MenuEntry {
    /// Entry with white, orange and black colours
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_position: Point::zeros(),
            position: Point::zeros(),
            hotbox: Rect::default(),
            text_color: colors::white(),
            highlight_color: colors::orange(),
            background_color: colors::black(),
            selection_fade: 0.0,
            selected: Vec::new(),
        }
    }

    /// Where the entry rests once the menu is fully on; text is centred
    /// vertically on this point
    pub fn at(mut self, target_position: Point) -> Self {
        self.target_position = target_position;
        self.position = target_position;
        self
    }

    /// Pointer hot box; measured from the text on load when not set
    pub fn with_hotbox(mut self, hotbox: Rect) -> Self {
        self.hotbox = hotbox;
        self
    }

    /// Run `handler` when the entry is selected
    pub fn on_selected<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.selected.push(Box::new(handler));
        self
    }

    /// Entry text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resting position
    pub fn target_position(&self) -> Point {
        self.target_position
    }

    /// Position for the current transition
    pub fn position(&self) -> Point {
        self.position
    }

    /// Pointer hot box
    pub fn hotbox(&self) -> Rect {
        self.hotbox
    }

    /// 0 when unselected, rising to 1 while selected
    pub fn selection_fade(&self) -> f32 {
        self.selection_fade
    }

    fn update(&mut self, is_selected: bool, elapsed: Duration) {
        let step = elapsed.as_secs_f32() * SELECTION_FADE_RATE;
        self.selection_fade = if is_selected {
            (self.selection_fade + step).min(1.0)
        } else {
            (self.selection_fade - step).max(0.0)
        };
    }

    fn select(&mut self, ctx: &mut ScreenContext<'_>) {
        for handler in &mut self.selected {
            handler(ctx);
        }
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("text", &self.text)
            .field("position", &self.position)
            .field("hotbox", &self.hotbox)
            .field("selection_fade", &self.selection_fade)
            .finish_non_exhaustive()
    }
}

/// Titled list of selectable entries
pub struct MenuScreen {
    core: ScreenCore,
    title: String,
    /// Top-left corner of the title once the menu is fully on
    pub title_position: Point,
    /// Title colour
    pub title_color: Color,
    /// Font for the title and entries
    pub font: String,
    entries: Vec<MenuEntry>,
    selected: usize,
    highlight: Rect,
    cancelled: Vec<MenuHandler>,
}

impl MenuScreen {
    /// Empty menu named after its title
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            core: ScreenCore::new(title.clone()),
            title,
            title_position: Point::zeros(),
            title_color: colors::red(),
            font: "Menu".to_string(),
            entries: Vec::new(),
            selected: 0,
            highlight: Rect::default(),
            cancelled: Vec::new(),
        }
    }

    /// Menu around an existing core, for menus with a markup window
    pub fn from_core(core: ScreenCore, title: impl Into<String>) -> Self {
        Self {
            core,
            ..Self::new(title)
        }
    }

    /// Append an entry
    pub fn with_entry(mut self, entry: MenuEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Run `handler` on cancel instead of exiting
    pub fn on_cancelled<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.cancelled.push(Box::new(handler));
        self
    }

    /// Menu title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entries in display order
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Index of the selected entry
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Current highlight box
    pub fn highlight(&self) -> Rect {
        self.highlight
    }

    fn select_previous(&mut self) {
        self.selected = match self.selected {
            0 => self.entries.len().saturating_sub(1),
            index => index - 1,
        };
    }

    fn select_next(&mut self) {
        self.selected += 1;
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    fn activate(&mut self, ctx: &mut ScreenContext<'_>) {
        if let Some(entry) = self.entries.get_mut(self.selected) {
            log::debug!("Menu {}: selected '{}'", self.title, entry.text);
            entry.select(ctx);
        }
    }

    fn cancel(&mut self, ctx: &mut ScreenContext<'_>) {
        if self.cancelled.is_empty() {
            ctx.exit_screen();
            return;
        }
        for handler in &mut self.cancelled {
            handler(ctx);
        }
    }

    /// Measure hot boxes that were not set and park the highlight on the
    /// selected entry
    fn place_hotboxes(&mut self, content: &dyn ContentProvider) -> Result<(), GuiError> {
        for entry in &mut self.entries {
            if !entry.hotbox.is_empty() {
                continue;
            }
            let size = measure(content, &self.font, &entry.text)?;
            entry.hotbox = Rect::new(
                entry.target_position.x,
                entry.target_position.y - size.y / 2,
                size.x,
                size.y,
            );
        }
        if let Some(entry) = self.entries.get(self.selected) {
            self.highlight = entry.hotbox;
        }
        Ok(())
    }

    /// Move the highlight box toward the selected entry's hot box
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn slide_highlight(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        let target = entry.hotbox;
        let scale = 1.0 + 0.1 * entry.selection_fade;
        let grow = |from: i32, to: i32| {
            let step = (to - from).clamp(-HIGHLIGHT_SPEED * 5, HIGHLIGHT_SPEED * 5);
            (step as f32 * scale) as i32
        };

        let highlight = &mut self.highlight;
        highlight.x += (target.x - highlight.x).clamp(-HIGHLIGHT_SPEED, HIGHLIGHT_SPEED);
        highlight.y += (target.y - highlight.y).clamp(-HIGHLIGHT_SPEED, HIGHLIGHT_SPEED);
        highlight.width += grow(highlight.width, target.width);
        highlight.height += grow(highlight.height, target.height);
    }

    /// Slide entries in from the left, later entries lagging behind
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn layout_entries(&mut self) {
        let position = self.core.transition.position();
        let count = self.entries.len() as f32;

        for (index, entry) in self.entries.iter_mut().enumerate() {
            let lag = (1.0 - SLIDE_OVERLAP) * index as f32 / count;
            let offset = ((position - lag) / SLIDE_OVERLAP).clamp(0.0, 1.0);
            let x = smooth_step(entry.target_position.x as f32, OFFSCREEN_X, offset);
            entry.position = Point::new(x.round() as i32, entry.target_position.y);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_menu(&mut self, backend: &mut dyn RenderBackend, content: &dyn ContentProvider) -> Result<(), GuiError> {
        self.layout_entries();
        let alpha = self.core.transition_alpha();
        let is_active = self.core.is_active();

        backend.begin_batch(BatchMode::Deferred)?;
        for (index, entry) in self.entries.iter().enumerate() {
            let is_selected = is_active && index == self.selected;
            let color = if is_selected {
                backend.fill_rect(self.highlight, entry.background_color)?;
                entry.text_color
            } else {
                entry.highlight_color
            };

            let size = measure(content, &self.font, &entry.text)?;
            let position = Point::new(entry.position.x, entry.position.y - size.y / 2);
            backend.draw_text(&self.font, &entry.text, position, color * alpha)?;
        }

        let drop = self.core.transition.position().powi(2) * TITLE_DROP;
        let title_position = Point::new(self.title_position.x, self.title_position.y - drop as i32);
        backend.draw_text(&self.font, &self.title, title_position, self.title_color * alpha)?;
        backend.end_batch()?;
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn measure(content: &dyn ContentProvider, font: &str, text: &str) -> Result<Point, GuiError> {
    content
        .measure_text(font, text)
        .map(|size: Vec2| Point::new(size.x as i32, size.y as i32))
        .ok_or_else(|| GuiError::MissingAsset(format!("font {font}")))
}

/// Cubic ease between `from` and `to`
fn smooth_step(from: f32, to: f32, amount: f32) -> f32 {
    let t = amount.clamp(0.0, 1.0);
    from + (to - from) * t * t * (3.0 - 2.0 * t)
}

impl Screen for MenuScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn load_content(&mut self, services: &mut Services) -> Result<(), ScreenError> {
        self.core.load_content(services)?;
        self.place_hotboxes(services.content.as_ref())
            .map_err(|source| ScreenError::Load {
                screen: self.core.name().to_string(),
                source,
            })
    }

    fn update(
        &mut self,
        _ctx: &mut ScreenContext<'_>,
        elapsed: Duration,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.core
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);

        let is_active = self.core.is_active();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.update(is_active && index == self.selected, elapsed);
        }
        if is_active {
            self.slide_highlight();
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>, input: &InputSnapshot) {
        self.core.handle_input(input);

        if ctx.services.config.mouse_enabled {
            let pointer = input.pointer();
            if let Some(index) = self
                .entries
                .iter()
                .position(|entry| entry.hotbox.contains_point(pointer.x, pointer.y))
            {
                self.selected = index;
                if input.is_left_click() {
                    self.activate(ctx);
                }
            }
        }

        if input.is_menu_up() {
            self.select_previous();
        } else if input.is_menu_down() {
            self.select_next();
        }

        if input.is_menu_select() {
            self.activate(ctx);
        } else if input.is_menu_cancel() {
            self.cancel(ctx);
        }
    }

    fn draw(&mut self, ctx: &mut ScreenContext<'_>, backend: &mut dyn RenderBackend) -> Result<(), ScreenError> {
        let content = ctx.services.content.as_ref();
        self.core.draw(backend, content)?;
        self.draw_menu(backend, content).map_err(|source| ScreenError::Draw {
            screen: self.core.name().to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for MenuScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuScreen")
            .field("core", &self.core)
            .field("title", &self.title)
            .field("entries", &self.entries)
            .field("selected", &self.selected)
            .field("highlight", &self.highlight)
            .finish_non_exhaustive()
    }
}
