//! Screen trait and shared screen state
//!
//! Every screen owns a [`ScreenCore`]: its window, render engine and
//! transition. Concrete screens implement [`Screen`] and override only the
//! hooks they need; the defaults forward to the core.

use std::time::Duration;

use crate::config::GuiConfig;
use crate::foundation::math::Point;
use crate::input::InputSnapshot;
use crate::screens::{ScreenError, ScreenId, ScreenState, Transition};
use crate::services::Services;
use crate::ui::content::ContentProvider;
use crate::ui::rendering::{DrawContext, RenderBackend, RenderEngine};
use crate::ui::window::Window;
use crate::ui::GuiError;

/// Probe size used until a markup window replaces the placeholder
const DEFAULT_PROBE_SIZE: i32 = 2;

/// Deferred change to the screen stack
pub enum ScreenCommand {
    /// Push a screen on top
    Add(Box<dyn Screen>),
    /// Remove a screen immediately
    Remove(ScreenId),
    /// Start a screen's exit transition
    Exit(ScreenId),
    /// Start the exit transition of every screen on the stack
    ExitAll,
}

impl std::fmt::Debug for ScreenCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add(screen) => f.debug_tuple("Add").field(&screen.core().name()).finish(),
            Self::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
            Self::Exit(id) => f.debug_tuple("Exit").field(id).finish(),
            Self::ExitAll => f.write_str("ExitAll"),
        }
    }
}

/// What a screen can reach while the manager runs it
///
/// Stack changes are queued as [`ScreenCommand`]s and applied once the
/// current pass over the stack finishes.
pub struct ScreenContext<'a> {
    /// Shared services
    pub services: &'a mut Services,
    commands: &'a mut Vec<ScreenCommand>,
    screen_id: ScreenId,
    screen_count: usize,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        services: &'a mut Services,
        commands: &'a mut Vec<ScreenCommand>,
        screen_id: ScreenId,
        screen_count: usize,
    ) -> Self {
        Self {
            services,
            commands,
            screen_id,
            screen_count,
        }
    }

    /// Id of the screen being run
    pub fn screen_id(&self) -> ScreenId {
        self.screen_id
    }

    /// Number of screens on the stack when the pass started
    pub fn screen_count(&self) -> usize {
        self.screen_count
    }

    /// Queue a new screen
    pub fn add_screen(&mut self, screen: Box<dyn Screen>) {
        self.commands.push(ScreenCommand::Add(screen));
    }

    /// Queue an immediate removal
    pub fn remove_screen(&mut self, id: ScreenId) {
        self.commands.push(ScreenCommand::Remove(id));
    }

    /// Queue removal of the screen being run
    pub fn remove_self(&mut self) {
        self.remove_screen(self.screen_id);
    }

    /// Queue the exit transition of the screen being run
    pub fn exit_screen(&mut self) {
        self.commands.push(ScreenCommand::Exit(self.screen_id));
    }

    /// Queue the exit transition of every screen on the stack
    pub fn exit_all_screens(&mut self) {
        self.commands.push(ScreenCommand::ExitAll);
    }
}

/// State shared by every screen
#[derive(Debug)]
pub struct ScreenCore {
    name: String,
    window_asset: Option<String>,
    /// Transition position and durations; replaced from config when the
    /// screen joins a stack unless set with [`ScreenCore::with_transition`]
    pub transition: Transition,
    transition_from_config: bool,
    is_popup: bool,
    is_exiting: bool,
    other_screen_has_focus: bool,
    removal_requested: bool,
    screen_size: Point,
    window: Window,
    renderer: RenderEngine,
}

impl ScreenCore {
    /// Screen with an empty window
    ///
    /// Transition durations come from [`GuiConfig`] when the screen is added
    /// to a manager, unless set with [`ScreenCore::with_transition`].
    pub fn new(name: impl Into<String>) -> Self {
        let screen_size = Point::new(1280, 720);
        Self {
            name: name.into(),
            window_asset: None,
            transition: Transition::default(),
            transition_from_config: true,
            is_popup: false,
            is_exiting: false,
            other_screen_has_focus: false,
            removal_requested: false,
            screen_size,
            window: Window::new(screen_size, DEFAULT_PROBE_SIZE),
            renderer: RenderEngine::new(),
        }
    }

    /// Load the window from this markup asset on [`ScreenCore::load_content`]
    pub fn with_window_asset(mut self, asset: impl Into<String>) -> Self {
        self.window_asset = Some(asset.into());
        self
    }

    /// Use a window that was already built
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Set both transition durations
    pub fn with_transition(mut self, on_time: Duration, off_time: Duration) -> Self {
        self.transition = Transition::new(on_time, off_time);
        self.transition_from_config = false;
        self
    }

    /// Mark the screen as a popup that leaves screens beneath it visible
    pub fn with_popup(mut self, is_popup: bool) -> Self {
        self.is_popup = is_popup;
        self
    }

    /// Screen name used in logs and errors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Markup asset, if any
    pub fn window_asset(&self) -> Option<&str> {
        self.window_asset.as_deref()
    }

    /// Current transition state
    pub fn state(&self) -> ScreenState {
        self.transition.state()
    }

    /// Fade alpha for the current transition
    pub fn transition_alpha(&self) -> f32 {
        self.transition.alpha()
    }

    /// Whether screens beneath stay visible
    pub fn is_popup(&self) -> bool {
        self.is_popup
    }

    /// Whether the exit transition has started
    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Whether a screen above took input this frame
    pub fn other_screen_has_focus(&self) -> bool {
        self.other_screen_has_focus
    }

    /// On and receiving input
    pub fn is_active(&self) -> bool {
        !self.other_screen_has_focus && self.state().is_on()
    }

    /// Virtual screen size
    pub fn screen_size(&self) -> Point {
        self.screen_size
    }

    /// Set the virtual screen size; a placeholder root window is resized
    pub fn set_screen_size(&mut self, size: Point) {
        let root = self.window.root();
        if self.window.tree()[root].core().size() == self.screen_size {
            self.window.tree_mut().set_size(root, size);
        }
        self.screen_size = size;
    }

    /// Screen window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Mutable screen window
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Render engine holding the window's visuals
    pub fn renderer(&self) -> &RenderEngine {
        &self.renderer
    }

    /// Begin exiting; a zero off time requests removal straight away
    pub fn exit_screen(&mut self) {
        if self.transition.off_time.is_zero() {
            self.removal_requested = true;
        } else {
            self.is_exiting = true;
        }
    }

    /// Clear and return the removal request
    pub(crate) fn take_removal_request(&mut self) -> bool {
        std::mem::take(&mut self.removal_requested)
    }

    /// Reset per-stack flags when the screen is pushed
    pub(crate) fn reset_for_stack(&mut self, config: &GuiConfig) {
        self.is_exiting = false;
        self.removal_requested = false;
        if self.transition_from_config {
            self.transition = Transition::from_config(config);
        }
    }

    /// Load the window markup, start its playlist and load its visuals
    pub fn load_content(&mut self, services: &mut Services) -> Result<(), ScreenError> {
        if let Some(asset) = &self.window_asset {
            let path = services.config.window_asset_path(asset);
            if path.exists() {
                self.window = services
                    .markup_loader()
                    .load_file(&path, self.screen_size)
                    .map_err(|source| self.load_error(source))?;
            } else {
                log::warn!("Window asset {} for screen {} not found", path.display(), self.name);
            }
        }

        if !self.window.playlist().is_empty() {
            let playlist = self.window_asset.as_deref().unwrap_or(&self.name);
            if services.audio.register_playlist(playlist, self.window.playlist()) {
                services.audio.play_playlist(playlist, true);
            }
        }

        self.renderer.clear();
        self.window.register_visuals(&mut self.renderer);
        self.renderer
            .load(self.window.tree_mut(), services.content.as_ref())
            .map_err(|source| self.load_error(source))?;

        log::info!("Loaded screen {} ({} visuals)", self.name, self.renderer.len());
        Ok(())
    }

    /// Stop sound effects and release the window's visuals
    pub fn unload_content(&mut self, services: &mut Services) {
        services.audio.kill_all_sfx();
        self.renderer.unload(self.window.tree_mut());
        self.window.unregister_visuals(&mut self.renderer);
        log::debug!("Unloaded screen {}", self.name);
    }

    /// Advance the window, its visuals and the transition
    pub fn update(&mut self, elapsed: Duration, other_screen_has_focus: bool, covered_by_other_screen: bool) {
        let seconds = elapsed.as_secs_f32();
        self.window.update(seconds);
        self.renderer.update(self.window.tree_mut(), seconds);

        self.other_screen_has_focus = other_screen_has_focus;
        if self
            .transition
            .update(elapsed, self.is_exiting, covered_by_other_screen)
        {
            self.removal_requested = true;
        }
    }

    /// Route input into the window
    pub fn handle_input(&mut self, input: &InputSnapshot) -> bool {
        self.window.bubble_input(input)
    }

    /// Draw the window's visuals
    pub fn draw(&mut self, backend: &mut dyn RenderBackend, content: &dyn ContentProvider) -> Result<(), ScreenError> {
        let mut ctx = DrawContext::new(backend, content);
        self.renderer
            .draw(self.window.tree_mut(), &mut ctx)
            .map_err(|source| ScreenError::Draw {
                screen: self.name.clone(),
                source,
            })
    }

    fn load_error(&self, source: GuiError) -> ScreenError {
        log::error!("Screen {} failed to load: {source}", self.name);
        ScreenError::Load {
            screen: self.name.clone(),
            source,
        }
    }
}

/// A layer on the screen stack
pub trait Screen {
    /// Shared state
    fn core(&self) -> &ScreenCore;

    /// Mutable shared state
    fn core_mut(&mut self) -> &mut ScreenCore;

    /// Called when the screen joins an initialized stack
    fn load_content(&mut self, services: &mut Services) -> Result<(), ScreenError> {
        self.core_mut().load_content(services)
    }

    /// Called when the screen leaves an initialized stack
    fn unload_content(&mut self, services: &mut Services) {
        self.core_mut().unload_content(services);
    }

    /// Called every frame, whether or not the screen has focus
    fn update(
        &mut self,
        _ctx: &mut ScreenContext<'_>,
        elapsed: Duration,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.core_mut()
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);
    }

    /// Called only for the topmost screen that is on
    fn handle_input(&mut self, _ctx: &mut ScreenContext<'_>, input: &InputSnapshot) {
        self.core_mut().handle_input(input);
    }

    /// Called bottom to top for every screen that is not hidden
    fn draw(&mut self, ctx: &mut ScreenContext<'_>, backend: &mut dyn RenderBackend) -> Result<(), ScreenError> {
        self.core_mut().draw(backend, ctx.services.content.as_ref())
    }
}

/// Screen whose whole behaviour comes from its markup window
#[derive(Debug)]
pub struct GuiScreen {
    core: ScreenCore,
}

impl GuiScreen {
    /// Screen loading the markup asset of the same name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            core: ScreenCore::new(name.clone()).with_window_asset(name),
        }
    }

    /// Screen around an existing core
    pub fn from_core(core: ScreenCore) -> Self {
        Self { core }
    }
}

impl Screen for GuiScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }
}
