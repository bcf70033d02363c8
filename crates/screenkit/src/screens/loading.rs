//! Loading screen
//!
//! Coordinates the switch between two sets of screens. Every screen on the
//! stack is told to exit and the loading screen goes on top. Once it is the
//! only screen left it removes itself and pushes the screens it carries.

use std::time::Duration;

use crate::screens::{Screen, ScreenContext, ScreenCore, ScreenError, ScreenId, ScreenManager, ScreenState};
use crate::ui::rendering::RenderBackend;

/// Text shown while a slow load is in progress
pub const LOADING_TEXT: &str = "Loading...";

/// Screen that swaps the stack for a new set of screens
pub struct LoadingScreen {
    core: ScreenCore,
    loading_is_slow: bool,
    other_screens_are_gone: bool,
    screens_to_load: Vec<Box<dyn Screen>>,
}

impl LoadingScreen {
    /// Name and markup asset of the loading screen
    pub const NAME: &'static str = "Loading";

    /// Exit every screen on the stack and push a loading screen
    ///
    /// `screens` are pushed bottom to top once the old screens are gone. A
    /// slow load draws the loading window meanwhile.
    pub fn load(
        manager: &mut ScreenManager,
        loading_is_slow: bool,
        screens: Vec<Box<dyn Screen>>,
    ) -> Result<ScreenId, ScreenError> {
        manager.exit_all_screens();

        log::info!("Loading {} screens (slow: {loading_is_slow})", screens.len());
        manager.add_screen(Box::new(Self::new(loading_is_slow, screens)))
    }

    /// Same as [`LoadingScreen::load`], queued from inside a running screen
    pub fn queue(ctx: &mut ScreenContext<'_>, loading_is_slow: bool, screens: Vec<Box<dyn Screen>>) {
        log::info!("Loading {} screens (slow: {loading_is_slow})", screens.len());
        ctx.exit_all_screens();
        ctx.add_screen(Box::new(Self::new(loading_is_slow, screens)));
    }

    fn new(loading_is_slow: bool, screens_to_load: Vec<Box<dyn Screen>>) -> Self {
        Self {
            core: ScreenCore::new(Self::NAME)
                .with_window_asset(Self::NAME)
                .with_transition(Duration::from_millis(500), Duration::ZERO),
            loading_is_slow,
            other_screens_are_gone: false,
            screens_to_load,
        }
    }

    /// Whether the previous screens have left the stack
    pub fn other_screens_are_gone(&self) -> bool {
        self.other_screens_are_gone
    }
}

impl Screen for LoadingScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn update(
        &mut self,
        ctx: &mut ScreenContext<'_>,
        elapsed: Duration,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.core
            .update(elapsed, other_screen_has_focus, covered_by_other_screen);

        if !self.other_screens_are_gone {
            return;
        }

        ctx.remove_self();
        for screen in self.screens_to_load.drain(..) {
            ctx.add_screen(screen);
        }
    }

    fn draw(&mut self, ctx: &mut ScreenContext<'_>, backend: &mut dyn RenderBackend) -> Result<(), ScreenError> {
        // Gone only once this screen has been drawn alone
        if self.core.state() == ScreenState::Active && ctx.screen_count() == 1 {
            self.other_screens_are_gone = true;
        }

        if !self.loading_is_slow {
            return Ok(());
        }

        self.core.window_mut().set_text(LOADING_TEXT);
        self.core.draw(backend, ctx.services.content.as_ref())
    }
}

impl std::fmt::Debug for LoadingScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingScreen")
            .field("core", &self.core)
            .field("loading_is_slow", &self.loading_is_slow)
            .field("other_screens_are_gone", &self.other_screens_are_gone)
            .field("screens_to_load", &self.screens_to_load.len())
            .finish()
    }
}
