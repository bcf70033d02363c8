//! Demo screens
//!
//! The main menu starts a game through the loading screen; the game screen
//! drains a shield bar, flips through hints and pauses into a menu that asks
//! before quitting.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use screenkit::prelude::*;

/// Set once the player confirms quitting
pub type QuitFlag = Rc<Cell<bool>>;

/// Title screen driven by `MainMenu.GUI`
pub struct MainMenuScreen {
    core: ScreenCore,
    quit: QuitFlag,
}

impl MainMenuScreen {
    pub fn new(quit: QuitFlag) -> Self {
        Self {
            core: ScreenCore::new("MainMenu").with_window_asset("MainMenu"),
            quit,
        }
    }

    fn confirm_quit(&self, ctx: &mut ScreenContext<'_>) {
        let quit = Rc::clone(&self.quit);
        ctx.add_screen(Box::new(
            MessageBoxScreen::new("Quit the demo?").on_accepted(move |_| quit.set(true)),
        ));
    }
}

impl Screen for MainMenuScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>, input: &InputSnapshot) {
        self.core.handle_input(input);

        for event in self.core.window_mut().drain_events() {
            match (event.kind, event.name.as_str()) {
                (ControlEventKind::LeftClicked, "Play") => {
                    let player = self
                        .core
                        .window()
                        .control("Player")
                        .map(|control| control.text().to_string())
                        .unwrap_or_default();
                    log::info!("Starting game for player '{player}'");
                    LoadingScreen::queue(ctx, true, vec![Box::new(GameScreen::new(Rc::clone(&self.quit)))]);
                }
                (ControlEventKind::LeftClicked, "Quit") => self.confirm_quit(ctx),
                (ControlEventKind::LeftClicked, "Sound") => {
                    let enabled = self.core.window().control("Sound").and_then(Control::checked);
                    log::info!("Sound toggled: {enabled:?}");
                }
                _ => {}
            }
        }

        if input.is_menu_cancel() {
            self.confirm_quit(ctx);
        }
    }
}

/// Gameplay stand-in driven by `Game.GUI`
pub struct GameScreen {
    core: ScreenCore,
    quit: QuitFlag,
}

impl GameScreen {
    /// Shield lost per second while the screen is active
    const SHIELD_DRAIN: f32 = 0.1;

    pub fn new(quit: QuitFlag) -> Self {
        Self {
            core: ScreenCore::new("Game").with_window_asset("Game"),
            quit,
        }
    }

    fn shields(&self) -> Option<f32> {
        self.core.window().control("Shields").and_then(Control::progress)
    }
}

impl Screen for GameScreen {
    fn core(&self) -> &ScreenCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ScreenCore {
        &mut self.core
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

        if !self.core.is_active() {
            return;
        }
        let drained = self.shields().unwrap_or_default() - Self::SHIELD_DRAIN * elapsed.as_secs_f32();
        if let Some(ControlKind::ProgressBar(bar)) = self.core.window_mut().control_mut("Shields").map(Control::kind_mut) {
            bar.set_progress(drained);
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>, input: &InputSnapshot) {
        self.core.handle_input(input);

        if let Some(hints) = self.core.window().control_id("Hints") {
            let tree = self.core.window_mut().tree_mut();
            if input.is_menu_right() && tree.next_slide(hints) {
                log::debug!("Next hint");
            } else if input.is_menu_left() && tree.prev_slide(hints) {
                log::debug!("Previous hint");
            }
        }

        if input.is_menu_cancel() {
            log::info!("Paused with shields at {:.2}", self.shields().unwrap_or_default());
            ctx.add_screen(Box::new(pause_menu(Rc::clone(&self.quit))));
        }
    }
}

/// Popup menu over the game: resume, or confirm leaving
fn pause_menu(quit: QuitFlag) -> MenuScreen {
    let mut menu = MenuScreen::from_core(ScreenCore::new("Paused").with_popup(true), "Paused")
        .with_entry(
            MenuEntry::new("Resume")
                .at(Point::new(340, 300))
                .on_selected(|ctx| ctx.exit_screen()),
        )
        .with_entry(MenuEntry::new("Quit").at(Point::new(340, 340)).on_selected(move |ctx| {
            let quit = Rc::clone(&quit);
            ctx.add_screen(Box::new(
                MessageBoxScreen::new("Leave the game?").on_accepted(move |_| quit.set(true)),
            ));
        }));
    menu.title_position = Point::new(340, 220);
    menu
}
