//! Screen stack
//!
//! The manager owns every screen and the shared [`Services`]. Each frame it
//! walks the stack top to bottom for update and input, then bottom to top
//! for drawing. Stack changes requested by screens are applied after the
//! walk.

use std::time::Duration;

use slotmap::SlotMap;

use crate::foundation::math::{colors, Rect};
use crate::input::InputSnapshot;
use crate::screens::{Screen, ScreenCommand, ScreenContext, ScreenError, ScreenState};
use crate::services::Services;
use crate::ui::rendering::{BatchMode, RenderBackend};
use crate::ui::RenderError;

slotmap::new_key_type! {
    /// Stable handle to a screen on the stack
    pub struct ScreenId;
}

/// Owns the screen stack
pub struct ScreenManager {
    screens: SlotMap<ScreenId, Box<dyn Screen>>,
    order: Vec<ScreenId>,
    services: Services,
    initialized: bool,
}

impl ScreenManager {
    /// Empty stack over `services`
    pub fn new(services: Services) -> Self {
        Self {
            screens: SlotMap::with_key(),
            order: Vec::new(),
            services,
            initialized: false,
        }
    }

    /// Shared services
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable shared services
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Whether content has been loaded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load content for every screen added so far
    ///
    /// Screens added later load as they are added.
    pub fn initialize(&mut self) -> Result<(), ScreenError> {
        if self.initialized {
            return Ok(());
        }
        for id in self.order.clone() {
            if let Some(screen) = self.screens.get_mut(id) {
                screen.load_content(&mut self.services)?;
            }
        }
        self.initialized = true;
        log::info!("Screen manager initialized with {} screens", self.order.len());
        Ok(())
    }

    /// Unload every screen's content
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        for id in self.order.clone() {
            if let Some(screen) = self.screens.get_mut(id) {
                screen.unload_content(&mut self.services);
            }
        }
        self.initialized = false;
        log::info!("Screen manager shut down");
    }

    /// Push a screen on top of the stack
    ///
    /// When the manager is initialized the screen loads first; a screen that
    /// fails to load is not added.
    pub fn add_screen(&mut self, mut screen: Box<dyn Screen>) -> Result<ScreenId, ScreenError> {
        let core = screen.core_mut();
        core.reset_for_stack(&self.services.config);
        core.set_screen_size(self.services.config.screen_size());

        if self.initialized {
            screen.load_content(&mut self.services)?;
        }

        log::info!("Screen added: {}", screen.core().name());
        let id = self.screens.insert(screen);
        self.order.push(id);
        Ok(id)
    }

    /// Remove a screen immediately, unloading it if content is loaded
    pub fn remove_screen(&mut self, id: ScreenId) -> Option<Box<dyn Screen>> {
        let mut screen = self.screens.remove(id)?;
        self.order.retain(|other| *other != id);

        if self.initialized {
            screen.unload_content(&mut self.services);
        }
        log::info!("Screen removed: {}", screen.core().name());
        Some(screen)
    }

    /// Start a screen's exit transition, removing it now if its off time is zero
    pub fn exit_screen(&mut self, id: ScreenId) {
        let Some(screen) = self.screens.get_mut(id) else {
            log::warn!("Exit requested for a screen that is not on the stack");
            return;
        };

        screen.core_mut().exit_screen();
        if screen.core_mut().take_removal_request() {
            self.remove_screen(id);
        }
    }

    /// Start the exit transition of every screen on the stack
    pub fn exit_all_screens(&mut self) {
        for id in self.order.clone() {
            self.exit_screen(id);
        }
    }

    /// Screen by id
    pub fn screen(&self, id: ScreenId) -> Option<&dyn Screen> {
        self.screens.get(id).map(Box::as_ref)
    }

    /// Mutable screen by id
    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen + 'static)> {
        self.screens.get_mut(id).map(Box::as_mut)
    }

    /// Screen ids bottom to top
    pub fn screen_ids(&self) -> &[ScreenId] {
        &self.order
    }

    /// Screens bottom to top
    pub fn screens(&self) -> impl Iterator<Item = &dyn Screen> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.screens.get(*id).map(Box::as_ref))
    }

    /// Topmost screen with this name
    pub fn find(&self, name: &str) -> Option<ScreenId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.screens.get(*id).is_some_and(|screen| screen.core().name() == name))
    }

    /// Number of screens on the stack
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Update every screen top to bottom
    ///
    /// The topmost screen that is on takes `input`. Any non-popup screen that
    /// is on covers the screens beneath it.
    pub fn update(&mut self, elapsed: Duration, input: &InputSnapshot) -> Result<(), ScreenError> {
        let screen_count = self.order.len();
        let mut stack = self.order.clone();
        let mut commands = Vec::new();
        let mut other_screen_has_focus = false;
        let mut covered_by_other_screen = false;

        while let Some(id) = stack.pop() {
            let Some(screen) = self.screens.get_mut(id) else {
                continue;
            };
            let mut ctx = ScreenContext::new(&mut self.services, &mut commands, id, screen_count);

            screen.update(&mut ctx, elapsed, other_screen_has_focus, covered_by_other_screen);

            if screen.core().state().is_on() {
                if !other_screen_has_focus {
                    screen.handle_input(&mut ctx, input);
                    other_screen_has_focus = true;
                }
                if !screen.core().is_popup() {
                    covered_by_other_screen = true;
                }
            }

            if screen.core_mut().take_removal_request() {
                commands.push(ScreenCommand::Remove(id));
            }
        }

        self.apply(commands)
    }

    /// Draw every visible screen bottom to top
    pub fn draw(&mut self, backend: &mut dyn RenderBackend) -> Result<(), ScreenError> {
        let screen_count = self.order.len();
        let mut commands = Vec::new();

        for id in self.order.clone() {
            let Some(screen) = self.screens.get_mut(id) else {
                continue;
            };
            if screen.core().state() == ScreenState::Hidden {
                continue;
            }
            let mut ctx = ScreenContext::new(&mut self.services, &mut commands, id, screen_count);
            screen.draw(&mut ctx, backend)?;
        }

        self.apply(commands)
    }

    /// Darken the whole screen by `alpha`, for popups and fades
    pub fn fade_back_buffer_to_black(backend: &mut dyn RenderBackend, alpha: f32) -> Result<(), RenderError> {
        let (width, height) = backend.screen_size();
        let screen = Rect::new(0, 0, width as i32, height as i32);

        backend.begin_batch(BatchMode::Deferred)?;
        backend.fill_rect(screen, colors::black() * alpha)?;
        backend.end_batch()
    }

    fn apply(&mut self, commands: Vec<ScreenCommand>) -> Result<(), ScreenError> {
        for command in commands {
            match command {
                ScreenCommand::Add(screen) => {
                    self.add_screen(screen)?;
                }
                ScreenCommand::Remove(id) => {
                    self.remove_screen(id);
                }
                ScreenCommand::Exit(id) => self.exit_screen(id),
                ScreenCommand::ExitAll => self.exit_all_screens(),
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ScreenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.screens().map(|screen| screen.core().name()).collect();
        f.debug_struct("ScreenManager")
            .field("screens", &names)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
