//! Window: the root control of one screen's GUI
//!
//! Owns the control/visual arena, the name map of its child controls, the
//! music playlist declared in markup, and the event router. Input is routed
//! once per frame by [`Window::bubble_input`].

use std::collections::HashMap;

use crate::events::{ControlEvent, ControlEventHandler, ControlEventKind, EventRouter};
use crate::foundation::math::{Point, Rect};
use crate::input::InputSnapshot;
use crate::ui::controls::{Control, ControlKind};
use crate::ui::rendering::RenderEngine;
use crate::ui::visuals::Visual;
use crate::ui::{ControlId, GuiError, GuiTree, VisualId};

/// Root control plus its named children
#[derive(Debug)]
pub struct Window {
    tree: GuiTree,
    root: ControlId,
    names: HashMap<String, ControlId>,
    order: Vec<ControlId>,
    focused: Option<ControlId>,
    mouse_over: Option<ControlId>,
    probe_size: i32,
    playlist: Vec<String>,
    events: EventRouter,
}

impl Window {
    /// Empty window covering `screen_size`
    ///
    /// `probe_size` is the edge of the square hit-test probe centred on the
    /// pointer.
    pub fn new(screen_size: Point, probe_size: i32) -> Self {
        let mut tree = GuiTree::new();
        let root = tree.insert_control(
            Control::new("", ControlKind::Window).with_rect(Point::zeros(), screen_size),
            None,
        );
        Self {
            tree,
            root,
            names: HashMap::new(),
            order: Vec::new(),
            focused: None,
            mouse_over: None,
            probe_size: probe_size.max(1),
            playlist: Vec::new(),
            events: EventRouter::new(),
        }
    }

    /// Root control key
    pub fn root(&self) -> ControlId {
        self.root
    }

    /// Control and visual arena
    pub fn tree(&self) -> &GuiTree {
        &self.tree
    }

    /// Mutable control and visual arena
    pub fn tree_mut(&mut self) -> &mut GuiTree {
        &mut self.tree
    }

    /// Music tracks declared by the markup
    pub fn playlist(&self) -> &[String] {
        &self.playlist
    }

    /// Replace the playlist
    pub fn set_playlist(&mut self, tracks: Vec<String>) {
        self.playlist = tracks;
    }

    /// Root text
    pub fn text(&self) -> &str {
        self.tree[self.root].text()
    }

    /// Set the root text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.tree[self.root].core_mut().text = text.into();
    }

    /// Attach a visual to the root
    pub fn add_root_visual(&mut self, visual: Visual) -> Option<VisualId> {
        self.tree.attach_visual(self.root, visual)
    }

    /// Add a child control with its visuals
    ///
    /// An unnamed control is keyed by the number of controls added before it.
    /// Every control must bring at least one visual.
    pub fn add_control(&mut self, mut control: Control, visuals: Vec<Visual>) -> Result<ControlId, GuiError> {
        if control.name().is_empty() {
            control.core_mut().name = self.order.len().to_string();
        }
        let name = control.name().to_string();

        if self.names.contains_key(&name) {
            return Err(GuiError::DuplicateControl(name));
        }
        if visuals.is_empty() {
            log::error!("Control '{name}' ({}) has no visuals", control.key());
            return Err(GuiError::NoVisuals(name));
        }

        let id = self.tree.insert_control(control, Some(self.root));
        for visual in visuals {
            self.tree.attach_visual(id, visual);
        }
        self.names.insert(name, id);
        self.order.push(id);
        Ok(id)
    }

    /// Key of the child control called `name`
    pub fn control_id(&self, name: &str) -> Option<ControlId> {
        self.names.get(name).copied()
    }

    /// Child control called `name`
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.control_id(name).and_then(|id| self.tree.control(id))
    }

    /// Mutable child control called `name`
    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        let id = self.control_id(name)?;
        self.tree.control_mut(id)
    }

    /// Child controls in insertion order
    pub fn controls(&self) -> impl Iterator<Item = &Control> + '_ {
        self.order.iter().filter_map(|id| self.tree.control(*id))
    }

    /// Child control keys in insertion order
    pub fn control_ids(&self) -> &[ControlId] {
        &self.order
    }

    /// Control holding focus
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Control currently tracked as hovered
    pub fn mouse_over(&self) -> Option<ControlId> {
        self.mouse_over
    }

    /// Subscribe to events of the child control called `name`
    pub fn on<H>(&mut self, name: &str, kind: ControlEventKind, handler: H) -> Result<(), GuiError>
    where
        H: ControlEventHandler + 'static,
    {
        let id = self
            .control_id(name)
            .ok_or_else(|| GuiError::ControlNotFound(name.to_string()))?;
        self.events.subscribe(id, kind, Box::new(handler));
        Ok(())
    }

    /// Subscribe to events of any control in this window, the root included
    pub fn subscribe<H>(&mut self, id: ControlId, kind: ControlEventKind, handler: H)
    where
        H: ControlEventHandler + 'static,
    {
        self.events.subscribe(id, kind, Box::new(handler));
    }

    /// Take the events fired since the last call
    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        self.events.drain()
    }

    /// Per-frame update of every child control; nothing runs while disabled
    pub fn update(&mut self, elapsed_seconds: f32) {
        if !self.tree.is_enabled(self.root) {
            return;
        }
        for id in &self.order {
            self.tree.update(*id, elapsed_seconds);
        }
    }

    fn probe(&self, pointer: Point) -> Rect {
        let half = self.probe_size / 2;
        Rect::new(
            pointer.x.saturating_sub(half),
            pointer.y.saturating_sub(half),
            self.probe_size,
            self.probe_size,
        )
    }

    fn hits(&self, id: ControlId, probe: &Rect) -> bool {
        self.tree
            .control(id)
            .is_some_and(|control| control.touch_bounds().intersects(probe))
    }

    fn fire(&mut self, id: ControlId, kind: ControlEventKind, position: Point) {
        if let Some(control) = self.tree.control(id) {
            self.events.fire(id, control, kind, position);
        }
    }

    /// Route one frame of input
    ///
    /// Returns whether a click was dispatched or a new hover entered.
    pub fn bubble_input(&mut self, input: &InputSnapshot) -> bool {
        if !self.tree.is_enabled(self.root) {
            return false;
        }

        let position = input.pointer();
        let probe = self.probe(position);
        let mut triggered = false;

        if let Some(hovered) = self.mouse_over {
            if self.tree.is_enabled(hovered) && self.hits(hovered, &probe) {
                self.fire(hovered, ControlEventKind::MouseOver, position);
            } else {
                self.fire(hovered, ControlEventKind::MouseOut, position);
                self.mouse_over = None;
            }
        }

        for index in 0..self.order.len() {
            let id = self.order[index];
            if !self.tree.is_enabled(id) || !self.hits(id, &probe) {
                continue;
            }

            if input.is_right_click() {
                self.tree.on_right_click(id);
                self.fire(id, ControlEventKind::RightClicked, position);
                return true;
            }

            if input.is_left_click() {
                self.tree.on_left_click(id);
                self.fire(id, ControlEventKind::LeftClicked, position);
                self.focus(Some(id));
                return true;
            }

            if self.mouse_over != Some(id) {
                self.mouse_over = Some(id);
                self.fire(id, ControlEventKind::MouseEnter, position);
                triggered = true;
            }
        }

        if let Some(focused) = self.focused {
            self.tree.handle_input(focused, input);
        }

        if self.tree[self.root].touch_bounds().contains_rect(&probe) {
            if input.is_right_click() {
                self.tree.on_right_click(self.root);
                self.fire(self.root, ControlEventKind::RightClicked, position);
                triggered = true;
            }
            if input.is_left_click() {
                self.tree.on_left_click(self.root);
                self.fire(self.root, ControlEventKind::LeftClicked, position);
                triggered = true;
            }
        }

        triggered
    }

    /// Move exclusive focus; the previous holder loses focus first
    pub fn focus(&mut self, target: Option<ControlId>) {
        if self.focused == target {
            return;
        }

        if let Some(previous) = self.focused.take() {
            if self.tree.set_focus(previous, false) {
                self.fire(previous, ControlEventKind::LostFocus, Point::zeros());
            }
        }

        if let Some(next) = target.filter(|id| self.tree.control(*id).is_some()) {
            self.focused = Some(next);
            if self.tree.set_focus(next, true) {
                log::debug!("Focus moved to '{}'", self.tree[next].name());
                self.fire(next, ControlEventKind::GainedFocus, Point::zeros());
            }
        }
    }

    /// First enabled child whose touch bounds intersect the probe at `point`
    pub fn get_enabled_child_at_point(&self, point: Point) -> Option<ControlId> {
        let probe = self.probe(point);
        self.order
            .iter()
            .copied()
            .find(|id| self.tree.is_enabled(*id) && self.hits(*id, &probe))
    }

    /// First child whose touch bounds intersect the probe at `point`
    pub fn get_first_child_at_point(&self, point: Point) -> Option<ControlId> {
        let probe = self.probe(point);
        self.order.iter().copied().find(|id| self.hits(*id, &probe))
    }

    /// Register the root's visuals, then every child's, with a render engine
    ///
    /// Slideshows get their slide visibility applied first.
    pub fn register_visuals(&mut self, renderer: &mut RenderEngine) {
        for id in self.order.clone() {
            self.tree.apply_slide_visibility(id);
        }
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            let Some(control) = self.tree.control(id) else {
                continue;
            };
            for visual in control.core().visuals() {
                renderer.register(*visual);
            }
            pending.extend(control.core().children().iter().rev());
        }
    }

    /// Remove every visual of this window from a render engine
    pub fn unregister_visuals(&self, renderer: &mut RenderEngine) {
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            let Some(control) = self.tree.control(id) else {
                continue;
            };
            for visual in control.core().visuals() {
                renderer.unregister(*visual);
            }
            pending.extend(control.core().children().iter());
        }
    }
}
