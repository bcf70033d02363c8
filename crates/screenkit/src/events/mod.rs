//! Control event routing
//!
//! Key principles:
//! - Handlers are registered per control and per event kind
//! - Every subscriber is notified, in registration order
//! - Fired events are also queued so a screen can poll them after input routing

use std::collections::HashMap;

use crate::foundation::math::Point;
use crate::ui::{Control, ControlId};

/// Event kind identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEventKind {
    /// Left button released over the control
    LeftClicked,
    /// Right button released over the control
    RightClicked,
    /// Pointer still over the hovered control this frame
    MouseOver,
    /// Pointer entered the control
    MouseEnter,
    /// Pointer left the control (or the control became disabled)
    MouseOut,
    /// Control received exclusive focus
    GainedFocus,
    /// Control lost focus
    LostFocus,
}

/// A single event raised by a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    /// What happened
    pub kind: ControlEventKind,
    /// Source control
    pub control: ControlId,
    /// Name of the source control at the time of the event
    pub name: String,
    /// Pointer position when the event fired
    pub position: Point,
}

/// Event handler trait
///
/// Handlers see the control in its post-event state (a checkbox has already
/// toggled when its `LeftClicked` handler runs).
pub trait ControlEventHandler {
    /// Handle an event raised by `control`
    fn on_event(&mut self, event: &ControlEvent, control: &Control);
}

impl<F> ControlEventHandler for F
where
    F: FnMut(&ControlEvent, &Control),
{
    fn on_event(&mut self, event: &ControlEvent, control: &Control) {
        self(event, control);
    }
}

/// Per-window event router with registration and a polling queue
#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<(ControlId, ControlEventKind), Vec<Box<dyn ControlEventHandler>>>,
    queue: Vec<ControlEvent>,
}

impl EventRouter {
    /// Create a new empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one kind of event on one control
    pub fn subscribe(
        &mut self,
        control: ControlId,
        kind: ControlEventKind,
        handler: Box<dyn ControlEventHandler>,
    ) {
        self.handlers.entry((control, kind)).or_default().push(handler);
    }

    /// Number of handlers registered for a control and kind
    pub fn handler_count(&self, control: ControlId, kind: ControlEventKind) -> usize {
        self.handlers.get(&(control, kind)).map_or(0, Vec::len)
    }

    /// Notify every subscriber, then queue the event for polling
    pub fn fire(&mut self, id: ControlId, control: &Control, kind: ControlEventKind, position: Point) {
        let event = ControlEvent {
            kind,
            control: id,
            name: control.name().to_string(),
            position,
        };

        if let Some(handlers) = self.handlers.get_mut(&(id, kind)) {
            for handler in handlers.iter_mut() {
                handler.on_event(&event, control);
            }
        }

        self.queue.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Events queued since the last drain
    pub fn pending(&self) -> &[ControlEvent] {
        &self.queue
    }

    /// Drop every handler registered for a control
    pub fn remove_control(&mut self, control: ControlId) {
        self.handlers.retain(|(id, _), _| *id != control);
    }

    /// Clear queued events (handlers are kept)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("handlers", &self.handlers.len())
            .field("queue", &self.queue)
            .finish()
    }
}
