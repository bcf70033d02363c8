//! GUI rendering module
//!
//! Backend-agnostic draw plumbing: the backend trait, a recording backend,
//! primitive vertices, and the per-screen render engine.

pub mod backend;
pub mod commands;
pub mod render_engine;
pub mod vertex;

pub use backend::{BatchMode, RenderBackend};
pub use commands::{DrawCommand, RecordingBackend};
pub use render_engine::RenderEngine;
pub use vertex::PrimitiveVertex;

use crate::ui::content::ContentProvider;

/// Collaborators a visual needs while drawing
pub struct DrawContext<'a> {
    /// Render backend receiving draw calls
    pub backend: &'a mut dyn RenderBackend,
    /// Content for sprite and font lookups
    pub content: &'a dyn ContentProvider,
}

impl<'a> DrawContext<'a> {
    /// Bundle a backend and a content provider
    pub fn new(backend: &'a mut dyn RenderBackend, content: &'a dyn ContentProvider) -> Self {
        Self { backend, content }
    }
}
