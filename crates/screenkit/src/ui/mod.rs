//! GUI module
//!
//! Retained-mode GUI built from markup.
//!
//! Architecture:
//! - tree: arena of controls and visuals, keyed by slotmap ids
//! - controls/: control variants and their registry
//! - visuals/: renderable variants and their registry
//! - layout: alignment solver and point parsing
//! - window / markup: root control and the loader that builds it
//! - rendering/: backend trait, recording backend, render engine

pub mod attributes;
pub mod content;
pub mod controls;
pub mod error;
pub mod layout;
pub mod markup;
pub mod rendering;
pub mod tree;
pub mod visuals;
pub mod window;

#[cfg(test)]
mod tests;

pub use attributes::Attributes;
pub use content::{ContentProvider, MemoryContent, SpriteRegion, TextureHandle};
pub use controls::{
    CheckBox, Control, ControlBehavior, ControlCore, ControlKind, ControlRegistry, ProgressBar, Slideshow,
    TextInput,
};
pub use error::{GuiError, RenderError};
pub use layout::{HorizontalAlignment, LayoutSolver, Placement, VerticalAlignment};
pub use markup::MarkupLoader;
pub use rendering::{BatchMode, DrawCommand, DrawContext, RecordingBackend, RenderBackend, RenderEngine};
pub use tree::{ControlId, GuiTree, VisualId};
pub use visuals::{
    BarVisual, CircleVisual, Drawable, ImageVisual, OwnerView, TextSource, TextVisual, Visibility, Visual, VisualKind,
    VisualRegistry,
};
pub use window::Window;
