//! Visuals
//!
//! A visual is one renderable unit attached to a control. Shared placement
//! and visibility live on [`Visual`]; the variant payload implements
//! [`Drawable`].

pub mod bar;
pub mod circle;
pub mod image;
pub mod registry;
pub mod text;

pub use bar::BarVisual;
pub use circle::CircleVisual;
pub use image::ImageVisual;
pub use registry::VisualRegistry;
pub use text::{TextSource, TextVisual};

use std::str::FromStr;

use crate::config::GuiConfig;
use crate::foundation::math::{Point, Rect};
use crate::ui::attributes::Attributes;
use crate::ui::content::ContentProvider;
use crate::ui::layout::{HorizontalAlignment, LayoutSolver, Placement, VerticalAlignment};
use crate::ui::rendering::DrawContext;
use crate::ui::{ControlId, GuiError};

/// Draw predicate evaluated against the owner every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Drawn while the owner is enabled
    Enabled,
    /// Drawn while the owner is disabled
    Disabled,
    /// Always drawn
    #[default]
    EnabledDisabled,
    /// Drawn while the owner is a checked checkbox
    Checked,
    /// Drawn unless the owner is a checked checkbox
    Unchecked,
}

impl Visibility {
    /// Whether a visual with this predicate is drawn
    pub const fn should_draw(self, owner_enabled: bool, owner_checked: bool) -> bool {
        match self {
            Self::Enabled => owner_enabled,
            Self::Disabled => !owner_enabled,
            Self::EnabledDisabled => true,
            Self::Checked => owner_checked,
            Self::Unchecked => !owner_checked,
        }
    }
}

impl FromStr for Visibility {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            "enableddisabled" => Ok(Self::EnabledDisabled),
            "checked" => Ok(Self::Checked),
            "unchecked" => Ok(Self::Unchecked),
            _ => Err(GuiError::invalid_attribute("Visibility", s)),
        }
    }
}

/// Placement request of a visual relative to its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualLayout {
    /// Offset from the owner (or alignment margin)
    pub location: Point,
    /// Requested size; zero means "clip to owner"
    pub size: Point,
    /// Horizontal alignment
    pub h_align: HorizontalAlignment,
    /// Vertical alignment
    pub v_align: VerticalAlignment,
}

impl VisualLayout {
    /// Place a child of `size` inside the owner
    pub fn place(&self, owner: &OwnerView, size: Point) -> Placement {
        LayoutSolver::place(
            owner.location,
            owner.size,
            self.h_align,
            self.v_align,
            self.location,
            size,
        )
    }
}

/// Snapshot of the owning control a visual reads while drawing
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerView {
    /// Absolute location
    pub location: Point,
    /// Size
    pub size: Point,
    /// Absolute bounds
    pub bounds: Rect,
    /// Effective enabled flag (parent chain)
    pub enabled: bool,
    /// Effective visible flag (parent chain)
    pub visible: bool,
    /// Display text (masked for password inputs)
    pub text: String,
    /// Numeric value, NaN when unset
    pub value: f32,
    /// Checked state when the owner is checkable
    pub checked: Option<bool>,
    /// Progress in 0..=1 when the owner reports progress
    pub progress: Option<f32>,
}

impl OwnerView {
    /// Whether the owner is a checked checkbox
    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }
}

/// Capability set of a visual variant
pub trait Drawable {
    /// Registry key of this variant (upper case)
    fn key(&self) -> &str;

    /// Read variant-specific markup attributes
    fn process_attributes(&mut self, _attrs: &Attributes, _config: &GuiConfig) -> Result<(), GuiError> {
        Ok(())
    }

    /// Resolve content; may adjust the requested layout
    fn load(&mut self, _layout: &mut VisualLayout, _content: &dyn ContentProvider) -> Result<(), GuiError> {
        Ok(())
    }

    /// Release content
    fn unload(&mut self) {}

    /// Per-frame update
    fn update(&mut self, _elapsed_seconds: f32) {}

    /// Child size handed to the layout solver
    fn requested_size(&self, layout: &VisualLayout, _owner: &OwnerView, _content: &dyn ContentProvider) -> Point {
        layout.size
    }

    /// Size the owner has to grow to before this visual is placed
    fn owner_growth(&self, _owner: &OwnerView, _content: &dyn ContentProvider) -> Option<Point> {
        None
    }

    /// Draw into the already-resolved rectangle
    fn draw(&self, rect: Rect, owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError>;
}

/// Visual variants
pub enum VisualKind {
    /// Sprite-sheet image
    Image(ImageVisual),
    /// Text bound to a literal or the owner
    Text(TextVisual),
    /// Ring or disc drawn as primitives
    Circle(CircleVisual),
    /// Two-colour progress bar
    Bar(BarVisual),
    /// Application-defined visual
    Custom(Box<dyn Drawable>),
}

impl VisualKind {
    /// Variant as a drawable
    pub fn drawable(&self) -> &dyn Drawable {
        match self {
            Self::Image(image) => image,
            Self::Text(text) => text,
            Self::Circle(circle) => circle,
            Self::Bar(bar) => bar,
            Self::Custom(custom) => custom.as_ref(),
        }
    }

    /// Variant as a mutable drawable
    pub fn drawable_mut(&mut self) -> &mut dyn Drawable {
        match self {
            Self::Image(image) => image,
            Self::Text(text) => text,
            Self::Circle(circle) => circle,
            Self::Bar(bar) => bar,
            Self::Custom(custom) => custom.as_mut(),
        }
    }
}

impl std::fmt::Debug for VisualKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VisualKind({})", self.drawable().key())
    }
}

/// A renderable attached to a control
#[derive(Debug)]
pub struct Visual {
    pub(crate) owner: ControlId,
    name: String,
    /// Placement request
    pub layout: VisualLayout,
    /// Draw predicate
    pub visibility: Visibility,
    kind: VisualKind,
}

impl Visual {
    /// Create an unattached visual
    pub fn new(kind: VisualKind) -> Self {
        Self {
            owner: ControlId::default(),
            name: String::new(),
            layout: VisualLayout::default(),
            visibility: Visibility::default(),
            kind,
        }
    }

    /// Set the lookup name (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set offset and size (builder pattern)
    pub fn with_rect(mut self, location: Point, size: Point) -> Self {
        self.layout.location = location;
        self.layout.size = size;
        self
    }

    /// Set alignment (builder pattern)
    pub fn with_alignment(mut self, h_align: HorizontalAlignment, v_align: VerticalAlignment) -> Self {
        self.layout.h_align = h_align;
        self.layout.v_align = v_align;
        self
    }

    /// Set the draw predicate (builder pattern)
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Owning control
    pub fn owner(&self) -> ControlId {
        self.owner
    }

    /// Lookup name, empty when unnamed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry key of the variant
    pub fn key(&self) -> &str {
        self.kind.drawable().key()
    }

    /// Variant payload
    pub fn kind(&self) -> &VisualKind {
        &self.kind
    }

    /// Mutable variant payload
    pub fn kind_mut(&mut self) -> &mut VisualKind {
        &mut self.kind
    }

    /// Read the variant's markup attributes
    pub fn process_attributes(&mut self, attrs: &Attributes, config: &GuiConfig) -> Result<(), GuiError> {
        self.kind.drawable_mut().process_attributes(attrs, config)
    }

    /// Resolve content for the variant
    pub fn load(&mut self, content: &dyn ContentProvider) -> Result<(), GuiError> {
        let Self { layout, kind, .. } = self;
        kind.drawable_mut().load(layout, content)
    }

    /// Release variant content
    pub fn unload(&mut self) {
        self.kind.drawable_mut().unload();
    }

    /// Per-frame update
    pub fn update(&mut self, elapsed_seconds: f32) {
        self.kind.drawable_mut().update(elapsed_seconds);
    }

    /// Growth the owner needs before placement
    pub fn owner_growth(&self, owner: &OwnerView, content: &dyn ContentProvider) -> Option<Point> {
        self.kind.drawable().owner_growth(owner, content)
    }

    /// Resolve the final rectangle against the owner
    pub fn resolve(&self, owner: &OwnerView, content: &dyn ContentProvider) -> Placement {
        let size = self.kind.drawable().requested_size(&self.layout, owner, content);
        self.layout.place(owner, size)
    }

    /// Clip rectangle while drawing: owner bounds for zero-size visuals
    pub fn clip_rect(&self, owner: &OwnerView, placement: &Placement) -> Rect {
        if self.layout.size == Point::zeros() {
            owner.bounds
        } else {
            placement.rect()
        }
    }

    /// Draw into a resolved rectangle
    pub fn draw(&self, rect: Rect, owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        self.kind.drawable().draw(rect, owner, ctx)
    }
}
