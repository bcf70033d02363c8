//! Render Backend Trait
//!
//! Defines the interface between the GUI and the sprite-batch renderer.
//! Keeps the GUI independent of any graphics API.

use crate::foundation::math::{Color, Point, Rect, Vec2};
use crate::ui::content::TextureHandle;
use crate::ui::rendering::PrimitiveVertex;
use crate::ui::RenderError;

/// Sprite batch submission mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchMode {
    /// Sorted and flushed at the end of the batch
    Deferred,
    /// Each draw is submitted as it is issued, so clip changes apply per draw
    Immediate,
}

/// Backend-agnostic 2D rendering interface
///
/// Sprite, text and rectangle draws happen inside a batch. Primitive draws
/// need exclusive access to the device and happen between batches.
pub trait RenderBackend {
    /// Begin a sprite batch
    fn begin_batch(&mut self, mode: BatchMode) -> Result<(), RenderError>;

    /// End the active sprite batch
    fn end_batch(&mut self) -> Result<(), RenderError>;

    /// Current scissor rectangle
    fn clip_rect(&self) -> Rect;

    /// Set the scissor rectangle
    fn set_clip_rect(&mut self, rect: Rect);

    /// Draw a sprite region stretched into `dest`
    fn draw_sprite(
        &mut self,
        page: TextureHandle,
        dest: Rect,
        source: Rect,
        tint: Color,
    ) -> Result<(), RenderError>;

    /// Draw a string with its top-left corner at `position`
    fn draw_text(
        &mut self,
        font: &str,
        text: &str,
        position: Point,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Draw an indexed triangle list translated by `translation`
    fn draw_primitives(
        &mut self,
        vertices: &[PrimitiveVertex],
        indices: &[u16],
        translation: Vec2,
    ) -> Result<(), RenderError>;

    /// Get current screen size
    fn screen_size(&self) -> (u32, u32);
}
