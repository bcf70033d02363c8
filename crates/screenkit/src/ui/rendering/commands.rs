//! Recorded draw commands
//!
//! [`RecordingBackend`] implements [`RenderBackend`] by logging every call as a
//! [`DrawCommand`]. Headless tools and tests use it in place of a GPU backend.

use crate::foundation::math::{Color, Point, Rect, Vec2};
use crate::ui::content::TextureHandle;
use crate::ui::rendering::{BatchMode, PrimitiveVertex, RenderBackend};
use crate::ui::RenderError;

/// One backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Batch started
    BeginBatch(BatchMode),
    /// Batch ended
    EndBatch,
    /// Scissor rectangle changed
    SetClip(Rect),
    /// Sprite drawn
    Sprite {
        /// Texture page
        page: TextureHandle,
        /// Destination rectangle
        dest: Rect,
        /// Source rectangle
        source: Rect,
        /// Tint colour
        tint: Color,
    },
    /// Text drawn
    Text {
        /// Font key
        font: String,
        /// String drawn
        text: String,
        /// Top-left position
        position: Point,
        /// Text colour
        color: Color,
    },
    /// Solid rectangle drawn
    FillRect {
        /// Filled area
        rect: Rect,
        /// Fill colour
        color: Color,
    },
    /// Primitive triangle list drawn
    Primitives {
        /// Vertex count
        vertex_count: usize,
        /// Index count
        index_count: usize,
        /// World translation
        translation: Vec2,
    },
}

/// Backend that records commands instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    batch: Option<BatchMode>,
    clip: Rect,
    screen_width: u32,
    screen_height: u32,
}

impl RecordingBackend {
    /// Create a backend for a screen of the given size
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            commands: Vec::new(),
            batch: None,
            clip: Rect::new(0, 0, screen_width as i32, screen_height as i32),
            screen_width,
            screen_height,
        }
    }

    /// Every command recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Whether a batch is active
    pub fn in_batch(&self) -> bool {
        self.batch.is_some()
    }

    fn require_batch(&self) -> Result<(), RenderError> {
        if self.batch.is_some() {
            Ok(())
        } else {
            Err(RenderError::NoActiveBatch)
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_batch(&mut self, mode: BatchMode) -> Result<(), RenderError> {
        if self.batch.is_some() {
            return Err(RenderError::BatchAlreadyActive);
        }
        self.batch = Some(mode);
        self.commands.push(DrawCommand::BeginBatch(mode));
        Ok(())
    }

    fn end_batch(&mut self) -> Result<(), RenderError> {
        self.require_batch()?;
        self.batch = None;
        self.commands.push(DrawCommand::EndBatch);
        Ok(())
    }

    fn clip_rect(&self) -> Rect {
        self.clip
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = rect;
        self.commands.push(DrawCommand::SetClip(rect));
    }

    fn draw_sprite(
        &mut self,
        page: TextureHandle,
        dest: Rect,
        source: Rect,
        tint: Color,
    ) -> Result<(), RenderError> {
        self.require_batch()?;
        self.commands.push(DrawCommand::Sprite { page, dest, source, tint });
        Ok(())
    }

    fn draw_text(
        &mut self,
        font: &str,
        text: &str,
        position: Point,
        color: Color,
    ) -> Result<(), RenderError> {
        self.require_batch()?;
        self.commands.push(DrawCommand::Text {
            font: font.to_string(),
            text: text.to_string(),
            position,
            color,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.require_batch()?;
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn draw_primitives(
        &mut self,
        vertices: &[PrimitiveVertex],
        indices: &[u16],
        translation: Vec2,
    ) -> Result<(), RenderError> {
        if self.batch.is_some() {
            return Err(RenderError::Backend(
                "primitives cannot be drawn inside a sprite batch".to_string(),
            ));
        }
        self.commands.push(DrawCommand::Primitives {
            vertex_count: vertices.len(),
            index_count: indices.len(),
            translation,
        });
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}
