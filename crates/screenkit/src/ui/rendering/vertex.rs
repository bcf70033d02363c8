//! Vertex types for primitive visuals

use bytemuck::{Pod, Zeroable};

/// Position + colour vertex for untextured primitives
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PrimitiveVertex {
    /// Position relative to the draw translation
    pub position: [f32; 3],
    /// RGBA colour
    pub color: [f32; 4],
}

impl PrimitiveVertex {
    /// Create a vertex on the z = 0 plane
    pub fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }
}
