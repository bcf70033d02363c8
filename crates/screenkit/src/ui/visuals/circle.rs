//! Circle visual
//!
//! A ring (or disc when the inner radius is zero) built as an indexed triangle
//! list. Primitives bypass the sprite batch, so drawing ends the active batch,
//! submits the triangles and begins a new immediate batch.

use std::f32::consts::TAU;

use crate::config::GuiConfig;
use crate::foundation::math::{colors, Color, Rect, Vec2};
use crate::ui::attributes::Attributes;
use crate::ui::content::ContentProvider;
use crate::ui::rendering::{BatchMode, DrawContext, PrimitiveVertex};
use crate::ui::visuals::{Drawable, OwnerView, VisualLayout};
use crate::ui::GuiError;

const MIN_DENSITY: usize = 3;
const MAX_DENSITY: usize = 4096;

/// Ring drawn around the center of its resolved rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleVisual {
    density: usize,
    color: Color,
    inner_radius: f32,
    outer_radius: f32,
    directions: Vec<Vec2>,
    vertices: Vec<PrimitiveVertex>,
    indices: Vec<u16>,
    dirty: bool,
}

impl Default for CircleVisual {
    fn default() -> Self {
        Self {
            density: 8,
            color: colors::white(),
            inner_radius: 0.0,
            outer_radius: 1.0,
            directions: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            dirty: false,
        }
    }
}

impl CircleVisual {
    /// Segment count
    pub fn density(&self) -> usize {
        self.density
    }

    /// Fill colour
    pub fn color(&self) -> Color {
        self.color
    }

    /// Inner radius
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// Outer radius
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// Set the inner radius; ignored when larger than the outer radius
    pub fn set_inner_radius(&mut self, radius: f32) {
        if radius <= self.outer_radius {
            self.inner_radius = radius;
            self.dirty = true;
        }
    }

    /// Set the outer radius; ignored when smaller than the inner radius
    pub fn set_outer_radius(&mut self, radius: f32) {
        if radius >= self.inner_radius {
            self.outer_radius = radius;
            self.dirty = true;
        }
    }

    /// Set both radii; ignored unless `outer > inner`
    pub fn set_radius(&mut self, inner: f32, outer: f32) {
        if outer > inner {
            self.inner_radius = inner;
            self.outer_radius = outer;
            self.dirty = true;
        }
    }

    /// Set the fill colour
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.dirty = true;
    }

    /// Built vertices (`2 x density` once loaded)
    pub fn vertices(&self) -> &[PrimitiveVertex] {
        &self.vertices
    }

    /// Built indices (`6 x density` once loaded)
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[allow(clippy::cast_precision_loss)]
    fn build_directions(&mut self) {
        let step = TAU / self.density as f32;
        self.directions = (0..self.density)
            .map(|i| {
                let theta = step * i as f32;
                Vec2::new(theta.cos(), theta.sin())
            })
            .collect();
    }

    fn build_vertices(&mut self) {
        let color: [f32; 4] = self.color.into();
        self.vertices = self
            .directions
            .iter()
            .flat_map(|dir| {
                let inner = dir * self.inner_radius;
                let outer = dir * self.outer_radius;
                [
                    PrimitiveVertex::new(inner.x, inner.y, color),
                    PrimitiveVertex::new(outer.x, outer.y, color),
                ]
            })
            .collect();
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_indices(&mut self) {
        let vertex_count = self.density * 2;
        self.indices = (0..self.density)
            .flat_map(|i| {
                let inner = (i * 2) as u16;
                let outer = inner + 1;
                let next_inner = (((i + 1) * 2) % vertex_count) as u16;
                [inner, outer, next_inner, next_inner, outer, next_inner + 1]
            })
            .collect();
    }
}

impl Drawable for CircleVisual {
    fn key(&self) -> &str {
        "CIRCLE"
    }

    fn process_attributes(&mut self, attrs: &Attributes, _config: &GuiConfig) -> Result<(), GuiError> {
        let density = attrs.parse_or("Density", self.density)?;
        if !(MIN_DENSITY..=MAX_DENSITY).contains(&density) {
            return Err(GuiError::invalid_attribute("Density", density.to_string()));
        }
        self.density = density;
        self.color = attrs.color_or("Color", self.color)?;

        let inner = attrs.parse_or("InnerRadius", self.inner_radius)?;
        let outer = attrs.parse_or("OuterRadius", self.outer_radius)?;
        if inner > outer || inner < 0.0 {
            return Err(GuiError::invalid_attribute("InnerRadius", inner.to_string()));
        }
        self.inner_radius = inner;
        self.outer_radius = outer;
        Ok(())
    }

    fn load(&mut self, _layout: &mut VisualLayout, _content: &dyn ContentProvider) -> Result<(), GuiError> {
        self.build_directions();
        self.build_vertices();
        self.build_indices();
        self.dirty = false;
        Ok(())
    }

    fn unload(&mut self) {
        self.directions.clear();
        self.vertices.clear();
        self.indices.clear();
    }

    fn update(&mut self, _elapsed_seconds: f32) {
        if self.dirty && !self.directions.is_empty() {
            self.build_vertices();
            self.dirty = false;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw(&self, rect: Rect, _owner: &OwnerView, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        if self.vertices.is_empty() {
            return Ok(());
        }

        let center = rect.center();
        let translation = Vec2::new(center.x as f32, center.y as f32);

        ctx.backend.end_batch()?;
        ctx.backend
            .draw_primitives(&self.vertices, &self.indices, translation)?;
        ctx.backend.begin_batch(BatchMode::Immediate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::content::MemoryContent;
    use approx::assert_relative_eq;

    fn loaded(density: usize) -> CircleVisual {
        let mut circle = CircleVisual::default();
        let attrs = Attributes::new("Circle")
            .with("Density", density.to_string())
            .with("InnerRadius", "4")
            .with("OuterRadius", "10");
        circle.process_attributes(&attrs, &GuiConfig::default()).unwrap();
        circle.load(&mut VisualLayout::default(), &MemoryContent::new()).unwrap();
        circle
    }

    #[test]
    fn test_buffer_sizes_follow_density() {
        let circle = loaded(8);
        assert_eq!(circle.vertices().len(), 16);
        assert_eq!(circle.indices().len(), 48);
        assert!(circle.indices().iter().all(|&i| usize::from(i) < 16));
    }

    #[test]
    fn test_last_segment_wraps_to_first() {
        let circle = loaded(4);
        let last = &circle.indices()[18..24];
        assert_eq!(last, &[6, 7, 0, 0, 7, 1]);
    }

    #[test]
    fn test_vertices_on_radii() {
        let circle = loaded(4);
        assert_relative_eq!(circle.vertices()[0].position[0], 4.0);
        assert_relative_eq!(circle.vertices()[1].position[0], 10.0);
        assert_relative_eq!(circle.vertices()[3].position[1], 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_radius_setters_reject_inverted_ring() {
        let mut circle = loaded(8);
        circle.set_inner_radius(20.0);
        assert_relative_eq!(circle.inner_radius(), 4.0);

        circle.set_outer_radius(2.0);
        assert_relative_eq!(circle.outer_radius(), 10.0);

        circle.set_radius(6.0, 6.0);
        assert_relative_eq!(circle.inner_radius(), 4.0);

        circle.set_radius(1.0, 12.0);
        circle.update(0.016);
        assert_relative_eq!(circle.vertices()[1].position[0], 12.0);
    }

    #[test]
    fn test_density_bounds() {
        let mut circle = CircleVisual::default();
        let attrs = Attributes::new("Circle").with("Density", "2");
        assert!(circle.process_attributes(&attrs, &GuiConfig::default()).is_err());
    }
}
