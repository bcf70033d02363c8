//! Math utilities and types
//!
//! GUI geometry is integer pixels throughout; colours are normalized RGBA.

pub use nalgebra::{Vector2, Vector4};

/// Integer pixel point or size (x, y)
pub type Point = Vector2<i32>;

/// 2D float vector type
pub type Vec2 = Vector2<f32>;

/// 4D float vector type
pub type Vec4 = Vector4<f32>;

/// RGBA colour with components in 0.0..=1.0
pub type Color = Vec4;

/// Shorthand for building a [`Point`]
pub fn point(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Empty rectangle at the origin
    pub const EMPTY: Self = Self { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a location and a size
    pub fn from_location_size(location: Point, size: Point) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    /// Create a `width` x `height` rectangle centered on `center`
    pub fn centered_on(center: Point, width: i32, height: i32) -> Self {
        Self::new(
            center.x.saturating_sub(width / 2),
            center.y.saturating_sub(height / 2),
            width,
            height,
        )
    }

    /// Top-left corner
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size as a point
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Right edge (exclusive), saturating at `i32::MAX`
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Center point (integer division)
    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Whether the rectangle has no area
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the two rectangles overlap (touching edges do not count)
    pub const fn intersects(&self, other: &Self) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// Whether `other` lies completely inside this rectangle
    pub const fn contains_rect(&self, other: &Self) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Whether the point lies inside this rectangle
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }
}

/// Named colours used as defaults
pub mod colors {
    use super::Color;

    /// Opaque white
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque black
    pub fn black() -> Color {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Opaque orange (255, 165, 0)
    pub fn orange() -> Color {
        from_rgba8(255, 165, 0, 255)
    }

    /// Opaque red
    pub fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Opaque mid gray (128, 128, 128)
    pub fn gray() -> Color {
        from_rgba8(128, 128, 128, 255)
    }

    /// Fully transparent black
    pub fn transparent() -> Color {
        Color::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Build a colour from 0-255 components
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Linear interpolation between two colours
    pub fn lerp(from: Color, to: Color, amount: f32) -> Color {
        from + (to - from) * amount
    }

    /// Parse `"r,g,b,a"` with 0-255 integer components
    pub fn parse(text: &str) -> Option<Color> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return None;
        }

        let mut rgba = [0u8; 4];
        for (slot, part) in rgba.iter_mut().zip(&parts) {
            *slot = part.parse().ok()?;
        }

        Some(from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9, 9, 2, 2)));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0, 0, 100, 50);
        assert!(outer.contains_rect(&Rect::new(0, 0, 100, 50)));
        assert!(outer.contains_rect(&Rect::new(10, 10, 2, 2)));
        assert!(!outer.contains_rect(&Rect::new(99, 10, 2, 2)));
    }

    #[test]
    fn test_edges_saturate_near_i32_max() {
        let far = Rect::new(i32::MAX - 5, 0, 100, 10);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.center(), point(i32::MAX, 5));
        assert!(!far.intersects(&Rect::centered_on(point(0, 0), 2, 2)));
        assert!(far.contains_point(i32::MAX - 1, 5));
    }

    #[test]
    fn test_centered_on() {
        let probe = Rect::centered_on(point(50, 40), 2, 2);
        assert_eq!(probe, Rect::new(49, 39, 2, 2));
    }

    #[test]
    fn test_parse_color() {
        let color = colors::parse("255, 0, 128, 255").unwrap();
        assert_relative_eq!(color.x, 1.0);
        assert_relative_eq!(color.y, 0.0);
        assert_relative_eq!(color.z, 128.0 / 255.0);
        assert!(colors::parse("255,0,0").is_none());
        assert!(colors::parse("red,0,0,0").is_none());
        assert!(colors::parse("300,0,0,0").is_none());
    }

    #[test]
    fn test_lerp_half_to_black() {
        let darker = colors::lerp(colors::white(), colors::black(), 0.5);
        assert_relative_eq!(darker.x, 0.5);
        assert_relative_eq!(darker.w, 1.0);
    }
}
