//! Layout solver
//!
//! Places a child rectangle inside an owner rectangle from a requested offset,
//! size and per-axis alignment. The child is clipped to the owner and never
//! grows; integer pixel arithmetic throughout.

use std::str::FromStr;

use crate::foundation::math::{Point, Rect};
use crate::ui::GuiError;

/// Horizontal alignment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Offset is relative to the owner's left edge
    #[default]
    None,
    /// Flush left, offset from the left edge
    Left,
    /// Centered on the owner, or on the offset when it is non-zero
    Center,
    /// Flush right, or right edge at the offset when it is non-zero
    Right,
}

/// Vertical alignment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Offset is relative to the owner's top edge
    #[default]
    None,
    /// Flush top, offset from the top edge
    Top,
    /// Centered on the owner, or on the offset when it is non-zero
    Middle,
    /// Flush bottom, or bottom edge at the offset when it is non-zero
    Bottom,
}

impl FromStr for HorizontalAlignment {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(GuiError::invalid_attribute("Align", s)),
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(GuiError::invalid_attribute("VAlign", s)),
        }
    }
}

/// Axis-neutral alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisAlignment {
    Start,
    Center,
    End,
}

impl From<HorizontalAlignment> for AxisAlignment {
    fn from(align: HorizontalAlignment) -> Self {
        match align {
            HorizontalAlignment::None | HorizontalAlignment::Left => Self::Start,
            HorizontalAlignment::Center => Self::Center,
            HorizontalAlignment::Right => Self::End,
        }
    }
}

impl From<VerticalAlignment> for AxisAlignment {
    fn from(align: VerticalAlignment) -> Self {
        match align {
            VerticalAlignment::None | VerticalAlignment::Top => Self::Start,
            VerticalAlignment::Middle => Self::Center,
            VerticalAlignment::Bottom => Self::End,
        }
    }
}

/// Result of placing a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Final absolute position
    pub position: Point,
    /// Adjusted size (never larger than requested)
    pub size: Point,
}

impl Placement {
    /// Placement as a rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_location_size(self.position, self.size)
    }
}

/// Layout solver
pub struct LayoutSolver;

impl LayoutSolver {
    /// Place a child inside its owner
    ///
    /// # Arguments
    /// * `owner_pos` - Absolute owner location
    /// * `owner_size` - Owner size; a zero owner takes the child's size
    /// * `offset` - Requested child offset relative to the owner
    /// * `size` - Requested child size
    pub fn place(
        owner_pos: Point,
        owner_size: Point,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
        offset: Point,
        size: Point,
    ) -> Placement {
        let owner_size = if owner_size == Point::zeros() { size } else { owner_size };

        let (x, width) = Self::place_axis(h_align.into(), owner_pos.x, owner_size.x, offset.x, size.x);
        let (y, height) = Self::place_axis(v_align.into(), owner_pos.y, owner_size.y, offset.y, size.y);

        Placement {
            position: Point::new(x, y),
            size: Point::new(width, height),
        }
    }

    /// Place a child inside an owner rectangle
    pub fn place_in(
        owner: Rect,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
        offset: Point,
        size: Point,
    ) -> Placement {
        Self::place(owner.location(), owner.size(), h_align, v_align, offset, size)
    }

    fn place_axis(
        align: AxisAlignment,
        owner_pos: i32,
        owner_len: i32,
        offset: i32,
        len: i32,
    ) -> (i32, i32) {
        let owner_len = owner_len.max(0);
        let mut len = len.min(owner_len).max(0);
        let owner_end = owner_pos.saturating_add(owner_len);
        let anchor = owner_pos.saturating_add(offset);

        let mut pos = match align {
            AxisAlignment::Start => anchor,
            AxisAlignment::Center if offset != 0 => anchor.saturating_sub(len >> 1),
            AxisAlignment::Center => owner_pos.saturating_add(owner_len >> 1).saturating_sub(len >> 1),
            AxisAlignment::End if offset != 0 => anchor.saturating_sub(len),
            AxisAlignment::End => owner_end.saturating_sub(len),
        };

        if pos < owner_pos {
            len = len.saturating_sub(owner_pos.saturating_sub(pos));
            pos = owner_pos;
        }

        let overflow = pos.saturating_add(len).saturating_sub(owner_end);
        if overflow > 0 {
            len -= overflow;
        }

        (pos.min(owner_end), len.max(0))
    }
}

/// Largest coordinate magnitude accepted from markup
pub const MAX_COORDINATE: i32 = 1 << 24;

/// Parse an `"x,y"` pair where each component is an integer or `"N%"` of
/// `relative_to`. Blank input is the zero point.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn parse_point(text: &str, relative_to: Point) -> Result<Point, GuiError> {
    if text.trim().is_empty() {
        return Ok(Point::zeros());
    }

    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        return Err(GuiError::invalid_attribute("x,y", text));
    }

    let component = |part: &str, reference: i32| -> Result<i32, GuiError> {
        let part = part.trim();
        let value = if let Some(percent) = part.strip_suffix('%') {
            let percent: f32 = percent
                .trim()
                .parse()
                .map_err(|_| GuiError::invalid_attribute("x,y", text))?;
            percent * (reference as f32 / 100.0)
        } else {
            part.parse::<f32>()
                .map_err(|_| GuiError::invalid_attribute("x,y", text))?
        };
        if !value.is_finite() || value.abs() > MAX_COORDINATE as f32 {
            return Err(GuiError::invalid_attribute("x,y", text));
        }
        Ok(value as i32)
    };

    Ok(Point::new(
        component(parts[0], relative_to.x)?,
        component(parts[1], relative_to.y)?,
    ))
}
