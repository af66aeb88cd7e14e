//! Canvas rectangles and the gap-expanded overlap test

use serde::Serialize;

/// Width and height of a tile in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSize {
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
}

impl TileSize {
    /// Create a tile size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A tile seated on the canvas, origin at the top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
    /// Image source shown by the tile
    pub src: String,
}

impl PlacedRect {
    /// Build a rect at `(x, y)` with the given size
    pub fn new(x: i32, y: i32, size: TileSize, src: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width: size.width,
            height: size.height,
            src: src.into(),
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether this rect and a candidate come closer than `gap` on both axes
    pub const fn conflicts_with(&self, x: i32, y: i32, size: TileSize, gap: i32) -> bool {
        !(x.saturating_add(size.width).saturating_add(gap) < self.x
            || self.right().saturating_add(gap) < x
            || y.saturating_add(size.height).saturating_add(gap) < self.y
            || self.bottom().saturating_add(gap) < y)
    }

    /// Whether the rect lies fully inside a canvas of the given extent
    pub const fn is_within(&self, canvas_width: i32, canvas_height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= canvas_width && self.bottom() <= canvas_height
    }
}

/// Whether a candidate rect violates the gap rule against any placed rect
pub fn collides(x: i32, y: i32, size: TileSize, placed: &[PlacedRect], gap: i32) -> bool {
    placed
        .iter()
        .any(|rect| rect.conflicts_with(x, y, size, gap))
}

/// Clamp a coordinate so a span of `extent` starting there stays within `[0, limit]`
///
/// When the span is larger than the canvas the origin pins to zero.
pub fn clamp_origin(value: i32, extent: i32, limit: i32) -> i32 {
    value.min(limit.saturating_sub(extent)).max(0)
}

/// Whether two placed rects respect the gap rule with respect to each other
pub const fn separated_by_gap(a: &PlacedRect, b: &PlacedRect, gap: i32) -> bool {
    !a.conflicts_with(b.x, b.y, TileSize::new(b.width, b.height), gap)
}
