//! Integer rectangle geometry for blocks, paddle and ball
//!
//! All entities live on the playfield pixel grid. A rectangle covers the
//! half-open ranges `[x, x + w)` and `[y, y + h)`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of `size` whose origin is the rounded `pos`
    pub fn from_position(pos: DVec2, size: i32) -> Self {
        Self::new(pos.x.round() as i32, pos.y.round() as i32, size, size)
    }

    /// One past the rightmost column
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom row
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Open-interval overlap on the x axis (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Open-interval overlap on the y axis (touching edges don't count)
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// True if the rectangles share at least one pixel
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
