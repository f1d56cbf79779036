//! Collision detection and response on the pixel grid
//!
//! Walls and ceiling flip one velocity component without correcting the
//! position, so the ball may overlap a wall for a tick. The paddle either
//! mirrors the ball (stepped model) or returns it at one of four fixed angles
//! (sub-pixel model). Blocks report which axes to reflect.

use glam::DVec2;

use super::rect::Rect;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Post-bounce velocities by paddle zone, left to right
pub const PADDLE_ZONE_VELOCITIES: [DVec2; 4] = [
    DVec2::new(-0.6, -0.5),
    DVec2::new(-0.5, -0.6),
    DVec2::new(0.5, -0.6),
    DVec2::new(0.6, -0.5),
];

/// Which velocity components a hit negates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflectAxes {
    pub x: bool,
    pub y: bool,
}

impl ReflectAxes {
    pub const NONE: Self = Self { x: false, y: false };

    /// Union of both reflections
    pub fn merge(self, other: Self) -> Self {
        Self {
            x: self.x || other.x,
            y: self.y || other.y,
        }
    }

    pub fn any(&self) -> bool {
        self.x || self.y
    }

    /// Negate the selected components
    pub fn apply(&self, vel: DVec2) -> DVec2 {
        DVec2::new(
            if self.x { -vel.x } else { vel.x },
            if self.y { -vel.y } else { vel.y },
        )
    }
}

/// Ball touches or crosses the left or right wall
#[inline]
pub fn hits_side_wall(ball: &Rect) -> bool {
    ball.x <= 0 || ball.right() >= PLAYFIELD_WIDTH
}

/// Ball touches or crosses the ceiling
#[inline]
pub fn hits_ceiling(ball: &Rect) -> bool {
    ball.y <= 0
}

/// Ball reached the bottom edge
#[inline]
pub fn reached_bottom(ball: &Rect) -> bool {
    ball.bottom() >= PLAYFIELD_HEIGHT
}

/// Sub-pixel paddle test: moving down, bottom edge past the paddle's top
/// row, and overlapping the paddle.
pub fn subpixel_paddle_contact(ball: &Rect, vel: DVec2, paddle: &Rect) -> bool {
    vel.y > 0.0 && ball.bottom() >= paddle.y + 1 && ball.intersects(paddle)
}

/// Stepped paddle test: moving down with the bottom edge exactly on the
/// paddle's top edge, horizontally over it.
pub fn stepped_paddle_contact(ball: &Rect, vel: DVec2, paddle: &Rect) -> bool {
    vel.y > 0.0 && ball.bottom() == paddle.y && ball.overlaps_x(paddle)
}

/// Zone 0..4 of the paddle under the ball's left edge
pub fn paddle_zone(ball: &Rect, paddle: &Rect) -> usize {
    let ratio = (ball.x - paddle.x) as f64 / paddle.w as f64;
    if ratio < 0.25 {
        0
    } else if ratio < 0.5 {
        1
    } else if ratio < 0.75 {
        2
    } else {
        3
    }
}

/// Return velocity for a ball hitting the paddle
pub fn paddle_bounce_velocity(ball: &Rect, paddle: &Rect) -> DVec2 {
    PADDLE_ZONE_VELOCITIES[paddle_zone(ball, paddle)]
}

/// Reflection from edge adjacency: the ball's outermost pixel column/row
/// lines up with the block's opposite outermost column/row.
pub fn adjacency_reflection(ball: &Rect, block: &Rect) -> ReflectAxes {
    ReflectAxes {
        x: ball.right() - 1 == block.x || ball.x == block.right() - 1,
        y: ball.bottom() - 1 == block.y || ball.y == block.bottom() - 1,
    }
}

/// Reflection from the axis of entry: an axis flips if the ball did not
/// already overlap the block on that axis before its last step. A corner
/// entry flips both. Stands in for a ±1px overlap-with-slack test; with unit
/// steps the previous bounds are exactly that one pixel of slack.
pub fn entry_reflection(ball: &Rect, previous: &Rect, block: &Rect) -> ReflectAxes {
    let axes = ReflectAxes {
        x: !previous.overlaps_x(block),
        y: !previous.overlaps_y(block),
    };
    if axes.any() {
        axes
    } else {
        // Already embedded before the step; bounce vertically
        debug_assert!(ball.intersects(block));
        ReflectAxes { x: false, y: true }
    }
}
