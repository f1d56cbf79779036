//! Fixed timestep simulation tick
//!
//! Advances the ball one step and resolves collisions in a fixed order:
//! walls, ceiling or paddle, miss, then blocks and the clear check.

use super::collision::{
    ReflectAxes, adjacency_reflection, entry_reflection, hits_ceiling, hits_side_wall,
    paddle_bounce_velocity, reached_bottom, stepped_paddle_contact, subpixel_paddle_contact,
};
use super::rect::Rect;
use super::state::SimulationState;
use crate::settings::PhysicsModel;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x position, if it moved since the last tick
    pub paddle_target: Option<i32>,
}

/// What a call to `advance_tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Start delay still running; nothing moved
    Waiting,
    /// Ball moved; `blocks_destroyed` blocks were hit this tick
    Advanced { blocks_destroyed: usize },
    /// Ball fell past the paddle; a new round has started
    Missed,
    /// Last block destroyed; a new round has started
    Cleared,
}

impl TickOutcome {
    /// True if this tick ended the round
    pub fn round_ended(&self) -> bool {
        matches!(self, TickOutcome::Missed | TickOutcome::Cleared)
    }
}

/// Apply the tick's input, then advance the state by one tick
pub fn tick(state: &mut SimulationState, input: &TickInput) -> TickOutcome {
    if let Some(x) = input.paddle_target {
        state.set_paddle_target(x);
    }
    state.advance_tick()
}

impl SimulationState {
    /// Advance the simulation by one fixed tick
    pub fn advance_tick(&mut self) -> TickOutcome {
        if self.start_delay_ticks > 0 {
            self.start_delay_ticks -= 1;
            return TickOutcome::Waiting;
        }
        self.round_ticks += 1;

        let physics = self.settings.physics;
        let previous = self.ball.rect;
        self.ball.integrate();
        let ball = self.ball.rect;
        let paddle = self.paddle.rect;

        if hits_side_wall(&ball) {
            self.ball.vel.x = -self.ball.vel.x;
        }

        if hits_ceiling(&ball) {
            self.ball.vel.y = -self.ball.vel.y;
        } else if self.paddle_contact(&ball) {
            match physics {
                PhysicsModel::Subpixel => {
                    self.ball.vel = paddle_bounce_velocity(&ball, &paddle);
                }
                PhysicsModel::Stepped => self.ball.vel.y = -self.ball.vel.y,
            }
        } else if reached_bottom(&ball) {
            log::info!(
                "Round {} missed after {} ticks ({} blocks left)",
                self.round,
                self.round_ticks,
                self.alive_block_count()
            );
            self.reset_round();
            return TickOutcome::Missed;
        }

        let mut reflect = ReflectAxes::NONE;
        let mut blocks_destroyed = 0;
        for block in self.blocks.iter_mut().filter(|b| b.alive) {
            if !ball.intersects(&block.rect) {
                continue;
            }
            block.alive = false;
            blocks_destroyed += 1;
            reflect = match physics {
                // Last hit in scan order decides; earlier hits are overwritten
                PhysicsModel::Subpixel => adjacency_reflection(&ball, &block.rect),
                PhysicsModel::Stepped => {
                    reflect.merge(entry_reflection(&ball, &previous, &block.rect))
                }
            };
        }
        if blocks_destroyed > 0 {
            log::debug!(
                "Round {} tick {}: {} block(s) hit, reflect {:?}",
                self.round,
                self.round_ticks,
                blocks_destroyed,
                reflect
            );
        }

        if !self.any_block_alive() {
            log::info!(
                "Round {} cleared after {} ticks",
                self.round,
                self.round_ticks
            );
            self.reset_round();
            return TickOutcome::Cleared;
        }

        self.ball.vel = reflect.apply(self.ball.vel);
        TickOutcome::Advanced { blocks_destroyed }
    }

    fn paddle_contact(&self, ball: &Rect) -> bool {
        match self.settings.physics {
            PhysicsModel::Subpixel => {
                subpixel_paddle_contact(ball, self.ball.vel, &self.paddle.rect)
            }
            PhysicsModel::Stepped => stepped_paddle_contact(ball, self.ball.vel, &self.paddle.rect),
        }
    }
}
