//! Simulation state and core entity types
//!
//! One `SimulationState` owns the paddle, the ball and the block arena.
//! The host holds it and drives it through `reset_round`, `set_paddle_target`,
//! `advance_tick` and `snapshot`.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::generate_round;
use super::rect::Rect;
use crate::clamp_paddle_x;
use crate::consts::*;
use crate::settings::{PhysicsModel, Settings, SettingsError};

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Start delay active, ball frozen
    Starting,
    /// Ball moving
    Playing,
}

/// A destructible block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Dead blocks stay in the arena, flagged
    pub alive: bool,
    /// Palette index in [0, 4)
    pub color: u8,
}

impl Block {
    pub fn new(rect: Rect, color: u8) -> Self {
        Self {
            rect,
            alive: true,
            color,
        }
    }

    /// Palette colour of this block
    pub fn rgb(&self) -> [u8; 3] {
        BLOCK_COLORS[self.color as usize % BLOCK_COLORS.len()]
    }
}

/// The player's paddle. Only `x` ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(0, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }
}

impl Paddle {
    /// Center the paddle on `pointer_x`, clamped into the playfield
    pub fn move_to(&mut self, pointer_x: i32) {
        let x = pointer_x.saturating_sub(self.rect.w / 2);
        self.rect.x = clamp_paddle_x(x);
    }
}

/// The ball: continuous position/velocity plus its pixel bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub rect: Rect,
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Ball {
    /// Ball at the serve position with the model's launch velocity
    pub fn serve(physics: PhysicsModel) -> Self {
        let pos = DVec2::new(BALL_START_X, BALL_START_Y);
        Self {
            rect: Rect::from_position(pos, BALL_SIZE),
            pos,
            vel: physics.launch_velocity(),
        }
    }

    /// Advance by one step of velocity and re-project the bounds
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.sync_rect();
    }

    /// Place the ball, keeping its bounds in sync
    pub fn set_position(&mut self, pos: DVec2) {
        self.pos = pos;
        self.sync_rect();
    }

    fn sync_rect(&mut self) {
        self.rect = Rect::from_position(self.pos, self.rect.w);
    }
}

/// Drawable view of one alive block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub rect: Rect,
    pub color: u8,
}

impl BlockView {
    pub fn rgb(&self) -> [u8; 3] {
        BLOCK_COLORS[self.color as usize % BLOCK_COLORS.len()]
    }
}

/// Read-only frame for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: Rect,
    pub blocks: Vec<BlockView>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from (for reproducing a run)
    pub seed: u64,
    pub settings: Settings,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Block arena, replaced wholesale on reset
    pub blocks: Vec<Block>,
    /// Ticks to ignore before the ball moves
    pub start_delay_ticks: u32,
    /// Rounds started so far (diagnostics only)
    pub round: u64,
    /// Ticks actually simulated in the current round
    pub round_ticks: u64,
    rng: Pcg32,
}

impl SimulationState {
    /// Build a state from settings and start the first round
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::start(settings))
    }

    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::start(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    /// Construct from settings already known to be valid
    fn start(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Simulation starting: physics={}, tick_rate={}, seed={}",
            settings.physics.as_str(),
            settings.tick_rate,
            seed
        );

        let mut state = Self {
            seed,
            paddle: Paddle::default(),
            ball: Ball::serve(settings.physics),
            blocks: Vec::with_capacity(MAX_BLOCKS),
            start_delay_ticks: 0,
            round: 0,
            round_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        };
        state.reset_round();
        state
    }

    /// Serve a fresh ball over a freshly generated level and arm the start delay.
    /// The paddle is left where it is.
    ///
    /// # Panics
    ///
    /// If the generator fails to produce a non-empty level within
    /// `settings.max_level_attempts` draws. `new` rejects a cap of zero, so
    /// this only happens if `settings` is edited into an invalid state.
    pub fn reset_round(&mut self) {
        self.ball = Ball::serve(self.settings.physics);

        let blocks = match generate_round(&mut self.rng, self.settings.max_level_attempts) {
            Ok(blocks) => blocks,
            Err(e) => {
                log::error!("Level generation failed: {}", e);
                panic!("level generation failed: {e}");
            }
        };
        self.blocks.clear();
        self.blocks.extend(blocks);

        self.start_delay_ticks = self.settings.start_delay_ticks();
        self.round += 1;
        self.round_ticks = 0;

        log::info!("Round {}: {} blocks", self.round, self.blocks.len());
    }

    /// Move the paddle so it is centered on `pointer_x`
    pub fn set_paddle_target(&mut self, pointer_x: i32) {
        self.paddle.move_to(pointer_x);
    }

    /// Current phase of the round
    pub fn phase(&self) -> RoundPhase {
        if self.start_delay_ticks > 0 {
            RoundPhase::Starting
        } else {
            RoundPhase::Playing
        }
    }

    pub fn any_block_alive(&self) -> bool {
        self.blocks.iter().any(|b| b.alive)
    }

    pub fn alive_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// Drawable copy of the current entities
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect,
            ball: self.ball.rect,
            blocks: self
                .blocks
                .iter()
                .filter(|b| b.alive)
                .map(|b| BlockView {
                    rect: b.rect,
                    color: b.color,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_starts_round() {
        let state = SimulationState::with_seed(12345);
        assert_eq!(state.round, 1);
        assert!(state.any_block_alive());
        assert!(state.blocks.len() <= MAX_BLOCKS);
        assert_eq!(state.phase(), RoundPhase::Starting);
        assert_eq!(state.start_delay_ticks, UPDATES_PER_SEC);
        assert_eq!(state.ball.rect, Rect::new(63, 108, BALL_SIZE, BALL_SIZE));
        assert_eq!(state.ball.vel, DVec2::new(0.5, -0.6));
    }

    #[test]
    fn test_paddle_target_centers_and_clamps() {
        let mut state = SimulationState::with_seed(1);

        state.set_paddle_target(64);
        assert_eq!(state.paddle.rect.x, 54);

        state.set_paddle_target(3);
        assert_eq!(state.paddle.rect.x, 0);

        state.set_paddle_target(500);
        assert_eq!(state.paddle.rect.x, PLAYFIELD_WIDTH - PADDLE_WIDTH);

        state.set_paddle_target(i32::MIN);
        assert_eq!(state.paddle.rect.x, 0);
        state.set_paddle_target(i32::MAX);
        assert_eq!(state.paddle.rect.x, PLAYFIELD_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_reset_keeps_paddle_and_replaces_blocks() {
        let mut state = SimulationState::with_seed(7);
        state.set_paddle_target(100);
        let paddle = state.paddle;

        for block in &mut state.blocks {
            block.alive = false;
        }
        state.ball.set_position(DVec2::new(5.0, 5.0));
        state.reset_round();

        assert_eq!(state.paddle, paddle);
        assert_eq!(state.round, 2);
        assert!(state.any_block_alive());
        assert!(state.blocks.iter().all(|b| b.alive));
        assert_eq!(state.ball.pos, DVec2::new(BALL_START_X, BALL_START_Y));
    }

    #[test]
    fn test_snapshot_is_idempotent_and_skips_dead_blocks() {
        let mut state = SimulationState::with_seed(99);
        let first = state.snapshot();
        assert_eq!(first, state.snapshot());
        assert_eq!(first.blocks.len(), state.blocks.len());

        state.blocks[0].alive = false;
        let snap = state.snapshot();
        assert_eq!(snap.blocks.len(), state.blocks.len() - 1);
        assert_eq!(snap.blocks.len(), state.alive_block_count());
        assert_eq!(snap.blocks[..], first.blocks[1..]);
    }

    #[test]
    fn test_block_palette() {
        let block = Block::new(Rect::new(0, 0, 10, 6), 1);
        assert_eq!(block.rgb(), [0xC5, 0x1F, 0x29]);

        let view = BlockView {
            rect: block.rect,
            color: 3,
        };
        assert_eq!(view.rgb(), [0x82, 0x47, 0xBF]);
    }

    #[test]
    fn test_stepped_model_serves_unit_velocity() {
        let state = SimulationState::new(Settings {
            physics: PhysicsModel::Stepped,
            seed: Some(3),
            ..Settings::default()
        })
        .unwrap();
        assert_eq!(state.ball.vel, DVec2::new(1.0, -1.0));
    }

    #[test]
    fn test_new_rejects_zero_level_attempts() {
        let result = SimulationState::new(Settings {
            max_level_attempts: 0,
            seed: Some(3),
            ..Settings::default()
        });
        assert!(matches!(result, Err(SettingsError::InvalidMaxLevelAttempts)));
    }

    #[test]
    fn test_new_rejects_zero_tick_rate() {
        let result = SimulationState::new(Settings {
            tick_rate: 0,
            seed: Some(3),
            ..Settings::default()
        });
        assert!(matches!(result, Err(SettingsError::InvalidTickRate(0))));
    }

    #[test]
    fn test_new_arms_start_delay_from_tick_rate() {
        let state = SimulationState::new(Settings {
            tick_rate: 1,
            seed: Some(3),
            ..Settings::default()
        })
        .unwrap();
        assert_eq!(state.start_delay_ticks, 1);
        assert_eq!(state.phase(), RoundPhase::Starting);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_playfield(pointer_x in any::<i32>()) {
            let mut paddle = Paddle::default();
            paddle.move_to(pointer_x);
            prop_assert!(paddle.rect.x >= 0);
            prop_assert!(paddle.rect.x <= PLAYFIELD_WIDTH - PADDLE_WIDTH);
            prop_assert_eq!(paddle.rect.y, PADDLE_Y);
        }
    }
}
