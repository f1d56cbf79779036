//! Pixel Breakout - a tiny Breakout simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, round resets)
//! - `settings`: Data-driven configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{PhysicsModel, Settings, SettingsError};
pub use sim::{SimulationState, Snapshot, TickOutcome};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const PLAYFIELD_WIDTH: i32 = 128;
    pub const PLAYFIELD_HEIGHT: i32 = 128;

    /// Default fixed simulation rate (ticks per second)
    pub const UPDATES_PER_SEC: u32 = 2 * 60;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Block arena capacity
    pub const MAX_BLOCKS: usize = 64;
    pub const BLOCK_HEIGHT: i32 = 6;
    /// Level rows: first row test at 8, stepping by 6 while y <= 64
    pub const ROW_START_Y: i32 = 8;
    pub const ROW_STEP: i32 = 6;
    pub const ROW_LIMIT_Y: i32 = 64;
    /// Generator retry cap for empty levels
    pub const MAX_LEVEL_ATTEMPTS: u32 = 1000;

    /// Paddle defaults - sits 6px above the bottom edge
    pub const PADDLE_WIDTH: i32 = 20;
    pub const PADDLE_HEIGHT: i32 = 3;
    pub const PADDLE_Y: i32 = PLAYFIELD_HEIGHT - 6;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 3;
    pub const BALL_START_X: f64 = (PLAYFIELD_WIDTH / 2 - 1) as f64;
    pub const BALL_START_Y: f64 = (PLAYFIELD_HEIGHT - 20) as f64;

    /// Block palette (RGB), indexed by `Block::color`
    pub const BLOCK_COLORS: [[u8; 3]; 4] = [
        [0x63, 0x66, 0x62],
        [0xC5, 0x1F, 0x29],
        [0x12, 0x76, 0x0C],
        [0x82, 0x47, 0xBF],
    ];
}

/// Clamp a paddle left edge into the playfield
#[inline]
pub fn clamp_paddle_x(x: i32) -> i32 {
    x.clamp(0, consts::PLAYFIELD_WIDTH - consts::PADDLE_WIDTH)
}
