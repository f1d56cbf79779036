//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one tick)
//! - Seeded RNG only
//! - Stable iteration order (block arena index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{PADDLE_ZONE_VELOCITIES, ReflectAxes};
pub use level::{LevelError, generate_level, generate_round};
pub use rect::Rect;
pub use state::{Ball, Block, BlockView, Paddle, RoundPhase, SimulationState, Snapshot};
pub use tick::{TickInput, TickOutcome, tick};
