//! Procedural level generation
//!
//! A level is a stack of rows. Each row draws a block count (with a bias
//! toward empty rows), a width, an alignment and a banded colour pattern.
//! The draw order is fixed, so a given RNG stream always yields the same level.

use std::fmt;

use rand::Rng;

use super::rect::Rect;
use super::state::Block;
use crate::consts::*;

/// Errors from level generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Every draw came out empty
    Exhausted { attempts: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Exhausted { attempts } => {
                write!(f, "no non-empty level after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Repeating colour band across a row
#[derive(Debug, Clone, Copy)]
struct ColorBand {
    base: i32,
    spread: i32,
    run_length: i32,
    run_skip: i32,
}

impl ColorBand {
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            base: rng.random_range(0..4),
            spread: 1 + rng.random_range(0..2),
            run_length: 1 + rng.random_range(0..2),
            run_skip: 1 + rng.random_range(0..3),
        }
    }

    fn color_at(&self, i: i32) -> u8 {
        ((self.base + ((i / self.run_length) % self.spread) * self.run_skip) % 4) as u8
    }
}

/// Generate one level. May be empty.
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(MAX_BLOCKS);
    let mut y = ROW_START_Y;

    while blocks.len() < MAX_BLOCKS && y <= ROW_LIMIT_Y {
        let mut blocks_in_row: i32 = rng.random_range(0..16);
        let remaining = (MAX_BLOCKS - blocks.len()) as i32;
        if blocks_in_row > 10 {
            // Sparse rows on purpose (~31% of rows)
            blocks_in_row = 0;
        } else if blocks_in_row > remaining {
            blocks_in_row = remaining;
        }
        y += ROW_STEP;

        if blocks_in_row == 0 {
            continue;
        }

        let band = ColorBand::draw(rng);
        let width = row_block_width(rng, blocks_in_row);
        let row_width = blocks_in_row * width;
        let offset = match rng.random_range(0..8) {
            0 => 4,
            1 => PLAYFIELD_WIDTH - 4 - row_width,
            _ => (PLAYFIELD_WIDTH - row_width) / 2,
        };

        for i in 0..blocks_in_row {
            let rect = Rect::new(offset + i * width, y, width, BLOCK_HEIGHT);
            blocks.push(Block::new(rect, band.color_at(i)));
        }
    }

    blocks
}

/// Fewer blocks in a row means wider blocks, capped at a quarter of the field
fn row_block_width<R: Rng + ?Sized>(rng: &mut R, blocks_in_row: i32) -> i32 {
    let slack = (PLAYFIELD_WIDTH / blocks_in_row - 10).max(1);
    (10 + rng.random_range(0..slack)).min(PLAYFIELD_WIDTH / 4)
}

/// Generate levels until one has at least one block
pub fn generate_round<R: Rng + ?Sized>(
    rng: &mut R,
    max_attempts: u32,
) -> Result<Vec<Block>, LevelError> {
    for attempt in 1..=max_attempts {
        let blocks = generate_level(rng);
        if !blocks.is_empty() {
            if attempt > 1 {
                log::debug!("Non-empty level after {} attempts", attempt);
            }
            return Ok(blocks);
        }
    }
    Err(LevelError::Exhausted {
        attempts: max_attempts,
    })
}
