//! Pixel Breakout entry point
//!
//! Headless host: runs the simulation with a fixed-timestep accumulator over
//! a simulated 60 Hz frame clock, lets an autopilot steer the paddle, and
//! prints the final frame as ASCII plus a JSON snapshot.
//!
//! Usage: `pixel-breakout [settings.json]`

use std::process::ExitCode;

use pixel_breakout::consts::*;
use pixel_breakout::sim::{SimulationState, Snapshot, TickInput, TickOutcome, tick};
use pixel_breakout::{Settings, SettingsError};

/// Simulated host frame length (seconds)
const FRAME_DT: f64 = 1.0 / 60.0;
/// Length of the demo run (seconds)
const DEMO_SECONDS: u32 = 30;
/// ASCII cell size in playfield pixels
const CELL_W: i32 = 2;
const CELL_H: i32 = 4;
/// ASCII glyph per palette index
const BLOCK_GLYPHS: [char; 4] = ['#', '%', '@', '&'];

#[derive(Debug, Default)]
struct RunStats {
    ticks: u64,
    blocks_destroyed: usize,
    misses: u32,
    clears: u32,
}

/// Host instance: owns the simulation and the frame accumulator
struct Host {
    state: SimulationState,
    accumulator: f64,
    stats: RunStats,
}

impl Host {
    fn new(settings: Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            state: SimulationState::new(settings)?,
            accumulator: 0.0,
            stats: RunStats::default(),
        })
    }

    /// Autopilot: keep the paddle centered under the ball
    fn pointer_x(&self) -> i32 {
        self.state.ball.rect.x + BALL_SIZE / 2
    }

    /// Run as many ticks as the elapsed frame time allows
    fn frame(&mut self, dt: f64) {
        let tick_dt = self.state.settings.tick_dt();
        self.accumulator += dt.min(0.1);

        let input = TickInput {
            paddle_target: Some(self.pointer_x()),
        };

        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            match tick(&mut self.state, &input) {
                TickOutcome::Waiting => {}
                TickOutcome::Advanced { blocks_destroyed } => {
                    self.stats.blocks_destroyed += blocks_destroyed;
                }
                TickOutcome::Missed => self.stats.misses += 1,
                TickOutcome::Cleared => self.stats.clears += 1,
            }
            self.stats.ticks += 1;
            self.accumulator -= tick_dt;
            substeps += 1;
        }
    }
}

/// Render a snapshot as text, one character per cell
fn render_ascii(snapshot: &Snapshot) -> String {
    let cols = (PLAYFIELD_WIDTH / CELL_W) as usize;
    let rows = (PLAYFIELD_HEIGHT / CELL_H) as usize;
    let mut grid = vec![vec!['.'; cols]; rows];

    let mut fill = |x: i32, y: i32, w: i32, h: i32, glyph: char| {
        for py in y.max(0)..(y + h).min(PLAYFIELD_HEIGHT) {
            for px in x.max(0)..(x + w).min(PLAYFIELD_WIDTH) {
                grid[(py / CELL_H) as usize][(px / CELL_W) as usize] = glyph;
            }
        }
    };

    for block in &snapshot.blocks {
        let r = block.rect;
        fill(r.x, r.y, r.w, r.h, BLOCK_GLYPHS[block.color as usize % 4]);
    }
    let p = snapshot.paddle;
    fill(p.x, p.y, p.w, p.h, '=');
    let b = snapshot.ball;
    fill(b.x, b.y, b.w, b.h, 'o');

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Glyph-to-colour legend for the blocks still on screen
fn render_legend(snapshot: &Snapshot) -> String {
    let mut seen = [false; 4];
    for block in &snapshot.blocks {
        seen[block.color as usize % 4] = true;
    }
    snapshot
        .blocks
        .iter()
        .filter(|block| std::mem::take(&mut seen[block.color as usize % 4]))
        .map(|block| {
            let [r, g, b] = block.rgb();
            format!("{}=#{:02X}{:02X}{:02X}", BLOCK_GLYPHS[block.color as usize % 4], r, g, b)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            log::info!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pixel Breakout (headless) starting...");

    let mut host = match load_settings().and_then(Host::new) {
        Ok(host) => host,
        Err(e) => {
            log::warn!("Rejected settings: {}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let frames = (DEMO_SECONDS as f64 / FRAME_DT).round() as u32;
    for _ in 0..frames {
        host.frame(FRAME_DT);
    }

    let snapshot = host.state.snapshot();
    println!("{}", render_ascii(&snapshot));
    println!("{}", render_legend(&snapshot));
    println!(
        "seed={} rounds={} ticks={} blocks_destroyed={} misses={} clears={}",
        host.state.seed,
        host.state.round,
        host.stats.ticks,
        host.stats.blocks_destroyed,
        host.stats.misses,
        host.stats.clears
    );

    match serde_json::to_string(&snapshot) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Snapshot serialization failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
