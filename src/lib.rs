//! Flappy Rows - obstacle rows and session logic for a Flappy Bird style game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, row generation, slot pool)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{GapPolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one engine frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Classic field dimensions
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_START_X: f32 = 100.0;
    pub const BIRD_START_Y: f32 = 245.0;
    pub const BIRD_SIZE: f32 = 50.0;
    pub const BIRD_GRAVITY: f32 = 1000.0;
    /// Upward impulse applied on flap (negative = up)
    pub const FLAP_VELOCITY: f32 = -350.0;

    /// Row defaults
    pub const ROW_PERIOD_MS: u32 = 1500;
    pub const ROW_CAPACITY: u32 = 10;
    pub const GAP_SPAN: u32 = 2;
    pub const GAP_HOLE_MIN: u32 = 1;
    pub const GAP_HOLE_MAX: u32 = 5;
    pub const ROW_SPACING: f32 = 60.0;
    pub const ROW_OFFSET: f32 = 10.0;
    pub const PIPE_SPAWN_X: f32 = 400.0;
    pub const PIPE_SPEED: f32 = -200.0;
    pub const PIPE_SIZE: f32 = 50.0;

    /// Obstacle pool size
    pub const POOL_CAPACITY: usize = 20;
}

/// Convert a frame delta in seconds to timer milliseconds
#[inline]
pub fn secs_to_ms(dt: f32) -> f32 {
    dt * 1000.0
}
