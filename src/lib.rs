//! Cat Runner - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (character, obstacles, collisions, progression)
//! - `platform`: Frame clock, host callbacks, headless runner
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Default balance constants (overridable through [`Tuning`])
pub mod consts {
    /// Nominal frame duration at 60 Hz, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Ground line (y of the surface obstacles and the character stand on)
    pub const GROUND_Y: f32 = 300.0;
    /// Fixed horizontal position of the character (world scrolls instead)
    pub const CHARACTER_X: f32 = 50.0;
    /// Default canvas width; obstacles spawn at this x
    pub const CANVAS_WIDTH: f32 = 800.0;

    /// Gravity, pixels/frame²
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Jump impulse multiplier for heavy variants
    pub const HEAVY_JUMP_SCALE: f32 = 0.8;

    /// Score points per stage
    pub const STAGE_SCORE_UNIT: u64 = 1000;
    /// Early regime (stage <= MID_STAGE)
    pub const BASE_SPEED: f32 = 2.0;
    pub const RAMP_EARLY: f32 = 0.2;
    /// Mid regime (MID_STAGE < stage <= LATE_STAGE)
    pub const MID_STAGE: u32 = 10;
    pub const MID_SPEED: f32 = 4.0;
    pub const RAMP_MID: f32 = 0.3;
    /// Late regime (stage > LATE_STAGE)
    pub const LATE_STAGE: u32 = 20;
    pub const LATE_SPEED: f32 = 7.0;
    pub const RAMP_LATE: f32 = 0.5;

    /// A bonus event fires at every positive multiple of this stage
    pub const BONUS_INTERVAL: u32 = 10;
    /// Host is notified each time score reaches a multiple of this
    pub const STAGE_COMPLETE_SCORE_INTERVAL: u64 = 10_000;

    /// Spawn chance per frame: min(BASE + (stage-1) * STEP, CAP)
    pub const BASE_SPAWN_CHANCE: f32 = 0.008;
    pub const SPAWN_CHANCE_STEP: f32 = 0.002;
    pub const SPAWN_CHANCE_CAP: f32 = 0.025;
    /// Minimum horizontal distance between consecutive spawns
    pub const MIN_OBSTACLE_GAP: f32 = 200.0;
    /// First stage of each obstacle tier (tier 1 starts at stage 1)
    pub const TIER_TWO_STAGE: u32 = 11;
    pub const TIER_THREE_STAGE: u32 = 21;

    /// Bonus event timings (milliseconds)
    pub const BONUS_REVEAL_MS: f64 = 800.0;
    pub const BONUS_RANDOMIZE_MS: f64 = 1000.0;
    pub const BONUS_CHURN_MS: f64 = 100.0;
    pub const BONUS_SETTLE_MS: f64 = 1000.0;

    /// Immunity window after a non-fatal hit (milliseconds)
    pub const IMMUNITY_MS: f64 = 2000.0;
    /// Slide auto-release (milliseconds)
    pub const SLIDE_RELEASE_MS: f64 = 500.0;

    /// Frames between BulkCat running-frame swaps
    pub const RUN_FRAME_TICKS: u32 = 8;
}
