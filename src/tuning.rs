//! Data-driven game balance
//!
//! Every constant whose exact value is a matter of feel lives here. The shapes
//! of the formulas (piecewise-linear speed ramp, saturating spawn chance, fixed
//! bonus interval) are fixed in `sim`; only the numbers are tunable.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Character kinematics and world placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub ground_y: f32,
    pub character_x: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Must be negative (screen y grows downward)
    pub jump_impulse: f32,
    pub heavy_jump_scale: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            ground_y: GROUND_Y,
            character_x: CHARACTER_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            heavy_jump_scale: HEAVY_JUMP_SCALE,
        }
    }
}

/// Score → stage → speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub stage_score_unit: u64,
    pub base_speed: f32,
    pub ramp_early: f32,
    pub mid_stage: u32,
    pub mid_speed: f32,
    pub ramp_mid: f32,
    pub late_stage: u32,
    pub late_speed: f32,
    pub ramp_late: f32,
    pub bonus_interval: u32,
    pub stage_complete_interval: u64,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            stage_score_unit: STAGE_SCORE_UNIT,
            base_speed: BASE_SPEED,
            ramp_early: RAMP_EARLY,
            mid_stage: MID_STAGE,
            mid_speed: MID_SPEED,
            ramp_mid: RAMP_MID,
            late_stage: LATE_STAGE,
            late_speed: LATE_SPEED,
            ramp_late: RAMP_LATE,
            bonus_interval: BONUS_INTERVAL,
            stage_complete_interval: STAGE_COMPLETE_SCORE_INTERVAL,
        }
    }
}

/// Obstacle spawn rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub base_chance: f32,
    pub chance_step: f32,
    pub chance_cap: f32,
    pub min_gap: f32,
    pub canvas_width: f32,
    /// Stage that unlocks the second obstacle tier
    pub tier_two_stage: u32,
    /// Stage that unlocks the full obstacle set
    pub tier_three_stage: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_chance: BASE_SPAWN_CHANCE,
            chance_step: SPAWN_CHANCE_STEP,
            chance_cap: SPAWN_CHANCE_CAP,
            min_gap: MIN_OBSTACLE_GAP,
            canvas_width: CANVAS_WIDTH,
            tier_two_stage: TIER_TWO_STAGE,
            tier_three_stage: TIER_THREE_STAGE,
        }
    }
}

/// Real-time durations, milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    pub reveal_ms: f64,
    pub randomize_ms: f64,
    pub churn_ms: f64,
    pub settle_ms: f64,
    pub immunity_ms: f64,
    pub slide_release_ms: f64,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            reveal_ms: BONUS_REVEAL_MS,
            randomize_ms: BONUS_RANDOMIZE_MS,
            churn_ms: BONUS_CHURN_MS,
            settle_ms: BONUS_SETTLE_MS,
            immunity_ms: IMMUNITY_MS,
            slide_release_ms: SLIDE_RELEASE_MS,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub progression: ProgressionTuning,
    pub spawn: SpawnTuning,
    pub timing: TimingTuning,
}

/// Why a tuning table could not be used
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning json: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

impl Tuning {
    /// Parse and validate a JSON tuning table. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({e})");
                Self::default()
            }
        }
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.physics;
        if p.gravity <= 0.0 {
            return Err(invalid("physics.gravity", "must be positive"));
        }
        if p.jump_impulse >= 0.0 {
            return Err(invalid("physics.jump_impulse", "must be negative"));
        }
        if p.heavy_jump_scale <= 0.0 {
            return Err(invalid("physics.heavy_jump_scale", "must be positive"));
        }

        let g = &self.progression;
        if g.stage_score_unit == 0 {
            return Err(invalid("progression.stage_score_unit", "must be non-zero"));
        }
        if g.bonus_interval == 0 {
            return Err(invalid("progression.bonus_interval", "must be non-zero"));
        }
        if g.stage_complete_interval == 0 {
            return Err(invalid("progression.stage_complete_interval", "must be non-zero"));
        }
        if g.mid_stage == 0 || g.late_stage <= g.mid_stage {
            return Err(invalid("progression.late_stage", "must be above mid_stage"));
        }
        if g.base_speed <= 0.0 || g.ramp_early < 0.0 || g.ramp_mid < 0.0 || g.ramp_late < 0.0 {
            return Err(invalid("progression.base_speed", "speeds must be positive and ramps non-negative"));
        }

        let s = &self.spawn;
        if s.base_chance < 0.0 || s.chance_step < 0.0 {
            return Err(invalid("spawn.base_chance", "must be non-negative"));
        }
        if s.chance_cap < s.base_chance || s.chance_cap > 1.0 {
            return Err(invalid("spawn.chance_cap", "must be within [base_chance, 1]"));
        }
        if s.min_gap < 0.0 {
            return Err(invalid("spawn.min_gap", "must be non-negative"));
        }
        if s.canvas_width <= 0.0 {
            return Err(invalid("spawn.canvas_width", "must be positive"));
        }
        if s.tier_two_stage < 2 || s.tier_three_stage <= s.tier_two_stage {
            return Err(invalid("spawn.tier_three_stage", "tiers must unlock in order after stage 1"));
        }

        let t = &self.timing;
        let durations = [t.reveal_ms, t.randomize_ms, t.churn_ms, t.settle_ms, t.immunity_ms, t.slide_release_ms];
        if durations.iter().any(|d| *d <= 0.0) {
            return Err(invalid("timing", "durations must be positive"));
        }

        Ok(())
    }
}
