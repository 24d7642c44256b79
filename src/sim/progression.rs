//! Score, stage and speed
//!
//! `stage` and `speed` are pure functions of `score`. They are only ever
//! written together with it, through [`Progression::advance`] or a reset.

use serde::{Deserialize, Serialize};

use crate::tuning::ProgressionTuning;

/// Stage for a score: one stage per `stage_score_unit` points, starting at 1
pub fn stage_for_score(score: u64, tuning: &ProgressionTuning) -> u32 {
    (score / tuning.stage_score_unit) as u32 + 1
}

/// Scroll speed for a stage: three linear regimes, each steeper than the last
pub fn speed_for_stage(stage: u32, tuning: &ProgressionTuning) -> f32 {
    let stage = stage.max(1);
    if stage <= tuning.mid_stage {
        tuning.base_speed + (stage - 1) as f32 * tuning.ramp_early
    } else if stage <= tuning.late_stage {
        tuning.mid_speed + (stage - tuning.mid_stage) as f32 * tuning.ramp_mid
    } else {
        tuning.late_speed + (stage - tuning.late_stage) as f32 * tuning.ramp_late
    }
}

/// What changed during one progression step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStep {
    /// Stage number increased (speed was recomputed)
    pub stage_changed: bool,
    /// A bonus event is due
    pub bonus: bool,
    /// Score reached a multiple of the stage-complete interval
    pub milestone: bool,
}

/// Per-run progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub stage: u32,
    pub speed: f32,
    /// Highest stage that has already awarded a bonus (0 = none)
    pub last_bonus_stage: u32,
}

impl Progression {
    pub fn new(tuning: &ProgressionTuning) -> Self {
        Self::with_score(0, tuning)
    }

    /// Progression at an arbitrary score with derived stage and speed
    pub fn with_score(score: u64, tuning: &ProgressionTuning) -> Self {
        let stage = stage_for_score(score, tuning);
        Self {
            score,
            stage,
            speed: speed_for_stage(stage, tuning),
            last_bonus_stage: 0,
        }
    }

    pub fn reset(&mut self, tuning: &ProgressionTuning) {
        *self = Self::new(tuning);
    }

    /// Re-derive stage and speed from the current score. Never triggers a
    /// bonus.
    pub fn recompute(&mut self, tuning: &ProgressionTuning) {
        self.stage = stage_for_score(self.score, tuning);
        self.speed = speed_for_stage(self.stage, tuning);
    }

    /// One running frame: score += 1, then stage/speed/bonus bookkeeping
    pub fn advance(&mut self, tuning: &ProgressionTuning) -> ProgressStep {
        let mut step = ProgressStep::default();
        self.score += 1;

        let new_stage = stage_for_score(self.score, tuning);
        if new_stage > self.stage {
            self.stage = new_stage;
            self.speed = speed_for_stage(new_stage, tuning);
            step.stage_changed = true;

            if new_stage % tuning.bonus_interval == 0 && new_stage > self.last_bonus_stage {
                self.last_bonus_stage = new_stage;
                step.bonus = true;
            }
        }

        step.milestone = self.score % tuning.stage_complete_interval == 0;
        step
    }
}
