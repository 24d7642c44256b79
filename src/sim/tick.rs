//! Per-frame simulation tick
//!
//! Core game loop. One call advances every subsystem once, in a fixed order.

use super::bonus::BonusEvent;
use super::character::HitOutcome;
use super::collision::check_all;
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::TimerKind;
use super::variant::Pose;

/// Autopilot reacts to obstacles this many frames of travel away
const AUTOPILOT_LEAD_FRAMES: f32 = 10.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start the run (ignored until assets are ready)
    pub start: bool,
    /// Primary button: start, jump, or restart after game over
    pub jump_or_start: bool,
    pub jump: bool,
    /// Slide pressed or held; re-arms the auto-release each time
    pub slide_begin: bool,
    /// Slide released
    pub slide_end: bool,
    /// Back to the start screen
    pub reset: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one frame. `now_ms` is a monotonic wall-clock
/// reading used for the real-time timers and the bonus sequence.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.now_ms = now_ms;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    apply_input(state, &input, now_ms);

    for kind in state.timers.take_due(now_ms) {
        match kind {
            TimerKind::SlideRelease => {
                state.character.end_slide();
            }
            TimerKind::ImmunityEnd => {
                state.character.end_immunity();
                log::debug!("Immunity ended");
            }
        }
    }

    match state.phase {
        GamePhase::NotStarted | GamePhase::Ended => {}
        GamePhase::BonusEvent => tick_bonus(state, now_ms),
        GamePhase::Running => tick_running(state, now_ms),
    }
}

fn apply_input(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if input.reset {
        state.reset();
    }
    if input.start {
        state.start();
    }
    if input.jump_or_start {
        state.jump_or_start();
    }
    if input.slide_end {
        state.end_slide();
    }
    if input.jump {
        state.jump();
    }
    if input.slide_begin {
        state.begin_slide(now_ms);
    }
}

fn tick_bonus(state: &mut GameState, now_ms: f64) {
    // Cosmetic only: the character finishes whatever jump it was in
    state.character.advance_physics(&state.tuning.physics);

    let Some(bonus) = state.bonus.as_mut() else {
        state.phase = GamePhase::Running;
        return;
    };
    let Some(variant) = bonus.update(now_ms, &state.tuning.timing, &mut state.rng) else {
        return;
    };
    let stage = bonus.stage;

    state.bonus = None;
    state.commit_variant(variant);
    state.phase = GamePhase::Running;
    log::info!("Stage {} bonus: {}", stage, variant.name());
    state.emit(GameEvent::BonusAwarded { variant });
}

fn tick_running(state: &mut GameState, now_ms: f64) {
    state.time_ticks += 1;

    // 1. Character physics
    state.character.advance_physics(&state.tuning.physics);

    // 2. Progression
    let step = state.progression.advance(&state.tuning.progression);
    let stage = state.progression.stage;
    if step.stage_changed {
        log::debug!("Stage {} (speed {:.1})", stage, state.progression.speed);
        state.emit(GameEvent::StageReached {
            stage,
            speed: state.progression.speed,
        });
    }
    if step.milestone {
        state.emit(GameEvent::StageComplete { stage });
    }
    if step.bonus {
        log::info!("Bonus box at stage {}", stage);
        state.bonus = Some(BonusEvent::begin(stage, now_ms));
        state.phase = GamePhase::BonusEvent;
        state.emit(GameEvent::BonusStarted { stage });
        return;
    }

    // 3. Obstacles: scroll, cull, maybe spawn
    state.obstacles.advance(state.progression.speed);
    let _ = state.obstacles.spawn_check(
        stage,
        state.canvas_width,
        state.tuning.physics.ground_y,
        &state.tuning.spawn,
        &mut state.rng,
    );

    // 4. Collision
    let Some(obstacle_id) = check_all(&state.character, state.obstacles()).map(|o| o.id) else {
        return;
    };

    // 5. Outcome
    match state.character.register_hit() {
        HitOutcome::Ignored => {}
        HitOutcome::Absorbed { hits } => {
            let tolerance = state.character.variant.hit_tolerance();
            state.timers.rearm(
                TimerKind::ImmunityEnd,
                now_ms + state.tuning.timing.immunity_ms,
            );
            log::info!("Hit by obstacle #{} ({}/{})", obstacle_id, hits, tolerance);
            state.emit(GameEvent::Hit {
                obstacle_id,
                hits,
                tolerance,
            });
        }
        HitOutcome::Fatal { hits } => {
            let score = state.progression.score;
            state.phase = GamePhase::Ended;
            state.timers.cancel_all();
            log::info!(
                "Game over: score {} at stage {} ({} hits, obstacle #{})",
                score,
                stage,
                hits,
                obstacle_id
            );
            state.emit(GameEvent::GameOver { score });
        }
    }
}

/// Demo AI: start when possible, jump ground obstacles, slide under aerial
/// ones low enough to hit a standing character.
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::NotStarted => input.start = true,
        GamePhase::Running => {
            let character = &state.character;
            let hitbox = character.world_hitbox().bounds;
            let lead = state.progression.speed * AUTOPILOT_LEAD_FRAMES;
            let standing_top = character.pos.y + character.variant.hitbox(Pose::Standing).offset.y;

            let threat = state
                .obstacles()
                .iter()
                .filter(|o| o.right() >= hitbox.left())
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
                .filter(|o| o.pos.x - hitbox.right() <= lead);

            match threat {
                Some(o) if o.kind.is_aerial() => {
                    if o.bounds().bottom() > standing_top {
                        input.slide_begin = true;
                    }
                }
                Some(_) => {
                    input.slide_end = character.is_sliding;
                    input.jump = true;
                }
                None => input.slide_end = character.is_sliding,
            }
        }
        GamePhase::BonusEvent | GamePhase::Ended => {}
    }
}
