//! Game state and the legal mutation entry points
//!
//! Everything a run owns lives in [`GameState`]. Outside of [`super::tick`],
//! the only ways to change it are the action methods here (start, jump,
//! slide, reset, resize, asset readiness).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::bonus::BonusEvent;
use super::character::Character;
use super::obstacle::{Obstacle, ObstacleField};
use super::progression::Progression;
use super::timers::{TimerKind, Timers};
use super::variant::{CONTAINER_SPRITE, Variant};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for the start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Bonus box sequence; simulation suspended
    BonusEvent,
    /// Run over; terminal until reset
    Ended,
}

/// Notifications produced during a tick, for the host to consume afterwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    StageReached { stage: u32, speed: f32 },
    /// Score hit a multiple of the stage-complete interval
    StageComplete { stage: u32 },
    BonusStarted { stage: u32 },
    BonusAwarded { variant: Variant },
    /// Non-fatal collision absorbed
    Hit { obstacle_id: u32, hits: u32, tolerance: u32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub progression: Progression,
    pub character: Character,
    pub obstacles: ObstacleField,
    /// Present only while `phase == BonusEvent`
    pub bonus: Option<BonusEvent>,
    pub timers: Timers,
    /// Current spawn edge
    pub canvas_width: f32,
    /// External asset readiness; gates `start`
    pub assets_ready: bool,
    /// Simulation tick counter (frames actually simulated)
    pub time_ticks: u64,
    /// Latest clock reading seen by `tick`
    pub now_ms: f64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a game state with a custom balance table. The table is
    /// validated first; `tuning` must stay valid if edited afterwards.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            progression: Progression::new(&tuning.progression),
            character: Character::new(Variant::default(), &tuning.physics),
            obstacles: ObstacleField::new(),
            bonus: None,
            timers: Timers::new(),
            canvas_width: tuning.spawn.canvas_width,
            assets_ready: false,
            time_ticks: 0,
            now_ms: 0.0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn set_assets_ready(&mut self, ready: bool) {
        self.assets_ready = ready;
    }

    /// Move the spawn edge (canvas resized)
    pub fn set_canvas_width(&mut self, width: f32) {
        if width > 0.0 {
            self.canvas_width = width;
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles.obstacles
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// NotStarted → Running. Ignored unless assets are ready.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted || !self.assets_ready {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {})", self.seed);
        self.emit(GameEvent::Started);
        true
    }

    /// Jump while running. Other phases ignore it.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.character.jump(&self.tuning.physics)
    }

    /// Context-dependent primary action: start, jump, or restart after game over
    pub fn jump_or_start(&mut self) -> bool {
        match self.phase {
            GamePhase::NotStarted => self.start(),
            GamePhase::Running => self.jump(),
            GamePhase::Ended => {
                self.reset();
                true
            }
            GamePhase::BonusEvent => false,
        }
    }

    /// Begin (or keep) sliding and re-arm the auto-release timer
    pub fn begin_slide(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let started = self.character.start_slide(&self.tuning.physics);
        if self.character.is_sliding {
            self.timers.rearm(
                TimerKind::SlideRelease,
                now_ms + self.tuning.timing.slide_release_ms,
            );
        }
        started
    }

    /// Stop sliding and drop the pending auto-release. Honoured during the
    /// bonus too, so a release there is never lost.
    pub fn end_slide(&mut self) -> bool {
        match self.phase {
            GamePhase::Running | GamePhase::BonusEvent => {
                self.timers.cancel_kind(TimerKind::SlideRelease);
                self.character.end_slide()
            }
            GamePhase::NotStarted | GamePhase::Ended => false,
        }
    }

    /// Back to NotStarted with a fresh run. Cancels every pending timer.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.phase = GamePhase::NotStarted;
        self.progression.reset(&self.tuning.progression);
        self.character = Character::new(Variant::default(), &self.tuning.physics);
        self.obstacles.clear();
        self.bonus = None;
        self.time_ticks = 0;
        log::info!("Run reset");
    }

    /// Put a new variant on the character; resets its survival state
    pub fn commit_variant(&mut self, variant: Variant) {
        self.timers.cancel_kind(TimerKind::ImmunityEnd);
        self.character.set_variant(variant, &self.tuning.physics);
    }

    /// Sprite the renderer should draw for the character
    pub fn character_sprite(&self) -> &'static str {
        match &self.bonus {
            Some(bonus) => match bonus.candidate {
                Some(candidate) => candidate.sprite(self.character.pose(), self.character.run_frame),
                None => CONTAINER_SPRITE,
            },
            None => self.character.sprite(),
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            progression: &self.progression,
            character: &self.character,
            sprite: self.character_sprite(),
            obstacles: self.obstacles(),
            bonus: self.bonus.as_ref(),
        }
    }
}

/// Committed state as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub progression: &'a Progression,
    pub character: &'a Character,
    pub sprite: &'static str,
    pub obstacles: &'a [Obstacle],
    pub bonus: Option<&'a BonusEvent>,
}
