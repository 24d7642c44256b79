//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame; per-frame constants are per call
//! - Seeded RNG only
//! - Real-time delays only through the run-owned timer queue
//! - No rendering or platform dependencies

pub mod bonus;
pub mod character;
pub mod collision;
pub mod geometry;
pub mod obstacle;
pub mod progression;
pub mod state;
pub mod tick;
pub mod timers;
pub mod variant;

pub use bonus::{BonusEvent, BonusPhase};
pub use character::{Character, HitOutcome, Survival};
pub use collision::{check_all, ellipse_overlaps_rect, intersects, rects_overlap};
pub use geometry::{HitShape, Hitbox, Rect, WorldHitbox};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind, SpawnSkip, kinds_for_stage, spawn_chance};
pub use progression::{ProgressStep, Progression, speed_for_stage, stage_for_score};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
pub use timers::{TimerKind, Timers};
pub use variant::{CONTAINER_SPRITE, Pose, Variant, get_hitbox, get_size};
