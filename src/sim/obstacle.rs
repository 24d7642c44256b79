//! Obstacle pipeline: spawn, scroll, cull
//!
//! Obstacles enter at the right edge of the canvas and move left by the game
//! speed every frame. The list stays in spawn order (ascending id).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::SpawnTuning;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus,
    Rock,
    Bird,
    Dog,
    Mouse,
    Fish,
    Spider,
    Yarn,
}

/// Base set, unlocked from stage 1
const TIER_1: &[ObstacleKind] = &[ObstacleKind::Cactus, ObstacleKind::Rock, ObstacleKind::Bird];
/// Adds ground animals
const TIER_2: &[ObstacleKind] = &[
    ObstacleKind::Cactus,
    ObstacleKind::Rock,
    ObstacleKind::Bird,
    ObstacleKind::Dog,
    ObstacleKind::Mouse,
];
/// Everything
const TIER_3: &[ObstacleKind] = &[
    ObstacleKind::Cactus,
    ObstacleKind::Rock,
    ObstacleKind::Bird,
    ObstacleKind::Dog,
    ObstacleKind::Mouse,
    ObstacleKind::Fish,
    ObstacleKind::Spider,
    ObstacleKind::Yarn,
];

/// Where an obstacle sits vertically
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Base flush with the ground line
    Ground,
    /// Bottom edge floats a random distance above the ground, in `[min, max)`
    Aerial { min: f32, max: f32 },
}

impl ObstacleKind {
    /// (width, height)
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Cactus => Vec2::new(20.0, 30.0),
            ObstacleKind::Rock => Vec2::new(25.0, 25.0),
            ObstacleKind::Bird => Vec2::new(25.0, 20.0),
            ObstacleKind::Dog => Vec2::new(30.0, 25.0),
            ObstacleKind::Mouse => Vec2::new(26.0, 12.0),
            ObstacleKind::Fish => Vec2::new(22.0, 15.0),
            ObstacleKind::Spider => Vec2::new(18.0, 18.0),
            ObstacleKind::Yarn => Vec2::new(24.0, 24.0),
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            ObstacleKind::Bird => Placement::Aerial { min: 90.0, max: 200.0 },
            ObstacleKind::Fish => Placement::Aerial { min: 40.0, max: 120.0 },
            _ => Placement::Ground,
        }
    }

    pub fn is_aerial(&self) -> bool {
        matches!(self.placement(), Placement::Aerial { .. })
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            ObstacleKind::Cactus => "cactus",
            ObstacleKind::Rock => "rock",
            ObstacleKind::Bird => "bird",
            ObstacleKind::Dog => "dog",
            ObstacleKind::Mouse => "mouse",
            ObstacleKind::Fish => "fish",
            ObstacleKind::Spider => "spider",
            ObstacleKind::Yarn => "yarn",
        }
    }
}

/// Obstacle kinds unlocked at a stage. Each tier is a superset of the last.
pub fn kinds_for_stage(stage: u32, spawn: &SpawnTuning) -> &'static [ObstacleKind] {
    if stage < spawn.tier_two_stage {
        TIER_1
    } else if stage < spawn.tier_three_stage {
        TIER_2
    } else {
        TIER_3
    }
}

/// Per-frame spawn probability: a linear ramp that saturates at the cap
pub fn spawn_chance(stage: u32, spawn: &SpawnTuning) -> f32 {
    let ramp = stage.saturating_sub(1) as f32 * spawn.chance_step;
    (spawn.base_chance + ramp).min(spawn.chance_cap)
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Why a spawn check produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSkip {
    /// Random roll above the spawn chance
    Roll,
    /// Previous obstacle still too close to the spawn edge
    Gap,
}

/// The active obstacle list and its spawn rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Drop everything (run reset). Ids keep counting.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Scroll left by `speed`, then cull anything fully off the left edge
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= speed;
        }
        self.obstacles.retain(|o| o.right() >= 0.0);
    }

    /// True if a new obstacle at `spawn_x` would keep the minimum gap to the
    /// most recent spawn
    pub fn has_room(&self, spawn_x: f32, min_gap: f32) -> bool {
        match self.obstacles.last() {
            Some(last) => last.pos.x <= spawn_x - min_gap,
            None => true,
        }
    }

    /// Build an obstacle of `kind` at the spawn edge
    fn place<R: Rng>(
        &mut self,
        kind: ObstacleKind,
        spawn_x: f32,
        ground_y: f32,
        rng: &mut R,
    ) -> Obstacle {
        let size = kind.size();
        let bottom = match kind.placement() {
            Placement::Ground => ground_y,
            Placement::Aerial { min, max } => ground_y - rng.random_range(min..max),
        };
        let id = self.next_id;
        self.next_id += 1;
        Obstacle {
            id,
            kind,
            pos: Vec2::new(spawn_x, bottom - size.y),
            size,
        }
    }

    /// Spawn `kind` at the edge unless the gap rule forbids it
    pub fn spawn_kind<R: Rng>(
        &mut self,
        kind: ObstacleKind,
        spawn_x: f32,
        ground_y: f32,
        min_gap: f32,
        rng: &mut R,
    ) -> Result<&Obstacle, SpawnSkip> {
        if !self.has_room(spawn_x, min_gap) {
            return Err(SpawnSkip::Gap);
        }
        let obstacle = self.place(kind, spawn_x, ground_y, rng);
        log::debug!("Spawned {:?} #{} at y={:.0}", obstacle.kind, obstacle.id, obstacle.pos.y);
        self.obstacles.push(obstacle);
        Ok(&self.obstacles[self.obstacles.len() - 1])
    }

    /// Per-frame random spawn at the right edge of the canvas
    pub fn spawn_check<R: Rng>(
        &mut self,
        stage: u32,
        canvas_width: f32,
        ground_y: f32,
        spawn: &SpawnTuning,
        rng: &mut R,
    ) -> Result<&Obstacle, SpawnSkip> {
        let roll: f32 = rng.random();
        if roll >= spawn_chance(stage, spawn) {
            return Err(SpawnSkip::Roll);
        }
        let kinds = kinds_for_stage(stage, spawn);
        let kind = kinds[rng.random_range(0..kinds.len())];
        self.spawn_kind(kind, canvas_width, ground_y, spawn.min_gap, rng)
    }
}
