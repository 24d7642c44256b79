//! Character controller
//!
//! Owns the runner's kinematic state. The world scrolls, so only vertical
//! motion is simulated: constant gravity, a jump impulse, and a ground clamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Hitbox, WorldHitbox};
use super::variant::{Pose, Variant};
use crate::consts::RUN_FRAME_TICKS;
use crate::tuning::PhysicsTuning;

/// Hit bookkeeping for variants that tolerate more than one collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Survival {
    pub hit_count: u32,
    pub is_immune: bool,
}

/// What a registered collision did to the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Immune; nothing counted
    Ignored,
    /// Counted, survived, now immune
    Absorbed { hits: u32 },
    /// Tolerance reached
    Fatal { hits: u32 },
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left anchor
    pub pos: Vec2,
    /// Only `y` is ever non-zero
    pub vel: Vec2,
    /// Visual footprint of the active variant
    pub size: Vec2,
    /// Collision geometry for the current pose, relative to `pos`
    pub hitbox: Hitbox,
    pub is_jumping: bool,
    pub is_sliding: bool,
    pub variant: Variant,
    pub survival: Survival,
    /// Running animation frame (0/1)
    pub run_frame: u8,
    #[serde(skip)]
    anim_ticks: u32,
}

impl Character {
    /// A character standing on the ground
    pub fn new(variant: Variant, physics: &PhysicsTuning) -> Self {
        let size = variant.size();
        Self {
            pos: Vec2::new(physics.character_x, physics.ground_y - size.y),
            vel: Vec2::ZERO,
            size,
            hitbox: variant.hitbox(Pose::Standing),
            is_jumping: false,
            is_sliding: false,
            variant,
            survival: Survival::default(),
            run_frame: 0,
            anim_ticks: 0,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::from_flags(self.is_sliding, self.is_jumping)
    }

    /// Resting y for the active variant (`ground_y - height`)
    pub fn ground_level(&self, physics: &PhysicsTuning) -> f32 {
        physics.ground_y - self.variant.size().y
    }

    /// Hitbox placed in world space
    pub fn world_hitbox(&self) -> WorldHitbox {
        self.hitbox.at(self.pos)
    }

    pub fn sprite(&self) -> &'static str {
        self.variant.sprite(self.pose(), self.run_frame)
    }

    fn refresh_geometry(&mut self) {
        self.size = self.variant.size();
        self.hitbox = self.variant.hitbox(self.pose());
    }

    /// Start a jump. No-op while airborne or sliding.
    pub fn jump(&mut self, physics: &PhysicsTuning) -> bool {
        if self.is_jumping || self.is_sliding {
            return false;
        }
        let scale = if self.variant.is_heavy() {
            physics.heavy_jump_scale
        } else {
            1.0
        };
        self.vel.y = physics.jump_impulse * scale;
        self.is_jumping = true;
        self.refresh_geometry();
        true
    }

    /// Drop into a slide. Airborne characters are snapped to the ground first.
    pub fn start_slide(&mut self, physics: &PhysicsTuning) -> bool {
        if self.is_sliding {
            return false;
        }
        let ground = self.ground_level(physics);
        if self.is_jumping || self.pos.y < ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
            self.is_jumping = false;
        }
        self.is_sliding = true;
        self.refresh_geometry();
        true
    }

    /// Stand back up
    pub fn end_slide(&mut self) -> bool {
        if !self.is_sliding {
            return false;
        }
        self.is_sliding = false;
        self.refresh_geometry();
        true
    }

    /// Advance one frame: gravity, integration, ground clamp.
    /// Returns true if the character touched down this frame.
    pub fn advance_physics(&mut self, physics: &PhysicsTuning) -> bool {
        self.vel.y += physics.gravity;
        self.pos.y += self.vel.y;

        let mut landed = false;
        let ground = self.ground_level(physics);
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
            if self.is_jumping {
                self.is_jumping = false;
                landed = true;
            }
            self.refresh_geometry();
        }

        self.anim_ticks = self.anim_ticks.wrapping_add(1);
        if self.anim_ticks % RUN_FRAME_TICKS == 0 {
            self.run_frame ^= 1;
        }

        landed
    }

    /// Swap to a new variant: fresh survival state, new footprint, re-grounded
    /// unless mid-jump.
    pub fn set_variant(&mut self, variant: Variant, physics: &PhysicsTuning) {
        self.variant = variant;
        self.survival = Survival::default();
        let ground = self.ground_level(physics);
        if !self.is_jumping || self.pos.y > ground {
            self.pos.y = ground;
            self.vel.y = 0.0;
            self.is_jumping = false;
        }
        self.refresh_geometry();
    }

    /// Count a collision against the variant's tolerance
    pub fn register_hit(&mut self) -> HitOutcome {
        if self.survival.is_immune {
            return HitOutcome::Ignored;
        }
        self.survival.hit_count += 1;
        let hits = self.survival.hit_count;
        if hits >= self.variant.hit_tolerance() {
            HitOutcome::Fatal { hits }
        } else {
            self.survival.is_immune = true;
            HitOutcome::Absorbed { hits }
        }
    }

    pub fn end_immunity(&mut self) {
        self.survival.is_immune = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn physics() -> PhysicsTuning {
        PhysicsTuning::default()
    }

    #[test]
    fn test_starts_grounded() {
        let p = physics();
        let c = Character::new(Variant::Kitten, &p);
        assert_eq!(c.pos, Vec2::new(50.0, 220.0));
        assert_eq!(c.pose(), Pose::Standing);
        assert_eq!(c.hitbox, Variant::Kitten.hitbox(Pose::Standing));
    }

    #[test]
    fn test_jump_arc_lands() {
        let p = physics();
        let mut c = Character::new(Variant::Kitten, &p);
        assert!(c.jump(&p));
        assert_eq!(c.vel.y, -15.0);
        assert_eq!(c.hitbox, Variant::Kitten.hitbox(Pose::Jumping));

        let mut frames = 0;
        while !c.advance_physics(&p) {
            assert!(c.pos.y < 220.0);
            frames += 1;
            assert!(frames < 200, "never landed");
        }
        assert!(!c.is_jumping);
        assert_eq!(c.pos.y, 220.0);
        assert_eq!(c.vel.y, 0.0);
        assert_eq!(c.hitbox, Variant::Kitten.hitbox(Pose::Standing));
    }

    #[test]
    fn test_double_jump_is_noop() {
        let p = physics();
        let mut c = Character::new(Variant::Kitten, &p);
        c.jump(&p);
        c.advance_physics(&p);
        let vel = c.vel.y;
        assert!(!c.jump(&p));
        assert_eq!(c.vel.y, vel);
    }

    #[test]
    fn test_no_jump_while_sliding() {
        let p = physics();
        let mut c = Character::new(Variant::Kitten, &p);
        c.start_slide(&p);
        assert!(!c.jump(&p));
        assert!(!c.is_jumping);
    }

    #[test]
    fn test_heavy_jump_is_lower() {
        let p = physics();
        let mut c = Character::new(Variant::BulkCat, &p);
        c.jump(&p);
        assert_eq!(c.vel.y, -15.0 * 0.8);
    }

    #[test]
    fn test_slide_mid_air_forces_landing() {
        let p = physics();
        let mut c = Character::new(Variant::Kitten, &p);
        c.jump(&p);
        for _ in 0..10 {
            c.advance_physics(&p);
        }
        assert!(c.pos.y < 220.0);

        assert!(c.start_slide(&p));
        assert_eq!(c.pos.y, 220.0);
        assert_eq!(c.vel.y, 0.0);
        assert!(!c.is_jumping);
        assert!(c.is_sliding);
        assert_eq!(c.hitbox, Variant::Kitten.hitbox(Pose::Sliding));
    }

    #[test]
    fn test_end_slide_restores_standing() {
        let p = physics();
        let mut c = Character::new(Variant::Cat, &p);
        c.start_slide(&p);
        assert!(!c.start_slide(&p));
        assert!(c.end_slide());
        assert!(!c.end_slide());
        assert_eq!(c.hitbox, Variant::Cat.hitbox(Pose::Standing));
    }

    #[test]
    fn test_set_variant_regrounds_and_resets_survival() {
        let p = physics();
        let mut c = Character::new(Variant::BulkCat, &p);
        c.register_hit();
        assert!(c.survival.is_immune);

        c.set_variant(Variant::BulkCat, &p);
        assert_eq!(c.survival, Survival::default());

        c.set_variant(Variant::Kitten, &p);
        assert_eq!(c.pos.y, 220.0);
        assert_eq!(c.size, Vec2::new(80.0, 80.0));
    }

    #[test]
    fn test_register_hit_tolerance() {
        let p = physics();
        let mut kitten = Character::new(Variant::Kitten, &p);
        assert_eq!(kitten.register_hit(), HitOutcome::Fatal { hits: 1 });

        let mut bulk = Character::new(Variant::BulkCat, &p);
        assert_eq!(bulk.register_hit(), HitOutcome::Absorbed { hits: 1 });
        assert_eq!(bulk.register_hit(), HitOutcome::Ignored);
        assert_eq!(bulk.survival.hit_count, 1);
        bulk.end_immunity();
        assert_eq!(bulk.register_hit(), HitOutcome::Fatal { hits: 2 });
    }

    proptest! {
        #[test]
        fn prop_ground_clamp(
            variant in prop::sample::select(Variant::ALL.to_vec()),
            jump_at in prop::option::of(0usize..40),
            slide_at in prop::option::of(0usize..40),
            frames in 1usize..120,
        ) {
            let p = physics();
            let mut c = Character::new(variant, &p);
            for frame in 0..frames {
                if jump_at == Some(frame) {
                    c.jump(&p);
                }
                if slide_at == Some(frame) {
                    c.start_slide(&p);
                }
                let before = c.pos.y + c.vel.y + p.gravity;
                c.advance_physics(&p);
                let ground = c.ground_level(&p);
                prop_assert!(c.pos.y <= ground);
                if before >= ground {
                    prop_assert_eq!(c.vel.y, 0.0);
                }
                prop_assert!(!(c.is_jumping && c.is_sliding));
            }
        }
    }
}
