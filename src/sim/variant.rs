//! Character variants and their geometry tables
//!
//! The variant set is closed. Each variant carries its footprint, per-pose
//! hitboxes, sprite names, jump weight and hit tolerance as plain data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Hitbox;

/// Base sprite edge length
const CAT_W: f32 = 80.0;
const CAT_H: f32 = 80.0;
/// Large variants are 1.5x
const BIG_W: f32 = CAT_W * 1.5;
const BIG_H: f32 = CAT_H * 1.5;

/// Sprite shown while the bonus box is being revealed
pub const CONTAINER_SPRITE: &str = "random_box";

/// Character pose within a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Standing,
    Sliding,
    Jumping,
}

impl Pose {
    /// Jumping wins if both flags are somehow set
    pub fn from_flags(is_sliding: bool, is_jumping: bool) -> Self {
        if is_jumping {
            Pose::Jumping
        } else if is_sliding {
            Pose::Sliding
        } else {
            Pose::Standing
        }
    }
}

/// Per-pose hitboxes; missing poses use the standing box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxTable {
    pub standing: Hitbox,
    pub sliding: Option<Hitbox>,
    pub jumping: Option<Hitbox>,
}

impl HitboxTable {
    pub fn for_pose(&self, pose: Pose) -> Hitbox {
        match pose {
            Pose::Jumping => self.jumping.unwrap_or(self.standing),
            Pose::Sliding => self.sliding.unwrap_or(self.standing),
            Pose::Standing => self.standing,
        }
    }
}

const KITTEN_HITBOXES: HitboxTable = HitboxTable {
    standing: Hitbox::rect(5.0, 25.0, CAT_W - 5.0, CAT_H - 20.0),
    sliding: Some(Hitbox::rect(5.0, 50.0, CAT_W - 5.0, CAT_H - 50.0)),
    jumping: Some(Hitbox::rect(25.0, 10.0, CAT_W - 25.0, CAT_H - 10.0)),
};

const CAT_HITBOXES: HitboxTable = HitboxTable {
    standing: Hitbox::rect(5.0, 5.0, CAT_W + 30.0, CAT_H - 5.0),
    sliding: Some(Hitbox::rect(20.0, 30.0, CAT_W - 40.0, CAT_H - 45.0)),
    // Curled up mid-air
    jumping: Some(Hitbox::ellipse(22.0, 12.0, CAT_W - 50.0, CAT_H - 60.0)),
};

const BULKCAT_HITBOXES: HitboxTable = HitboxTable {
    standing: Hitbox::rect(7.0, 25.0, BIG_W - 5.0, BIG_H - 20.0),
    sliding: Some(Hitbox::ellipse(30.0, 55.0, BIG_W - 40.0, BIG_H - 50.0)),
    jumping: Some(Hitbox::rect(10.0, 15.0, BIG_W - 10.0, BIG_H - 10.0)),
};

/// Selectable character skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Starting character
    #[default]
    Kitten,
    /// Long-bodied cat
    Cat,
    /// Heavy cat: jumps lower, survives one extra hit
    BulkCat,
}

impl Variant {
    /// Every variant the bonus box can award
    pub const ALL: [Variant; 3] = [Variant::Kitten, Variant::Cat, Variant::BulkCat];

    /// Resolve a variant by sprite/asset name. Unknown names fall back to the
    /// default variant.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "bcat" | "kitten" => Variant::Kitten,
            "cat" => Variant::Cat,
            "bulkcat" | "bulk_cat" => Variant::BulkCat,
            other => {
                log::warn!("Unknown character variant '{}', using default", other);
                Variant::default()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Kitten => "bcat",
            Variant::Cat => "cat",
            Variant::BulkCat => "bulkcat",
        }
    }

    /// Visual footprint (width, height), independent of pose
    pub fn size(&self) -> Vec2 {
        match self {
            Variant::Kitten => Vec2::new(CAT_W, CAT_H),
            Variant::Cat => Vec2::new(BIG_W, CAT_H),
            Variant::BulkCat => Vec2::new(BIG_W, BIG_H),
        }
    }

    pub fn hitboxes(&self) -> &'static HitboxTable {
        match self {
            Variant::Kitten => &KITTEN_HITBOXES,
            Variant::Cat => &CAT_HITBOXES,
            Variant::BulkCat => &BULKCAT_HITBOXES,
        }
    }

    /// Collision geometry for a pose
    pub fn hitbox(&self, pose: Pose) -> Hitbox {
        self.hitboxes().for_pose(pose)
    }

    /// Heavy variants get a scaled-down jump
    pub fn is_heavy(&self) -> bool {
        matches!(self, Variant::BulkCat)
    }

    /// Registered hits that end the run
    pub fn hit_tolerance(&self) -> u32 {
        match self {
            Variant::BulkCat => 2,
            Variant::Kitten | Variant::Cat => 1,
        }
    }

    /// Sprite name for a pose. `run_frame` selects the running animation
    /// frame for variants that have one.
    pub fn sprite(&self, pose: Pose, run_frame: u8) -> &'static str {
        match (self, pose) {
            (Variant::Kitten, Pose::Standing) => "bcat",
            (Variant::Kitten, Pose::Sliding) => "bcat_sliding",
            (Variant::Kitten, Pose::Jumping) => "bcat_jump",
            (Variant::Cat, Pose::Standing) => "cat",
            (Variant::Cat, Pose::Sliding) => "cat_sliding",
            (Variant::Cat, Pose::Jumping) => "cat_jump",
            (Variant::BulkCat, Pose::Standing) if run_frame == 0 => "bulkcat1",
            (Variant::BulkCat, Pose::Standing) => "bulkcat2",
            (Variant::BulkCat, Pose::Sliding) => "bulkcat_sliding",
            (Variant::BulkCat, Pose::Jumping) => "bulkcat_jump",
        }
    }
}

/// Hitbox lookup by raw flags. Jumping takes precedence over sliding.
pub fn get_hitbox(variant: Variant, is_sliding: bool, is_jumping: bool) -> Hitbox {
    variant.hitbox(Pose::from_flags(is_sliding, is_jumping))
}

/// Footprint lookup
pub fn get_size(variant: Variant) -> Vec2 {
    variant.size()
}
