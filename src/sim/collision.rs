//! Collision detection between the character and obstacles
//!
//! Two tests: axis-aligned box overlap, and an ellipse-vs-box approximation
//! for hitboxes marked `HitShape::Ellipse`. Obstacles are always boxes.

use super::character::Character;
use super::geometry::{HitShape, Rect, WorldHitbox};
use super::obstacle::Obstacle;

/// Strict AABB overlap. Boxes that only share an edge do not collide.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Ellipse inscribed in `ellipse_box` against a rectangle
///
/// Takes the point of `rect` closest to the ellipse center and checks whether
/// it lies inside the ellipse (normalized squared distance <= 1, boundary
/// inclusive). Exact for the rectangle's faces, approximate near its corners.
pub fn ellipse_overlaps_rect(ellipse_box: &Rect, rect: &Rect) -> bool {
    let semi = ellipse_box.size * 0.5;
    if semi.x <= 0.0 || semi.y <= 0.0 {
        return false;
    }
    let center = ellipse_box.center();
    let closest = rect.clamp_point(center);
    let n = (closest - center) / semi;
    n.length_squared() <= 1.0
}

/// Character hitbox (in world space) against an obstacle box
pub fn intersects(character: &WorldHitbox, obstacle: &Rect) -> bool {
    match character.shape {
        HitShape::Rect => rects_overlap(&character.bounds, obstacle),
        HitShape::Ellipse => ellipse_overlaps_rect(&character.bounds, obstacle),
    }
}

/// First obstacle in list order hitting the character. The list is in spawn
/// order, so the oldest colliding obstacle wins.
pub fn check_all<'a>(character: &Character, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let hitbox = character.world_hitbox();
    obstacles.iter().find(|o| intersects(&hitbox, &o.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Hitbox;
    use crate::sim::obstacle::ObstacleKind;
    use crate::sim::variant::Variant;
    use crate::tuning::PhysicsTuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn obstacle(id: u32, x: f32, y: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Rock,
            pos: Vec2::new(x, y),
            size: Vec2::new(25.0, 25.0),
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges
        assert!(!rects_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Containment
        assert!(rects_overlap(&a, &Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_ellipse_misses_corner() {
        // Box corner touches the bounding box but not the ellipse
        let ellipse = Rect::new(0.0, 0.0, 20.0, 20.0);
        let rect = Rect::new(18.0, 18.0, 10.0, 10.0);
        assert!(rects_overlap(&ellipse, &rect));
        assert!(!ellipse_overlaps_rect(&ellipse, &rect));
    }

    #[test]
    fn test_ellipse_boundary_is_inclusive() {
        // Center (10, 5), semi-axes (10, 5); closest point (20, 5) -> distance exactly 1
        let ellipse = Rect::new(0.0, 0.0, 20.0, 10.0);
        let rect = Rect::new(20.0, 0.0, 5.0, 10.0);
        assert!(ellipse_overlaps_rect(&ellipse, &rect));
        // The rect test treats the same touch as a miss
        assert!(!rects_overlap(&ellipse, &rect));

        let below = Rect::new(5.0, 10.0, 10.0, 4.0);
        assert!(ellipse_overlaps_rect(&ellipse, &below));
        let beyond = Rect::new(20.5, 0.0, 5.0, 10.0);
        assert!(!ellipse_overlaps_rect(&ellipse, &beyond));
    }

    #[test]
    fn test_ellipse_center_inside_rect() {
        let ellipse = Rect::new(0.0, 0.0, 10.0, 10.0);
        let rect = Rect::new(-50.0, -50.0, 100.0, 100.0);
        assert!(ellipse_overlaps_rect(&ellipse, &rect));
    }

    #[test]
    fn test_degenerate_ellipse_never_hits() {
        let ellipse = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert!(!ellipse_overlaps_rect(&ellipse, &Rect::new(-5.0, -5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_intersects_dispatches_on_shape() {
        let rect = Rect::new(18.0, 18.0, 10.0, 10.0);
        let as_rect = Hitbox::rect(0.0, 0.0, 20.0, 20.0).at(Vec2::ZERO);
        let as_ellipse = Hitbox::ellipse(0.0, 0.0, 20.0, 20.0).at(Vec2::ZERO);
        assert!(intersects(&as_rect, &rect));
        assert!(!intersects(&as_ellipse, &rect));
    }

    #[test]
    fn test_check_all_oldest_wins() {
        let physics = PhysicsTuning::default();
        let character = Character::new(Variant::Kitten, &physics);
        let hb = character.world_hitbox().bounds;
        let obstacles = vec![
            obstacle(1, 500.0, 275.0),
            obstacle(2, hb.left() + 10.0, 275.0),
            obstacle(3, hb.left() + 20.0, 275.0),
        ];
        assert_eq!(check_all(&character, &obstacles).map(|o| o.id), Some(2));
        assert!(check_all(&character, &obstacles[..1]).is_none());
        assert!(check_all(&character, &[]).is_none());
    }

    #[test]
    fn test_standing_kitten_clears_high_bird() {
        let physics = PhysicsTuning::default();
        let character = Character::new(Variant::Kitten, &physics);
        // Bird bottom 90 above ground
        let bird = Obstacle {
            id: 1,
            kind: ObstacleKind::Bird,
            pos: Vec2::new(60.0, 190.0),
            size: Vec2::new(25.0, 20.0),
        };
        assert!(check_all(&character, std::slice::from_ref(&bird)).is_none());
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-100.0f32..100.0, -100.0f32..100.0, 0.0f32..80.0, 0.0f32..80.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_rect_overlap_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn prop_ellipse_hit_touches_box(a in arb_rect(), b in arb_rect()) {
            // The ellipse lies inside its box, so any ellipse hit at least
            // touches the box
            if ellipse_overlaps_rect(&a, &b) {
                let eps = 1e-3;
                prop_assert!(a.left() <= b.right() + eps && a.right() + eps >= b.left());
                prop_assert!(a.top() <= b.bottom() + eps && a.bottom() + eps >= b.top());
            }
        }
    }
}
