//! Collision detection and response primitives
//!
//! Two shapes matter on a pinball table: capsule segments (walls, flipper
//! arms) and circles (bumpers, targets). Both resolve the same way: push the
//! ball out along the contact normal by the overlap depth, then reflect the
//! inbound velocity component scaled by restitution.

use glam::Vec2;

/// Segments shorter than this are ignored (guards the normalization below)
const MIN_SEGMENT_LENGTH_SQ: f32 = 1e-4;

/// A resolved overlap between the ball and some fixture
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the fixture toward the ball center
    pub normal: Vec2,
    /// Overlap distance along the normal
    pub depth: f32,
}

/// Check the ball against a capsule segment: the segment a-b thickened by
/// `extra` plus the ball's own radius.
///
/// The projection parameter is clamped to [0,1], so endpoints act as round
/// caps rather than extending the surface to an infinite line. Degenerate
/// (near-zero-length) segments report no contact.
pub fn circle_segment_contact(
    center: Vec2,
    radius: f32,
    a: Vec2,
    b: Vec2,
    extra: f32,
) -> Option<Contact> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < MIN_SEGMENT_LENGTH_SQ {
        return None;
    }

    let t = ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;

    let offset = center - closest;
    let dist = offset.length();
    let reach = radius + extra;
    if dist >= reach {
        return None;
    }

    let normal = if dist > 1e-6 {
        offset / dist
    } else {
        // Ball center sits exactly on the segment - eject perpendicular,
        // biased up the table
        crate::upward_perpendicular(ab / len_sq.sqrt())
    };

    Some(Contact {
        normal,
        depth: reach - dist,
    })
}

/// Check the ball against a circular fixture (bumper or target face)
pub fn circle_circle_contact(
    center: Vec2,
    radius: f32,
    other_center: Vec2,
    other_radius: f32,
) -> Option<Contact> {
    let offset = center - other_center;
    let dist = offset.length();
    let reach = radius + other_radius;
    if dist >= reach {
        return None;
    }

    let normal = if dist > 1e-6 {
        offset / dist
    } else {
        // Coincident centers - eject straight up
        Vec2::NEG_Y
    };

    Some(Contact {
        normal,
        depth: reach - dist,
    })
}

/// Push the ball out of penetration and reflect the inbound velocity:
/// `v' = v - (1 + e)(v·n)n`, applied only while the ball is moving into the
/// surface. Separating contacts keep their velocity untouched.
pub fn resolve_contact(pos: &mut Vec2, vel: &mut Vec2, contact: &Contact, restitution: f32) {
    *pos += contact.normal * contact.depth;
    let toward = vel.dot(contact.normal);
    if toward < 0.0 {
        *vel -= (1.0 + restitution) * toward * contact.normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_drop_reflects_with_restitution() {
        // Horizontal wall at y=100, ball falling straight down at 100
        let a = Vec2::new(0.0, 100.0);
        let b = Vec2::new(200.0, 100.0);
        let mut pos = Vec2::new(100.0, 95.0);
        let mut vel = Vec2::new(0.0, 100.0);

        let contact = circle_segment_contact(pos, 8.0, a, b, 0.0).expect("overlap");
        assert!((contact.normal - Vec2::new(0.0, -1.0)).length() < 1e-5);

        resolve_contact(&mut pos, &mut vel, &contact, 0.72);
        // Reflected and scaled: 100 down becomes 72 up
        assert!((vel.y - (-72.0)).abs() < 1e-3);
        assert!(vel.x.abs() < 1e-5);
        // Pushed out to exactly touching distance above the wall
        assert!((pos.y - 92.0).abs() < 1e-3);
    }

    #[test]
    fn test_segment_endpoint_acts_as_cap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        // Ball past the right endpoint; closest point must clamp to b
        let pos = Vec2::new(106.0, 0.0);

        let contact = circle_segment_contact(pos, 8.0, a, b, 0.0).expect("cap overlap");
        assert!((contact.normal - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert!((contact.depth - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segment_is_ignored() {
        let p = Vec2::new(50.0, 50.0);
        assert!(circle_segment_contact(p, 8.0, p, p, 3.0).is_none());
    }

    #[test]
    fn test_capsule_extra_radius_widens_reach() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        let pos = Vec2::new(50.0, 10.5);

        assert!(circle_segment_contact(pos, 8.0, a, b, 0.0).is_none());
        assert!(circle_segment_contact(pos, 8.0, a, b, 3.0).is_some());
    }

    #[test]
    fn test_separating_contact_keeps_velocity() {
        let contact = Contact {
            normal: Vec2::new(0.0, -1.0),
            depth: 1.5,
        };
        let mut pos = Vec2::new(0.0, 0.0);
        let mut vel = Vec2::new(30.0, -50.0); // already moving away

        resolve_contact(&mut pos, &mut vel, &contact, 0.72);
        assert_eq!(vel, Vec2::new(30.0, -50.0));
        assert!((pos.y - (-1.5)).abs() < 1e-5);
    }

    #[test]
    fn test_circle_contact_pushes_to_touching_distance() {
        let bumper_pos = Vec2::new(0.0, 0.0);
        let mut pos = Vec2::new(20.0, 0.0);
        let mut vel = Vec2::new(-80.0, 0.0);

        let contact = circle_circle_contact(pos, 10.0, bumper_pos, 24.0).expect("overlap");
        resolve_contact(&mut pos, &mut vel, &contact, 0.95);

        // Exactly touching: center-to-center equals the radius sum
        assert!((pos.distance(bumper_pos) - 34.0).abs() < 1e-3);
        assert!(vel.x > 0.0);
    }

    #[test]
    fn test_overlapping_center_ejects_upward() {
        let contact = circle_circle_contact(Vec2::new(5.0, 5.0), 10.0, Vec2::new(5.0, 5.0), 24.0)
            .expect("coincident centers still collide");
        assert_eq!(contact.normal, Vec2::NEG_Y);
        assert!((contact.depth - 34.0).abs() < 1e-3);
    }
}
