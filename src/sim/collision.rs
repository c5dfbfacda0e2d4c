//! Circle-circle collision math
//!
//! Pure functions over positions and velocities; the step loop decides what
//! a contact means (bounce vs merge). Detection compares squared distances so
//! the common non-colliding pair costs no square root.

use glam::Vec2;

/// Below this center distance a pair counts as coincident and gets a fixed
/// separation axis instead of a normalized one
const DEGENERATE_DIST: f32 = 1e-4;
/// Stand-in distance used for coincident centers
const MIN_SEPARATION: f32 = 0.01;

/// An overlapping pair's contact geometry
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the first circle toward the second
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Test two circles for overlap and compute the contact if they do.
///
/// Exactly touching circles (distance == radius sum) do not count as
/// overlapping. Coincident centers substitute a fixed +x separation axis
/// rather than dividing by zero.
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let dist_sq = delta.length_squared();
    let rad_sum = a_radius + b_radius;
    if dist_sq >= rad_sum * rad_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist < DEGENERATE_DIST {
        return Some(Contact {
            normal: Vec2::X,
            penetration: rad_sum - MIN_SEPARATION,
        });
    }

    Some(Contact {
        normal: delta / dist,
        penetration: rad_sum - dist,
    })
}

/// Push both circles out of overlap, split 50/50 along the contact normal.
///
/// Positional correction rather than a velocity response: resting stacks must
/// not be allowed to sink into sustained overlap.
pub fn separate(a_pos: &mut Vec2, b_pos: &mut Vec2, contact: &Contact) {
    let correction = contact.normal * (contact.penetration * 0.5);
    *a_pos -= correction;
    *b_pos += correction;
}

/// Apply a 1-D restitution impulse along the contact normal, distributed
/// inversely proportional to mass. Pairs already separating are left alone.
pub fn bounce(
    a_vel: &mut Vec2,
    b_vel: &mut Vec2,
    mass_a: f32,
    mass_b: f32,
    restitution: f32,
    normal: Vec2,
) {
    let rel_vel = *b_vel - *a_vel;
    let vel_along_normal = rel_vel.dot(normal);
    if vel_along_normal >= 0.0 {
        return;
    }

    let j = -(1.0 + restitution) * vel_along_normal / (1.0 / mass_a + 1.0 / mass_b);
    let impulse = normal * j;
    *a_vel -= impulse / mass_a;
    *b_vel += impulse / mass_b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::sim::catalog;

    #[test]
    fn test_no_contact_when_apart() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(200.0, 100.0);
        assert!(circle_contact(a, 15.0, b, 15.0).is_none());
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(130.0, 100.0);
        assert!(circle_contact(a, 15.0, b, 15.0).is_none());
    }

    #[test]
    fn test_contact_normal_and_penetration() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(120.0, 100.0);
        let contact = circle_contact(a, 15.0, b, 15.0).unwrap();
        assert!((contact.normal - Vec2::X).length() < 1e-5);
        assert!((contact.penetration - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_centers_use_fallback_axis() {
        let p = Vec2::new(100.0, 100.0);
        let contact = circle_contact(p, 15.0, p, 25.0).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!(contact.penetration > 0.0);
    }

    #[test]
    fn test_separate_resolves_overlap() {
        let mut a = Vec2::new(100.0, 100.0);
        let mut b = Vec2::new(120.0, 100.0);
        let contact = circle_contact(a, 15.0, b, 15.0).unwrap();
        separate(&mut a, &mut b, &contact);
        assert!((b - a).length() >= 30.0 - 1e-4);
        // Split evenly: the midpoint is unchanged
        assert!(((a + b) * 0.5 - Vec2::new(110.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounce_skips_separating_pair() {
        let mut a_vel = Vec2::new(-50.0, 0.0);
        let mut b_vel = Vec2::new(50.0, 0.0);
        bounce(&mut a_vel, &mut b_vel, 15.0, 15.0, 0.2, Vec2::X);
        assert_eq!(a_vel, Vec2::new(-50.0, 0.0));
        assert_eq!(b_vel, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_bounce_equal_masses() {
        // Head-on approach at closing speed 100; restitution 0.2 leaves
        // separating speed 20, split evenly
        let mut a_vel = Vec2::new(50.0, 0.0);
        let mut b_vel = Vec2::new(-50.0, 0.0);
        bounce(&mut a_vel, &mut b_vel, 15.0, 15.0, 0.2, Vec2::X);
        assert!((a_vel.x - (-10.0)).abs() < 1e-3);
        assert!((b_vel.x - 10.0).abs() < 1e-3);
        assert_eq!(a_vel.y, 0.0);
        assert_eq!(b_vel.y, 0.0);
    }

    #[test]
    fn test_bounce_momentum_conserved() {
        let (ma, mb) = (15.0, 60.0);
        let mut a_vel = Vec2::new(80.0, 10.0);
        let mut b_vel = Vec2::new(-20.0, -5.0);
        let before = a_vel * ma + b_vel * mb;
        bounce(&mut a_vel, &mut b_vel, ma, mb, 0.2, Vec2::X);
        let after = a_vel * ma + b_vel * mb;
        assert!((before - after).length() < 1e-2);
        // Lighter circle takes the larger velocity change
        assert!((a_vel.x - 80.0).abs() > (b_vel.x - (-20.0)).abs());
    }

    proptest! {
        #[test]
        fn prop_separation_leaves_no_overlap(
            ax in 50.0f32..550.0,
            ay in 50.0f32..750.0,
            dx in -100.0f32..100.0,
            dy in -100.0f32..100.0,
            tier_a in 0usize..catalog::TIER_COUNT,
            tier_b in 0usize..catalog::TIER_COUNT,
        ) {
            let ra = catalog::radius(tier_a);
            let rb = catalog::radius(tier_b);
            let mut a = Vec2::new(ax, ay);
            let mut b = a + Vec2::new(dx, dy);
            if let Some(contact) = circle_contact(a, ra, b, rb) {
                separate(&mut a, &mut b, &contact);
                // Tolerance covers the coincident-center substitution
                prop_assert!((b - a).length() >= ra + rb - 0.02);
            }
        }

        #[test]
        fn prop_bounce_never_increases_closing_speed(
            avx in -300.0f32..300.0,
            bvx in -300.0f32..300.0,
        ) {
            let mut a_vel = Vec2::new(avx, 0.0);
            let mut b_vel = Vec2::new(bvx, 0.0);
            let closing_before = (a_vel - b_vel).dot(Vec2::X).max(0.0);
            bounce(&mut a_vel, &mut b_vel, 15.0, 25.0, 0.2, Vec2::X);
            let closing_after = (a_vel - b_vel).dot(Vec2::X).max(0.0);
            prop_assert!(closing_after <= closing_before + 1e-3);
        }
    }
}
