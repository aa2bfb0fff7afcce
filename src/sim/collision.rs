//! Collision detection and response
//!
//! Two kinds of contact exist on the field: a ball against the field walls,
//! and a ball against another ball. Neither is meant to be physically
//! accurate; walls reflect, touching balls are nudged apart.

use glam::Vec2;

use super::geometry::Rect;
use super::state::Ball;

/// Centers closer than this are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Contact between two overlapping circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first circle toward the second
    pub normal: Vec2,
    /// Overlap depth (sum of radii minus center distance)
    pub penetration: f32,
}

/// Check whether two circles overlap (strictly closer than the radius sum)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    reach > 0.0 && pos_a.distance_squared(pos_b) < reach * reach
}

/// Contact info for two circles, `None` if they do not overlap
pub fn circle_contact(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<Contact> {
    if !circles_overlap(pos_a, radius_a, pos_b, radius_b) {
        return None;
    }
    let delta = pos_b - pos_a;
    let dist = delta.length();
    let normal = if dist > COINCIDENT_EPSILON {
        delta / dist
    } else {
        Vec2::X
    };
    Some(Contact {
        normal,
        penetration: radius_a + radius_b - dist,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Keep a ball inside `bounds`, bouncing off any wall its rim crosses.
///
/// The center is clamped into `bounds` inset by the radius. Velocity is only
/// reflected when it points out of the wall, so a ball pushed into a wall by
/// a neighbour does not start jittering. Returns true if a wall was hit.
pub fn keep_in_bounds(ball: &mut Ball, bounds: &Rect) -> bool {
    let inner = bounds.inset(ball.radius);
    let mut hit = false;

    // (crossed, inward normal)
    let walls = [
        (ball.pos.x < inner.min.x, Vec2::X),
        (ball.pos.x > inner.max.x, Vec2::NEG_X),
        (ball.pos.y < inner.min.y, Vec2::Y),
        (ball.pos.y > inner.max.y, Vec2::NEG_Y),
    ];
    for (crossed, normal) in walls {
        if crossed {
            hit = true;
            if ball.vel.dot(normal) < 0.0 {
                ball.vel = reflect_velocity(ball.vel, normal);
            }
        }
    }

    ball.pos = inner.clamp(ball.pos);
    hit
}

/// Push two touching balls apart and stop them closing in further.
///
/// Each ball moves half the penetration along the contact normal. If they are
/// approaching, their normal velocity components are swapped (equal-mass
/// elastic exchange), which leaves tangential motion untouched.
pub fn separate(a: &mut Ball, b: &mut Ball, contact: &Contact) {
    let push = contact.normal * (contact.penetration * 0.5);
    a.pos -= push;
    b.pos += push;

    let n = contact.normal;
    let va = a.vel.dot(n);
    let vb = b.vel.dot(n);
    if va - vb > 0.0 {
        a.vel += (vb - va) * n;
        b.vel += (va - vb) * n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::Color;

    fn ball(pos: Vec2, vel: Vec2, radius: f32) -> Ball {
        Ball::new(1, pos, vel, radius, Color::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_zero_radius_never_overlaps() {
        assert!(!circles_overlap(Vec2::ZERO, 0.0, Vec2::ZERO, 0.0));
        assert!(circle_contact(Vec2::ZERO, 0.0, Vec2::ZERO, 0.0).is_none());
    }

    #[test]
    fn test_coincident_centers_use_fallback_normal() {
        let contact = circle_contact(Vec2::ONE, 3.0, Vec2::ONE, 2.0).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert_eq!(contact.penetration, 5.0);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let bounds = Rect::from_size(100.0, 100.0);
        let mut b = ball(Vec2::new(105.0, 50.0), Vec2::new(30.0, 10.0), 10.0);
        assert!(keep_in_bounds(&mut b, &bounds));
        assert_eq!(b.pos, Vec2::new(90.0, 50.0));
        assert_eq!(b.vel, Vec2::new(-30.0, 10.0));
    }

    #[test]
    fn test_wall_does_not_flip_inward_velocity() {
        let bounds = Rect::from_size(100.0, 100.0);
        let mut b = ball(Vec2::new(2.0, 50.0), Vec2::new(20.0, 0.0), 5.0);
        assert!(keep_in_bounds(&mut b, &bounds));
        assert_eq!(b.vel, Vec2::new(20.0, 0.0));
        assert_eq!(b.pos.x, 5.0);
    }

    #[test]
    fn test_oversized_ball_sits_on_center_line() {
        let bounds = Rect::from_size(100.0, 40.0);
        let mut b = ball(Vec2::new(10.0, 0.0), Vec2::ZERO, 30.0);
        keep_in_bounds(&mut b, &bounds);
        assert_eq!(b.pos, Vec2::new(30.0, 20.0));
        assert!(bounds.contains(b.pos));
    }

    #[test]
    fn test_separate_resolves_overlap() {
        let mut a = ball(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 5.0);
        let mut b = ball(Vec2::new(8.0, 0.0), Vec2::new(-10.0, 3.0), 5.0);
        let contact = circle_contact(a.pos, a.radius, b.pos, b.radius).unwrap();
        separate(&mut a, &mut b, &contact);

        assert!((b.pos - a.pos).length() >= 10.0 - 1e-4);
        assert_eq!(a.vel, Vec2::new(-10.0, 0.0));
        assert_eq!(b.vel, Vec2::new(10.0, 3.0));
    }

    #[test]
    fn test_separating_balls_keep_velocity() {
        let mut a = ball(Vec2::new(0.0, 0.0), Vec2::new(-5.0, 0.0), 5.0);
        let mut b = ball(Vec2::new(8.0, 0.0), Vec2::new(5.0, 0.0), 5.0);
        let contact = circle_contact(a.pos, a.radius, b.pos, b.radius).unwrap();
        separate(&mut a, &mut b, &contact);
        assert_eq!(a.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(b.vel, Vec2::new(5.0, 0.0));
    }
}
