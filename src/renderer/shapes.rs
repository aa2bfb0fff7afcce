//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in field coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

#[inline]
fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

#[inline]
fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    push_tri(out, a, b, c, color);
    push_tri(out, a, c, d, color);
}

/// Unit direction for segment `i` of `segments`
#[inline]
fn spoke(i: u32, segments: u32) -> Vec2 {
    Vec2::from_angle(i as f32 / segments as f32 * TAU)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    if radius <= 0.0 {
        return vertices;
    }

    for i in 0..segments {
        let p1 = center + spoke(i, segments) * radius;
        let p2 = center + spoke(i + 1, segments) * radius;
        push_tri(&mut vertices, center, p1, p2, color);
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let inner_radius = inner_radius.max(0.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    if outer_radius <= inner_radius {
        return vertices;
    }

    for i in 0..segments {
        let d1 = spoke(i, segments);
        let d2 = spoke(i + 1, segments);
        push_quad(
            &mut vertices,
            [
                center + d1 * inner_radius,
                center + d1 * outer_radius,
                center + d2 * outer_radius,
                center + d2 * inner_radius,
            ],
            color,
        );
    }

    vertices
}

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, r.corners(), color);
    vertices
}

/// Generate vertices for a rectangle border drawn inside `r`
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.max(0.0).min(r.width() / 2.0).min(r.height() / 2.0);
    let mut vertices = Vec::with_capacity(24);
    if t <= 0.0 {
        return vertices;
    }

    let (min, max) = (r.min, r.max);
    let edges = [
        // top, bottom (full width)
        Rect::new(min, Vec2::new(max.x, min.y + t)),
        Rect::new(Vec2::new(min.x, max.y - t), max),
        // left, right (between top and bottom)
        Rect::new(Vec2::new(min.x, min.y + t), Vec2::new(min.x + t, max.y - t)),
        Rect::new(Vec2::new(max.x - t, min.y + t), Vec2::new(max.x, max.y - t)),
    ];
    for edge in &edges {
        push_quad(&mut vertices, edge.corners(), color);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let verts = circle(Vec2::new(10.0, 20.0), 5.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let p = Vec2::from(v.position);
            assert!(p.distance(Vec2::new(10.0, 20.0)) <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_circle_is_empty() {
        assert!(circle(Vec2::ZERO, 0.0, WHITE, 16).is_empty());
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let verts = ring(Vec2::ZERO, 8.0, 10.0, WHITE, 12);
        assert_eq!(verts.len(), 72);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            assert!((8.0 - 1e-4..=10.0 + 1e-4).contains(&d));
        }
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let verts = rect(&Rect::from_size(4.0, 2.0), WHITE);
        assert_eq!(verts.len(), 6);
    }

    #[test]
    fn test_outline_stays_inside() {
        let r = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(50.0, 30.0));
        let verts = rect_outline(&r, 3.0, WHITE);
        assert_eq!(verts.len(), 24);
        assert!(verts.iter().all(|v| r.contains(Vec2::from(v.position))));
    }
}
