//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let min = r.min;
    let max = r.max();
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle border drawn outside `r`
pub fn rect_outline(r: &Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let min = r.min - Vec2::splat(width);
    let max = r.max() + Vec2::splat(width);
    let outer_w = max.x - min.x;
    let edges = [
        // Top and bottom span the full outer width
        Rect::from_top_left(min.x, min.y, outer_w, width),
        Rect::from_top_left(min.x, r.max().y, outer_w, width),
        // Sides fill the gap between them
        Rect::from_top_left(min.x, r.min.y, width, r.height()),
        Rect::from_top_left(r.max().x, r.min.y, width, r.height()),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
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
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let point = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = point(inner_radius, theta1);
        let outer1 = point(outer_radius, theta1);
        let inner2 = point(inner_radius, theta2);
        let outer2 = point(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::from_top_left(10.0, 20.0, 30.0, 40.0);
        let verts = rect(&r, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_outline_surrounds_rect() {
        let r = Rect::from_top_left(0.0, 0.0, 20.0, 20.0);
        let verts = rect_outline(&r, 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 24);
        for v in &verts {
            let p = Vec2::from(v.position);
            // Never drawn over the interior
            let inside = p.x > 0.0 && p.x < 20.0 && p.y > 0.0 && p.y < 20.0;
            assert!(!inside, "outline vertex {:?} inside rect", p);
            assert!(p.x >= -2.0 && p.x <= 22.0 && p.y >= -2.0 && p.y <= 22.0);
        }
    }

    #[test]
    fn test_circle_radius() {
        let verts = circle(Vec2::new(5.0, 5.0), 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
            assert!(d <= 10.001);
        }
    }

    #[test]
    fn test_ring_band() {
        let verts = ring(Vec2::ZERO, 10.0, 12.0, [1.0; 4], 24);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            assert!((9.999..=12.001).contains(&d));
        }
    }
}
