//! Axis-aligned shapes for the playfield
//!
//! Screen space: x grows right, y grows down. Overlap tests are strict so a
//! box resting exactly on top of a platform is touching, not colliding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as top-left corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_top_left(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Strict overlap: shared edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Closest point inside the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// A filled circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict circle/box overlap via closest-point distance
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = rect.closest_point(self.center);
        self.center.distance_squared(closest) < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::from_top_left(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_top_left(5.0, 5.0, 10.0, 10.0);
        let c = Rect::from_top_left(20.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Player resting on a platform top
        let platform = Rect::from_top_left(150.0, 450.0, 200.0, 20.0);
        let player = Rect::from_center(Vec2::new(200.0, 435.0), Vec2::splat(30.0));
        assert_eq!(player.max().y, platform.min.y);
        assert!(!player.overlaps(&platform));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::splat(30.0));
        assert_eq!(r.min, Vec2::new(85.0, 85.0));
        assert_eq!(r.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::from_top_left(0.0, 0.0, 20.0, 20.0);
        assert!(Circle::new(Vec2::new(25.0, 10.0), 10.0).overlaps_rect(&rect));
        assert!(!Circle::new(Vec2::new(31.0, 10.0), 10.0).overlaps_rect(&rect));
        // Corner case: diagonal distance matters, not the bounding box
        assert!(!Circle::new(Vec2::new(28.0, 28.0), 10.0).overlaps_rect(&rect));
        // Centre inside the box
        assert!(Circle::new(Vec2::new(10.0, 10.0), 1.0).overlaps_rect(&rect));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::from_top_left(ax, ay, aw, ah);
            let b = Rect::from_top_left(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let r = Rect::from_top_left(x, y, w, h);
            prop_assert!(r.overlaps(&r));
        }
    }
}
