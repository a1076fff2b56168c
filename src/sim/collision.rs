//! Axis-aligned collision detection
//!
//! Every entity in the arena is an upright rectangle, so the only collision
//! primitive needed is a strict AABB overlap test.

use glam::Vec2;

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos(pos: Vec2, size: Vec2) -> Self {
        Self { min: pos, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// Strict overlap test. Rectangles that only share an edge do not collide.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_bullet_inside_enemy_overlaps() {
        let enemy = Rect::new(100.0, 100.0, ENEMY_WIDTH, ENEMY_HEIGHT);
        let bullet = Rect::new(105.0, 105.0, BULLET_WIDTH, BULLET_HEIGHT);
        assert!(rects_overlap(&bullet, &enemy));
        assert!(rects_overlap(&enemy, &bullet));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Right edge of `a` touches left edge of `b`
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        // Bottom edge touches top edge
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &c));
        // Corner contact only
        let d = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &d));
    }

    #[test]
    fn test_separated_and_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        let far = Rect::new(200.0, -50.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(!outer.overlaps(&far));
    }

    #[test]
    fn test_sliver_overlap_counts() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
    }
}
