//! Axis-aligned overlap tests between the bird and pipes
//!
//! Sprites are anchored at their top-left corner, so a body is its
//! position plus a square extent.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box for a sprite at `pos` (top-left) with edge `size`
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Field box from its dimensions, anchored at the origin
    #[inline]
    pub fn field(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    /// True if the interiors intersect (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True while any part of the box is inside `field` (edges count)
    pub fn intersects_field(&self, field: &Aabb) -> bool {
        self.max.x >= field.min.x
            && self.min.x <= field.max.x
            && self.max.y >= field.min.y
            && self.min.y <= field.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_pos_size(Vec2::new(0.0, 0.0), 50.0);
        let b = Aabb::from_pos_size(Vec2::new(40.0, 40.0), 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_pos_size(Vec2::new(0.0, 0.0), 50.0);
        let b = Aabb::from_pos_size(Vec2::new(50.0, 0.0), 50.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_in_field() {
        let field = Aabb::field(500.0, 600.0);
        assert!(Aabb::from_pos_size(Vec2::new(100.0, 245.0), 50.0).intersects_field(&field));
        // Partially above the top edge is still in the world
        assert!(Aabb::from_pos_size(Vec2::new(100.0, -30.0), 50.0).intersects_field(&field));
        // Fully below or left of the field
        assert!(!Aabb::from_pos_size(Vec2::new(100.0, 601.0), 50.0).intersects_field(&field));
        assert!(!Aabb::from_pos_size(Vec2::new(-51.0, 100.0), 50.0).intersects_field(&field));
    }
}
