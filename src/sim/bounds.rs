//! Axis-aligned boxes
//!
//! The only geometry the game needs: overlap tests between entity boxes and
//! clamping points into a region.

use glam::Vec2;

/// Axis-aligned bounding box (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half` in each direction
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// A box is empty when any axis is inverted
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Clamp a point into the box
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Shrink by `half` on each side, e.g. to keep a sprite's box on screen.
    /// Collapses to the center instead of inverting.
    pub fn inset(&self, half: Vec2) -> Aabb {
        let center = (self.min + self.max) * 0.5;
        let min = (self.min + half).min(center);
        let max = (self.max - half).max(center);
        Aabb { min, max }
    }
}
