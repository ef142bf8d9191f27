//! Keyboard-driven movement
//!
//! Each axis is resolved on its own. When both directions on an axis are
//! held, the negative one (left/up) wins.

use glam::Vec2;

/// Logical directions held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

#[inline]
fn axis(negative: bool, positive: bool, speed: f32) -> f32 {
    if negative {
        -speed
    } else if positive {
        speed
    } else {
        0.0
    }
}

/// Velocity for the held keys at the given speed (screen space, y down)
pub fn velocity_for(held: &HeldKeys, speed: f32) -> Vec2 {
    Vec2::new(
        axis(held.left, held.right, speed),
        axis(held.up, held.down, speed),
    )
}
