//! Demo autopilot
//!
//! Plays the game through the same input path as the keyboard: it only
//! decides which directions to hold. Heads for the nearest tooth, or for the
//! portal once it is open.

use glam::Vec2;

use super::movement::HeldKeys;
use super::state::{GamePhase, GameState};

/// Distance per axis at which the autopilot stops pushing
const DEADZONE: f32 = 4.0;

/// Where the autopilot wants to go, if anywhere
pub fn target(state: &GameState) -> Option<Vec2> {
    let mouth = state.mouth.as_ref()?;
    match state.phase {
        GamePhase::Playing => state
            .registry
            .teeth()
            .map(|t| t.pos)
            .min_by(|a, b| {
                a.distance_squared(mouth.pos)
                    .partial_cmp(&b.distance_squared(mouth.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        GamePhase::LevelComplete => state.portal().filter(|p| p.visible).map(|p| p.pos),
        GamePhase::Won => None,
    }
}

/// Keys to hold this tick
pub fn steer(state: &GameState) -> HeldKeys {
    let (Some(mouth), Some(target)) = (state.mouth.as_ref(), target(state)) else {
        return HeldKeys::default();
    };
    let delta = target - mouth.pos;
    HeldKeys {
        left: delta.x < -DEADZONE,
        right: delta.x > DEADZONE,
        up: delta.y < -DEADZONE,
        down: delta.y > DEADZONE,
    }
}
