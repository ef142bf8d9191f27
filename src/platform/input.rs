//! Keyboard input
//!
//! Maps `KeyboardEvent.key` names to logical directions and keeps track of
//! which are held. Each direction has two bindings: an arrow key and a WASD
//! letter. With no keyboard at all nothing is ever held, so the mouth stays put.

use crate::sim::HeldKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Direction bound to a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Held state of both bindings of every direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    // [arrow, letter] per direction
    left: [bool; 2],
    right: [bool; 2],
    up: [bool; 2],
    down: [bool; 2],
}

impl KeyState {
    fn slot(&mut self, key: &str) -> Option<&mut bool> {
        let dir = Direction::from_key(key)?;
        let binding = usize::from(!key.starts_with("Arrow"));
        let pair = match dir {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        Some(&mut pair[binding])
    }

    /// Returns true if the key is a movement key
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.slot(key) {
            Some(held) => {
                *held = true;
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match self.slot(key) {
            Some(held) => {
                *held = false;
                true
            }
            None => false,
        }
    }

    /// Forget everything (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn held(&self) -> HeldKeys {
        let any = |pair: [bool; 2]| pair[0] || pair[1];
        HeldKeys {
            left: any(self.left),
            right: any(self.right),
            up: any(self.up),
            down: any(self.down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("Escape"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_either_binding_holds() {
        let mut keys = KeyState::default();
        assert!(keys.key_down("ArrowLeft"));
        assert!(keys.key_down("a"));
        keys.key_up("ArrowLeft");
        assert!(keys.held().left);
        keys.key_up("a");
        assert!(!keys.held().left);
    }

    #[test]
    fn test_shift_letters_share_binding() {
        let mut keys = KeyState::default();
        keys.key_down("d");
        // Shift released mid-press reports the other case on keyup
        keys.key_up("D");
        assert!(!keys.held().right);
    }

    #[test]
    fn test_non_movement_keys_ignored() {
        let mut keys = KeyState::default();
        assert!(!keys.key_down("Enter"));
        assert_eq!(keys.held(), HeldKeys::default());
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::default();
        keys.key_down("ArrowUp");
        keys.key_down("s");
        keys.release_all();
        assert!(!keys.held().any());
    }
}
