//! Platform abstraction layer
//!
//! Browser-independent handling of:
//! - Keyboard input (key names to held directions)

pub mod input;

pub use input::{Direction, KeyState};
