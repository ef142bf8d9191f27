//! Mission MouthPossible - a tooth-collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level session, collisions, movement)
//! - `scene`: Gameplay scene wiring the simulation to audio, storage and navigation
//! - `screens`: Title, intro and routing
//! - `audio`: Sound cues and music
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: The "has won" flag
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod content;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod screens;
pub mod sim;
pub mod tuning;

pub use scene::{GameScene, HudView};
pub use screens::Route;
pub use tuning::{SpeedPolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (pixels, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Teeth per level (inclusive range)
    pub const MIN_TEETH_PER_LEVEL: u32 = 2;
    pub const MAX_TEETH_PER_LEVEL: u32 = 4;
    /// Total teeth that wins the game
    pub const TOTAL_TEETH_TO_WIN: u32 = 32;

    /// Mouth spawn point
    pub const MOUTH_START_X: f32 = 400.0;
    pub const MOUTH_START_Y: f32 = 300.0;

    /// Movement speed (pixels/s) and the bonus per tooth collected
    pub const BASE_MOVEMENT_SPEED: f32 = 200.0;
    pub const SPEED_INCREMENT_PER_TOOTH: f32 = 5.0;

    /// Teeth spawn at least this far from every arena edge
    pub const TOOTH_SPAWN_MARGIN: f32 = 50.0;
    /// Top-left region kept clear for the score text
    pub const HUD_RESERVED_WIDTH: f32 = 240.0;
    pub const HUD_RESERVED_HEIGHT: f32 = 120.0;

    /// Portal placement
    pub const PORTAL_DEFAULT_X: f32 = 700.0;
    pub const PORTAL_DEFAULT_Y: f32 = 500.0;
    pub const PORTAL_MIN_DISTANCE: f32 = 300.0;
    pub const PORTAL_EDGE_MARGIN: f32 = 100.0;
    pub const PORTAL_BAND_HEIGHT: f32 = 150.0;
    pub const PORTAL_RETRY_BUDGET: u32 = 20;

    /// Entity half-extents for overlap tests
    pub const MOUTH_HALF_WIDTH: f32 = 32.0;
    pub const MOUTH_HALF_HEIGHT: f32 = 20.0;
    pub const TOOTH_HALF_WIDTH: f32 = 12.0;
    pub const TOOTH_HALF_HEIGHT: f32 = 14.0;
    pub const PORTAL_HALF_SIZE: f32 = 30.0;
}
