//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod movement;
pub mod registry;
pub mod sampler;
pub mod state;
pub mod tick;

pub use bounds::Aabb;
pub use collision::{Contact, contacts};
pub use movement::{HeldKeys, velocity_for};
pub use registry::{Banner, BannerKind, Disposal, EntityId, EntityRegistry, LevelEntity, Portal, Tooth};
pub use sampler::{PortalSample, SafeZones, SampleOutcome, sample_portal_position};
pub use state::{GameEvent, GamePhase, GameState, Mouth};
pub use tick::{TickInput, dispatch, tick};
