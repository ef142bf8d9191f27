//! Overlap detection
//!
//! Contacts are collected once per tick into an explicit list, then handed to
//! the dispatcher in `tick`. The portal is reported whenever its box overlaps
//! the mouth, visible or not; the dispatcher decides whether that matters.

use glam::Vec2;

use super::bounds::Aabb;
use super::registry::EntityId;
use super::state::GameState;
use crate::consts::*;

/// A mouth overlap found this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Tooth(EntityId),
    Portal,
}

pub fn tooth_bounds(pos: Vec2) -> Aabb {
    Aabb::from_center(pos, Vec2::new(TOOTH_HALF_WIDTH, TOOTH_HALF_HEIGHT))
}

pub fn portal_bounds(pos: Vec2) -> Aabb {
    Aabb::from_center(pos, Vec2::splat(PORTAL_HALF_SIZE))
}

/// Every overlap between the mouth and a level entity: teeth in registry
/// order, then the portal
pub fn contacts(state: &GameState) -> Vec<Contact> {
    let Some(mouth) = &state.mouth else {
        return Vec::new();
    };
    let mouth_box = mouth.bounds();

    let mut found: Vec<Contact> = state
        .registry
        .teeth()
        .filter(|t| mouth_box.overlaps(&tooth_bounds(t.pos)))
        .map(|t| Contact::Tooth(t.id))
        .collect();

    let portal_hit = state
        .registry
        .portal()
        .is_some_and(|p| mouth_box.overlaps(&portal_bounds(p.pos)));
    if portal_hit {
        found.push(Contact::Portal);
    }

    found
}
