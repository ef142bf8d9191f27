//! Per-level entity registry
//!
//! Everything that belongs to a single level lives here, in spawn order, so a
//! level can be torn down in one call. Entities are tagged by kind; each kind
//! knows how it is disposed of. IDs are never reused within a session, so a
//! stale ID from a torn-down level can never address a new entity.

use glam::Vec2;

/// Entity identifier, unique for the whole session
pub type EntityId = u32;

/// How an entity is released at teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposal {
    /// Single object, destroyed on its own
    Destroy,
    /// Member of a group that is cleared as a whole
    ClearGroup,
}

/// A collectible tooth
#[derive(Debug, Clone, PartialEq)]
pub struct Tooth {
    pub id: EntityId,
    pub pos: Vec2,
}

/// The exit portal. Hidden until the level is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub id: EntityId,
    pub pos: Vec2,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// "Level complete!" heading
    LevelComplete,
    /// Flavor text under the heading
    CompletionMessage,
}

/// On-screen text owned by the level
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: EntityId,
    pub kind: BannerKind,
    pub text: String,
    pub visible: bool,
}

/// Tagged level entity
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEntity {
    Tooth(Tooth),
    Portal(Portal),
    Banner(Banner),
}

impl LevelEntity {
    pub fn id(&self) -> EntityId {
        match self {
            LevelEntity::Tooth(t) => t.id,
            LevelEntity::Portal(p) => p.id,
            LevelEntity::Banner(b) => b.id,
        }
    }

    pub fn disposal(&self) -> Disposal {
        match self {
            LevelEntity::Tooth(_) => Disposal::ClearGroup,
            LevelEntity::Portal(_) | LevelEntity::Banner(_) => Disposal::Destroy,
        }
    }
}

/// Counts from a teardown, by disposal strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Teardown {
    pub destroyed: usize,
    pub cleared: usize,
}

/// Ordered collection of the current level's entities
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entries: Vec<LevelEntity>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_tooth(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entries.push(LevelEntity::Tooth(Tooth { id, pos }));
        id
    }

    /// Spawn the level's portal, hidden
    pub fn spawn_portal(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.entries.push(LevelEntity::Portal(Portal {
            id,
            pos,
            visible: false,
        }));
        id
    }

    /// Spawn a hidden banner
    pub fn spawn_banner(&mut self, kind: BannerKind, text: impl Into<String>) -> EntityId {
        let id = self.next_entity_id();
        self.entries.push(LevelEntity::Banner(Banner {
            id,
            kind,
            text: text.into(),
            visible: false,
        }));
        id
    }

    /// Remove a tooth by ID. `None` if it was already collected or torn down.
    pub fn remove_tooth(&mut self, id: EntityId) -> Option<Tooth> {
        let index = self
            .entries
            .iter()
            .position(|e| matches!(e, LevelEntity::Tooth(t) if t.id == id))?;
        match self.entries.remove(index) {
            LevelEntity::Tooth(tooth) => Some(tooth),
            _ => None,
        }
    }

    pub fn teeth(&self) -> impl Iterator<Item = &Tooth> {
        self.entries.iter().filter_map(|e| match e {
            LevelEntity::Tooth(t) => Some(t),
            _ => None,
        })
    }

    pub fn tooth_count(&self) -> usize {
        self.teeth().count()
    }

    pub fn portal(&self) -> Option<&Portal> {
        self.entries.iter().find_map(|e| match e {
            LevelEntity::Portal(p) => Some(p),
            _ => None,
        })
    }

    pub fn portal_mut(&mut self) -> Option<&mut Portal> {
        self.entries.iter_mut().find_map(|e| match e {
            LevelEntity::Portal(p) => Some(p),
            _ => None,
        })
    }

    pub fn banner(&self, id: EntityId) -> Option<&Banner> {
        self.entries.iter().find_map(|e| match e {
            LevelEntity::Banner(b) if b.id == id => Some(b),
            _ => None,
        })
    }

    pub fn banner_mut(&mut self, id: EntityId) -> Option<&mut Banner> {
        self.entries.iter_mut().find_map(|e| match e {
            LevelEntity::Banner(b) if b.id == id => Some(b),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelEntity> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entity in spawn order
    pub fn teardown(&mut self) -> Teardown {
        let mut result = Teardown::default();
        for entity in self.entries.drain(..) {
            match entity.disposal() {
                Disposal::ClearGroup => result.cleared += 1,
                Disposal::Destroy => result.destroyed += 1,
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> EntityRegistry {
        let mut reg = EntityRegistry::new();
        reg.spawn_tooth(Vec2::new(100.0, 200.0));
        reg.spawn_tooth(Vec2::new(300.0, 400.0));
        reg.spawn_portal(Vec2::new(700.0, 500.0));
        reg.spawn_banner(BannerKind::LevelComplete, "Level complete!");
        reg.spawn_banner(BannerKind::CompletionMessage, "");
        reg
    }

    #[test]
    fn test_spawn_order_and_ids() {
        let reg = populated();
        let ids: Vec<EntityId> = reg.iter().map(LevelEntity::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(reg.tooth_count(), 2);
        assert!(!reg.portal().unwrap().visible);
    }

    #[test]
    fn test_remove_tooth_once() {
        let mut reg = populated();
        let tooth = reg.remove_tooth(2).unwrap();
        assert_eq!(tooth.pos, Vec2::new(300.0, 400.0));
        assert_eq!(reg.tooth_count(), 1);
        // Second removal is a no-op
        assert!(reg.remove_tooth(2).is_none());
        // Non-tooth IDs are never removed through this path
        assert!(reg.remove_tooth(3).is_none());
        assert!(reg.portal().is_some());
    }

    #[test]
    fn test_banner_by_id() {
        let mut reg = populated();
        reg.banner_mut(5).unwrap().text = "Nice teeth".into();
        let banner = reg.banner(5).unwrap();
        assert_eq!(banner.kind, BannerKind::CompletionMessage);
        assert_eq!(banner.text, "Nice teeth");
        assert!(reg.banner(1).is_none());
    }

    #[test]
    fn test_teardown_counts_by_disposal() {
        let mut reg = populated();
        let result = reg.teardown();
        assert_eq!(result, Teardown { destroyed: 3, cleared: 2 });
        assert!(reg.is_empty());
        assert!(reg.portal().is_none());
    }

    #[test]
    fn test_ids_not_reused_after_teardown() {
        let mut reg = populated();
        reg.teardown();
        let id = reg.spawn_tooth(Vec2::ZERO);
        assert_eq!(id, 6);
        assert!(reg.remove_tooth(1).is_none());
    }
}
