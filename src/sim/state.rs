//! Game state and core simulation types
//!
//! `GameState` is the level session: score, level, totals, the phase machine,
//! the persistent mouth and the registry of per-level entities.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::Aabb;
use super::registry::{BannerKind, EntityId, EntityRegistry, Portal};
use super::sampler::SampleOutcome;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::content;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Collecting this level's teeth
    Playing,
    /// All teeth collected, portal open
    LevelComplete,
    /// Win threshold reached. Terminal.
    Won,
}

/// Things that happened during a tick, drained by the scene
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A level was set up (initial start or after the portal)
    LevelStarted { level: u32, required: u32 },
    /// A tooth was collected
    Collected {
        tooth: EntityId,
        score: u32,
        total: u32,
    },
    /// Required count reached, portal placed
    LevelComplete {
        level: u32,
        portal: Vec2,
        outcome: SampleOutcome,
    },
    /// Win threshold reached
    Won { level: u32, total: u32 },
    /// One-shot sound to play
    Cue(SoundCue),
}

/// The player's mouth
#[derive(Debug, Clone, PartialEq)]
pub struct Mouth {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Mouth {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    pub fn half_extents() -> Vec2 {
        Vec2::new(MOUTH_HALF_WIDTH, MOUTH_HALF_HEIGHT)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::half_extents())
    }
}

/// Complete level session state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Read-only balance numbers
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Current level, starting at 1
    pub level: u32,
    /// Teeth collected this level
    pub score: u32,
    /// Teeth collected this session
    pub total_collected: u32,
    pub required_this_level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Present from session start until the win
    pub mouth: Option<Mouth>,
    /// Everything that is thrown away between levels
    pub registry: EntityRegistry,
    /// "Level complete!" heading of the current level
    pub level_complete_banner: EntityId,
    /// Flavor text shown under the heading
    pub completion_message: EntityId,
    /// Pending events, drained by the scene every frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed and set up level 1
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            total_collected: 0,
            required_this_level: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            mouth: None,
            registry: EntityRegistry::new(),
            level_complete_banner: 0,
            completion_message: 0,
            events: Vec::new(),
        };

        state.setup_level();

        state
    }

    /// Tear down the current level and build a fresh one for `self.level`
    pub fn setup_level(&mut self) {
        let teardown = self.registry.teardown();
        log::debug!(
            "Level teardown: {} destroyed, {} cleared",
            teardown.destroyed,
            teardown.cleared
        );

        self.required_this_level = self
            .rng
            .random_range(self.tuning.min_per_level..=self.tuning.max_per_level);
        self.score = 0;

        if self.mouth.is_none() {
            self.mouth = Some(Mouth::new(self.tuning.start_position));
        }

        for _ in 0..self.required_this_level {
            let pos = self.sample_tooth_position();
            self.registry.spawn_tooth(pos);
        }

        self.registry.spawn_portal(self.tuning.portal_default_position);
        self.level_complete_banner = self
            .registry
            .spawn_banner(BannerKind::LevelComplete, content::LEVEL_COMPLETE);
        self.completion_message = self
            .registry
            .spawn_banner(BannerKind::CompletionMessage, "");

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted {
            level: self.level,
            required: self.required_this_level,
        });
        log::info!(
            "Level {} started: {} teeth required ({} / {} total)",
            self.level,
            self.required_this_level,
            self.total_collected,
            self.tuning.win_threshold
        );
    }

    /// Uniform point in the spawn area, redrawn while it lands on the HUD
    fn sample_tooth_position(&mut self) -> Vec2 {
        let (min, max) = self.tuning.spawn_range();
        loop {
            let pos = Vec2::new(
                self.rng.random_range(min.x..=max.x),
                self.rng.random_range(min.y..=max.y),
            );
            if !self.tuning.in_hud_region(pos) {
                return pos;
            }
        }
    }

    /// Whole arena as a box
    pub fn arena_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::ZERO,
            Vec2::new(self.tuning.arena_width, self.tuning.arena_height),
        )
    }

    /// Current movement speed under the configured policy
    pub fn mouth_speed(&self) -> f32 {
        self.tuning.speed.speed(self.total_collected)
    }

    pub fn portal(&self) -> Option<&Portal> {
        self.registry.portal()
    }

    pub fn portal_visible(&self) -> bool {
        self.portal().is_some_and(|p| p.visible)
    }

    /// Text of a banner if it is showing
    fn visible_banner(&self, id: EntityId) -> Option<&str> {
        self.registry
            .banner(id)
            .filter(|b| b.visible)
            .map(|b| b.text.as_str())
    }

    pub fn level_complete_text(&self) -> Option<&str> {
        self.visible_banner(self.level_complete_banner)
    }

    pub fn completion_message_text(&self) -> Option<&str> {
        self.visible_banner(self.completion_message)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
