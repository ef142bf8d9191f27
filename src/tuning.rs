//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON override can replace any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Aabb;

/// How fast the mouth moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Same speed for the whole session
    Constant { base: f32 },
    /// Gets faster with every tooth collected
    Progressive { base: f32, per_item: f32 },
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        SpeedPolicy::Progressive {
            base: BASE_MOVEMENT_SPEED,
            per_item: SPEED_INCREMENT_PER_TOOTH,
        }
    }
}

impl SpeedPolicy {
    /// Speed in pixels/s after `total_collected` teeth
    pub fn speed(&self, total_collected: u32) -> f32 {
        match *self {
            SpeedPolicy::Constant { base } => base,
            SpeedPolicy::Progressive { base, per_item } => {
                base + per_item * total_collected as f32
            }
        }
    }

    fn base(&self) -> f32 {
        match *self {
            SpeedPolicy::Constant { base } | SpeedPolicy::Progressive { base, .. } => base,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("teeth per level range {min}..={max} is empty or starts at zero")]
    TeethRange { min: u32, max: u32 },

    #[error("win threshold must be at least 1")]
    WinThreshold,

    #[error("portal retry budget must be at least 1")]
    RetryBudget,

    #[error("movement speed must be positive, got {0}")]
    Speed(f32),

    #[error("{what} leaves no room inside a {width}x{height} arena")]
    Layout {
        what: &'static str,
        width: f32,
        height: f32,
    },
}

/// Read-only configuration consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub min_per_level: u32,
    pub max_per_level: u32,
    pub win_threshold: u32,
    pub start_position: Vec2,
    pub speed: SpeedPolicy,
    /// Distance kept between spawned teeth and the arena edges
    pub spawn_margin: f32,
    /// Size of the top-left box teeth never spawn in
    pub hud_reserved: Vec2,
    pub portal_default_position: Vec2,
    pub portal_min_distance: f32,
    pub portal_edge_margin: f32,
    pub portal_band_height: f32,
    pub portal_retry_budget: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_per_level: MIN_TEETH_PER_LEVEL,
            max_per_level: MAX_TEETH_PER_LEVEL,
            win_threshold: TOTAL_TEETH_TO_WIN,
            start_position: Vec2::new(MOUTH_START_X, MOUTH_START_Y),
            speed: SpeedPolicy::default(),
            spawn_margin: TOOTH_SPAWN_MARGIN,
            hud_reserved: Vec2::new(HUD_RESERVED_WIDTH, HUD_RESERVED_HEIGHT),
            portal_default_position: Vec2::new(PORTAL_DEFAULT_X, PORTAL_DEFAULT_Y),
            portal_min_distance: PORTAL_MIN_DISTANCE,
            portal_edge_margin: PORTAL_EDGE_MARGIN,
            portal_band_height: PORTAL_BAND_HEIGHT,
            portal_retry_budget: PORTAL_RETRY_BUDGET,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.min_per_level == 0 || self.min_per_level > self.max_per_level {
            return Err(TuningError::TeethRange {
                min: self.min_per_level,
                max: self.max_per_level,
            });
        }
        if self.win_threshold == 0 {
            return Err(TuningError::WinThreshold);
        }
        if self.portal_retry_budget == 0 {
            return Err(TuningError::RetryBudget);
        }
        if !(self.speed.base() > 0.0) {
            return Err(TuningError::Speed(self.speed.base()));
        }

        let layout_error = |what| TuningError::Layout {
            what,
            width: self.arena_width,
            height: self.arena_height,
        };
        if !(self.arena_width > 0.0 && self.arena_height > 0.0)
            || !self.arena_width.is_finite()
            || !self.arena_height.is_finite()
        {
            return Err(layout_error("arena size"));
        }
        let margins = [
            ("spawn margin", self.spawn_margin),
            ("portal band", self.portal_edge_margin),
            ("portal band", self.portal_band_height),
            ("portal distance", self.portal_min_distance),
        ];
        // Margins and distances are measured inward from the walls
        for (what, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(layout_error(what));
            }
        }
        let arena = Aabb::new(Vec2::ZERO, Vec2::new(self.arena_width, self.arena_height));
        if !self.hud_reserved.is_finite() {
            return Err(layout_error("reserved HUD region"));
        }
        if !self.start_position.is_finite() || !arena.contains(self.start_position) {
            return Err(layout_error("start position"));
        }
        if !self.portal_default_position.is_finite()
            || !arena.contains(self.portal_default_position)
        {
            return Err(layout_error("portal position"));
        }

        if self.spawn_margin * 2.0 >= self.arena_width.min(self.arena_height) {
            return Err(layout_error("spawn margin"));
        }
        if self.portal_edge_margin * 2.0 >= self.arena_width
            || self.portal_band_height <= self.portal_edge_margin
            || self.portal_band_height >= self.arena_height
        {
            return Err(layout_error("portal band"));
        }
        // The HUD box must not swallow the whole spawn area
        let spawn_max = Vec2::new(
            self.arena_width - self.spawn_margin,
            self.arena_height - self.spawn_margin,
        );
        if self.hud_reserved.x >= spawn_max.x && self.hud_reserved.y >= spawn_max.y {
            return Err(layout_error("reserved HUD region"));
        }
        Ok(())
    }

    /// Inclusive bounds teeth are drawn from
    pub fn spawn_range(&self) -> (Vec2, Vec2) {
        (
            Vec2::splat(self.spawn_margin),
            Vec2::new(
                self.arena_width - self.spawn_margin,
                self.arena_height - self.spawn_margin,
            ),
        )
    }

    /// Whether a point falls in the region reserved for score text
    pub fn in_hud_region(&self, pos: Vec2) -> bool {
        pos.x < self.hud_reserved.x && pos.y < self.hud_reserved.y
    }
}
