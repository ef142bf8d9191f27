//! Portal placement
//!
//! Bounded rejection sampling: draw from the safe zones left and right of the
//! mouth along the bottom of the arena until a point is far enough away, or
//! the retry budget runs out. The result is clamped into the bottom band so it
//! is always on screen, even when the distance constraint could not be met.

use glam::Vec2;
use rand::Rng;

use super::bounds::Aabb;
use crate::tuning::Tuning;

/// How a sample was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Distance constraint satisfied after `attempts` draws
    Accepted { attempts: u32 },
    /// Budget exhausted, last draw kept
    Exhausted,
}

/// A sampled point and how it was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalSample {
    pub pos: Vec2,
    pub outcome: SampleOutcome,
}

/// Where the portal may appear relative to the mouth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZones {
    pub left: Aabb,
    pub right: Aabb,
    /// Bottom band both zones live in; also the final clamp region
    pub band: Aabb,
}

impl SafeZones {
    pub fn around(player: Vec2, tuning: &Tuning) -> Self {
        let margin = tuning.portal_edge_margin;
        let y_min = tuning.arena_height - tuning.portal_band_height;
        let y_max = tuning.arena_height - margin;
        let reach = tuning.portal_min_distance;

        Self {
            left: Aabb::new(Vec2::new(margin, y_min), Vec2::new(player.x - reach, y_max)),
            right: Aabb::new(
                Vec2::new(player.x + reach, y_min),
                Vec2::new(tuning.arena_width - margin, y_max),
            ),
            band: Aabb::new(
                Vec2::new(margin, y_min),
                Vec2::new(tuning.arena_width - margin, y_max),
            ),
        }
    }

    /// Zones that can be drawn from. Falls back to the whole band when the
    /// mouth sits where neither side has room.
    fn candidates(&self) -> Vec<Aabb> {
        let zones: Vec<Aabb> = [self.left, self.right]
            .into_iter()
            .filter(|z| !z.is_empty())
            .collect();
        if zones.is_empty() { vec![self.band] } else { zones }
    }
}

fn uniform_in<R: Rng + ?Sized>(rng: &mut R, zone: &Aabb) -> Vec2 {
    Vec2::new(
        rng.random_range(zone.min.x..=zone.max.x),
        rng.random_range(zone.min.y..=zone.max.y),
    )
}

/// Pick a portal position at least `portal_min_distance` from `player` when
/// the retry budget allows it
pub fn sample_portal_position<R: Rng + ?Sized>(
    rng: &mut R,
    player: Vec2,
    tuning: &Tuning,
) -> PortalSample {
    let zones = SafeZones::around(player, tuning);
    let candidates = zones.candidates();
    let budget = tuning.portal_retry_budget.max(1);

    let mut pos = zones.band.clamp(player);
    let mut outcome = SampleOutcome::Exhausted;
    for attempt in 1..=budget {
        let zone = &candidates[rng.random_range(0..candidates.len())];
        pos = uniform_in(rng, zone);
        if pos.distance(player) >= tuning.portal_min_distance {
            outcome = SampleOutcome::Accepted { attempts: attempt };
            break;
        }
    }

    if outcome == SampleOutcome::Exhausted {
        log::debug!(
            "Portal sampler exhausted {} attempts near ({:.0}, {:.0})",
            budget,
            player.x,
            player.y
        );
    }

    PortalSample {
        pos: zones.band.clamp(pos),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Aabb {
        let t = Tuning::default();
        Aabb::new(Vec2::ZERO, Vec2::new(t.arena_width, t.arena_height))
    }

    #[test]
    fn test_zones_flank_player() {
        let tuning = Tuning::default();
        let zones = SafeZones::around(Vec2::new(400.0, 300.0), &tuning);
        assert_eq!(zones.left.min, Vec2::new(100.0, 450.0));
        assert_eq!(zones.left.max, Vec2::new(100.0, 500.0));
        assert_eq!(zones.right.min, Vec2::new(700.0, 450.0));
        assert_eq!(zones.right.max, Vec2::new(700.0, 500.0));
    }

    #[test]
    fn test_inverted_zone_is_skipped() {
        let tuning = Tuning::default();
        // Left of centre: only the right zone has room
        let zones = SafeZones::around(Vec2::new(150.0, 300.0), &tuning);
        assert!(zones.left.is_empty());
        assert_eq!(zones.candidates(), vec![zones.right]);

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let sample = sample_portal_position(&mut rng, Vec2::new(150.0, 300.0), &tuning);
            assert!(sample.pos.x >= 450.0);
        }
    }

    #[test]
    fn test_accepts_far_point() {
        let tuning = Tuning::default();
        let player = Vec2::new(600.0, 120.0);
        let mut rng = Pcg32::seed_from_u64(42);
        let sample = sample_portal_position(&mut rng, player, &tuning);
        assert!(matches!(sample.outcome, SampleOutcome::Accepted { .. }));
        assert!(sample.pos.distance(player) >= tuning.portal_min_distance);
        assert!(sample.pos.y >= 450.0 && sample.pos.y <= 500.0);
    }

    #[test]
    fn test_exhaustion_falls_back_to_clamped_point() {
        // Narrow arena: neither side zone fits, and nothing in the band is far enough
        let tuning = Tuning {
            arena_width: 600.0,
            ..Tuning::default()
        };
        let player = Vec2::new(300.0, 475.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let sample = sample_portal_position(&mut rng, player, &tuning);
        assert_eq!(sample.outcome, SampleOutcome::Exhausted);
        let band = SafeZones::around(player, &tuning).band;
        assert!(band.contains(sample.pos));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let tuning = Tuning::default();
        let player = Vec2::new(520.0, 340.0);
        let a = sample_portal_position(&mut Pcg32::seed_from_u64(11), player, &tuning);
        let b = sample_portal_position(&mut Pcg32::seed_from_u64(11), player, &tuning);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_sample_always_in_arena(
            x in 0.0f32..=800.0,
            y in 0.0f32..=600.0,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning::default();
            let player = Vec2::new(x, y);
            let mut rng = Pcg32::seed_from_u64(seed);
            let sample = sample_portal_position(&mut rng, player, &tuning);

            prop_assert!(arena().contains(sample.pos));
            if let SampleOutcome::Accepted { attempts } = sample.outcome {
                prop_assert!(attempts >= 1 && attempts <= tuning.portal_retry_budget);
                prop_assert!(sample.pos.distance(player) >= tuning.portal_min_distance);
            }
        }
    }
}
