//! Fixed timestep simulation tick
//!
//! One tick: resolve input into velocity, move the mouth, query contacts,
//! dispatch them against the level session.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision::{self, Contact};
use super::movement::{HeldKeys, velocity_for};
use super::registry::EntityId;
use super::sampler::sample_portal_position;
use super::state::{GameEvent, GamePhase, GameState, Mouth};
use crate::audio::{BITE_VARIANTS, COMPLETE_VARIANTS, SoundCue};
use crate::content;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions currently held
    pub held: HeldKeys,
    /// Let the autopilot steer instead of `held`
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Won is terminal: no movement, no contacts
    if state.phase == GamePhase::Won {
        return;
    }

    state.time_ticks += 1;

    let held = if input.autopilot {
        autopilot::steer(state)
    } else {
        input.held
    };
    move_mouth(state, &held, dt);

    let contacts = collision::contacts(state);
    dispatch(state, &contacts);
}

fn move_mouth(state: &mut GameState, held: &HeldKeys, dt: f32) {
    let speed = state.mouth_speed();
    let walkable = state.arena_bounds().inset(Mouth::half_extents());
    let Some(mouth) = state.mouth.as_mut() else {
        return;
    };

    mouth.vel = velocity_for(held, speed);
    mouth.pos = walkable.clamp(mouth.pos + mouth.vel * dt);
}

/// Apply this tick's contacts in order. A phase change ends the tick: the
/// remaining contacts were found against a layout that no longer exists.
pub fn dispatch(state: &mut GameState, contacts: &[Contact]) {
    for contact in contacts {
        let transitioned = match *contact {
            Contact::Tooth(id) => collect_tooth(state, id),
            Contact::Portal => enter_portal(state),
        };
        if transitioned {
            break;
        }
    }
}

/// Returns true when the collection changed the phase
fn collect_tooth(state: &mut GameState, id: EntityId) -> bool {
    if state.phase != GamePhase::Playing {
        log::debug!("Tooth {} contact ignored in {:?}", id, state.phase);
        return false;
    }
    if state.score >= state.required_this_level {
        log::debug!(
            "Tooth {} contact ignored: score {} already at {}",
            id,
            state.score,
            state.required_this_level
        );
        return false;
    }
    if state.registry.remove_tooth(id).is_none() {
        log::debug!("Tooth {} already gone", id);
        return false;
    }

    state.score += 1;
    state.total_collected += 1;
    let bite = state.rng.random_range(0..BITE_VARIANTS);
    state.events.push(GameEvent::Collected {
        tooth: id,
        score: state.score,
        total: state.total_collected,
    });
    state.events.push(GameEvent::Cue(SoundCue::Bite(bite)));

    // Win check comes first: the level-complete path never runs on the winning tooth
    if state.total_collected >= state.tuning.win_threshold {
        win(state);
        return true;
    }
    if state.score == state.required_this_level {
        complete_level(state);
        return true;
    }
    false
}

fn complete_level(state: &mut GameState) {
    let player = match state.mouth.as_mut() {
        Some(mouth) => {
            mouth.vel = Vec2::ZERO;
            mouth.pos
        }
        None => state.tuning.start_position,
    };

    if let Some(banner) = state.registry.banner_mut(state.level_complete_banner) {
        banner.visible = true;
    }
    if let Some(banner) = state.registry.banner_mut(state.completion_message) {
        banner.text = content::completion_message(state.level).to_string();
        banner.visible = true;
    }

    let fanfare = state.rng.random_range(0..COMPLETE_VARIANTS);
    state.events.push(GameEvent::Cue(SoundCue::Complete(fanfare)));

    let sample = sample_portal_position(&mut state.rng, player, &state.tuning);
    if let Some(portal) = state.registry.portal_mut() {
        portal.pos = sample.pos;
        portal.visible = true;
    }

    state.phase = GamePhase::LevelComplete;
    state.events.push(GameEvent::LevelComplete {
        level: state.level,
        portal: sample.pos,
        outcome: sample.outcome,
    });
    log::info!(
        "Level {} complete, portal at ({:.0}, {:.0})",
        state.level,
        sample.pos.x,
        sample.pos.y
    );
}

/// Returns true when the portal took the mouth to the next level
fn enter_portal(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelComplete || !state.portal_visible() {
        log::debug!("Portal contact ignored in {:?}", state.phase);
        return false;
    }

    state.events.push(GameEvent::Cue(SoundCue::Portal));
    state.level += 1;
    state.setup_level();
    true
}

fn win(state: &mut GameState) {
    let teardown = state.registry.teardown();
    state.mouth = None;
    state.phase = GamePhase::Won;
    state.events.push(GameEvent::Won {
        level: state.level,
        total: state.total_collected,
    });
    log::info!(
        "Won on level {} with {} teeth ({} entities released)",
        state.level,
        state.total_collected,
        teardown.destroyed + teardown.cleared
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::registry::BannerKind;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn tooth_ids(state: &GameState) -> Vec<EntityId> {
        state.registry.teeth().map(|t| t.id).collect()
    }

    /// First seed whose level 1 needs `required` teeth
    fn session_requiring(required: u32) -> GameState {
        (0..)
            .map(|seed| GameState::new(seed, Tuning::default()))
            .find(|s| s.required_this_level == required)
            .unwrap()
    }

    fn collect_all(state: &mut GameState) {
        for id in tooth_ids(state) {
            dispatch(state, &[Contact::Tooth(id)]);
        }
    }

    #[test]
    fn test_level_complete_then_portal() {
        let mut state = session_requiring(2);
        let ids = tooth_ids(&state);
        assert_eq!(ids.len(), 2);

        dispatch(&mut state, &[Contact::Tooth(ids[0])]);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);

        dispatch(&mut state, &[Contact::Tooth(ids[1])]);
        assert_eq!(state.score, 2);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.portal_visible());
        assert_eq!(state.level_complete_text(), Some(content::LEVEL_COMPLETE));
        assert_eq!(
            state.completion_message_text(),
            Some(content::completion_message(1))
        );
        let portal = state.portal().unwrap().pos;
        let mouth = state.mouth.as_ref().unwrap();
        assert_eq!(mouth.vel, Vec2::ZERO);
        assert!(portal.distance(mouth.pos) >= state.tuning.portal_min_distance);

        dispatch(&mut state, &[Contact::Portal]);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.total_collected, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((2..=4).contains(&state.required_this_level));
        assert_eq!(state.registry.tooth_count(), state.required_this_level as usize);
        assert!(!state.portal_visible());
        assert!(state.level_complete_text().is_none());
    }

    #[test]
    fn test_level_events_and_cues() {
        let mut state = session_requiring(2);
        state.drain_events();
        collect_all(&mut state);

        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::Collected { score: 1, total: 1, .. }));
        assert!(matches!(events[1], GameEvent::Cue(SoundCue::Bite(b)) if b < BITE_VARIANTS));
        assert!(matches!(events[3], GameEvent::Cue(SoundCue::Bite(_))));
        assert!(matches!(events[4], GameEvent::Cue(SoundCue::Complete(c)) if c < COMPLETE_VARIANTS));
        assert!(matches!(events[5], GameEvent::LevelComplete { level: 1, .. }));

        dispatch(&mut state, &[Contact::Portal]);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Cue(SoundCue::Portal));
        assert!(matches!(events[1], GameEvent::LevelStarted { level: 2, .. }));
    }

    #[test]
    fn test_win_skips_level_complete() {
        let mut state = session_requiring(2);
        let ids = tooth_ids(&state);
        dispatch(&mut state, &[Contact::Tooth(ids[0])]);

        // The next tooth both completes the level and reaches the threshold
        state.total_collected = 31;
        state.drain_events();
        dispatch(&mut state, &[Contact::Tooth(ids[1])]);

        assert_eq!(state.total_collected, 32);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.mouth.is_none());
        assert!(state.registry.is_empty());
        assert!(state.level_complete_text().is_none());
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Won { total: 32, .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelComplete { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Cue(SoundCue::Complete(_)))));
    }

    #[test]
    fn test_won_is_terminal() {
        let tuning = Tuning {
            win_threshold: 1,
            ..Tuning::default()
        };
        let mut state = GameState::new(9, tuning);
        let ids = tooth_ids(&state);
        dispatch(&mut state, &[Contact::Tooth(ids[0])]);
        assert_eq!(state.phase, GamePhase::Won);

        let input = TickInput {
            held: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let ticks = state.time_ticks;
        tick(&mut state, &input, SIM_DT);
        dispatch(&mut state, &[Contact::Portal, Contact::Tooth(ids[1])]);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.total_collected, 1);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_portal_ignored_while_playing() {
        let mut state = session_requiring(3);
        let ids = tooth_ids(&state);
        dispatch(&mut state, &[Contact::Tooth(ids[0])]);
        state.drain_events();

        dispatch(&mut state, &[Contact::Portal]);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.total_collected, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_duplicate_contact_counts_once() {
        let mut state = session_requiring(3);
        let ids = tooth_ids(&state);
        dispatch(&mut state, &[Contact::Tooth(ids[0]), Contact::Tooth(ids[0])]);
        assert_eq!(state.score, 1);
        dispatch(&mut state, &[Contact::Tooth(ids[0])]);
        assert_eq!(state.score, 1);
        assert_eq!(state.total_collected, 1);
    }

    #[test]
    fn test_transition_drops_rest_of_tick() {
        let mut state = session_requiring(2);
        let ids = tooth_ids(&state);
        dispatch(&mut state, &[Contact::Tooth(ids[0])]);
        // Portal contact found before the level completed must not advance it
        dispatch(&mut state, &[Contact::Tooth(ids[1]), Contact::Portal]);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_completion_message_by_direct_reference() {
        let mut state = session_requiring(2);
        // Another hidden banner in the registry must not be picked up
        state.registry.spawn_banner(BannerKind::CompletionMessage, "decoy");
        collect_all(&mut state);
        let banner = state.registry.banner(state.completion_message).unwrap();
        assert_eq!(banner.text, content::completion_message(1));
        assert!(banner.visible);
    }

    #[test]
    fn test_movement_tick() {
        let mut state = GameState::new(1, Tuning::default());
        // Clear teeth so nothing is collected on the way
        for id in tooth_ids(&state) {
            state.registry.remove_tooth(id);
        }
        let input = TickInput {
            held: HeldKeys {
                left: true,
                right: true,
                down: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);
        let mouth = state.mouth.as_ref().unwrap();
        assert_eq!(mouth.vel, Vec2::new(-200.0, 200.0));
        assert_eq!(mouth.pos, Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_mouth_stays_in_arena() {
        let mut state = GameState::new(1, Tuning::default());
        for id in tooth_ids(&state) {
            state.registry.remove_tooth(id);
        }
        let input = TickInput {
            held: HeldKeys {
                left: true,
                up: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, 1.0);
        }
        let mouth = state.mouth.as_ref().unwrap();
        assert_eq!(mouth.pos, Vec2::new(32.0, 20.0));
    }

    #[test]
    fn test_speed_scales_with_total() {
        let mut state = GameState::new(1, Tuning::default());
        for id in tooth_ids(&state) {
            state.registry.remove_tooth(id);
        }
        state.total_collected = 10;
        let input = TickInput {
            held: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.mouth.as_ref().unwrap().vel.x, 250.0);
    }

    #[test]
    fn test_autopilot_wins_session() {
        let mut state = GameState::new(2024, Tuning::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut ticks = 0;
        while state.phase != GamePhase::Won && ticks < 200_000 {
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.total_collected, 32);
        assert!(state.level > 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());
        for _ in 0..5_000 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.total_collected, state2.total_collected);
        assert_eq!(state1.events, state2.events);
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            ops in proptest::collection::vec((0u8..4, any::<usize>()), 1..300),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            let mut since_advance = 0u32;
            let mut total = 0u32;
            let mut stale: Vec<EntityId> = Vec::new();

            for (kind, pick) in ops {
                let before = (state.level, state.score, state.total_collected, state.phase);

                let contact = match kind {
                    0 => Contact::Portal,
                    1 if !stale.is_empty() => Contact::Tooth(stale[pick % stale.len()]),
                    _ => {
                        let ids = tooth_ids(&state);
                        if ids.is_empty() {
                            Contact::Portal
                        } else {
                            Contact::Tooth(ids[pick % ids.len()])
                        }
                    }
                };
                if let Contact::Tooth(id) = contact {
                    stale.push(id);
                }
                dispatch(&mut state, &[contact]);

                match contact {
                    Contact::Tooth(_) if state.total_collected > before.2 => {
                        since_advance += 1;
                        total += 1;
                    }
                    Contact::Portal if before.3 != GamePhase::LevelComplete => {
                        // Portal outside LevelComplete changes nothing
                        prop_assert_eq!((state.level, state.score, state.total_collected), (before.0, before.1, before.2));
                    }
                    Contact::Portal if state.level > before.0 => since_advance = 0,
                    _ => {}
                }

                prop_assert!(state.total_collected >= before.2);
                prop_assert_eq!(state.total_collected, total);
                if before.3 == GamePhase::Won {
                    prop_assert_eq!(state.phase, GamePhase::Won);
                }
                if state.total_collected >= state.tuning.win_threshold {
                    prop_assert_eq!(state.phase, GamePhase::Won);
                }
                if state.phase != GamePhase::Won {
                    prop_assert_eq!(state.score, since_advance);
                    prop_assert!(state.score <= state.required_this_level);
                }
                if state.phase == GamePhase::LevelComplete {
                    prop_assert!(state.portal_visible());
                }
            }
        }
    }
}
