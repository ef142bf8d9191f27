//! Gameplay scene
//!
//! Owns the level session and drives it at the fixed timestep. After each
//! frame the session's events are routed to the host capabilities: cues and
//! music to the [`AudioSink`], the win to the [`WinFlagStore`]. Leaving the
//! scene goes through the [`Navigator`].

use crate::audio::{AudioSink, MusicTrack};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::content;
use crate::persistence::WinFlagStore;
use crate::screens::{Navigator, Route};
use crate::sim::{GameEvent, GamePhase, GameState, HeldKeys, TickInput, tick};
use crate::tuning::Tuning;

/// Longest frame the accumulator will absorb (tab was in the background)
const MAX_FRAME_DT: f32 = 0.1;

/// Everything the DOM overlay shows, read from the session
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub level_teeth: String,
    pub total_teeth: String,
    pub level: String,
    /// "Level complete!" heading while the portal is open
    pub banner: Option<String>,
    /// Flavor text under the heading
    pub message: Option<String>,
    pub won: bool,
    pub exit_confirm: bool,
}

pub struct GameScene {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    exit_confirm: bool,
    active: bool,
}

impl GameScene {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
            exit_confirm: false,
            active: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Scene became the current screen
    pub fn enter(&mut self, audio: &mut dyn AudioSink) {
        audio.play_music(MusicTrack::Game);
        // Level 1 announcement is not interesting to anyone downstream
        self.state.drain_events();
    }

    pub fn set_held(&mut self, held: HeldKeys) {
        self.input.held = held;
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    /// Advance by one display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32, audio: &mut dyn AudioSink, store: &mut dyn WinFlagStore) {
        if !self.active {
            return;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.route_events(audio, store);
    }

    fn route_events(&mut self, audio: &mut dyn AudioSink, store: &mut dyn WinFlagStore) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(cue) => audio.play_cue(cue),
                GameEvent::Won { .. } => {
                    store.set_has_won();
                    audio.play_music(MusicTrack::Win);
                }
                GameEvent::LevelStarted { .. }
                | GameEvent::Collected { .. }
                | GameEvent::LevelComplete { .. } => {}
            }
        }
    }

    pub fn request_exit(&mut self) {
        self.exit_confirm = true;
    }

    pub fn cancel_exit(&mut self) {
        self.exit_confirm = false;
    }

    /// "Yes" in the exit dialog
    pub fn confirm_exit(&mut self, audio: &mut dyn AudioSink, nav: &mut dyn Navigator) {
        self.exit_confirm = false;
        self.leave(audio, nav);
    }

    /// Button on the win screen
    pub fn return_to_title(&mut self, audio: &mut dyn AudioSink, nav: &mut dyn Navigator) {
        if self.state.phase != GamePhase::Won {
            return;
        }
        self.leave(audio, nav);
    }

    fn leave(&mut self, audio: &mut dyn AudioSink, nav: &mut dyn Navigator) {
        self.shutdown(audio);
        nav.go_to(Route::Title);
    }

    /// Drop every level object and stop the music. Safe to call twice.
    pub fn shutdown(&mut self, audio: &mut dyn AudioSink) {
        if !self.active {
            return;
        }
        let teardown = self.state.registry.teardown();
        self.state.events.clear();
        audio.stop_music();
        self.active = false;
        log::info!(
            "Game scene shut down ({} objects released)",
            teardown.destroyed + teardown.cleared
        );
    }

    pub fn hud(&self) -> HudView {
        let state = &self.state;
        HudView {
            level_teeth: format!("Level Teeth: {}/{}", state.score, state.required_this_level),
            total_teeth: format!("Total Teeth: {}", state.total_collected),
            level: format!("Level: {}", state.level),
            banner: state.level_complete_text().map(str::to_owned),
            message: state.completion_message_text().map(str::to_owned),
            won: state.phase == GamePhase::Won,
            exit_confirm: self.exit_confirm,
        }
    }

    /// Heading and body of the win screen
    pub fn win_text(&self) -> Option<(&'static str, &'static str)> {
        (self.state.phase == GamePhase::Won)
            .then_some((content::CONGRATULATIONS, content::WIN_MESSAGE))
    }
}
