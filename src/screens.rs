//! Screens around the game: title, intro crawl, and the routes between them

use crate::audio::{AudioSink, MusicTrack};
use crate::content;
use crate::persistence::WinFlagStore;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Title,
    Intro,
    Game,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Title => "/",
            Route::Intro => "/intro",
            Route::Game => "/game",
        }
    }

    /// Unknown paths land on the title screen
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/intro" => Route::Intro,
            "/game" => Route::Game,
            _ => Route::Title,
        }
    }

    /// Resolve a pathname, plus the path to rewrite the address bar to when
    /// it is not already the route's own path
    pub fn resolve(path: &str) -> (Self, Option<&'static str>) {
        let route = Self::from_path(path);
        let canonical = route.path();
        (route, (canonical != path).then_some(canonical))
    }

    /// Only the game screen animates; the frame loop is stopped elsewhere
    pub fn runs_frame_loop(&self) -> bool {
        matches!(self, Route::Game)
    }
}

/// Whoever owns the current screen
pub trait Navigator {
    fn go_to(&mut self, route: Route);
}

/// Title screen model
#[derive(Debug, Clone)]
pub struct TitleScreen {
    pub has_won: bool,
}

impl TitleScreen {
    pub fn new(store: &dyn WinFlagStore) -> Self {
        Self {
            has_won: store.has_won(),
        }
    }

    /// Badge text, shown only after a previous win
    pub fn badge(&self) -> Option<&'static str> {
        self.has_won.then_some(content::HAS_WON_BADGE)
    }

    pub fn start(&self, audio: &mut dyn AudioSink, nav: &mut dyn Navigator) {
        audio.play_music(MusicTrack::Title);
        nav.go_to(Route::Intro);
    }
}

/// The story screens shown before level 1
#[derive(Debug, Clone, Default)]
pub struct IntroSequence {
    index: usize,
}

impl IntroSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &'static str {
        content::INTRO_SCREENS[self.index]
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == content::INTRO_SCREENS.len()
    }

    /// Button label for the current screen
    pub fn button_label(&self) -> &'static str {
        if self.is_last() {
            content::INTRO_START
        } else {
            content::INTRO_CONTINUE
        }
    }

    /// Next screen, or into the game after the last one
    pub fn advance(&mut self, nav: &mut dyn Navigator) {
        if self.is_last() {
            nav.go_to(Route::Game);
        } else {
            self.index += 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::MemoryWinFlag;

    /// Navigator that remembers every request
    #[derive(Debug, Default)]
    pub(crate) struct RecordingNav {
        pub routes: Vec<Route>,
    }

    impl Navigator for RecordingNav {
        fn go_to(&mut self, route: Route) {
            self.routes.push(route);
        }
    }

    #[test]
    fn test_route_paths() {
        for route in [Route::Title, Route::Intro, Route::Game] {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("/game/"), Route::Game);
        assert_eq!(Route::from_path("/nowhere"), Route::Title);
        assert_eq!(Route::from_path(""), Route::Title);
    }

    #[test]
    fn test_unknown_paths_are_rewritten() {
        assert_eq!(Route::resolve("/nowhere"), (Route::Title, Some("/")));
        assert_eq!(Route::resolve("/game/"), (Route::Game, Some("/game")));
        assert_eq!(Route::resolve(""), (Route::Title, Some("/")));
        assert_eq!(Route::resolve("/intro"), (Route::Intro, None));
        assert_eq!(Route::resolve("/"), (Route::Title, None));
    }

    #[test]
    fn test_only_game_runs_frame_loop() {
        assert!(Route::Game.runs_frame_loop());
        assert!(!Route::Title.runs_frame_loop());
        assert!(!Route::Intro.runs_frame_loop());
    }

    #[test]
    fn test_title_badge() {
        let mut store = MemoryWinFlag::new();
        assert_eq!(TitleScreen::new(&store).badge(), None);
        store.set_has_won();
        assert_eq!(
            TitleScreen::new(&store).badge(),
            Some(content::HAS_WON_BADGE)
        );
    }

    #[test]
    fn test_title_start() {
        let store = MemoryWinFlag::new();
        let mut audio = SilentAudio::new();
        let mut nav = RecordingNav::default();
        TitleScreen::new(&store).start(&mut audio, &mut nav);
        assert_eq!(audio.playing(), Some(MusicTrack::Title));
        assert_eq!(nav.routes, vec![Route::Intro]);
    }

    #[test]
    fn test_intro_walkthrough() {
        let mut intro = IntroSequence::new();
        let mut nav = RecordingNav::default();

        for _ in 0..3 {
            assert_eq!(intro.button_label(), content::INTRO_CONTINUE);
            intro.advance(&mut nav);
        }
        assert!(nav.routes.is_empty());
        assert_eq!(intro.index(), 3);
        assert_eq!(intro.text(), content::INTRO_SCREENS[3]);
        assert_eq!(intro.button_label(), content::INTRO_START);

        intro.advance(&mut nav);
        assert_eq!(nav.routes, vec![Route::Game]);
    }
}
