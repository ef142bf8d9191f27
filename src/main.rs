//! Mission MouthPossible entry point
//!
//! Browser host on wasm32. Natively, runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use mouth_possible::audio::AudioManager;
    use mouth_possible::consts::SIM_DT;
    use mouth_possible::content;
    use mouth_possible::persistence::LocalStorageWinFlag;
    use mouth_possible::platform::KeyState;
    use mouth_possible::renderer::{RenderState, frame_vertices};
    use mouth_possible::screens::{IntroSequence, Navigator, Route, TitleScreen};
    use mouth_possible::{GameScene, HudView, Tuning};

    /// Route asked for by a screen, applied once the handler is done with the app
    #[derive(Default)]
    struct RouteRequest(Option<Route>);

    impl Navigator for RouteRequest {
        fn go_to(&mut self, route: Route) {
            self.0 = Some(route);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Everything the page needs between frames
    struct App {
        document: Document,
        canvas: Option<HtmlCanvasElement>,
        route: Route,
        title: TitleScreen,
        intro: IntroSequence,
        scene: Option<GameScene>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        store: LocalStorageWinFlag,
        keys: KeyState,
        tuning: Tuning,
        last_time: f64,
        last_hud: Option<HudView>,
        /// A frame callback is scheduled
        frame_loop: bool,
    }

    impl App {
        fn apply(&mut self, request: RouteRequest) {
            if let Some(route) = request.0 {
                self.show(route, true);
            }
        }

        /// Switch screens. `push` adds a history entry.
        fn show(&mut self, route: Route, push: bool) {
            if let Some(mut scene) = self.scene.take() {
                scene.shutdown(&mut self.audio);
            }

            match route {
                Route::Title => {
                    self.title = TitleScreen::new(&self.store);
                    match self.title.badge() {
                        Some(text) => {
                            set_text(&self.document, "title-badge", text);
                            set_visible(&self.document, "title-badge", true);
                        }
                        None => set_visible(&self.document, "title-badge", false),
                    }
                }
                Route::Intro => {
                    self.intro = IntroSequence::new();
                    self.render_intro();
                }
                Route::Game => {
                    let seed = js_sys::Date::now() as u64;
                    let mut scene = GameScene::new(seed, self.tuning.clone());
                    scene.enter(&mut self.audio);
                    self.scene = Some(scene);
                    self.keys.release_all();
                    self.last_hud = None;
                    log::info!("Game started with seed: {}", seed);
                }
            }

            set_visible(&self.document, "title-screen", route == Route::Title);
            set_visible(&self.document, "intro-screen", route == Route::Intro);
            set_visible(&self.document, "game-screen", route == Route::Game);
            if route == Route::Game {
                self.fit_canvas();
            }

            if push && route != self.route {
                if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route.path()));
                }
            }
            self.route = route;
            log::info!("Screen: {}", route.path());
        }

        fn render_intro(&self) {
            set_text(&self.document, "intro-text", self.intro.text());
            set_text(&self.document, "intro-btn", self.intro.button_label());
        }

        /// Match the backing store to the canvas' on-screen size
        fn fit_canvas(&mut self) {
            let (Some(canvas), Some(render_state)) = (&self.canvas, self.render_state.as_mut())
            else {
                return;
            };
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            if width > 0 && height > 0 && (width, height) != render_state.size {
                canvas.set_width(width);
                canvas.set_height(height);
                render_state.resize(width, height);
            }
        }

        fn update(&mut self, dt: f32) {
            let held = self.keys.held();
            if let Some(scene) = self.scene.as_mut() {
                scene.set_held(held);
                scene.frame(dt, &mut self.audio, &mut self.store);
            }
        }

        fn render(&mut self) {
            let (Some(scene), Some(render_state)) = (&self.scene, self.render_state.as_mut()) else {
                return;
            };
            let vertices = frame_vertices(scene.state());
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Push HUD text into the DOM when it changed
        fn update_hud(&mut self) {
            let Some(scene) = &self.scene else {
                return;
            };
            let hud = scene.hud();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let doc = &self.document;
            set_text(doc, "hud-level-teeth", &hud.level_teeth);
            set_text(doc, "hud-total-teeth", &hud.total_teeth);
            set_text(doc, "hud-level", &hud.level);

            set_visible(doc, "level-banner", hud.banner.is_some());
            if let Some(text) = &hud.banner {
                set_text(doc, "level-banner", text);
            }
            set_visible(doc, "level-message", hud.message.is_some());
            if let Some(text) = &hud.message {
                set_text(doc, "level-message", text);
            }

            set_visible(doc, "hud", !hud.won);
            set_visible(doc, "exit-btn", !hud.won);
            set_visible(doc, "exit-dialog", hud.exit_confirm);
            set_visible(doc, "win-screen", hud.won);

            self.last_hud = Some(hud);
        }
    }

    /// Labels that never change
    fn fill_static_text(document: &Document) {
        let labels = [
            ("title-heading", content::TITLE),
            ("title-subtitle", content::SUBTITLE),
            ("start-btn", content::START),
            ("exit-btn", content::EXIT),
            ("exit-confirm-text", content::EXIT_CONFIRM),
            ("exit-yes", content::YES),
            ("exit-no", content::NO),
            ("win-heading", content::CONGRATULATIONS),
            ("win-message", content::WIN_MESSAGE),
            ("return-btn", content::RETURN_TO_TITLE),
        ];
        for (id, text) in labels {
            set_text(document, id, text);
        }
    }

    /// Optional balance overrides embedded in the page
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|json| !json.trim().is_empty())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    async fn init_renderer(canvas: &HtmlCanvasElement, tuning: &Tuning) -> Option<RenderState> {
        let arena = Vec2::new(tuning.arena_width, tuning.arena_height);
        // Canvas may still be hidden; start at arena size and refit on show
        let width = (canvas.client_width() as u32).max(arena.x as u32);
        let height = (canvas.client_height() as u32).max(arena.y as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, arena).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Renderer unavailable: {}", e);
                None
            }
        }
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: &Rc<RefCell<App>>,
        handler: fn(&mut App, &mut RouteRequest),
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            {
                let mut g = app.borrow_mut();
                g.audio.mark_ready();
                let mut nav = RouteRequest::default();
                handler(&mut g, &mut nav);
                g.apply(nav);
            }
            ensure_frame_loop(&app);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        on_click(document, "start-btn", app, |app, nav| {
            app.title.start(&mut app.audio, nav);
        });
        on_click(document, "intro-btn", app, |app, nav| {
            app.intro.advance(nav);
            app.render_intro();
        });
        on_click(document, "exit-btn", app, |app, _| {
            if let Some(scene) = app.scene.as_mut() {
                scene.request_exit();
            }
        });
        on_click(document, "exit-no", app, |app, _| {
            if let Some(scene) = app.scene.as_mut() {
                scene.cancel_exit();
            }
        });
        on_click(document, "exit-yes", app, |app, nav| {
            if let Some(scene) = app.scene.as_mut() {
                scene.confirm_exit(&mut app.audio, nav);
            }
        });
        on_click(document, "return-btn", app, |app, nav| {
            if let Some(scene) = app.scene.as_mut() {
                scene.return_to_title(&mut app.audio, nav);
            }
        });
    }

    fn setup_window_handlers(window: &web_sys::Window, app: &Rc<RefCell<App>>) {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = app.borrow_mut();
                g.audio.mark_ready();
                let key = event.key();
                if g.keys.key_down(&key) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "i" | "I" => {
                        if let Some(scene) = g.scene.as_mut() {
                            let on = !scene.autopilot();
                            scene.set_autopilot(on);
                        }
                    }
                    "m" | "M" => {
                        let muted = !g.audio.is_muted();
                        g.audio.set_muted(muted);
                        log::info!("Muted: {}", muted);
                    }
                    "Escape" => {
                        if let Some(scene) = g.scene.as_mut() {
                            scene.request_exit();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().keys.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyups will not arrive
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().fit_canvas();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back/forward
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let route = current_route(&window);
                app.borrow_mut().show(route, false);
                ensure_frame_loop(&app);
            });
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Route for the address bar, rewriting paths that aren't a route's own
    fn current_route(window: &web_sys::Window) -> Route {
        let path = window.location().pathname().unwrap_or_default();
        let (route, rewrite) = Route::resolve(&path);
        if let Some(canonical) = rewrite {
            log::info!("Redirecting {:?} to {}", path, canonical);
            if let Ok(history) = window.history() {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(canonical));
            }
        }
        route
    }

    /// Start the frame loop if the current screen animates and it isn't running
    fn ensure_frame_loop(app: &Rc<RefCell<App>>) {
        {
            let mut g = app.borrow_mut();
            if g.frame_loop || !g.route.runs_frame_loop() {
                return;
            }
            g.frame_loop = true;
            g.last_time = 0.0;
        }
        request_animation_frame(app.clone());
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut g = app.borrow_mut();
            if g.scene.is_none() || !g.route.runs_frame_loop() {
                g.frame_loop = false;
                log::debug!("Frame loop stopped");
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(app);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Mission MouthPossible starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        fill_static_text(&document);
        let tuning = load_tuning(&document);

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok());
        let render_state = match &canvas {
            Some(canvas) => init_renderer(canvas, &tuning).await,
            None => {
                log::warn!("No canvas element, HUD only");
                None
            }
        };

        let store = LocalStorageWinFlag;
        let app = Rc::new(RefCell::new(App {
            document: document.clone(),
            canvas,
            route: Route::Title,
            title: TitleScreen::new(&store),
            intro: IntroSequence::new(),
            scene: None,
            render_state,
            audio: AudioManager::new(),
            store,
            keys: KeyState::default(),
            tuning,
            last_time: 0.0,
            last_hud: None,
            frame_loop: false,
        }));

        setup_buttons(&document, &app);
        setup_window_handlers(&window, &app);

        let route = current_route(&window);
        app.borrow_mut().show(route, false);

        set_visible(&document, "loading", false);
        ensure_frame_loop(&app);

        log::info!("Mission MouthPossible running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    web_app::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mouth_possible::GameScene;
    use mouth_possible::Tuning;
    use mouth_possible::audio::SilentAudio;
    use mouth_possible::persistence::{MemoryWinFlag, WinFlagStore};

    env_logger::init();
    log::info!("Mission MouthPossible (native) starting...");
    log::info!("The playable game is the wasm build; running an autopilot demo session");

    const SEED: u64 = 42;
    const FRAME_DT: f32 = 1.0 / 60.0;
    // An hour of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 60;

    let mut scene = GameScene::new(SEED, Tuning::default());
    let mut audio = SilentAudio::new();
    let mut store = MemoryWinFlag::new();
    scene.enter(&mut audio);
    scene.set_autopilot(true);

    let mut frames = 0;
    while frames < MAX_FRAMES && !store.has_won() {
        scene.frame(FRAME_DT, &mut audio, &mut store);
        frames += 1;
    }

    let hud = scene.hud();
    if store.has_won() {
        log::info!(
            "Won in {:.1}s of simulated play ({}, {})",
            frames as f32 * FRAME_DT,
            hud.level,
            hud.total_teeth
        );
    } else {
        log::warn!("Autopilot gave up: {}, {}", hud.level, hud.total_teeth);
    }
    scene.shutdown(&mut audio);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
