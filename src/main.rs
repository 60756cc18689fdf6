//! Prisci entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, Element, HtmlCanvasElement, Window};

    use prisci::consts::*;
    use prisci::platform::{Controls, OverlayButton};
    use prisci::renderer::{RenderState, SetupError, build_scene};
    use prisci::sim::{GameEvent, GameState, tick};
    use prisci::ui::{FpsCounter, Hud, INSTRUCTIONS};
    use prisci::{HighScore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        high_score: HighScore,
        controls: Controls,
        accumulator: f32,
        last_time: f64,
        fps: FpsCounter,
        /// HUD as last written to the DOM
        last_hud: Option<Hud>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings, high_score: HighScore) -> Self {
            Self {
                state: GameState::new(seed, high_score.best, tuning),
                render_state: None,
                settings,
                high_score,
                controls: Controls::new(),
                accumulator: 0.0,
                last_time: 0.0,
                fps: FpsCounter::default(),
                last_hud: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.controls.tick_input();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.controls.consume_one_shots();
            }
            if substeps == MAX_SUBSTEPS {
                // Too far behind; drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }

            self.handle_events();
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                self.controls.observe(&event);
                match event {
                    GameEvent::HighScoreChanged(best) => {
                        if self.high_score.record(best) {
                            self.high_score.save();
                        }
                    }
                    GameEvent::GameOver {
                        score,
                        new_high_score,
                    } => {
                        log::info!("Final score {} (new best: {})", score, new_high_score);
                    }
                    GameEvent::Restarted => self.accumulator = 0.0,
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let vertices = build_scene(&self.state, &self.settings, time / 1000.0);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if self.settings.show_fps {
                set_text(document, "hud-fps", &self.fps.text());
            }

            let hud = Hud::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            set_text(document, "hud-score", &hud.score);
            set_text(document, "hud-best", &hud.best);
            set_text(document, "hud-combo", &hud.combo);
            set_text(document, "hud-lives", &hud.lives);
            set_text(document, "banner", &hud.banners.join("\n"));
            set_hidden(document, "banner", hud.banners.is_empty());

            match &hud.game_over {
                Some(panel) => {
                    set_text(document, "game-over-title", panel.title);
                    set_text(document, "final-score", &panel.final_score);
                    set_text(
                        document,
                        "new-high-score",
                        panel.new_high_score.unwrap_or_default(),
                    );
                    set_hidden(document, "new-high-score", panel.new_high_score.is_none());
                    set_text(document, "restart-prompt", panel.prompt);
                    set_hidden(document, "game-over", false);
                }
                None => set_hidden(document, "game-over", true),
            }
            set_hidden(
                document,
                OverlayButton::Restart.element_id(),
                !hud.show_restart,
            );

            self.last_hud = Some(hud);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn dom_error(err: JsValue) -> SetupError {
        SetupError::Dom(format!("{:?}", err))
    }

    /// Find or create the canvas inside the game container
    fn mount(document: &Document) -> Result<HtmlCanvasElement, SetupError> {
        let container = document
            .get_element_by_id("game-container")
            .ok_or(SetupError::MissingElement("game-container"))?;

        let element = match document.get_element_by_id("game-canvas") {
            Some(el) => el,
            None => {
                let el = document.create_element("canvas").map_err(dom_error)?;
                el.set_id("game-canvas");
                container.append_child(&el).map_err(dom_error)?;
                el
            }
        };
        let canvas: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| SetupError::Dom("#game-canvas is not a canvas".into()))?;

        // CSS scales the canvas; the backing store ignores devicePixelRatio
        let (width, height) = prisci::canvas_size();
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    /// Optional balance override from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    /// Show or hide optional chrome per settings
    fn apply_settings(document: &Document, settings: &Settings) {
        set_hidden(document, "hud-fps", !settings.show_fps);
        set_hidden(document, "touch-controls", !settings.touch_controls);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {}", e).into());
        }

        log::info!("Prisci starting...");

        if let Err(e) = start().await {
            log::error!("Prisci failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(SetupError::MissingElement("document"))?;

        let canvas = mount(&document)?;

        // Initialize game
        let settings = Settings::load();
        let high_score = HighScore::load();
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        apply_settings(&document, &settings);
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings, high_score)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await?;
        game.borrow_mut().render_state = Some(render_state);

        set_text(&document, "instructions", INSTRUCTIONS);

        // Set up input handlers
        setup_keyboard(&window, game.clone());
        setup_overlay(&document, game.clone());
        setup_focus_release(&window, &document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Prisci running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game
                    .borrow_mut()
                    .controls
                    .key_down(&event.key(), event.repeat())
                {
                    // Keep Space/arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().controls.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Attach a non-passive listener that cancels the default action
    fn listen(target: &Element, event_type: &str, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if event.cancelable() {
                event.prevent_default();
            }
            handler();
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event_type,
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("Could not listen for {}: {:?}", event_type, e);
        }
        closure.forget();
    }

    fn setup_overlay(document: &Document, game: Rc<RefCell<Game>>) {
        for button in OverlayButton::ALL {
            let id = button.element_id();
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Overlay button #{} missing", id);
                continue;
            };
            // Listeners go on exactly once per element
            if el.has_attribute("data-wired") {
                continue;
            }
            let _ = el.set_attribute("data-wired", "");

            for &event_type in button.press_events() {
                let game = game.clone();
                listen(&el, event_type, move || {
                    game.borrow_mut().controls.button_down(button);
                });
            }
            for &event_type in button.release_events() {
                let game = game.clone();
                listen(&el, event_type, move || {
                    game.borrow_mut().controls.button_up(button);
                });
            }
        }
    }

    /// Held keys would stick if the key-up lands in another window
    fn setup_focus_release(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().controls.release_held();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().controls.release_held();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;
            g.fps.frame(dt as f64);

            g.update(dt);
            g.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use prisci::{HighScore, Tuning, demo};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Prisci (native) starting headless autopilot demo...");

    // Optional tuning override: prisci [tuning.json]
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut high_score = HighScore::load();
    let summary = demo::run(42, 60.0, tuning, &mut high_score);
    println!("Demo: {}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
