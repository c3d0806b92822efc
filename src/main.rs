//! Chroma Drop entry point
//!
//! In the browser this wires page events into the game and runs the animation
//! loop. Natively it plays a short headless demo and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use chroma_drop::Settings;
    use chroma_drop::audio::{AudioGate, SoundEffect, WebAudio};
    use chroma_drop::consts::MAX_FRAME_DT;
    use chroma_drop::hud::{HudSnapshot, present};
    use chroma_drop::input::InputManager;
    use chroma_drop::platform::dom::{self, DomHud};
    use chroma_drop::renderer::{Canvas2dSurface, Theme, draw_frame, fit_canvas_size};
    use chroma_drop::sim::{COLORS, Game, GameConfig, GameEvent, GamePhase};

    /// Application context: everything the page callbacks share
    struct App {
        game: Game,
        settings: Settings,
        hud: DomHud,
        audio: AudioGate<WebAudio>,
        surface: Canvas2dSurface,
        theme: Theme,
        last_time: f64,
        prev_hud: Option<HudSnapshot>,
        /// Autoplay toggled with `i`
        demo: bool,
    }

    impl App {
        fn new(settings: Settings, canvas: HtmlCanvasElement, document: &Document) -> Result<Self, JsValue> {
            let mut surface = Canvas2dSurface::new(canvas)?;
            let (width, height) =
                fit_canvas_size(dom::available_width(surface.canvas()), settings.max_canvas_width);
            surface.resize(width as u32, height as u32);

            let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            let game = Game::new(GameConfig::from_settings(&settings, width, height), seed);
            log::info!("Game initialized {}x{} with seed: {}", width, height, seed);

            Ok(Self {
                game,
                hud: DomHud::new(document),
                audio: AudioGate::new(WebAudio::new(settings.effective_volume())),
                surface,
                theme: Theme::from_settings(&settings),
                settings,
                last_time: 0.0,
                prev_hud: None,
                demo: false,
            })
        }

        /// Refit the canvas. Only before the first run, so no playfield is lost.
        fn resize(&mut self) {
            if self.game.phase != GamePhase::Start {
                return;
            }
            let (width, height) = fit_canvas_size(
                dom::available_width(self.surface.canvas()),
                self.settings.max_canvas_width,
            );
            if (width, height) == (self.game.config.width, self.game.config.height) {
                return;
            }
            self.surface.resize(width as u32, height as u32);
            let seed = self.settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            self.game = Game::new(GameConfig::from_settings(&self.settings, width, height), seed);
            log::debug!("Canvas resized to {}x{}", width, height);
        }

        fn on_key(&mut self, key: &str) {
            if key == "i" {
                self.demo = !self.demo;
                log::info!("Demo mode: {}", self.demo);
                return;
            }
            self.game.handle_key(key);
            self.flush_events();
        }

        /// Map simulation events to sound and log lines
        fn flush_events(&mut self) {
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::GameOver { score, best_combo } => {
                        log::info!("Final score {} (best combo x{})", score, best_combo);
                    }
                    other => log::trace!("{:?}", other),
                }
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = time;

            if self.demo {
                if let Some(key) = self.game.suggest_key() {
                    self.game.attempt_match(key);
                }
            }
            self.game.update(dt);
            self.flush_events();

            draw_frame(&self.game, &mut self.surface, &self.theme);

            let snapshot = HudSnapshot::capture(&self.game);
            present(&mut self.hud, &snapshot, self.prev_hud.as_ref());
            self.prev_hud = Some(snapshot);
        }

        /// Browsers only allow audio after a gesture
        fn gesture(&mut self) {
            self.audio.enable();
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.game.pause() {
                log::info!("Auto-paused ({})", reason);
                self.flush_events();
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        if let Err(e) = console_log::init_with_level(settings.log_level()) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {}", e)));
        }

        log::info!("Chroma Drop starting...");

        let document = dom::document()?;
        let canvas = dom::canvas(&document)?;
        let input = InputManager::new().with_repeat_suppression(settings.ignore_key_repeat);
        let app = Rc::new(RefCell::new(App::new(settings, canvas, &document)?));
        let input = Rc::new(RefCell::new(input));

        subscribe_keys(&app, &mut input.borrow_mut());
        setup_keyboard(&app, &input)?;
        setup_buttons(&app, &document)?;
        setup_auto_pause(&app, &input, &document)?;
        setup_resize(&app)?;

        request_animation_frame(app)?;

        log::info!("Chroma Drop running!");
        Ok(())
    }

    fn subscribe_keys(app: &Rc<RefCell<App>>, input: &mut InputManager) {
        let keys = COLORS
            .iter()
            .map(|c| c.key.to_string())
            .chain([" ", "enter", "i"].map(String::from));
        for key in keys {
            let app = app.clone();
            input.subscribe(&key, move |key: &str| app.borrow_mut().on_key(key));
        }
    }

    fn setup_keyboard(app: &Rc<RefCell<App>>, input: &Rc<RefCell<InputManager>>) -> Result<(), JsValue> {
        let window = dom::window()?;

        {
            let app = app.clone();
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().gesture();
                let key = event.key();
                let mut input = input.borrow_mut();
                // Keep space from scrolling the page, suppressed repeats included
                if input.is_subscribed(&key) {
                    event.prevent_default();
                }
                input.key_down(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                input.borrow_mut().key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(app: &Rc<RefCell<App>>, document: &Document) -> Result<(), JsValue> {
        let buttons: [(&str, fn(&mut Game) -> bool); 3] = [
            ("start-btn", Game::start),
            ("restart-btn", Game::start),
            ("resume-btn", Game::resume),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut app = app.borrow_mut();
                app.gesture();
                action(&mut app.game);
                app.flush_events();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(
        app: &Rc<RefCell<App>>,
        input: &Rc<RefCell<InputManager>>,
        document: &Document,
    ) -> Result<(), JsValue> {
        let window = dom::window()?;

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let input = input.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    input.borrow_mut().release_all();
                    app.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let app = app.clone();
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                input.borrow_mut().release_all();
                app.borrow_mut().auto_pause("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        dom::window()?.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        dom::window()?.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);

        if let Err(e) = request_animation_frame(app) {
            log::error!("Animation loop stopped: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chroma Drop (native) starting...");
    log::info!("Native mode has no window - serve the wasm build for the playable version");

    let report = demo::run(&chroma_drop::Settings::load(), demo::DEMO_SECONDS);
    println!("\nHeadless demo ({:.0}s simulated):", demo::DEMO_SECONDS);
    println!("  score       {}", report.score);
    println!("  best combo  x{}", report.best_combo);
    println!("  level       {}", report.level);
    println!("  hits        {}", report.hits);
    println!("  escaped     {}", report.escaped);
    println!("  lives left  {}", report.lives);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use chroma_drop::Settings;
    use chroma_drop::consts::{ASPECT_H, ASPECT_W};
    use chroma_drop::sim::{Game, GameConfig, GameEvent, GamePhase};

    pub const DEMO_SECONDS: f32 = 90.0;
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Autoplay presses at most once per this many frames
    const REACTION_FRAMES: u32 = 9;

    #[derive(Debug, Default)]
    pub struct Report {
        pub score: u64,
        pub best_combo: u32,
        pub level: u32,
        pub hits: u32,
        pub escaped: u32,
        pub lives: u8,
    }

    /// Autoplay a run on a virtual canvas
    pub fn run(settings: &Settings, seconds: f32) -> Report {
        let width = settings.max_canvas_width;
        let height = width * ASPECT_H / ASPECT_W;
        let seed = settings.seed.unwrap_or(0x00C0_FFEE);
        let mut game = Game::new(GameConfig::from_settings(settings, width, height), seed);
        game.start();
        log::info!("Demo run with seed {}", seed);

        let mut report = Report::default();
        let frames = (seconds / FRAME_DT) as u32;
        for frame in 0..frames {
            if frame % REACTION_FRAMES == 0 {
                if let Some(key) = game.suggest_key() {
                    game.attempt_match(key);
                }
            }
            game.update(FRAME_DT);

            for event in game.drain_events() {
                match event {
                    GameEvent::Hit { .. } => report.hits += 1,
                    GameEvent::Escaped { .. } => report.escaped += 1,
                    GameEvent::LevelUp { level } => log::info!("Level {}", level),
                    GameEvent::GameOver { score, .. } => log::info!("Game over at {}", score),
                    _ => {}
                }
            }
            if game.phase == GamePhase::GameOver {
                break;
            }
        }

        report.score = game.score.score;
        report.best_combo = game.score.best_combo;
        report.level = game.difficulty.level.floor() as u32;
        report.lives = game.lives;
        report
    }
}
