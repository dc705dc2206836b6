//! Flappy Senac entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, PageTransitionEvent, TouchEvent,
    };

    use flappy_senac::persistence::{BrowserStorage, KeyValueStore, MemoryStore};
    use flappy_senac::platform::animation::AnimationLoop;
    use flappy_senac::platform::haptics::VibrationHaptics;
    use flappy_senac::platform::input::is_primary_button;
    use flappy_senac::platform::{InputAction, action_for_key};
    use flappy_senac::renderer::{RenderState, build_scene};
    use flappy_senac::sim::GamePhase;
    use flappy_senac::{Game, QualityPreset, Settings};

    /// Game plus the (optional) GPU renderer drawing it
    struct App {
        game: Game,
        renderer: Option<RenderState>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.game.frame(time);
            self.render();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(renderer) = self.renderer.as_mut() else {
                return;
            };
            let vertices = build_scene(self.game.state(), self.game.settings());
            match renderer.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    renderer.resize(renderer.size.0, renderer.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let phase = self.game.phase();

            set_text(document, "hud-score", &self.game.score().to_string());
            set_text(document, "hud-best", &self.game.best_score().to_string());

            set_visible(document, "hud-fps", self.game.settings().show_fps);
            if self.game.settings().show_fps {
                set_text(document, "hud-fps", &format!("{} fps", self.game.fps()));
            }

            set_visible(document, "start-screen", phase == GamePhase::Start);
            set_visible(document, "game-over", phase == GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                set_text(document, "final-score", &self.game.score().to_string());
                set_text(document, "final-best", &self.game.best_score().to_string());
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let current = el.class_name();
            let mut classes: Vec<&str> = current
                .split_whitespace()
                .filter(|c| *c != "hidden")
                .collect();
            if !visible {
                classes.push("hidden");
            }
            let class = classes.join(" ");
            if class != current {
                el.set_class_name(&class);
            }
        }
    }

    fn open_storage() -> Box<dyn KeyValueStore> {
        match BrowserStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("LocalStorage unavailable, best score will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Senac starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window; nothing to run in");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document; nothing to run in");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, open_storage(), Box::new(VibrationHaptics));

        // ?quality=low|medium|high
        if let Ok(search) = window.location().search() {
            if let Some(quality) = QualityPreset::from_query(&search) {
                log::info!("Quality override: {}", quality.as_str());
                game.set_settings(Settings {
                    quality,
                    ..game.settings().clone()
                });
            }
        }

        let app = Rc::new(RefCell::new(App {
            game,
            renderer: None,
        }));

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok());

        match &canvas {
            Some(canvas) => {
                let dpr = window.device_pixel_ratio();
                let width = (canvas.client_width() as f64 * dpr) as u32;
                let height = (canvas.client_height() as f64 * dpr) as u32;
                canvas.set_width(width);
                canvas.set_height(height);

                match RenderState::for_canvas(canvas.clone(), width, height).await {
                    Ok(renderer) => app.borrow_mut().renderer = Some(renderer),
                    Err(e) => log::warn!("Rendering disabled: {}", e),
                }
                setup_pointer_handlers(canvas, app.clone());
            }
            None => log::warn!("No #canvas element; running without a drawing surface"),
        }

        setup_keyboard_handler(app.clone());
        setup_restart_button(&document, app.clone());

        set_visible(&document, "loading", false);

        let animation: LoopSlot = Rc::new(RefCell::new(start_loop(&app, &document)));
        if animation.borrow().is_none() {
            return;
        }
        setup_page_lifecycle(app, document, animation);

        log::info!("Flappy Senac running!");
    }

    fn setup_keyboard_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(action) = action_for_key(&event.code()) {
                // Keep space/arrows from scrolling the page
                event.prevent_default();
                app.borrow_mut().game.handle(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if is_primary_button(event.button()) {
                    app.borrow_mut().game.handle(InputAction::Jump);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch; preventing default also suppresses the emulated mousedown
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.handle(InputAction::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the click fall through as a jump
                event.stop_propagation();
                if app.borrow_mut().game.restart() {
                    log::info!("Game restarted");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Running loop, if any; owned by the page lifecycle listeners
    type LoopSlot = Rc<RefCell<Option<AnimationLoop>>>;

    fn start_loop(app: &Rc<RefCell<App>>, document: &Document) -> Option<AnimationLoop> {
        let app = app.clone();
        let document = document.clone();
        let started = AnimationLoop::start(move |time: f64| {
            let mut app = app.borrow_mut();
            app.frame(time);
            app.update_hud(&document);
        });
        match started {
            Ok(animation) => Some(animation),
            Err(e) => {
                log::error!("Could not start animation loop: {:?}", e);
                None
            }
        }
    }

    /// Stop the loop when the page is hidden. A page restored from the
    /// back/forward cache gets a fresh loop and clock.
    fn setup_page_lifecycle(app: Rc<RefCell<App>>, document: Document, animation: LoopSlot) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let animation = animation.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    if let Some(running) = animation.borrow().as_ref() {
                        running.stop();
                    }
                } else {
                    // Page is being unloaded for good
                    animation.borrow_mut().take();
                }
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let running = animation
                    .borrow()
                    .as_ref()
                    .is_some_and(|a| a.is_running());
                if running {
                    return;
                }
                app.borrow_mut().game.reset_clock();
                let restarted = start_loop(&app, &document);
                if restarted.is_some() {
                    log::info!("Animation loop resumed");
                }
                *animation.borrow_mut() = restarted;
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Senac (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let score = autopilot_session(0x5e_4ac, 60 * 60);
    log::info!("Headless demo session ended with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one session headlessly, flapping whenever the player sinks below the
/// middle of the next gap. Returns the final score.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_session(seed: u64, max_steps: u32) -> u64 {
    use flappy_senac::Game;
    use flappy_senac::consts::{PLAYER_X, SIM_DT};
    use flappy_senac::persistence::MemoryStore;
    use flappy_senac::platform::NullHaptics;

    let mut game = Game::new(seed, Box::new(MemoryStore::new()), Box::new(NullHaptics));
    game.jump();

    for step in 0..max_steps {
        let state = game.state();
        let tuning = &state.tuning;
        let target = state
            .obstacles
            .iter()
            .find(|o| o.right_edge(tuning) + tuning.hitbox_radius() >= PLAYER_X)
            .map(|o| o.gap_top + tuning.gap_height * 0.6);

        if let Some(target) = target {
            if state.player.y > target && state.player.vel >= 0.0 {
                game.jump();
            }
        }

        game.step(step as f64 * SIM_DT as f64 * 1000.0);
        if game.state().is_over() {
            break;
        }
    }

    log::info!(
        "Phase {:?}, {} obstacles on screen",
        game.phase(),
        game.state().obstacles.len()
    );
    game.score()
}
