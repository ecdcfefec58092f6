//! Gauntlet Run entry point
//!
//! Platform wiring only - the simulation lives in the library. The browser
//! build owns the requestAnimationFrame loop, input listeners, and HUD; the
//! native build runs a short headless demo so the non-wasm path stays honest.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gauntlet_run::consts::*;
    use gauntlet_run::input::{self, ActionQueue};
    use gauntlet_run::scene::{RenderSink, SceneCommand};
    use gauntlet_run::sim::{GamePhase, GameState, tick};
    use gauntlet_run::{SessionScores, Tuning};

    /// Sink forwarding command batches to an optional `window.__gauntletRender`
    /// JS hook as JSON. Fire-and-forget: with no hook installed, batches are
    /// dropped and the game still runs (HUD only).
    struct HookSink {
        hook: Option<js_sys::Function>,
    }

    impl HookSink {
        fn attach() -> Self {
            let hook = web_sys::window()
                .map(JsValue::from)
                .and_then(|w| {
                    js_sys::Reflect::get(&w, &JsValue::from_str("__gauntletRender")).ok()
                })
                .and_then(|v| v.dyn_into::<js_sys::Function>().ok());
            if hook.is_none() {
                log::warn!("No __gauntletRender hook installed; scene commands will be dropped");
            }
            Self { hook }
        }
    }

    impl RenderSink for HookSink {
        fn apply(&mut self, commands: &[SceneCommand]) {
            let Some(hook) = &self.hook else {
                return;
            };
            if commands.is_empty() {
                return;
            }
            match serde_json::to_string(commands) {
                Ok(json) => {
                    let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
                }
                Err(e) => log::warn!("Failed to encode scene commands: {e}"),
            }
        }

        fn teardown(&mut self) {
            self.hook = None;
        }
    }

    /// Game instance holding all host state
    struct Game {
        state: GameState,
        queue: ActionQueue,
        scores: SessionScores,
        sink: Option<Box<dyn RenderSink>>,
        accumulator: f32,
        last_time: f64,
        last_phase: GamePhase,
        alive: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, sink: Box<dyn RenderSink>) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                queue: ActionQueue::new(),
                scores: SessionScores::new(),
                sink: Some(sink),
                accumulator: 0.0,
                last_time: 0.0,
                last_phase: GamePhase::Idle,
                alive: true,
            }
        }

        /// Run simulation ticks for this frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let actions = self.queue.drain();
                tick(&mut self.state, &actions);
                if let Some(sink) = self.sink.as_mut() {
                    sink.apply(&self.state.commands);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Feed finished runs into the session table
            let phase = self.state.phase;
            if phase == GamePhase::GameOver && self.last_phase == GamePhase::Playing {
                self.scores.record(
                    self.state.score,
                    self.state.gems_collected,
                    self.state.run_ticks,
                );
            }
            self.last_phase = phase;
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.state.hud();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&hud.high_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("start-screen") {
                let _ = el.set_attribute(
                    "class",
                    if hud.phase == GamePhase::Idle { "" } else { "hidden" },
                );
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                if hud.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&hud.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-best") {
                        best_el.set_text_content(Some(&hud.high_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Stop the loop and release the render sink. Safe to call twice.
        fn dispose(&mut self) {
            self.alive = false;
            if let Some(mut sink) = self.sink.take() {
                sink.teardown();
                log::info!("Renderer released");
            }
        }
    }

    /// Tuning overrides from an optional `window.__gauntletTuning` JSON string
    fn load_tuning() -> Tuning {
        let overrides = web_sys::window()
            .map(JsValue::from)
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__gauntletTuning")).ok())
            .and_then(|v| v.as_string());

        match overrides {
            Some(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::error!("Bad tuning overrides ({e}), using defaults");
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Gauntlet Run starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window; not starting");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document; not starting");
            return;
        };

        // The rendering collaborator needs a surface; without one we skip
        // initialization entirely instead of erroring
        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok());
        let Some(canvas) = canvas else {
            log::error!("No #canvas element; render surface missing, not starting");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning();
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            tuning,
            Box::new(HookSink::attach()),
        )));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_teardown(game.clone());

        request_animation_frame(game);

        log::info!("Gauntlet Run running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                if let Some(action) = input::map_key(&event.key(), phase) {
                    g.queue.push(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click (primary action)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                if let Some(action) = input::map_pointer(phase) {
                    g.queue.push(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch tap (primary action)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                if let Some(action) = input::map_pointer(phase) {
                    g.queue.push(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().dispose();
        });
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let alive = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
            g.alive
        };

        // A disposed game schedules no further ticks
        if alive {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gauntlet Run (native) starting...");
    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted run: a trivial auto-player jumps at nearby obstacles.
/// Exercises the full loop (spawn, motion, collision, scoring) off the web.
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use gauntlet_run::Tuning;
    use gauntlet_run::scene::{RecordingSink, RenderSink};
    use gauntlet_run::sim::{Action, GamePhase, GameState, tick};

    let mut state = GameState::new(0xC0FFEE, Tuning::default());
    let mut sink = RecordingSink::new();

    tick(&mut state, &[Action::Start]);
    sink.apply(&state.commands);

    for _ in 0..3600 {
        let lane = state.player.lane;
        let danger_close = state
            .obstacles
            .iter()
            .any(|o| o.lane == lane && o.depth > -6.0 && o.depth < 0.0);
        let actions: Vec<Action> = if danger_close && !state.player.airborne {
            vec![Action::Jump]
        } else {
            Vec::new()
        };

        tick(&mut state, &actions);
        sink.apply(&state.commands);

        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    sink.teardown();

    let hud = state.hud();
    log::info!(
        "Demo run finished: score {}, best {}, {} ticks, {} command frames",
        hud.score,
        hud.high_score,
        state.run_ticks,
        sink.frames.len()
    );
}
