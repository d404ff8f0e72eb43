//! Shuriken Dojo entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use shuriken_dojo::audio::{AudioManager, MusicTrack, SoundEffect};
    use shuriken_dojo::renderer::CanvasRenderer;
    use shuriken_dojo::sim::{Fanout, FrameControl, GameEvent, GamePhase};
    use shuriken_dojo::{AnswerOutcome, Session, Settings};

    /// How long the score counter keeps its pop animation
    const SCORE_POP_MS: i32 = 200;
    /// How long the hit popup stays up, and how long it takes to fade
    const POPUP_SHOW_MS: i32 = 800;
    const POPUP_FADE_MS: i32 = 300;

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        /// A frame callback is pending
        loop_running: bool,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(settings, seed),
                renderer: None,
                audio,
                loop_running: false,
            }
        }

        /// Run one simulation frame and draw it
        fn frame(&mut self) -> (FrameControl, Vec<GameEvent>) {
            let mut events: Vec<GameEvent> = Vec::new();
            let Game { session, audio, .. } = &mut *self;
            let control = session.frame(&mut Fanout(&mut events, audio));

            if let Some(renderer) = &self.renderer {
                renderer.render(&self.session.snapshot());
            }
            (control, events)
        }

        /// Size the canvas to its container
        fn resize_canvas(&mut self) {
            let Some(renderer) = self.renderer.as_mut() else {
                return;
            };
            let Some(container) = document().and_then(|d| d.get_element_by_id("game-container"))
            else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            renderer.resize(rect.width().max(1.0) as u32, rect.height().max(1.0) as u32);
            renderer.render(&self.session.snapshot());
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = self.session.state();
            set_text("score", &state.score.to_string());
            set_text("shuriken-count", &state.ammo.to_string());
        }

        /// Show the current question, or nothing once the quiz is over
        fn show_question(&self) {
            let quiz = self.session.quiz();
            if let Some(question) = quiz.current() {
                set_text("quiz-question", &question.to_string());
                set_text(
                    "quiz-progress",
                    &format!("{} / {}", quiz.question_number(), quiz.total()),
                );
            }
            if let Some(input) = answer_input() {
                input.set_value("");
                let _ = input.focus();
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str, on: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let list = el.class_list();
            let _ = if on {
                list.add_1(class)
            } else {
                list.remove_1(class)
            };
        }
    }

    fn answer_input() -> Option<HtmlInputElement> {
        document()?
            .get_element_by_id("quiz-answer")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    /// Run `f` once after `ms` milliseconds
    fn after(ms: i32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(f);
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        ) {
            log::warn!("setTimeout failed: {:?}", e);
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shuriken Dojo starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let logical = glam::Vec2::new(settings.tuning.field_width, settings.tuning.field_height);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("Session initialized with seed: {}", seed);

        let document = document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        match CanvasRenderer::new(canvas.clone(), logical) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Canvas unavailable, rendering disabled: {:?}", e),
        }

        setup_quiz_handlers(game.clone());
        setup_canvas_input(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_replay_button(game.clone());
        setup_resize(game.clone());

        show_quiz(&game.borrow());

        // A zero-question quiz skips straight to the game
        if game.borrow().session.phase() == GamePhase::Playing {
            enter_game(game);
        }

        log::info!("Shuriken Dojo running!");
    }

    fn show_quiz(g: &Game) {
        set_class("quiz-container", "hidden", false);
        set_class("game-container", "hidden", true);
        set_class("game-over", "hidden", true);
        g.show_question();
    }

    /// Quiz finished: reveal the field and start the frame loop
    fn enter_game(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            set_class("quiz-container", "hidden", true);
            set_class("game-container", "hidden", false);
            // The container has a size only once visible
            g.resize_canvas();
            g.update_hud();
            g.audio.play_music(MusicTrack::Battle);
            if g.loop_running {
                return;
            }
            g.loop_running = true;
        }
        request_animation_frame(game);
    }

    fn submit_answer(game: &Rc<RefCell<Game>>) {
        let Some(input) = answer_input() else {
            return;
        };
        let value = input.value();

        let started = {
            let mut g = game.borrow_mut();
            g.audio.unlock();
            g.audio.play_music(MusicTrack::Quiz);

            match g.session.submit_answer(&value) {
                AnswerOutcome::Ignored => return,
                AnswerOutcome::Correct => g.audio.play(SoundEffect::Correct),
                AnswerOutcome::Wrong { expected } => {
                    log::debug!("Wrong answer {:?}, expected {}", value, expected);
                    g.audio.play(SoundEffect::Wrong);
                }
            }

            let started = g.session.phase() == GamePhase::Playing;
            if !started {
                g.show_question();
            }
            started
        };

        if started {
            enter_game(game.clone());
        }
    }

    fn setup_quiz_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("quiz-submit") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                submit_answer(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = document.get_element_by_id("quiz-answer") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    submit_answer(&game);
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_canvas_input(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio.unlock();
            g.session.fire();
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("restart-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            let playing = {
                let mut g = game.borrow_mut();
                g.session.restart(seed);
                log::info!("Session restarted with seed: {}", seed);
                g.update_hud();
                show_quiz(&g);
                let playing = g.session.phase() == GamePhase::Playing;
                if !playing {
                    g.audio.play_music(MusicTrack::Quiz);
                }
                playing
            };
            // A zero-question quiz skips straight to the game
            if playing {
                enter_game(game.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Same shuriken again, without another quiz
    fn setup_replay_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("replay-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            {
                let mut g = game.borrow_mut();
                g.session.replay();
                log::info!("Replaying with {} shuriken", g.session.state().ammo);
            }
            set_class("game-over", "hidden", true);
            enter_game(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let control = {
            let mut g = game.borrow_mut();
            let (control, events) = g.frame();
            g.update_hud();
            for event in &events {
                show_event(event);
            }
            if control == FrameControl::Halt {
                g.loop_running = false;
            }
            control
        };

        // Game over stops the loop for good; restart schedules a new one
        if control == FrameControl::Continue {
            request_animation_frame(game);
        }
    }

    /// Visual reactions to game events (sound is handled by the audio sink)
    fn show_event(event: &GameEvent) {
        match event {
            GameEvent::Hit { .. } => {
                set_class("score", "score-pop", true);
                after(SCORE_POP_MS, || set_class("score", "score-pop", false));

                set_class("popup-container", "hidden", false);
                set_class("popup-container", "show", true);
                after(POPUP_SHOW_MS, || {
                    set_class("popup-container", "show", false);
                    after(POPUP_FADE_MS, || set_class("popup-container", "hidden", true));
                });
            }
            GameEvent::GameOver { final_score } => {
                set_text("final-score", &final_score.to_string());
                set_class("game-over", "hidden", false);
                log::info!("Game over - final score {}", final_score);
            }
            GameEvent::Fired { .. } | GameEvent::ProjectileLost { .. } => {}
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
    log::info!("Shuriken Dojo (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session: scripted quiz answers, then throws on a timer
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use shuriken_dojo::sim::{FrameControl, GameEvent};
    use shuriken_dojo::{Session, Settings};

    /// Frames between throws
    const THROW_INTERVAL: u64 = 20;
    /// Safety cap on simulated frames
    const MAX_FRAMES: u64 = 10_000;

    pub fn run() {
        let settings = Settings::load();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut session = Session::new(settings, seed);
        log::info!("Demo session seed: {}", seed);

        // Miss every third question
        let mut asked = 0;
        while let Some(question) = session.quiz().current().copied() {
            asked += 1;
            let answer = if asked % 3 == 0 {
                question.answer() + 1
            } else {
                question.answer()
            };
            let outcome = session.submit_answer(&answer.to_string());
            log::info!("{} {} -> {:?}", question, answer, outcome);
        }

        let mut events: Vec<GameEvent> = Vec::new();
        let mut frame = 0;
        loop {
            if frame % THROW_INTERVAL == 0 {
                session.fire();
            }
            if session.frame(&mut events) == FrameControl::Halt {
                break;
            }
            frame += 1;
            if frame >= MAX_FRAMES {
                log::warn!("Demo stopped after {} frames", frame);
                break;
            }
        }

        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { .. }))
            .count();
        log::info!("Demo finished after {} frames with {} hits", frame, hits);

        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}
