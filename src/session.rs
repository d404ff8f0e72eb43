//! Session flow: quiz, then the throwing game, then game over
//!
//! `Session` owns the quiz and the game state and moves between them. Hosts
//! drive it with answers, fire requests and one `frame` call per display
//! refresh.

use crate::quiz::{AnswerOutcome, Quiz};
use crate::settings::Settings;
use crate::sim::{EventSink, FrameControl, GamePhase, GameState, Snapshot, TickInput, tick};

#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    quiz: Quiz,
    state: GameState,
    /// Input buffered until the next frame
    input: TickInput,
}

impl Session {
    /// New session starting with a fresh quiz
    pub fn new(settings: Settings, seed: u64) -> Self {
        log::info!(
            "New session: {} questions, {} bounce",
            settings.quiz_questions,
            settings.tuning.bounce.as_str()
        );
        let quiz = Quiz::new(seed, settings.quiz_questions);
        let state = GameState::new(settings.tuning);
        let mut session = Self {
            settings,
            quiz,
            state,
            input: TickInput::default(),
        };
        // A zero-question quiz goes straight to the game
        if session.quiz.is_finished() {
            session.begin_game();
        }
        session
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Answer the current question; the game starts after the last one
    pub fn submit_answer(&mut self, input: &str) -> AnswerOutcome {
        if self.state.phase != GamePhase::Quiz {
            return AnswerOutcome::Ignored;
        }
        let outcome = self.quiz.submit(input);
        if self.quiz.is_finished() {
            self.begin_game();
        }
        outcome
    }

    /// Hand the quiz result to the game as ammo
    fn begin_game(&mut self) {
        let ammo = self.quiz.correct();
        log::info!(
            "Quiz complete ({}/{}), starting game with {} shuriken",
            ammo,
            self.quiz.total(),
            ammo
        );
        self.input = TickInput::default();
        self.state.start_session(ammo);
    }

    /// Queue a throw for the next frame (ignored when not playing)
    pub fn fire(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.input.fire = true;
        }
    }

    /// Simulate one frame, consuming buffered input
    pub fn frame(&mut self, events: &mut dyn EventSink) -> FrameControl {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, events)
    }

    /// Replay the game with the same ammo, skipping the quiz
    pub fn replay(&mut self) {
        if self.state.phase != GamePhase::Quiz {
            self.input = TickInput::default();
            self.state.reset_session();
        }
    }

    /// Throw everything away and start over with a new quiz
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.settings.clone(), seed);
    }
}
