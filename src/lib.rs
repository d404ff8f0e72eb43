//! Shuriken Dojo - answer arithmetic questions, then throw the shuriken you earned
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, collisions, game state)
//! - `quiz`: Arithmetic quiz that decides the starting ammo
//! - `session`: Quiz → game → game over flow
//! - `settings`: Tuning, audio and quiz configuration
//! - `renderer`: Canvas 2D drawing (shape math everywhere, canvas on wasm)
//! - `audio`: Web Audio sound effects and music (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod quiz;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use quiz::{AnswerOutcome, Quiz};
pub use session::Session;
pub use settings::{BounceMode, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (the canvas is scaled to fit)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Target defaults
    pub const TARGET_Y: f32 = 80.0;
    pub const TARGET_RADIUS: f32 = 30.0;
    /// Horizontal target speed (units per frame)
    pub const TARGET_SPEED: f32 = 5.0;

    /// Launcher sits at this fraction of the field height
    pub const LAUNCHER_HEIGHT_FRACTION: f32 = 0.8;
    /// Launcher spin (radians per frame, cosmetic)
    pub const LAUNCHER_SPIN: f32 = 0.02;

    /// Upward projectile speed (units per frame)
    pub const PROJECTILE_SPEED: f32 = 7.0;
    /// Projectile spin (radians per frame)
    pub const PROJECTILE_SPIN: f32 = 0.2;
    /// Projectiles are pruned once `y < -PRUNE_MARGIN`
    pub const PRUNE_MARGIN: f32 = 20.0;

    /// Drawn size of a shuriken sprite
    pub const SPRITE_SIZE: f32 = 40.0;

    /// Questions per quiz
    pub const QUIZ_QUESTIONS: u32 = 10;
    /// Largest operand (and largest sum) the quiz asks about
    pub const QUIZ_MAX_OPERAND: u32 = 10;
}
