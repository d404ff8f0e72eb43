//! Game settings and tuning
//!
//! Read once at startup from a JSON blob (a `#game-settings` element on the
//! page, or the `SHURIKEN_DOJO_SETTINGS` environment variable natively).
//! Nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the target behaves when it crosses a side wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Move, then reflect velocity; the target may poke past the wall for one frame
    #[default]
    Overshoot,
    /// Move, reflect, and clamp the position back inside the field
    Clamp,
}

impl BounceMode {
    /// Name as written in settings JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            BounceMode::Overshoot => "overshoot",
            BounceMode::Clamp => "clamp",
        }
    }
}

/// Simulation tuning (all speeds are per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub target_y: f32,
    pub target_radius: f32,
    pub target_speed: f32,
    pub launcher_spin: f32,
    pub projectile_speed: f32,
    pub projectile_spin: f32,
    pub prune_margin: f32,
    pub bounce: BounceMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            target_y: TARGET_Y,
            target_radius: TARGET_RADIUS,
            target_speed: TARGET_SPEED,
            launcher_spin: LAUNCHER_SPIN,
            projectile_speed: PROJECTILE_SPEED,
            projectile_spin: PROJECTILE_SPIN,
            prune_margin: PRUNE_MARGIN,
            bounce: BounceMode::Overshoot,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation tuning
    pub tuning: Tuning,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Quiz ===
    /// Number of questions before the game starts
    pub quiz_questions: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            quiz_questions: QUIZ_QUESTIONS,
        }
    }
}

impl Settings {
    /// Environment variable consulted by the native build
    pub const ENV_VAR: &'static str = "SHURIKEN_DOJO_SETTINGS";

    /// Element id consulted by the web build
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp out-of-range values into something playable
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);

        let t = &mut self.tuning;
        let defaults = Tuning::default();
        if !(t.field_width.is_finite() && t.field_width > 0.0) {
            t.field_width = defaults.field_width;
        }
        if !(t.field_height.is_finite() && t.field_height > 0.0) {
            t.field_height = defaults.field_height;
        }
        // The target must fit between the walls
        if !(t.target_radius.is_finite() && t.target_radius > 0.0)
            || t.target_radius * 2.0 >= t.field_width
        {
            t.target_radius = defaults.target_radius.min(t.field_width / 4.0);
        }
        if !t.prune_margin.is_finite() || t.prune_margin < 0.0 {
            t.prune_margin = defaults.prune_margin;
        }
        // Projectiles must climb off the field for the game to end
        if !(t.projectile_speed.is_finite() && t.projectile_speed > 0.0) {
            t.projectile_speed = defaults.projectile_speed;
        }
        if !t.target_speed.is_finite() {
            t.target_speed = defaults.target_speed;
        }
        if !t.launcher_spin.is_finite() {
            t.launcher_spin = defaults.launcher_spin;
        }
        if !t.projectile_spin.is_finite() {
            t.projectile_spin = defaults.projectile_spin;
        }
        self
    }

    /// Parse `json` if present, falling back to defaults on error
    pub fn from_optional_json(json: Option<&str>) -> Self {
        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings JSON ({}), using defaults", e);
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the `#game-settings` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_optional_json(json.as_deref())
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_optional_json(json.as_deref())
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}
