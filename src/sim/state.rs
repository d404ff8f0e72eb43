//! Game state and core simulation types
//!
//! `GameState` owns every entity plus the session counters. The host only
//! ever reads it through [`Snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Answering questions; the playfield is idle
    Quiz,
    /// Active gameplay
    Playing,
    /// Out of shuriken and nothing left in flight
    GameOver,
}

/// The bouncing target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal velocity (units per frame)
    pub dx: f32,
}

impl Target {
    /// Target at the start of a session: centred horizontally, moving right
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.target_y),
            radius: tuning.target_radius,
            dx: tuning.target_speed,
        }
    }
}

/// Fixed, spinning origin of every throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    /// Accumulated rotation (radians, never wrapped)
    pub angle: f32,
}

impl Launcher {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0,
                tuning.field_height * crate::consts::LAUNCHER_HEIGHT_FRACTION,
            ),
            angle: 0.0,
        }
    }
}

/// A thrown shuriken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub angle: f32,
}

impl Projectile {
    /// Spawn at the launcher, inheriting its current spin
    pub fn from_launcher(launcher: &Launcher) -> Self {
        Self {
            pos: launcher.pos,
            angle: launcher.angle,
        }
    }
}

/// Remove projectiles that have left the field past the top edge.
///
/// Returns how many were removed. Running it twice in a row removes nothing
/// the second time.
pub fn prune_projectiles(projectiles: &mut Vec<Projectile>, margin: f32) -> usize {
    let before = projectiles.len();
    projectiles.retain(|p| p.pos.y >= -margin);
    before - projectiles.len()
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Hits this session
    pub score: u32,
    /// Shuriken left to throw
    pub ammo: u32,
    /// Ammo granted at session start (restored by reset)
    pub initial_ammo: u32,
    /// Frames simulated this session
    pub time_ticks: u64,
    pub target: Target,
    pub launcher: Launcher,
    /// Live projectiles in throw order
    pub projectiles: Vec<Projectile>,
}

impl GameState {
    /// Fresh state waiting for the quiz to finish
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: GamePhase::Quiz,
            score: 0,
            ammo: 0,
            initial_ammo: 0,
            time_ticks: 0,
            target: Target::new(&tuning),
            launcher: Launcher::new(&tuning),
            projectiles: Vec::new(),
        }
    }

    /// Begin play with the ammo earned in the quiz
    pub fn start_session(&mut self, initial_ammo: u32) {
        self.initial_ammo = initial_ammo;
        self.reset_session();
        log::debug!("Session started with {} shuriken", initial_ammo);
    }

    /// Put every entity and counter back to its start-of-session value
    pub fn reset_session(&mut self) {
        self.target = Target::new(&self.tuning);
        self.launcher = Launcher::new(&self.tuning);
        self.projectiles.clear();
        self.score = 0;
        self.ammo = self.initial_ammo;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Throw a shuriken if there is one to throw.
    ///
    /// Only valid while playing; otherwise, or with no ammo left, nothing
    /// happens and `None` is returned.
    pub fn spawn_projectile(&mut self) -> Option<Projectile> {
        if self.phase != GamePhase::Playing || self.ammo == 0 {
            return None;
        }
        self.ammo -= 1;
        let projectile = Projectile::from_launcher(&self.launcher);
        self.projectiles.push(projectile);
        Some(projectile)
    }

    /// True while frames should keep being simulated
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Read-only view for rendering and HUD updates
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            running: self.is_running(),
            score: self.score,
            ammo: self.ammo,
            field: Vec2::new(self.tuning.field_width, self.tuning.field_height),
            target: self.target,
            launcher: self.launcher,
            projectiles: self.projectiles.clone(),
        }
    }
}

/// Post-tick view of the game handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub running: bool,
    pub score: u32,
    pub ammo: u32,
    /// Logical field size
    pub field: Vec2,
    pub target: Target,
    pub launcher: Launcher,
    pub projectiles: Vec<Projectile>,
}
