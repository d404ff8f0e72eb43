//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per display frame, fully synchronous
//! - State is only mutated by `tick` and the session controls
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use collision::{detect, point_hits_target, remove_hits};
pub use events::{EventSink, Fanout, GameEvent, NullSink};
pub use kinematics::{advance_launcher, advance_projectile, advance_target};
pub use state::{
    GamePhase, GameState, Launcher, Projectile, Snapshot, Target, prune_projectiles,
};
pub use tick::{FrameControl, TickInput, tick};
