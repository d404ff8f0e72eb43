//! Notifications emitted by the simulation
//!
//! The simulation pushes events into an [`EventSink`]; sinks react (sound,
//! HUD popups) but cannot hand anything back.

use glam::Vec2;
use serde::Serialize;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// A shuriken left the launcher
    Fired { ammo_left: u32 },
    /// A shuriken struck the target
    Hit { pos: Vec2, score: u32 },
    /// A shuriken flew off the top of the field
    ProjectileLost { pos: Vec2 },
    /// No ammo and nothing in flight; the loop has stopped
    GameOver { final_score: u32 },
}

/// Receiver for [`GameEvent`]s (fire-and-forget)
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Collects events, mostly for tests and the native demo
impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Forwards each event to two sinks in order
pub struct Fanout<'a, A: EventSink + ?Sized, B: EventSink + ?Sized>(pub &'a mut A, pub &'a mut B);

impl<A: EventSink + ?Sized, B: EventSink + ?Sized> EventSink for Fanout<'_, A, B> {
    fn notify(&mut self, event: &GameEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}
