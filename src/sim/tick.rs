//! Per-frame simulation tick
//!
//! Core game loop: one call advances the game by exactly one frame.

use super::collision::{detect, remove_hits};
use super::events::{EventSink, GameEvent};
use super::kinematics::{advance_launcher, advance_projectile, advance_target};
use super::state::{GamePhase, GameState, prune_projectiles};

/// Input commands collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Throw a shuriken (click/tap)
    pub fire: bool,
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Halt,
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    events: &mut dyn EventSink,
) -> FrameControl {
    match state.phase {
        // Nothing to simulate yet, but the host keeps its frame running
        GamePhase::Quiz => return FrameControl::Continue,
        GamePhase::GameOver => return FrameControl::Halt,
        GamePhase::Playing => {}
    }

    if input.fire && state.spawn_projectile().is_some() {
        events.notify(&GameEvent::Fired {
            ammo_left: state.ammo,
        });
    }

    state.time_ticks += 1;

    // Move everything
    let tuning = state.tuning;
    advance_target(&mut state.target, tuning.field_width, tuning.bounce);
    advance_launcher(&mut state.launcher, &tuning);
    for projectile in &mut state.projectiles {
        advance_projectile(projectile, &tuning);
    }

    // Collisions
    let hits = detect(&state.target, &state.projectiles);
    if !hits.is_empty() {
        let (survivors, struck) = remove_hits(std::mem::take(&mut state.projectiles), &hits);
        state.projectiles = survivors;
        for projectile in struck {
            state.score += 1;
            events.notify(&GameEvent::Hit {
                pos: projectile.pos,
                score: state.score,
            });
        }
    }

    // Off-field projectiles
    let margin = tuning.prune_margin;
    let lost: Vec<_> = state
        .projectiles
        .iter()
        .filter(|p| p.pos.y < -margin)
        .map(|p| p.pos)
        .collect();
    if !lost.is_empty() {
        prune_projectiles(&mut state.projectiles, margin);
        for pos in lost {
            events.notify(&GameEvent::ProjectileLost { pos });
        }
    }

    // Out of shuriken and nothing left in the air
    if state.ammo == 0 && state.projectiles.is_empty() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} frames, final score {}",
            state.time_ticks,
            state.score
        );
        events.notify(&GameEvent::GameOver {
            final_score: state.score,
        });
        return FrameControl::Halt;
    }

    FrameControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BounceMode, Tuning};
    use crate::sim::state::Projectile;
    use glam::Vec2;
    use proptest::prelude::*;

    const FIRE: TickInput = TickInput { fire: true };

    fn playing(ammo: u32) -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.start_session(ammo);
        state
    }

    #[test]
    fn test_quiz_phase_is_idle() {
        let mut state = GameState::new(Tuning::default());
        let mut events: Vec<GameEvent> = Vec::new();
        assert_eq!(tick(&mut state, &FIRE, &mut events), FrameControl::Continue);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.target.pos.x, 400.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_fire_then_fly() {
        let mut state = playing(2);
        let mut events: Vec<GameEvent> = Vec::new();

        assert_eq!(tick(&mut state, &FIRE, &mut events), FrameControl::Continue);
        assert_eq!(state.ammo, 1);
        assert_eq!(state.projectiles.len(), 1);
        // Spawned at the launcher, then moved once
        assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 473.0));
        assert_eq!(events, vec![GameEvent::Fired { ammo_left: 1 }]);
    }

    #[test]
    fn test_hit_scores_and_removes() {
        let mut state = playing(1);
        state.projectiles.push(Projectile {
            pos: Vec2::new(400.0, 85.0),
            angle: 0.0,
        });
        let mut events: Vec<GameEvent> = Vec::new();

        assert_eq!(
            tick(&mut state, &TickInput::default(), &mut events),
            FrameControl::Continue
        );
        assert_eq!(state.score, 1);
        assert!(state.projectiles.is_empty());
        assert!(matches!(events[0], GameEvent::Hit { score: 1, .. }));
    }

    #[test]
    fn test_two_hits_in_one_frame() {
        let mut state = playing(1);
        for _ in 0..2 {
            state.projectiles.push(Projectile {
                pos: Vec2::new(400.0, 90.0),
                angle: 0.0,
            });
        }
        state.projectiles.push(Projectile {
            pos: Vec2::new(100.0, 300.0),
            angle: 0.0,
        });
        let mut events: Vec<GameEvent> = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.score, 2);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 100.0);
    }

    #[test]
    fn test_game_over_when_empty() {
        let mut state = playing(0);
        let mut events: Vec<GameEvent> = Vec::new();

        assert_eq!(
            tick(&mut state, &TickInput::default(), &mut events),
            FrameControl::Halt
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 0 }]);

        // Further ticks do nothing
        let ticks = state.time_ticks;
        assert_eq!(tick(&mut state, &FIRE, &mut events), FrameControl::Halt);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_game_waits_for_projectiles_in_flight() {
        let mut state = playing(1);
        let mut events: Vec<GameEvent> = Vec::new();
        tick(&mut state, &FIRE, &mut events);
        assert_eq!(state.ammo, 0);
        assert_eq!(state.phase, GamePhase::Playing);

        let mut frames = 1;
        while tick(&mut state, &TickInput::default(), &mut events) == FrameControl::Continue {
            frames += 1;
            assert!(frames < 1000, "loop never terminated");
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_lost_projectile_reported() {
        let mut state = playing(1);
        state.projectiles.push(Projectile {
            pos: Vec2::new(100.0, -14.0),
            angle: 0.0,
        });
        let mut events: Vec<GameEvent> = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!(state.projectiles.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::ProjectileLost {
                pos: Vec2::new(100.0, -21.0)
            }]
        );
    }

    proptest! {
        #[test]
        fn prop_target_stays_near_field(
            start in 30.0f32..770.0,
            speed in 0.5f32..20.0,
            leftward in any::<bool>(),
            frames in 1usize..600,
        ) {
            let mut state = playing(1);
            state.target.pos.x = start;
            state.target.dx = if leftward { -speed } else { speed };
            // Keep a projectile parked so the game never ends
            state.projectiles.push(Projectile { pos: Vec2::new(0.0, 1.0e9), angle: 0.0 });

            let (r, w) = (state.target.radius, state.tuning.field_width);
            for _ in 0..frames {
                tick(&mut state, &TickInput::default(), &mut crate::sim::NullSink);
                let x = state.target.pos.x;
                prop_assert!(x >= r - speed - 1e-3 && x <= w - r + speed + 1e-3, "x = {}", x);
            }
        }

        #[test]
        fn prop_clamp_mode_strictly_inside(
            start in 30.0f32..770.0,
            speed in 0.5f32..20.0,
            frames in 1usize..600,
        ) {
            let mut state = playing(1);
            state.tuning.bounce = BounceMode::Clamp;
            state.target.pos.x = start;
            state.target.dx = speed;
            state.projectiles.push(Projectile { pos: Vec2::new(0.0, 1.0e9), angle: 0.0 });

            let (r, w) = (state.target.radius, state.tuning.field_width);
            for _ in 0..frames {
                tick(&mut state, &TickInput::default(), &mut crate::sim::NullSink);
                let x = state.target.pos.x;
                prop_assert!(x >= r && x <= w - r, "x = {}", x);
            }
        }

        #[test]
        fn prop_score_and_ammo_monotonic(
            ammo in 0u32..15,
            fires in proptest::collection::vec(any::<bool>(), 0..400),
        ) {
            let mut state = playing(ammo);
            let mut events: Vec<GameEvent> = Vec::new();
            let (mut last_score, mut last_ammo) = (state.score, state.ammo);

            for fire in fires {
                tick(&mut state, &TickInput { fire }, &mut events);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.ammo <= last_ammo);
                prop_assert!(state.score <= ammo);
                last_score = state.score;
                last_ammo = state.ammo;
            }

            let fired = events
                .iter()
                .filter(|e| matches!(e, GameEvent::Fired { .. }))
                .count() as u32;
            prop_assert_eq!(state.ammo + fired, ammo);
        }

        #[test]
        fn prop_prune_idempotent(ys in proptest::collection::vec(-100.0f32..600.0, 0..40)) {
            let mut projectiles: Vec<Projectile> = ys
                .iter()
                .map(|&y| Projectile { pos: Vec2::new(0.0, y), angle: 0.0 })
                .collect();
            prune_projectiles(&mut projectiles, 20.0);
            let once = projectiles.clone();
            prop_assert_eq!(prune_projectiles(&mut projectiles, 20.0), 0);
            prop_assert_eq!(once, projectiles);
        }
    }
}
