//! Per-frame motion of the target, launcher and projectiles

use super::state::{Launcher, Projectile, Target};
use crate::settings::{BounceMode, Tuning};

/// Slide the target horizontally and bounce it off the side walls.
///
/// The wall test runs after the move, so in `Overshoot` mode the target can
/// sit up to `|dx|` past a wall for one frame before coming back.
pub fn advance_target(target: &mut Target, field_width: f32, bounce: BounceMode) {
    target.pos.x += target.dx;

    let past_right = target.pos.x + target.radius > field_width;
    let past_left = target.pos.x - target.radius < 0.0;
    if past_right || past_left {
        target.dx = -target.dx;

        if bounce == BounceMode::Clamp {
            target.pos.x = target
                .pos
                .x
                .clamp(target.radius, field_width - target.radius);
        }
    }
}

/// Fly straight up while spinning
#[inline]
pub fn advance_projectile(projectile: &mut Projectile, tuning: &Tuning) {
    projectile.pos.y -= tuning.projectile_speed;
    projectile.angle += tuning.projectile_spin;
}

/// Spin the launcher (cosmetic, angle grows without bound)
#[inline]
pub fn advance_launcher(launcher: &mut Launcher, tuning: &Tuning) {
    launcher.angle += tuning.launcher_spin;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn target(x: f32, dx: f32) -> Target {
        Target {
            pos: Vec2::new(x, 80.0),
            radius: 30.0,
            dx,
        }
    }

    #[test]
    fn test_target_moves_by_dx() {
        let mut t = target(400.0, 5.0);
        advance_target(&mut t, 800.0, BounceMode::Overshoot);
        assert_eq!(t.pos.x, 405.0);
        assert_eq!(t.dx, 5.0);
    }

    #[test]
    fn test_target_reflects_after_move() {
        // 768 + 5 = 773, 773 + 30 > 800
        let mut t = target(768.0, 5.0);
        advance_target(&mut t, 800.0, BounceMode::Overshoot);
        assert_eq!(t.pos.x, 773.0);
        assert_eq!(t.dx, -5.0);

        advance_target(&mut t, 800.0, BounceMode::Overshoot);
        assert_eq!(t.pos.x, 768.0);
        assert_eq!(t.dx, -5.0);
    }

    #[test]
    fn test_target_reflects_on_left_wall() {
        let mut t = target(32.0, -5.0);
        advance_target(&mut t, 800.0, BounceMode::Overshoot);
        assert_eq!(t.pos.x, 27.0);
        assert_eq!(t.dx, 5.0);
    }

    #[test]
    fn test_exact_contact_does_not_reflect() {
        let mut t = target(765.0, 5.0);
        advance_target(&mut t, 800.0, BounceMode::Overshoot);
        assert_eq!(t.pos.x, 770.0);
        assert_eq!(t.dx, 5.0);
    }

    #[test]
    fn test_clamp_mode_stays_inside() {
        let mut t = target(768.0, 5.0);
        advance_target(&mut t, 800.0, BounceMode::Clamp);
        assert_eq!(t.pos.x, 770.0);
        assert_eq!(t.dx, -5.0);
    }

    #[test]
    fn test_projectile_rises_and_spins() {
        let tuning = Tuning::default();
        let mut p = Projectile {
            pos: Vec2::new(400.0, 480.0),
            angle: 0.0,
        };
        advance_projectile(&mut p, &tuning);
        assert_eq!(p.pos, Vec2::new(400.0, 473.0));
        assert!((p.angle - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_launcher_spins() {
        let tuning = Tuning::default();
        let mut l = Launcher::new(&tuning);
        for _ in 0..50 {
            advance_launcher(&mut l, &tuning);
        }
        assert!((l.angle - 1.0).abs() < 1e-4);
        assert_eq!(l.pos, Launcher::new(&tuning).pos);
    }
}
