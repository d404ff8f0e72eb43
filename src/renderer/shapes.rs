//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::{FRAC_PI_4, TAU};

/// Outer target disc
pub const TARGET_COLOR: &str = "#FF6347";
/// Bullseye (half the target radius)
pub const BULLSEYE_COLOR: &str = "#FFD700";
/// Shuriken blade fill
pub const SHURIKEN_COLOR: &str = "#B0BEC5";
/// Shuriken hub
pub const SHURIKEN_HUB_COLOR: &str = "#37474F";
/// The resting launcher is drawn faded
pub const LAUNCHER_ALPHA: f64 = 0.5;

/// Number of blades on a shuriken
pub const SHURIKEN_POINTS: usize = 4;

/// Outline of a four-pointed star of width `size`, rotated by `angle`.
///
/// Alternates tip and notch vertices, starting with a tip, so the polygon can
/// be filled as-is.
pub fn shuriken_outline(center: Vec2, angle: f32, size: f32) -> Vec<Vec2> {
    let tip = size / 2.0;
    let notch = size / 7.0;
    let step = TAU / SHURIKEN_POINTS as f32;

    (0..SHURIKEN_POINTS)
        .flat_map(|i| {
            let theta = angle + i as f32 * step;
            [
                center + Vec2::from_angle(theta) * tip,
                center + Vec2::from_angle(theta + FRAC_PI_4) * notch,
            ]
        })
        .collect()
}

/// Per-axis scale mapping the logical field onto a canvas of `canvas` pixels.
///
/// Axes scale independently, like stretching an image; a zero-sized canvas
/// yields a zero scale rather than NaN.
pub fn fit_scale(canvas: Vec2, logical: Vec2) -> Vec2 {
    let axis = |c: f32, l: f32| if l > 0.0 { (c / l).max(0.0) } else { 0.0 };
    Vec2::new(axis(canvas.x, logical.x), axis(canvas.y, logical.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_alternates_tips_and_notches() {
        let center = Vec2::new(100.0, 50.0);
        let outline = shuriken_outline(center, 0.0, 40.0);
        assert_eq!(outline.len(), SHURIKEN_POINTS * 2);

        for (i, p) in outline.iter().enumerate() {
            let r = p.distance(center);
            if i % 2 == 0 {
                assert!((r - 20.0).abs() < 1e-4);
            } else {
                assert!(r < 20.0);
            }
        }
        // First tip points along +x when unrotated
        assert!((outline[0] - Vec2::new(120.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_outline_rotates() {
        let outline = shuriken_outline(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 40.0);
        assert!((outline[0] - Vec2::new(0.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn test_fit_scale() {
        let scale = fit_scale(Vec2::new(1600.0, 300.0), Vec2::new(800.0, 600.0));
        assert_eq!(scale, Vec2::new(2.0, 0.5));
        assert_eq!(fit_scale(Vec2::ZERO, Vec2::new(800.0, 600.0)), Vec2::ZERO);
        assert_eq!(fit_scale(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    }
}
