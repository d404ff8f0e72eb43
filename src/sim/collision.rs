//! Projectile/target collision detection
//!
//! Projectiles are treated as points: a throw hits when its centre is
//! strictly inside the target's circle. The shuriken sprite's own size plays
//! no part.

use glam::Vec2;

use super::state::{Projectile, Target};

/// Check whether a point lies strictly inside the target
#[inline]
pub fn point_hits_target(point: Vec2, target: &Target) -> bool {
    point.distance(target.pos) < target.radius
}

/// Indices (ascending) of every projectile currently hitting the target.
///
/// There is no per-frame cap: overlapping projectiles all count.
pub fn detect(target: &Target, projectiles: &[Projectile]) -> Vec<usize> {
    projectiles
        .iter()
        .enumerate()
        .filter(|(_, p)| point_hits_target(p.pos, target))
        .map(|(i, _)| i)
        .collect()
}

/// Split projectiles into survivors and hits, keeping throw order in both.
///
/// `hits` must be ascending, as returned by [`detect`].
pub fn remove_hits(
    projectiles: Vec<Projectile>,
    hits: &[usize],
) -> (Vec<Projectile>, Vec<Projectile>) {
    if hits.is_empty() {
        return (projectiles, Vec::new());
    }

    let mut survivors = Vec::with_capacity(projectiles.len().saturating_sub(hits.len()));
    let mut removed = Vec::with_capacity(hits.len());
    let mut next_hit = hits.iter().peekable();

    for (i, p) in projectiles.into_iter().enumerate() {
        if next_hit.peek() == Some(&&i) {
            next_hit.next();
            removed.push(p);
        } else {
            survivors.push(p);
        }
    }

    (survivors, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target {
            pos: Vec2::new(400.0, 80.0),
            radius: 30.0,
            dx: 5.0,
        }
    }

    fn at(x: f32, y: f32) -> Projectile {
        Projectile {
            pos: Vec2::new(x, y),
            angle: 0.0,
        }
    }

    #[test]
    fn test_close_projectile_hits() {
        // Distance 5 < radius 30
        assert_eq!(detect(&target(), &[at(400.0, 85.0)]), vec![0]);
    }

    #[test]
    fn test_distance_equal_to_radius_misses() {
        assert!(detect(&target(), &[at(430.0, 80.0)]).is_empty());
        assert_eq!(detect(&target(), &[at(429.9, 80.0)]), vec![0]);
    }

    #[test]
    fn test_far_projectile_misses() {
        assert!(detect(&target(), &[at(400.0, 480.0)]).is_empty());
    }

    #[test]
    fn test_every_overlapping_projectile_counts() {
        let projectiles = [
            at(400.0, 85.0),
            at(400.0, 300.0),
            at(400.0, 85.0),
            at(410.0, 70.0),
        ];
        assert_eq!(detect(&target(), &projectiles), vec![0, 2, 3]);
    }

    #[test]
    fn test_empty_collection_is_noop() {
        assert!(detect(&target(), &[]).is_empty());
        let (survivors, removed) = remove_hits(Vec::new(), &[]);
        assert!(survivors.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_remove_hits_keeps_order_and_skips_nothing() {
        // Adjacent hits are exactly the case index splicing gets wrong
        let projectiles = vec![at(1.0, 0.0), at(2.0, 0.0), at(3.0, 0.0), at(4.0, 0.0)];
        let (survivors, removed) = remove_hits(projectiles, &[1, 2]);

        let xs: Vec<f32> = survivors.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![1.0, 4.0]);
        let xs: Vec<f32> = removed.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0]);
    }
}
