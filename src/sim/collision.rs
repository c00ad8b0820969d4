//! Collision tests between circles, rays and blasts
//!
//! Everything in the arena is a circle. Bullets and bodies touch when their
//! circles overlap; beams are rays that clip any circle close enough to
//! their line; explosions reach a fixed distance past a target's edge.

use glam::Vec2;

/// Whether two circles touch (boundary contact counts)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) <= a_radius + b_radius
}

/// Result of casting a ray at a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the closest approach
    pub along: f32,
    /// Perpendicular distance from the circle centre to the ray's line
    pub perpendicular: f32,
}

/// Project `target` onto the ray from `origin` along unit vector `dir`
///
/// Returns `None` when the target is not ahead of the origin, so beams never
/// fire backwards.
pub fn project_onto_ray(origin: Vec2, dir: Vec2, target: Vec2) -> Option<RayHit> {
    let offset = target - origin;
    let along = offset.dot(dir);
    if along <= 0.0 {
        return None;
    }
    // Rounding can push the squared difference slightly negative
    let perpendicular = (offset.length_squared() - along * along).max(0.0).sqrt();
    Some(RayHit {
        along,
        perpendicular,
    })
}

/// Whether a beam of half-width `beam_radius` clips a circle
pub fn beam_hits(
    origin: Vec2,
    dir: Vec2,
    beam_radius: f32,
    target: Vec2,
    target_radius: f32,
) -> bool {
    project_onto_ray(origin, dir, target)
        .is_some_and(|hit| hit.perpendicular <= target_radius + beam_radius)
}

/// Whether a target sits inside an explosion's reach
#[inline]
pub fn within_blast(center: Vec2, reach: f32, target: Vec2, target_radius: f32) -> bool {
    center.distance(target) <= reach + target_radius
}
