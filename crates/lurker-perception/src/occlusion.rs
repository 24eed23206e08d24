//! Swept-sphere occlusion against static obstacles.
//!
//! A thin ray can slip past the edge of a target's own collider and report
//! false negatives, so sight is probed with a small sphere swept along the
//! eye→target segment. Obstacles already overlapping the sphere at the eye
//! are not reported, matching physics-engine sphere casts.

use glam::Vec3;

use lurker_core::types::{LayerMask, Obstacle, ObstacleShape};

/// Source of line-of-sight blockers.
pub trait OcclusionTest {
    /// Whether a sphere of `radius` swept from `from` to `to` hits anything on `mask`.
    fn sweep_blocked(&self, from: Vec3, to: Vec3, radius: f32, mask: LayerMask) -> bool;
}

/// Flat list of static obstacles.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }
}

impl OcclusionTest for ObstacleField {
    fn sweep_blocked(&self, from: Vec3, to: Vec3, radius: f32, mask: LayerMask) -> bool {
        self.obstacles
            .iter()
            .filter(|o| mask.contains(o.layer))
            .filter(|o| !overlaps_point(&o.shape, from, radius))
            .any(|o| sweep_hits(&o.shape, from, to, radius))
    }
}

fn overlaps_point(shape: &ObstacleShape, point: Vec3, radius: f32) -> bool {
    match *shape {
        ObstacleShape::Sphere { center, radius: r } => {
            point.distance_squared(center) <= (r + radius) * (r + radius)
        }
        ObstacleShape::Box { min, max } => {
            let closest = point.clamp(min, max);
            point.distance_squared(closest) <= radius * radius
        }
    }
}

fn sweep_hits(shape: &ObstacleShape, from: Vec3, to: Vec3, radius: f32) -> bool {
    match *shape {
        ObstacleShape::Sphere { center, radius: r } => {
            let closest = closest_point_on_segment(from, to, center);
            closest.distance_squared(center) <= (r + radius) * (r + radius)
        }
        ObstacleShape::Box { min, max } => {
            // Box inflated by the probe radius; slightly conservative at the corners.
            let inflate = Vec3::splat(radius);
            segment_hits_aabb(from, to, min - inflate, max + inflate)
        }
    }
}

fn closest_point_on_segment(a: Vec3, b: Vec3, p: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Slab test of segment `a..b` against an axis-aligned box.
fn segment_hits_aabb(a: Vec3, b: Vec3, min: Vec3, max: Vec3) -> bool {
    let d = b - a;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for axis in 0..3 {
        let (origin, dir, lo, hi) = (a[axis], d[axis], min[axis], max[axis]);
        if dir.abs() < f32::EPSILON {
            if origin < lo || origin > hi {
                return false;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }
    true
}
