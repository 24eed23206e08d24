//! Vision cone test: range, field of view, then line of sight.
//!
//! Stateless; callable for any number of agents in any order.

use glam::Vec3;

use lurker_core::config::VisionConfig;
use lurker_core::constants::FOV_EPSILON_DEG;
use lurker_core::types::LayerMask;

use crate::occlusion::OcclusionTest;

/// Inputs of a single sight check, rebuilt every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionQuery {
    pub eye: Vec3,
    pub forward: Vec3,
    pub target: Vec3,
    pub radius: f32,
    pub half_angle_deg: f32,
    pub probe_radius: f32,
    pub mask: LayerMask,
}

impl VisionQuery {
    pub fn new(config: &VisionConfig, eye: Vec3, forward: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            forward,
            target,
            radius: config.radius,
            half_angle_deg: config.half_angle_deg,
            probe_radius: config.probe_radius,
            mask: config.obstruction_mask,
        }
    }
}

/// Result of a sight check.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sighting {
    pub visible: bool,
    /// Target position at the time of the check.
    pub point: Vec3,
}

impl Sighting {
    fn hidden(point: Vec3) -> Self {
        Self {
            visible: false,
            point,
        }
    }
}

/// Angle between two vectors in degrees. Zero-length input yields 0.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    let a = a.as_dvec3();
    let b = b.as_dvec3();
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees() as f32
}

/// Range and field-of-view check, both bounds inclusive. No occlusion.
pub fn in_view_cone(query: &VisionQuery) -> bool {
    let to_target = query.target - query.eye;
    if to_target.length_squared() > query.radius * query.radius {
        return false;
    }
    angle_between_deg(query.forward, to_target) <= query.half_angle_deg + FOV_EPSILON_DEG
}

/// Full sight check. Without an occlusion source nothing blocks sight.
pub fn can_see(query: &VisionQuery, occlusion: Option<&dyn OcclusionTest>) -> Sighting {
    if !in_view_cone(query) {
        return Sighting::hidden(query.target);
    }

    if let Some(occlusion) = occlusion {
        if occlusion.sweep_blocked(query.eye, query.target, query.probe_radius, query.mask) {
            return Sighting::hidden(query.target);
        }
    }

    Sighting {
        visible: true,
        point: query.target,
    }
}
