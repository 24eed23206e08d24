//! ECS components attached to agents and the target.
//!
//! Agents carry a `PursuitController`, a `KinematicNavigator` and optionally
//! a `GateBudget` directly as components; the ones below are the sim-only
//! extras.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use lurker_ai::PursuitOutput;
use lurker_core::enums::FaceIndicator;

/// Identity of a pursuing agent.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: u32,
    pub name: String,
}

/// Horizontal body facing (unit vector, Y is up).
#[derive(Debug, Clone, Copy)]
pub struct Facing(pub Vec3);

/// Results of the agent's most recent decision tick.
#[derive(Debug, Clone, Default)]
pub struct AgentStatus {
    pub last: Option<PursuitOutput>,
    pub face: FaceIndicator,
}

/// Marker for the entity being pursued.
#[derive(Debug, Clone, Copy)]
pub struct Target;

/// Current target position.
#[derive(Debug, Clone, Copy)]
pub struct TargetPosition(pub Vec3);

/// One point on the target's scripted path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Scenario time (s).
    pub time: f64,
    pub position: Vec3,
}

/// Scripted target motion, keyframes sorted by time.
#[derive(Debug, Clone, Default)]
pub struct TargetPath {
    pub keyframes: Vec<Keyframe>,
}

impl TargetPath {
    /// Position at time `t`: linear between keyframes, held before the
    /// first and after the last. `None` without keyframes.
    pub fn sample(&self, t: f64) -> Option<Vec3> {
        let first = self.keyframes.first()?;
        if t <= first.time {
            return Some(first.position);
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return Some(b.position);
                }
                let alpha = ((t - a.time) / span) as f32;
                return Some(a.position.lerp(b.position, alpha));
            }
        }
        self.keyframes.last().map(|k| k.position)
    }
}
