//! Simulation snapshot: the read-only state handed to presentation each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AgentEvent;
use crate::types::SimTime;

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub tracking: TrackingView,
    pub target: Option<Vec3>,
    pub agents: Vec<AgentView>,
    pub events: Vec<AgentEvent>,
}

/// Face tracking status for the HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrackingView {
    pub receiving: bool,
    pub is_tracking: bool,
    pub face_index: Option<usize>,
    pub confidence: f32,
    pub mouth_wide: f32,
    pub raw_smile: bool,
}

/// One pursuing agent as the animation and UI layers see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub agent_id: u32,
    pub name: String,
    pub position: Vec3,
    pub forward: Vec3,
    pub state: PursuitState,
    /// Actively pursuing.
    pub pursuing: bool,
    pub sighted: bool,
    pub gated: bool,
    /// Smoothed horizontal speed for blend trees (m/s).
    pub speed: f32,
    pub locomotion: LocomotionClip,
    /// Where the head should turn, when the target is inside the cone.
    pub look_at: Option<Vec3>,
    pub waypoint_index: usize,
    /// Gate charge in 0..1, absent when the agent has no gate.
    pub gate_charge: Option<f64>,
    pub gate_phase: Option<GatePhase>,
    pub face: FaceIndicator,
}
