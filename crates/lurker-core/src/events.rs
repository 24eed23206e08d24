//! Events emitted by pursuit agents for presentation and audio feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::PursuitState;

/// Observable side effects of one agent tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PursuitEvent {
    /// The agent's pursuit state changed.
    StateChanged { from: PursuitState, to: PursuitState },
    /// Lockout resume timer scheduled.
    ResumeTimerArmed { due_at: f64 },
    /// A pending resume timer was cancelled before firing.
    ResumeTimerCancelled,
    /// The resume timer fired and patrol resumed.
    ResumeTimerFired,
    /// Patrol moved on to another waypoint.
    WaypointAdvanced { index: usize },
    /// The navigator refused a destination request.
    DestinationRejected { point: Vec3 },
}

/// An event tagged with the agent that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    pub agent_id: u32,
    pub tick: u64,
    pub event: PursuitEvent,
}
