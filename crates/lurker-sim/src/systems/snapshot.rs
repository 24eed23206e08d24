//! Snapshot system: queries the ECS world and builds a complete `SimSnapshot`.
//!
//! Read-only; never modifies the world.

use glam::Vec3;
use hecs::World;

use lurker_ai::{GateBudget, Navigator, PursuitController};
use lurker_core::events::AgentEvent;
use lurker_core::feed::{SmileReading, TrackingHealth};
use lurker_core::state::{AgentView, SimSnapshot, TrackingView};
use lurker_core::types::SimTime;

use crate::components::{Agent, AgentStatus, Facing};
use crate::navmesh::KinematicNavigator;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    health: &TrackingHealth,
    smile: &SmileReading,
    target: Option<Vec3>,
    events: Vec<AgentEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        tracking: build_tracking(health, smile),
        target,
        agents: build_agents(world),
        events,
    }
}

fn build_tracking(health: &TrackingHealth, smile: &SmileReading) -> TrackingView {
    TrackingView {
        receiving: health.receiving,
        is_tracking: health.is_tracking,
        face_index: health.best_index,
        confidence: health.best_confidence,
        mouth_wide: smile.mouth_wide,
        raw_smile: smile.raw,
    }
}

/// Agents sorted by id so the order does not depend on archetype layout.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut query = world.query::<(
        &Agent,
        &PursuitController,
        &KinematicNavigator,
        &Facing,
        &AgentStatus,
        Option<&GateBudget>,
    )>();

    let mut agents: Vec<AgentView> = query
        .iter()
        .map(|(_, (agent, controller, nav, facing, status, gate))| {
            let last = status.last.as_ref();
            AgentView {
                agent_id: agent.id,
                name: agent.name.clone(),
                position: nav.position(),
                forward: facing.0,
                state: controller.state(),
                pursuing: last.is_some_and(|o| o.pursuing),
                sighted: last.is_some_and(|o| o.sighted),
                gated: last.is_some_and(|o| o.gated),
                speed: last.map_or(0.0, |o| o.speed),
                locomotion: last.map(|o| o.locomotion).unwrap_or_default(),
                look_at: last.and_then(|o| o.look_at),
                waypoint_index: controller.memory().waypoint_index,
                gate_charge: gate.map(|g| g.charge01()),
                gate_phase: gate.map(|g| g.phase()),
                face: status.face,
            }
        })
        .collect();
    agents.sort_by_key(|a| a.agent_id);
    agents
}
