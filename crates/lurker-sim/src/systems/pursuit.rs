//! Pursuit system: gate tick, then decision tick, for every agent.
//!
//! The decision tick reads the navigator as left by the previous movement
//! pass, so arrival lags movement by one tick.

use glam::Vec3;
use hecs::World;

use lurker_ai::{GateBudget, Navigator, PursuitController, PursuitInput};
use lurker_core::enums::FaceIndicator;
use lurker_core::events::AgentEvent;
use lurker_core::feed::{SmileReading, TrackingHealth};
use lurker_perception::{ObstacleField, OcclusionTest};

use crate::components::{Agent, AgentStatus, Facing};
use crate::navmesh::KinematicNavigator;

/// Shared, read-only inputs for one tick.
pub struct TickContext<'a> {
    pub tick: u64,
    pub now: f64,
    pub dt: f64,
    pub target: Option<Vec3>,
    pub health: &'a TrackingHealth,
    pub smile: &'a SmileReading,
    pub obstacles: &'a ObstacleField,
}

impl TickContext<'_> {
    /// The gate resets whenever the face is not trusted this tick.
    pub fn gate_tracking_ok(&self) -> bool {
        self.health.is_tracking && self.smile.present
    }
}

pub fn run(world: &mut World, ctx: &TickContext, events: &mut Vec<AgentEvent>) {
    let occlusion: &dyn OcclusionTest = ctx.obstacles;

    for (_entity, (agent, controller, nav, facing, gate, status)) in world.query_mut::<(
        &Agent,
        &mut PursuitController,
        &mut KinematicNavigator,
        &Facing,
        Option<&mut GateBudget>,
        &mut AgentStatus,
    )>() {
        let gate_active =
            gate.map(|gate| gate.tick(ctx.smile.raw, ctx.gate_tracking_ok(), ctx.dt, ctx.now));

        let eye = nav.position() + Vec3::Y * controller.config().vision.eye_height;
        let input = PursuitInput {
            now: ctx.now,
            dt: ctx.dt,
            eye,
            forward: facing.0,
            target: ctx.target,
            gate_active,
            tracking: Some(ctx.health),
            occlusion: Some(occlusion),
        };
        let output = controller.tick(&input, nav);

        events.extend(output.events.iter().map(|event| AgentEvent {
            agent_id: agent.id,
            tick: ctx.tick,
            event: event.clone(),
        }));

        status.face = if !ctx.health.is_tracking {
            FaceIndicator::TrackingLost
        } else if gate_active == Some(true) {
            FaceIndicator::Smiling
        } else {
            FaceIndicator::Neutral
        };
        status.last = Some(output);
    }
}
