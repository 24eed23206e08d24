//! Entity spawn factories for a loaded scenario.

use glam::Vec3;
use hecs::{EntityBuilder, World};
use tracing::debug;

use lurker_ai::{GateBudget, PursuitController};

use crate::components::{Agent, AgentStatus, Facing, Target, TargetPath, TargetPosition};
use crate::navmesh::{KinematicNavigator, WalkableArea};
use crate::scenario::{AgentSpec, Scenario};

/// Spawn the target and every agent of `scenario`.
pub fn setup_scenario(world: &mut World, scenario: &Scenario) {
    spawn_target(world, scenario);
    for (id, spec) in scenario.agents.iter().enumerate() {
        spawn_agent(world, id as u32, spec, scenario.walkable);
    }
}

/// Spawn the target entity. Without keyframes nothing is spawned.
pub fn spawn_target(world: &mut World, scenario: &Scenario) -> Option<hecs::Entity> {
    let path = TargetPath {
        keyframes: scenario.target.clone(),
    };
    let start = path.sample(0.0)?;
    Some(world.spawn((Target, TargetPosition(start), path)))
}

/// Spawn one agent and send it toward its first waypoint. The spawn-time
/// path is resolved here so the first tick already sees it.
pub fn spawn_agent(
    world: &mut World,
    id: u32,
    spec: &AgentSpec,
    area: WalkableArea,
) -> hecs::Entity {
    let mut nav = KinematicNavigator::new(area, spec.spawn);
    let mut controller = PursuitController::new(spec.pursuit, spec.waypoints.clone());
    controller.start(&mut nav);
    nav.step(0.0);

    debug!(
        id,
        name = %spec.name,
        waypoints = spec.waypoints.len(),
        gated = spec.gate.is_some(),
        "agent spawned"
    );

    let agent = Agent {
        id,
        name: spec.name.clone(),
    };
    let facing = Facing(horizontal_dir(spec.forward).unwrap_or(Vec3::Z));
    let mut builder = EntityBuilder::new();
    builder.add_bundle((agent, controller, nav, facing, AgentStatus::default()));
    if let Some(gate) = spec.gate {
        builder.add(GateBudget::new(gate));
    }
    world.spawn(builder.build())
}

/// Unit horizontal direction of `v`, if it has one.
pub fn horizontal_dir(v: Vec3) -> Option<Vec3> {
    Vec3::new(v.x, 0.0, v.z).try_normalize()
}
