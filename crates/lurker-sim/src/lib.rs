//! Headless simulation for lurker agents.
//!
//! Owns the hecs ECS world, drives scripted target motion and a scripted
//! face-tracking feed, runs the pursuit agents at a fixed tick rate and
//! produces `SimSnapshot`s for presentation.

pub mod components;
pub mod engine;
pub mod feed_script;
pub mod navmesh;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use lurker_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use scenario::{Scenario, ScenarioError};
