//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs world, the scripted feed and the shared
//! perception state, runs all systems once per tick and produces
//! `SimSnapshot`s. Headless and deterministic per seed.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use lurker_core::config::{SmileConfig, TrackingConfig};
use lurker_core::constants::DT;
use lurker_core::error::ConfigError;
use lurker_core::events::AgentEvent;
use lurker_core::feed::{SmileReading, TrackingHealth};
use lurker_core::state::SimSnapshot;
use lurker_core::types::SimTime;
use lurker_perception::{ObstacleField, SmileDetector, TrackingHealthMonitor};

use crate::feed_script::ScriptedFeed;
use crate::scenario::{Scenario, ScenarioError};
use crate::systems;
use crate::systems::pursuit::TickContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Seconds per tick.
    pub dt: f64,
    pub tracking: TrackingConfig,
    pub smile: SmileConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dt: DT,
            tracking: TrackingConfig::default(),
            smile: SmileConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::NotPositive {
                field: "dt",
                value: self.dt,
            });
        }
        self.tracking.validate()?;
        self.smile.validate()
    }
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    dt: f64,
    rng: ChaCha8Rng,
    seed: u64,
    scenario_name: Option<String>,
    feed: ScriptedFeed,
    obstacles: ObstacleField,
    monitor: TrackingHealthMonitor,
    detector: SmileDetector,
    health: TrackingHealth,
    smile: SmileReading,
    events: Vec<AgentEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            dt: config.dt,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            scenario_name: None,
            feed: ScriptedFeed::default(),
            obstacles: ObstacleField::default(),
            monitor: TrackingHealthMonitor::new(config.tracking),
            detector: SmileDetector::new(config.smile),
            health: TrackingHealth::default(),
            smile: SmileReading::default(),
            events: Vec::new(),
        }
    }

    /// Replace the world with `scenario`, restarting time, RNG and tracking state.
    pub fn load_scenario(&mut self, scenario: &Scenario) -> Result<(), ScenarioError> {
        scenario.validate()?;

        self.world.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.feed = ScriptedFeed::new(scenario.feed.clone());
        self.obstacles = ObstacleField::new(scenario.obstacles.clone());
        self.monitor = TrackingHealthMonitor::new(*self.monitor.config());
        self.health = TrackingHealth::default();
        self.smile = SmileReading::default();
        self.events.clear();

        world_setup::setup_scenario(&mut self.world, scenario);
        self.scenario_name = Some(scenario.name.clone());
        info!(
            scenario = %scenario.name,
            agents = scenario.agents.len(),
            obstacles = scenario.obstacles.len(),
            seed = self.seed,
            "scenario loaded"
        );
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.time.advance(self.dt);
        let now = self.time.elapsed_secs;

        let target = systems::target::run(&mut self.world, now);
        let (health, smile) = systems::perception::run(
            &mut self.feed,
            &mut self.monitor,
            &self.detector,
            &mut self.rng,
            now,
        );
        self.health = health;
        self.smile = smile;

        let ctx = TickContext {
            tick: self.time.tick,
            now,
            dt: self.dt,
            target,
            health: &self.health,
            smile: &self.smile,
            obstacles: &self.obstacles,
        };
        systems::pursuit::run(&mut self.world, &ctx, &mut self.events);
        systems::movement::run(&mut self.world, self.dt);

        let events = std::mem::take(&mut self.events);
        if !events.is_empty() {
            debug!(tick = self.time.tick, count = events.len(), "agent events");
        }
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.health,
            &self.smile,
            target,
            events,
        )
    }

    /// Run `ticks` ticks and collect every snapshot.
    pub fn run(&mut self, ticks: u64) -> Vec<SimSnapshot> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn scenario_name(&self) -> Option<&str> {
        self.scenario_name.as_deref()
    }
}
