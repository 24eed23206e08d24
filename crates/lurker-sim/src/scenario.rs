//! Scenario definitions: agents, target path, scene geometry and feed script.
//!
//! Scenarios load from JSON or come from the built-in set below.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lurker_core::config::{GateConfig, PursuitConfig};
use lurker_core::error::ConfigError;
use lurker_core::types::Obstacle;

use crate::components::Keyframe;
use crate::feed_script::{FeedKind, FeedScript, FeedWindow};
use crate::navmesh::WalkableArea;

/// Names accepted by `Scenario::builtin`.
pub const BUILTIN_SCENARIOS: &[&str] = &["corridor", "standoff"];

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("agent {agent:?}: {source}")]
    Config {
        agent: String,
        #[source]
        source: ConfigError,
    },

    #[error("target keyframe {index} is earlier than the one before it")]
    UnsortedKeyframes { index: usize },

    #[error("feed script: {0}")]
    Feed(#[source] ConfigError),

    #[error("feed window {index} ends before it starts")]
    InvertedFeedWindow { index: usize },

    #[error("walkable area is empty")]
    EmptyWalkableArea,

    #[error("unknown built-in scenario {0:?}")]
    UnknownBuiltin(String),
}

/// One pursuing agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub spawn: Vec3,
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    #[serde(default)]
    pub waypoints: Vec<Vec3>,
    #[serde(default)]
    pub pursuit: PursuitConfig,
    /// Smile gate; `None` makes the agent ignore smiles entirely.
    #[serde(default)]
    pub gate: Option<GateConfig>,
}

fn default_forward() -> Vec3 {
    Vec3::Z
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub walkable: WalkableArea,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// Target path; empty means there is nothing to chase.
    #[serde(default)]
    pub target: Vec<Keyframe>,
    #[serde(default)]
    pub feed: FeedScript,
    pub agents: Vec<AgentSpec>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn builtin(name: &str) -> Result<Self, ScenarioError> {
        match name {
            "corridor" => Ok(build_corridor()),
            "standoff" => Ok(build_standoff()),
            other => Err(ScenarioError::UnknownBuiltin(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.walkable.is_empty() {
            return Err(ScenarioError::EmptyWalkableArea);
        }
        for (index, pair) in self.target.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(ScenarioError::UnsortedKeyframes { index: index + 1 });
            }
        }
        self.feed.validate().map_err(ScenarioError::Feed)?;
        for (index, w) in self.feed.windows.iter().enumerate() {
            if w.end < w.start {
                return Err(ScenarioError::InvertedFeedWindow { index });
            }
        }
        for agent in &self.agents {
            let config_error = |source| ScenarioError::Config {
                agent: agent.name.clone(),
                source,
            };
            agent.pursuit.validate().map_err(config_error)?;
            if let Some(gate) = &agent.gate {
                gate.validate().map_err(config_error)?;
            }
        }
        Ok(())
    }
}

fn keyframe(time: f64, x: f32, z: f32) -> Keyframe {
    Keyframe {
        time,
        position: Vec3::new(x, 1.6, z),
    }
}

fn window(start: f64, end: f64, kind: FeedKind) -> FeedWindow {
    FeedWindow { start, end, kind }
}

/// "Corridor": a warden walks a long hall and the target steps out ahead
/// of it, then ducks behind a pillar. No smile gate.
fn build_corridor() -> Scenario {
    Scenario {
        name: "corridor".into(),
        walkable: WalkableArea {
            min: Vec3::new(-4.0, 0.0, -2.0),
            max: Vec3::new(4.0, 0.0, 40.0),
        },
        obstacles: vec![Obstacle::cuboid(
            Vec3::new(-2.5, 1.5, 24.0),
            Vec3::new(1.0, 1.5, 1.0),
            0,
        )],
        target: vec![
            keyframe(0.0, 0.0, 12.0),
            keyframe(2.0, 0.0, 12.0),
            keyframe(5.0, -2.5, 30.0),
        ],
        feed: FeedScript::default(),
        agents: vec![AgentSpec {
            name: "warden".into(),
            spawn: Vec3::ZERO,
            forward: Vec3::Z,
            waypoints: vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 36.0)],
            pursuit: PursuitConfig::default(),
            gate: None,
        }],
    }
}

/// "Standoff": two watchers face the target across a room. One honors the
/// smile gate, the other does not. The feed smiles for longer than the
/// budget, drops the face, then stalls.
fn build_standoff() -> Scenario {
    Scenario {
        name: "standoff".into(),
        walkable: WalkableArea {
            min: Vec3::new(-10.0, 0.0, -10.0),
            max: Vec3::new(10.0, 0.0, 10.0),
        },
        obstacles: Vec::new(),
        target: vec![keyframe(0.0, 0.0, 8.0)],
        feed: FeedScript {
            windows: vec![
                window(1.0, 5.0, FeedKind::Smiling),
                window(7.0, 8.0, FeedKind::NoFace),
                window(9.0, 10.0, FeedKind::Stalled),
            ],
            ..FeedScript::default()
        },
        agents: vec![
            AgentSpec {
                name: "smiler".into(),
                spawn: Vec3::new(-1.0, 0.0, 0.0),
                forward: Vec3::Z,
                waypoints: vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(-6.0, 0.0, -6.0)],
                pursuit: PursuitConfig::default(),
                gate: Some(GateConfig::default()),
            },
            AgentSpec {
                name: "stoic".into(),
                spawn: Vec3::new(1.0, 0.0, 0.0),
                forward: Vec3::Z,
                waypoints: vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(6.0, 0.0, -6.0)],
                pursuit: PursuitConfig::default(),
                gate: None,
            },
        ],
    }
}
