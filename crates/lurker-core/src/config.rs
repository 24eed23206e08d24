//! Tuning configuration for agents and the perception pipeline.
//!
//! Every struct deserializes with `#[serde(default)]`, so a scenario file
//! only has to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{in_range, non_negative, positive, ConfigError, Result};
use crate::types::LayerMask;

/// Vision cone parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Maximum sight distance (m).
    pub radius: f32,
    /// Half of the field of view (degrees), inclusive.
    pub half_angle_deg: f32,
    /// Eye height above the body origin (m).
    pub eye_height: f32,
    /// Swept-sphere radius for occlusion probes (m).
    pub probe_radius: f32,
    /// Layers that block sight.
    pub obstruction_mask: LayerMask,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            radius: VIEW_RADIUS,
            half_angle_deg: VIEW_HALF_ANGLE_DEG,
            eye_height: EYE_HEIGHT,
            probe_radius: OCCLUSION_PROBE_RADIUS,
            obstruction_mask: LayerMask::layer(OBSTACLE_LAYER),
        }
    }
}

impl VisionConfig {
    pub fn validate(&self) -> Result<()> {
        positive("vision.radius", self.radius as f64)?;
        positive("vision.half_angle_deg", self.half_angle_deg as f64)?;
        in_range("vision.half_angle_deg", self.half_angle_deg as f64, 0.0, 180.0)?;
        non_negative("vision.eye_height", self.eye_height as f64)?;
        non_negative("vision.probe_radius", self.probe_radius as f64)
    }
}

/// Patrol/pursuit behavior parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    pub vision: VisionConfig,
    /// Grace window after losing sight (s).
    pub search_duration_secs: f64,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Arrival tolerance (m).
    pub arrive_distance: f32,
    /// Lockout length before patrol resumes (s).
    pub ignore_resume_delay_secs: f64,
    /// Wrap around at the end of the route instead of holding the last waypoint.
    pub loop_patrol: bool,
    /// Presentation speed smoothing rate (1/s).
    pub speed_smoothing_rate: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            search_duration_secs: SEARCH_DURATION_SECS,
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            arrive_distance: ARRIVE_DISTANCE,
            ignore_resume_delay_secs: IGNORE_RESUME_DELAY_SECS,
            loop_patrol: true,
            speed_smoothing_rate: SPEED_SMOOTHING_RATE,
        }
    }
}

impl PursuitConfig {
    pub fn validate(&self) -> Result<()> {
        self.vision.validate()?;
        non_negative("search_duration_secs", self.search_duration_secs)?;
        non_negative("walk_speed", self.walk_speed as f64)?;
        positive("run_speed", self.run_speed as f64)?;
        if self.run_speed < self.walk_speed {
            return Err(ConfigError::RunSlowerThanWalk {
                walk: self.walk_speed as f64,
                run: self.run_speed as f64,
            });
        }
        non_negative("arrive_distance", self.arrive_distance as f64)?;
        non_negative("ignore_resume_delay_secs", self.ignore_resume_delay_secs)?;
        positive("speed_smoothing_rate", self.speed_smoothing_rate as f64)
    }
}

/// Tracking health criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// A face must have mean confidence strictly above this.
    pub min_confidence: f32,
    /// Heartbeat silence tolerated before the feed counts as dead (s).
    pub receive_timeout_secs: f64,
    /// Also require full 3D landmarks on the selected face.
    pub require_3d: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            min_confidence: MIN_FACE_CONFIDENCE,
            receive_timeout_secs: RECEIVE_TIMEOUT_SECS,
            require_3d: false,
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<()> {
        in_range("tracking.min_confidence", self.min_confidence as f64, 0.0, 1.0)?;
        non_negative("tracking.receive_timeout_secs", self.receive_timeout_secs)
    }
}

/// Raw smile signal extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmileConfig {
    /// Raw signal is on when mouth-wide is at or above this.
    pub threshold: f32,
    pub min_confidence: f32,
}

impl Default for SmileConfig {
    fn default() -> Self {
        Self {
            threshold: SMILE_THRESHOLD,
            min_confidence: MIN_FACE_CONFIDENCE,
        }
    }
}

impl SmileConfig {
    pub fn validate(&self) -> Result<()> {
        in_range("smile.threshold", self.threshold as f64, 0.0, 1.0)?;
        in_range("smile.min_confidence", self.min_confidence as f64, 0.0, 1.0)
    }
}

/// Gate budget dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Full budget in seconds of active time.
    pub max_charge_secs: f64,
    /// Forced inactivity after depletion (s).
    pub cooldown_secs: f64,
    /// Charge regained per second while not draining.
    pub regen_per_sec: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_charge_secs: GATE_MAX_CHARGE_SECS,
            cooldown_secs: GATE_COOLDOWN_SECS,
            regen_per_sec: GATE_REGEN_PER_SEC,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<()> {
        positive("gate.max_charge_secs", self.max_charge_secs)?;
        non_negative("gate.cooldown_secs", self.cooldown_secs)?;
        non_negative("gate.regen_per_sec", self.regen_per_sec)
    }
}
