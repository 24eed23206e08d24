//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level behavior state of a pursuing agent. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuitState {
    /// Walking the waypoint route.
    #[default]
    Patrol,
    /// Running toward the target or its last known position.
    Pursuit,
    /// Forced passive by the gate; waiting for the resume timer.
    IgnoredLockout,
}

/// Internal phase of the gate budget state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatePhase {
    /// Inactive, charge regenerating toward full.
    #[default]
    Recovering,
    /// Authorized; charge drains in real time while the raw signal holds.
    Active,
    /// Forced inactive until the lockout time passes.
    Cooldown,
}

/// Path computation status reported by the navigation collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStatus {
    /// Path reaches the destination.
    #[default]
    Complete,
    /// Path ends at the closest reachable point.
    Partial,
    /// No valid path.
    Invalid,
}

/// Animation clip the presentation layer should play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocomotionClip {
    #[default]
    Idle,
    Walk,
    Run,
}

/// HUD face icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceIndicator {
    #[default]
    TrackingLost,
    Neutral,
    Smiling,
}
