//! Kinematic stand-in for a navmesh agent.
//!
//! A single rectangular walkable floor, straight-line paths, and one tick
//! of path-computation latency: `set_destination` marks the path pending
//! and the next `step` resolves it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use lurker_ai::Navigator;
use lurker_core::constants::{NAV_SNAP_DISTANCE, NAV_STOPPING_DISTANCE};
use lurker_core::enums::PathStatus;
use lurker_core::types::horizontal_len;

/// Axis-aligned walkable floor. X/Z give the extent, `min.y` the floor height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkableArea {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for WalkableArea {
    fn default() -> Self {
        Self {
            min: Vec3::new(-50.0, 0.0, -50.0),
            max: Vec3::new(50.0, 0.0, 50.0),
        }
    }
}

impl WalkableArea {
    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Drop a point onto the floor.
    pub fn project(&self, point: Vec3) -> Vec3 {
        Vec3::new(point.x, self.min.y, point.z)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.z > self.max.z
    }
}

#[derive(Debug, Clone)]
pub struct KinematicNavigator {
    area: WalkableArea,
    position: Vec3,
    destination: Option<Vec3>,
    pending: bool,
    has_path: bool,
    status: PathStatus,
    stopped: bool,
    speed: f32,
    stopping_distance: f32,
    velocity: Vec3,
}

impl KinematicNavigator {
    pub fn new(area: WalkableArea, position: Vec3) -> Self {
        Self {
            area,
            position: area.project(position),
            destination: None,
            pending: false,
            has_path: false,
            status: PathStatus::Complete,
            stopped: false,
            speed: 0.0,
            stopping_distance: NAV_STOPPING_DISTANCE,
            velocity: Vec3::ZERO,
        }
    }

    /// Resolve a pending path and move along the current one for `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.pending {
            self.pending = false;
            self.has_path = self.destination.is_some();
            self.status = PathStatus::Complete;
        }

        self.velocity = Vec3::ZERO;
        let Some(destination) = self.destination else {
            return;
        };
        if !self.has_path || self.stopped || dt <= 0.0 {
            return;
        }

        let to = destination - self.position;
        let distance = to.length();
        if distance <= NAV_SNAP_DISTANCE {
            self.position = destination;
            return;
        }

        let travel = self.speed * dt as f32;
        if travel >= distance {
            self.velocity = to / dt as f32;
            self.position = destination;
        } else {
            self.velocity = to / distance * self.speed;
            self.position += self.velocity * dt as f32;
        }
    }
}

impl Navigator for KinematicNavigator {
    fn is_on_surface(&self) -> bool {
        self.area.contains(self.position)
    }

    fn set_destination(&mut self, point: Vec3) -> bool {
        if !self.is_on_surface() || !self.area.contains(point) {
            return false;
        }
        let point = self.area.project(point);
        // Same destination: keep the path already computed or in flight.
        if self.destination == Some(point) && (self.has_path || self.pending) {
            return true;
        }
        self.destination = Some(point);
        self.pending = true;
        true
    }

    fn reset_path(&mut self) {
        self.destination = None;
        self.pending = false;
        self.has_path = false;
        self.velocity = Vec3::ZERO;
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
        if stopped {
            self.velocity = Vec3::ZERO;
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn path_pending(&self) -> bool {
        self.pending
    }

    fn has_path(&self) -> bool {
        self.has_path
    }

    fn path_status(&self) -> PathStatus {
        self.status
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(destination) if self.has_path => horizontal_len(destination - self.position),
            _ => f32::INFINITY,
        }
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn desired_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
