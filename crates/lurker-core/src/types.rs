//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Bit set of physics layers. Layer `n` is bit `1 << n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing a single layer.
    pub fn layer(layer: u8) -> Self {
        LayerMask(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    /// Whether `layer` is part of this mask.
    pub fn contains(&self, layer: u8) -> bool {
        self.0 & LayerMask::layer(layer).0 != 0
    }

    pub fn with(self, layer: u8) -> Self {
        LayerMask(self.0 | LayerMask::layer(layer).0)
    }
}

/// Static scene geometry that can block line of sight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ObstacleShape {
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box given by its two extreme corners.
    Box { min: Vec3, max: Vec3 },
}

/// An obstacle placed on a physics layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub shape: ObstacleShape,
    #[serde(default)]
    pub layer: u8,
}

impl Obstacle {
    pub fn sphere(center: Vec3, radius: f32, layer: u8) -> Self {
        Self {
            shape: ObstacleShape::Sphere { center, radius },
            layer,
        }
    }

    /// Box from center and half extents.
    pub fn cuboid(center: Vec3, half_extents: Vec3, layer: u8) -> Self {
        Self {
            shape: ObstacleShape::Box {
                min: center - half_extents,
                max: center + half_extents,
            },
            layer,
        }
    }
}

/// Horizontal magnitude of a vector (Y is up).
pub fn horizontal_len(v: Vec3) -> f32 {
    Vec3::new(v.x, 0.0, v.z).length()
}
