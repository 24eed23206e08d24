//! Perception for lurker agents.
//!
//! Vision cone tests with swept-sphere occlusion, face-tracking health,
//! and raw smile signal extraction. Pure functions over plain data plus the
//! small heartbeat state the tracking monitor keeps between ticks.

pub use lurker_core as core;

pub mod occlusion;
pub mod smile;
pub mod tracking;
pub mod vision;

pub use occlusion::{ObstacleField, OcclusionTest};
pub use smile::SmileDetector;
pub use tracking::{select_best_face, TrackingHealthMonitor};
pub use vision::{can_see, in_view_cone, Sighting, VisionQuery};
