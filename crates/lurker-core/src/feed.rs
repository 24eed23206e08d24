//! Face-tracking feed records and the values derived from them each tick.

use serde::{Deserialize, Serialize};

/// Named facial feature values reported per detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceFeatures {
    /// Mouth corner spread, the raw smile metric (0..1).
    pub mouth_wide: f32,
}

/// One face found by the tracker in the current frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Per-landmark confidence samples.
    pub confidence: Vec<f32>,
    pub features: FaceFeatures,
    /// Full 3D landmarks were solved for this face.
    #[serde(default)]
    pub got_3d_points: bool,
    /// Tracker-side timestamp (s).
    #[serde(default)]
    pub time: f64,
}

impl FaceDetection {
    /// Mean of the confidence samples; 0 when there are none.
    pub fn mean_confidence(&self) -> f32 {
        if self.confidence.is_empty() {
            return 0.0;
        }
        self.confidence.iter().sum::<f32>() / self.confidence.len() as f32
    }
}

/// Latest state of the tracking transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerceptionFeed {
    /// Monotonic packet counter bumped by the transport on every datagram.
    pub received_packets: u64,
    pub detections: Vec<FaceDetection>,
}

/// Per-tick tracking health, recomputed from the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingHealth {
    /// Heartbeat alive.
    pub receiving: bool,
    /// At least one detection is present.
    pub has_face: bool,
    /// Index of the selected detection.
    pub best_index: Option<usize>,
    /// Mean confidence of the selected detection, 0 when none.
    pub best_confidence: f32,
    /// A detection passed the confidence threshold.
    pub confident: bool,
    /// Selected detection has full 3D landmarks.
    pub has_3d: bool,
    /// `receiving && confident` (and `has_3d` in strict mode).
    pub is_tracking: bool,
}

/// Raw smile signal extracted from the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmileReading {
    /// A confident face was found.
    pub present: bool,
    pub face_index: Option<usize>,
    pub confidence: f32,
    pub mouth_wide: f32,
    /// Feature at or above threshold.
    pub raw: bool,
}
