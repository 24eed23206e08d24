//! Face-tracking health: is the feed alive, and is there a face worth trusting?
//!
//! Liveness comes from the transport's packet counter rather than any flag
//! the tracker reports, so a stalled socket is caught even when the last
//! frame still holds a perfectly good face.

use tracing::debug;

use lurker_core::config::TrackingConfig;
use lurker_core::feed::{FaceDetection, PerceptionFeed, TrackingHealth};

/// Pick the detection with the highest mean confidence strictly above
/// `min_confidence`. Ties keep the earliest index.
pub fn select_best_face(detections: &[FaceDetection], min_confidence: f32) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    let mut best_confidence = min_confidence;
    for (index, detection) in detections.iter().enumerate() {
        let confidence = detection.mean_confidence();
        if confidence > best_confidence {
            best = Some((index, confidence));
            best_confidence = confidence;
        }
    }
    best
}

/// Heartbeat and confidence evaluation over the perception feed.
#[derive(Debug, Clone)]
pub struct TrackingHealthMonitor {
    config: TrackingConfig,
    last_packets: Option<u64>,
    last_receive_at: f64,
    health: TrackingHealth,
}

impl TrackingHealthMonitor {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            last_packets: None,
            last_receive_at: f64::NEG_INFINITY,
            health: TrackingHealth::default(),
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Re-evaluate health at time `now` (s). An absent feed has no
    /// detections and never counts as a heartbeat.
    pub fn update(&mut self, feed: Option<&PerceptionFeed>, now: f64) -> TrackingHealth {
        if let Some(packets) = feed.map(|f| f.received_packets) {
            if self.last_packets != Some(packets) {
                self.last_packets = Some(packets);
                self.last_receive_at = now;
            }
        }
        let receiving = now - self.last_receive_at <= self.config.receive_timeout_secs;

        let detections = feed.map_or(&[][..], |f| f.detections.as_slice());
        let mut health = TrackingHealth {
            receiving,
            has_face: !detections.is_empty(),
            ..Default::default()
        };

        let best = select_best_face(detections, self.config.min_confidence);
        if let Some((index, confidence)) = best {
            health.best_index = Some(index);
            health.best_confidence = confidence;
            health.confident = true;
            health.has_3d = detections[index].got_3d_points;
        }

        health.is_tracking = health.receiving
            && health.confident
            && (!self.config.require_3d || health.has_3d);

        if health.is_tracking != self.health.is_tracking {
            debug!(
                is_tracking = health.is_tracking,
                receiving = health.receiving,
                confident = health.confident,
                "tracking health changed"
            );
        }
        self.health = health;
        health
    }
}
