//! Raw smile signal: the mouth-wide feature of the most confident face.
//!
//! The signal is unthrottled; the gate budget decides how much of it is
//! honored.

use tracing::trace;

use lurker_core::config::SmileConfig;
use lurker_core::feed::{PerceptionFeed, SmileReading};

use crate::tracking::select_best_face;

#[derive(Debug, Clone)]
pub struct SmileDetector {
    config: SmileConfig,
}

impl SmileDetector {
    pub fn new(config: SmileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmileConfig {
        &self.config
    }

    /// Read the raw signal. No feed or no confident face reads as absent.
    pub fn evaluate(&self, feed: Option<&PerceptionFeed>) -> SmileReading {
        let Some(feed) = feed else {
            return SmileReading::default();
        };
        let best = select_best_face(&feed.detections, self.config.min_confidence);
        let Some((index, confidence)) = best else {
            return SmileReading::default();
        };

        let mouth_wide = feed.detections[index].features.mouth_wide;
        let reading = SmileReading {
            present: true,
            face_index: Some(index),
            confidence,
            mouth_wide,
            raw: mouth_wide >= self.config.threshold,
        };
        trace!(
            face = index,
            mouth_wide,
            confidence,
            raw = reading.raw,
            "smile reading"
        );
        reading
    }
}
