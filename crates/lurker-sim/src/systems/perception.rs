//! Perception pass: sample the feed, then derive tracking health and the
//! raw smile signal from the same frame.

use rand_chacha::ChaCha8Rng;

use lurker_core::feed::{SmileReading, TrackingHealth};
use lurker_perception::{SmileDetector, TrackingHealthMonitor};

use crate::feed_script::ScriptedFeed;

pub fn run(
    feed: &mut ScriptedFeed,
    monitor: &mut TrackingHealthMonitor,
    detector: &SmileDetector,
    rng: &mut ChaCha8Rng,
    now: f64,
) -> (TrackingHealth, SmileReading) {
    let frame = feed.sample(now, rng);
    let health = monitor.update(frame, now);
    let smile = detector.evaluate(frame);
    (health, smile)
}
