//! Scripted face-tracking transport.
//!
//! Stands in for the live tracker: time windows select what the camera
//! sees, and per-landmark confidences are jittered from the engine's RNG so
//! runs stay reproducible per seed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use lurker_core::error::ConfigError;
use lurker_core::feed::{FaceDetection, FaceFeatures, PerceptionFeed};

/// Upper bound on landmark samples per detection.
pub const MAX_LANDMARKS: usize = 256;

/// What the tracker reports during a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// One confident face, mouth relaxed.
    #[default]
    Neutral,
    /// One confident face, mouth wide.
    Smiling,
    /// One face below any sane confidence threshold.
    LowConfidence,
    /// Packets keep arriving with no faces in them.
    NoFace,
    /// Packet counter freezes; the last frame is repeated.
    Stalled,
    /// Transport gone; no feed at all.
    Disconnected,
}

/// `kind` applies for `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedWindow {
    pub start: f64,
    pub end: f64,
    pub kind: FeedKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedScript {
    /// Later windows win where they overlap. Outside all windows the feed is `Neutral`.
    pub windows: Vec<FeedWindow>,
    pub base_confidence: f32,
    /// Half-width of the uniform jitter applied to every landmark confidence.
    pub confidence_jitter: f32,
    pub low_confidence: f32,
    /// Landmark confidence samples per detection.
    pub landmarks: usize,
    pub neutral_mouth: f32,
    pub smile_mouth: f32,
    pub got_3d_points: bool,
}

impl Default for FeedScript {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            base_confidence: 0.85,
            confidence_jitter: 0.05,
            low_confidence: 0.1,
            landmarks: 8,
            neutral_mouth: 0.2,
            smile_mouth: 0.8,
            got_3d_points: true,
        }
    }
}

impl FeedScript {
    pub fn kind_at(&self, t: f64) -> FeedKind {
        self.windows
            .iter()
            .rev()
            .find(|w| w.start <= t && t < w.end)
            .map_or(FeedKind::Neutral, |w| w.kind)
    }

    /// Check the sampling parameters. Window order is checked by the scenario.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit("feed.base_confidence", self.base_confidence)?;
        unit("feed.confidence_jitter", self.confidence_jitter)?;
        unit("feed.low_confidence", self.low_confidence)?;
        unit("feed.neutral_mouth", self.neutral_mouth)?;
        unit("feed.smile_mouth", self.smile_mouth)?;
        if !(1..=MAX_LANDMARKS).contains(&self.landmarks) {
            return Err(ConfigError::OutOfRange {
                field: "feed.landmarks",
                value: self.landmarks as f64,
                min: 1.0,
                max: MAX_LANDMARKS as f64,
            });
        }
        Ok(())
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: 1.0,
        })
    }
}

/// Runtime state of the scripted transport.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    script: FeedScript,
    packets: u64,
    current: Option<PerceptionFeed>,
}

impl ScriptedFeed {
    pub fn new(script: FeedScript) -> Self {
        Self {
            script,
            packets: 0,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&PerceptionFeed> {
        self.current.as_ref()
    }

    /// Produce the feed visible at time `now`.
    pub fn sample(&mut self, now: f64, rng: &mut ChaCha8Rng) -> Option<&PerceptionFeed> {
        let kind = self.script.kind_at(now);
        match kind {
            FeedKind::Disconnected => {
                self.current = None;
            }
            FeedKind::Stalled => {}
            FeedKind::NoFace => {
                self.packets += 1;
                self.current = Some(PerceptionFeed {
                    received_packets: self.packets,
                    detections: Vec::new(),
                });
            }
            FeedKind::Neutral | FeedKind::Smiling | FeedKind::LowConfidence => {
                self.packets += 1;
                let detection = self.detection(kind, now, rng);
                self.current = Some(PerceptionFeed {
                    received_packets: self.packets,
                    detections: vec![detection],
                });
            }
        }
        self.current.as_ref()
    }

    fn detection(&self, kind: FeedKind, now: f64, rng: &mut ChaCha8Rng) -> FaceDetection {
        let base = if kind == FeedKind::LowConfidence {
            self.script.low_confidence
        } else {
            self.script.base_confidence
        };
        let jitter = self.script.confidence_jitter;
        let confidence = (0..self.script.landmarks)
            .map(|_| {
                let noise = if jitter > 0.0 {
                    rng.gen_range(-jitter..=jitter)
                } else {
                    0.0
                };
                (base + noise).clamp(0.0, 1.0)
            })
            .collect();
        let mouth_wide = if kind == FeedKind::Smiling {
            self.script.smile_mouth
        } else {
            self.script.neutral_mouth
        };

        FaceDetection {
            confidence,
            features: FaceFeatures { mouth_wide },
            got_3d_points: self.script.got_3d_points,
            time: now,
        }
    }
}
