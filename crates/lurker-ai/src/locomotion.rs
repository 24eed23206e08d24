//! Presentation-side locomotion values: smoothed speed and clip choice.

use lurker_core::constants::STANDING_SPEED_SQ;
use lurker_core::enums::LocomotionClip;
use lurker_core::types::horizontal_len;

use crate::navigation::Navigator;

/// Whether the agent should read as standing still.
pub fn is_standing(nav: &dyn Navigator, arrive_distance: f32) -> bool {
    nav.path_pending()
        || !nav.has_path()
        || nav.remaining_distance() <= nav.stopping_distance().max(arrive_distance)
        || nav.desired_velocity().length_squared() < STANDING_SPEED_SQ
}

/// Clip for the animation layer.
pub fn select_clip(pursuing: bool, standing: bool) -> LocomotionClip {
    if pursuing {
        LocomotionClip::Run
    } else if standing {
        LocomotionClip::Idle
    } else {
        LocomotionClip::Walk
    }
}

/// Exponentially smoothed horizontal speed.
#[derive(Debug, Clone)]
pub struct LocomotionSmoother {
    smoothed: f32,
    rate: f32,
    max_speed: f32,
}

impl LocomotionSmoother {
    pub fn new(rate: f32, max_speed: f32) -> Self {
        Self {
            smoothed: 0.0,
            rate,
            max_speed,
        }
    }

    pub fn update(&mut self, nav: &dyn Navigator, standing: bool, dt: f64) -> f32 {
        let target = if standing {
            0.0
        } else {
            horizontal_len(nav.desired_velocity())
        };
        let t = (dt as f32 * self.rate).clamp(0.0, 1.0);
        self.smoothed += (target - self.smoothed) * t;
        self.smoothed = self.smoothed.clamp(0.0, self.max_speed);
        self.smoothed
    }
}
