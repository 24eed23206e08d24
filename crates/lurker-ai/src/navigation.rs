//! Navigation collaborator contract.
//!
//! The pathfinding engine is external; the state machine only asks for
//! destinations and reads back path progress. Destination requests are
//! fire-and-forget. A refused request is simply made again next tick.

use glam::Vec3;

use lurker_core::enums::PathStatus;

/// What the decision layer needs from a navigation agent.
pub trait Navigator {
    /// Agent currently stands on a navigable surface.
    fn is_on_surface(&self) -> bool;
    /// Request a path. False if the point is unreachable or the agent is off-surface.
    fn set_destination(&mut self, point: Vec3) -> bool;
    /// Drop the current path.
    fn reset_path(&mut self);
    fn set_stopped(&mut self, stopped: bool);
    fn is_stopped(&self) -> bool;
    /// A path computation was requested and has not finished.
    fn path_pending(&self) -> bool;
    fn has_path(&self) -> bool;
    fn path_status(&self) -> PathStatus;
    fn remaining_distance(&self) -> f32;
    fn stopping_distance(&self) -> f32;
    fn velocity(&self) -> Vec3;
    fn desired_velocity(&self) -> Vec3;
    fn set_speed(&mut self, speed: f32);
    fn position(&self) -> Vec3;
}

/// Issue a destination request if the agent is on a navigable surface.
pub fn try_set_destination(nav: &mut dyn Navigator, point: Vec3) -> bool {
    if !nav.is_on_surface() {
        return false;
    }
    nav.set_stopped(false);
    nav.set_destination(point)
}

/// A destination counts as reached only with a finished, valid path whose
/// remaining distance is within `max(stopping distance, arrive_distance)`.
/// Pending or missing paths never count, so a freshly issued waypoint is
/// not skipped during the tick its path is still being computed.
pub fn is_destination_reached(nav: &dyn Navigator, arrive_distance: f32) -> bool {
    if nav.path_pending() || !nav.has_path() {
        return false;
    }
    if nav.path_status() == PathStatus::Invalid {
        return false;
    }
    nav.remaining_distance() <= nav.stopping_distance().max(arrive_distance)
}
