//! Patrol / pursuit / lockout state machine.
//!
//! One controller per agent. Each tick it reads sight and the gate, applies
//! edge-triggered lockout transitions, then the steady-state patrol/pursuit
//! rules, then turns the final state into a movement request. Arrival is
//! tested against whatever the navigator reported after the previous tick.

use glam::Vec3;
use tracing::{debug, warn};

use lurker_core::config::PursuitConfig;
use lurker_core::enums::{LocomotionClip, PursuitState};
use lurker_core::events::PursuitEvent;
use lurker_core::feed::TrackingHealth;

use lurker_perception::occlusion::OcclusionTest;
use lurker_perception::vision::{can_see, in_view_cone, Sighting, VisionQuery};

use crate::locomotion::{is_standing, select_clip, LocomotionSmoother};
use crate::navigation::{is_destination_reached, try_set_destination, Navigator};
use crate::timer::{ResumeSchedule, ResumeTimer};

/// Per-agent pursuit memory. Mutated only by `PursuitController`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentMemory {
    pub state: PursuitState,
    pub waypoint_index: usize,
    pub last_seen_position: Vec3,
    /// Time the target was last sighted; negative infinity when forgotten.
    pub last_seen_time: f64,
}

impl Default for AgentMemory {
    fn default() -> Self {
        Self {
            state: PursuitState::Patrol,
            waypoint_index: 0,
            last_seen_position: Vec3::ZERO,
            last_seen_time: f64::NEG_INFINITY,
        }
    }
}

/// Everything the controller reads in one tick.
#[derive(Clone, Copy)]
pub struct PursuitInput<'a> {
    /// Absolute time at the end of this tick (s).
    pub now: f64,
    pub dt: f64,
    pub eye: Vec3,
    pub forward: Vec3,
    /// Target position; `None` when there is nothing to chase.
    pub target: Option<Vec3>,
    /// Authorized gate signal; `None` when the agent has no gate.
    pub gate_active: Option<bool>,
    /// Tracking health; `None` when no monitor is wired up.
    pub tracking: Option<&'a TrackingHealth>,
    /// Line-of-sight blockers; `None` disables occlusion.
    pub occlusion: Option<&'a dyn OcclusionTest>,
}

/// Read-only results of one tick for presentation and the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PursuitOutput {
    pub state: PursuitState,
    pub pursuing: bool,
    pub sighted: bool,
    pub gated: bool,
    /// Smoothed horizontal speed (m/s).
    pub speed: f32,
    pub locomotion: LocomotionClip,
    /// Target position when inside the view cone, regardless of occlusion or gating.
    pub look_at: Option<Vec3>,
    pub events: Vec<PursuitEvent>,
}

pub struct PursuitController {
    config: PursuitConfig,
    waypoints: Vec<Vec3>,
    memory: AgentMemory,
    prev_gated: bool,
    resume: ResumeSchedule,
    locomotion: LocomotionSmoother,
    last_request_failed: bool,
    events: Vec<PursuitEvent>,
}

impl PursuitController {
    pub fn new(config: PursuitConfig, waypoints: Vec<Vec3>) -> Self {
        Self {
            locomotion: LocomotionSmoother::new(config.speed_smoothing_rate, config.run_speed),
            config,
            waypoints,
            memory: AgentMemory::default(),
            prev_gated: false,
            resume: ResumeSchedule::default(),
            last_request_failed: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    pub fn state(&self) -> PursuitState {
        self.memory.state
    }

    /// Live resume timer, if one is armed and not cancelled.
    pub fn pending_resume(&self) -> Option<&ResumeTimer> {
        self.resume.pending()
    }

    /// Last resume timer record, cancelled or not.
    pub fn resume_record(&self) -> Option<&ResumeTimer> {
        self.resume.record()
    }

    /// Spawn-time setup: walk speed and head for the first waypoint.
    pub fn start(&mut self, nav: &mut dyn Navigator) {
        nav.set_speed(self.config.walk_speed);
        if let Some(&first) = self.waypoints.get(self.memory.waypoint_index) {
            self.request_destination(nav, first);
        }
    }

    /// Run one decision step.
    pub fn tick(&mut self, input: &PursuitInput, nav: &mut dyn Navigator) -> PursuitOutput {
        let query = input
            .target
            .map(|target| VisionQuery::new(&self.config.vision, input.eye, input.forward, target));
        let look_at = query.filter(in_view_cone).map(|q| q.target);

        // 1. Gate: authorized, tracked, and the target inside sight.
        let gate_on = input.gate_active.unwrap_or(false)
            && input.tracking.is_some_and(|health| health.is_tracking);
        let sight = query
            .as_ref()
            .map_or_else(Sighting::default, |q| can_see(q, input.occlusion));
        let gated = gate_on && sight.visible;

        // 2. Sighting, only honored while not gated.
        let sighted = !gated && sight.visible;
        if sighted {
            self.memory.last_seen_position = sight.point;
            self.memory.last_seen_time = input.now;
        }

        // 3-5. Edge-triggered lockout, else steady-state rules.
        if gated && !self.prev_gated {
            self.enter_lockout(input.now, nav);
        } else if !gated && self.prev_gated {
            self.exit_lockout(sighted, sight.point, nav);
        } else if !gated {
            self.evaluate_steady_state(sighted, input.now, nav);
        }
        self.prev_gated = gated;

        // 6. Resume timer.
        if let Some(pick_closest) = self.resume.poll(input.now) {
            if self.memory.state == PursuitState::IgnoredLockout {
                debug!("resume timer fired");
                self.events.push(PursuitEvent::ResumeTimerFired);
                nav.set_stopped(false);
                self.resume_patrol(pick_closest, nav);
            }
        }

        // 7. Movement intent.
        match self.memory.state {
            PursuitState::Pursuit => self.pursue(sighted, sight.point, nav),
            PursuitState::Patrol => self.patrol(nav),
            PursuitState::IgnoredLockout => {}
        }

        let pursuing = self.memory.state == PursuitState::Pursuit;
        let standing = is_standing(nav, self.config.arrive_distance);
        let speed = self.locomotion.update(nav, standing, input.dt);

        PursuitOutput {
            state: self.memory.state,
            pursuing,
            sighted,
            gated,
            speed,
            locomotion: select_clip(pursuing, standing),
            look_at,
            events: std::mem::take(&mut self.events),
        }
    }

    fn enter_lockout(&mut self, now: f64, nav: &mut dyn Navigator) {
        self.cancel_resume();
        nav.reset_path();
        nav.set_stopped(true);
        self.set_state(PursuitState::IgnoredLockout);

        let due_at = self.resume.arm(now, self.config.ignore_resume_delay_secs, true);
        debug!(due_at, "resume timer armed");
        self.events.push(PursuitEvent::ResumeTimerArmed { due_at });
    }

    fn exit_lockout(&mut self, sighted: bool, seen_point: Vec3, nav: &mut dyn Navigator) {
        self.cancel_resume();
        nav.set_stopped(false);

        if sighted {
            self.set_state(PursuitState::Pursuit);
            nav.set_speed(self.config.run_speed);
            self.request_destination(nav, seen_point);
        } else {
            self.resume_patrol(true, nav);
        }
    }

    fn evaluate_steady_state(&mut self, sighted: bool, now: f64, nav: &mut dyn Navigator) {
        match self.memory.state {
            PursuitState::Patrol => {
                if sighted {
                    self.set_state(PursuitState::Pursuit);
                }
            }
            PursuitState::Pursuit => {
                let since_seen = now - self.memory.last_seen_time;
                let searching = since_seen <= self.config.search_duration_secs;
                if !sighted && !searching {
                    // Natural end of a chase keeps the route where it was.
                    self.resume_patrol(false, nav);
                }
            }
            PursuitState::IgnoredLockout => {}
        }
    }

    fn pursue(&mut self, sighted: bool, seen_point: Vec3, nav: &mut dyn Navigator) {
        nav.set_speed(self.config.run_speed);
        let destination = if sighted {
            seen_point
        } else {
            self.memory.last_seen_position
        };
        self.request_destination(nav, destination);

        if !sighted && is_destination_reached(nav, self.config.arrive_distance) {
            // Nothing left to search here; let the grace window lapse.
            self.memory.last_seen_time = f64::NEG_INFINITY;
        }
    }

    fn patrol(&mut self, nav: &mut dyn Navigator) {
        nav.set_speed(self.config.walk_speed);
        if self.waypoints.is_empty() {
            return;
        }

        if is_destination_reached(nav, self.config.arrive_distance) {
            self.advance_waypoint(nav);
        } else if !nav.has_path() && !nav.path_pending() {
            // Earlier request was refused (e.g. off the navmesh); ask again.
            let current = self.waypoints[self.memory.waypoint_index];
            self.request_destination(nav, current);
        }
    }

    fn advance_waypoint(&mut self, nav: &mut dyn Navigator) {
        let count = self.waypoints.len();
        let current = self.memory.waypoint_index;
        let next = if self.config.loop_patrol {
            (current + 1) % count
        } else {
            (current + 1).min(count - 1)
        };

        if next != current {
            self.memory.waypoint_index = next;
            self.events.push(PursuitEvent::WaypointAdvanced { index: next });
        }
        let waypoint = self.waypoints[next];
        self.request_destination(nav, waypoint);
    }

    fn resume_patrol(&mut self, pick_closest: bool, nav: &mut dyn Navigator) {
        nav.set_speed(self.config.walk_speed);
        nav.reset_path();
        self.memory.last_seen_time = f64::NEG_INFINITY;
        self.set_state(PursuitState::Patrol);

        if self.waypoints.is_empty() {
            return;
        }
        if pick_closest {
            self.memory.waypoint_index = self.closest_waypoint(nav.position());
        }
        let waypoint = self.waypoints[self.memory.waypoint_index];
        self.request_destination(nav, waypoint);
    }

    fn closest_waypoint(&self, position: Vec3) -> usize {
        let mut best = 0;
        let mut best_sq = f32::INFINITY;
        for (index, waypoint) in self.waypoints.iter().enumerate() {
            let d = waypoint.distance_squared(position);
            if d < best_sq {
                best_sq = d;
                best = index;
            }
        }
        best
    }

    fn cancel_resume(&mut self) {
        if self.resume.cancel() {
            debug!("resume timer cancelled");
            self.events.push(PursuitEvent::ResumeTimerCancelled);
        }
    }

    fn request_destination(&mut self, nav: &mut dyn Navigator, point: Vec3) -> bool {
        let accepted = try_set_destination(nav, point);
        if !accepted && !self.last_request_failed {
            warn!(?point, on_surface = nav.is_on_surface(), "destination rejected");
            self.events.push(PursuitEvent::DestinationRejected { point });
        }
        self.last_request_failed = !accepted;
        accepted
    }

    fn set_state(&mut self, to: PursuitState) {
        let from = self.memory.state;
        if from != to {
            debug!(?from, ?to, "pursuit state");
            self.memory.state = to;
            self.events.push(PursuitEvent::StateChanged { from, to });
        }
    }
}
