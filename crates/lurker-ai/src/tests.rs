//! Tests for the gate budget, resume timer and pursuit state machine.

use glam::Vec3;
use proptest::prelude::*;

use lurker_core::config::{GateConfig, PursuitConfig};
use lurker_core::enums::{GatePhase, LocomotionClip, PathStatus, PursuitState};
use lurker_core::events::PursuitEvent;
use lurker_core::feed::TrackingHealth;
use lurker_core::types::Obstacle;
use lurker_perception::occlusion::ObstacleField;

use crate::fsm::{PursuitController, PursuitInput};
use crate::gate::GateBudget;
use crate::navigation::{is_destination_reached, Navigator};
use crate::timer::ResumeSchedule;

/// Scriptable navigator that records every destination request.
#[derive(Debug, Default)]
struct MockNavigator {
    position: Vec3,
    off_surface: bool,
    stopped: bool,
    pending: bool,
    has_path: bool,
    status: PathStatus,
    remaining: f32,
    stopping: f32,
    desired: Vec3,
    speed: f32,
    destination: Option<Vec3>,
    requests: Vec<Vec3>,
    resets: u32,
}

impl MockNavigator {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Pretend the last request resolved into a path with `remaining` meters left.
    fn resolve(&mut self, remaining: f32) {
        self.pending = false;
        self.has_path = true;
        self.status = PathStatus::Complete;
        self.remaining = remaining;
    }

    fn last_request(&self) -> Option<Vec3> {
        self.requests.last().copied()
    }
}

impl Navigator for MockNavigator {
    fn is_on_surface(&self) -> bool {
        !self.off_surface
    }
    fn set_destination(&mut self, point: Vec3) -> bool {
        if self.off_surface {
            return false;
        }
        self.requests.push(point);
        // Re-requesting the current destination keeps the existing path.
        if !(self.has_path && self.destination == Some(point)) {
            self.destination = Some(point);
            self.pending = true;
        }
        true
    }
    fn reset_path(&mut self) {
        self.resets += 1;
        self.destination = None;
        self.has_path = false;
        self.pending = false;
    }
    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }
    fn is_stopped(&self) -> bool {
        self.stopped
    }
    fn path_pending(&self) -> bool {
        self.pending
    }
    fn has_path(&self) -> bool {
        self.has_path
    }
    fn path_status(&self) -> PathStatus {
        self.status
    }
    fn remaining_distance(&self) -> f32 {
        self.remaining
    }
    fn stopping_distance(&self) -> f32 {
        self.stopping
    }
    fn velocity(&self) -> Vec3 {
        self.desired
    }
    fn desired_velocity(&self) -> Vec3 {
        self.desired
    }
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
    fn position(&self) -> Vec3 {
        self.position
    }
}

const DT: f64 = 0.25;

fn tracking_ok() -> TrackingHealth {
    TrackingHealth {
        receiving: true,
        has_face: true,
        best_index: Some(0),
        best_confidence: 0.9,
        confident: true,
        has_3d: true,
        is_tracking: true,
    }
}

fn input<'a>(
    now: f64,
    target: Option<Vec3>,
    gate_active: bool,
    tracking: &'a TrackingHealth,
) -> PursuitInput<'a> {
    PursuitInput {
        now,
        dt: DT,
        eye: Vec3::new(0.0, 1.6, 0.0),
        forward: Vec3::Z,
        target,
        gate_active: Some(gate_active),
        tracking: Some(tracking),
        occlusion: None,
    }
}

/// Target in plain view, 8m ahead.
fn visible_target() -> Option<Vec3> {
    Some(Vec3::new(0.0, 1.6, 8.0))
}

/// Target behind the agent.
fn hidden_target() -> Option<Vec3> {
    Some(Vec3::new(0.0, 1.6, -8.0))
}

fn route() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
    ]
}

// ---- Gate budget ----

fn scenario_gate() -> GateBudget {
    GateBudget::new(GateConfig {
        max_charge_secs: 2.0,
        cooldown_secs: 2.0,
        regen_per_sec: 1.5,
    })
}

#[test]
fn test_gate_drains_full_budget_then_cools_down() {
    let mut gate = scenario_gate();
    let mut drained_ticks = 0;
    let mut now = 0.0;
    let mut depleted_at = None;

    for tick in 1..=8 {
        now = tick as f64 * DT;
        let before = gate.charge();
        gate.tick(true, true, DT, now);
        if gate.charge() < before {
            drained_ticks += 1;
        }
        if gate.is_cooling_down() {
            depleted_at = Some(now);
        }
    }

    // Exactly two seconds of budget consumed, then forced cooldown.
    assert_eq!(drained_ticks as f64 * DT, 2.0);
    assert_eq!(gate.charge(), 0.0);
    assert_eq!(depleted_at, Some(2.0));
    assert_eq!(gate.lock_until(), 4.0);

    // Raw signal held throughout the cooldown: never active.
    while now < 4.0 - 1e-9 {
        now += DT;
        if now >= 4.0 {
            break;
        }
        assert!(!gate.tick(true, true, DT, now), "active during cooldown at {now}");
    }

    // 2s of cooldown at 1.5/s is more than the 1.33s needed to refill.
    assert!(gate.is_full());
    assert!(gate.tick(true, true, DT, 4.0), "should re-activate after cooldown");
}

#[test]
fn test_gate_requires_full_charge_after_short_cooldown() {
    let mut gate = GateBudget::new(GateConfig {
        max_charge_secs: 2.0,
        cooldown_secs: 0.5,
        regen_per_sec: 1.5,
    });
    let mut now = 0.0;
    for _ in 0..8 {
        now += DT;
        gate.tick(true, true, DT, now);
    }
    assert!(gate.is_cooling_down());

    // Hold the raw signal and record when the gate re-opens.
    let mut reopened_at = None;
    for _ in 0..40 {
        now += DT;
        if gate.tick(true, true, DT, now) {
            reopened_at = Some(now);
            break;
        }
    }
    let reopened_at = reopened_at.expect("gate should re-open");
    // Charge tops out during the 3.5 tick; activation needs it full going in.
    assert_eq!(reopened_at, 3.75);
}

#[test]
fn test_gate_early_release_skips_cooldown() {
    let mut gate = scenario_gate();
    assert!(gate.tick(true, true, DT, 0.25));
    assert!(gate.tick(true, true, DT, 0.5));
    assert!(!gate.tick(false, true, DT, 0.75));
    assert_eq!(gate.phase(), GatePhase::Recovering);
    assert_eq!(gate.charge(), 1.5);

    // Not full yet, so a fresh smile is refused until regen tops it up.
    assert!(!gate.tick(true, true, DT, 1.0));
    assert!(!gate.tick(true, true, DT, 1.25));
    assert!(gate.is_full());
    assert!(gate.tick(true, true, DT, 1.5));
}

#[test]
fn test_gate_hard_reset_on_tracking_loss() {
    let mut gate = scenario_gate();
    let mut now = 0.0;
    for _ in 0..8 {
        now += DT;
        gate.tick(true, true, DT, now);
    }
    assert!(gate.is_cooling_down());

    assert!(!gate.tick(true, false, DT, now + DT));
    assert_eq!(gate.phase(), GatePhase::Recovering);
    assert_eq!(gate.charge(), 2.0);
    assert_eq!(gate.lock_until(), f64::NEG_INFINITY);

    // Tracking back: immediately eligible again.
    assert!(gate.tick(true, true, DT, now + 2.0 * DT));
}

#[test]
fn test_gate_charge01() {
    let mut gate = scenario_gate();
    assert_eq!(gate.charge01(), 1.0);
    gate.tick(true, true, DT, DT);
    assert_eq!(gate.charge01(), 0.875);
}

proptest! {
    #[test]
    fn prop_gate_invariants(
        steps in prop::collection::vec((any::<bool>(), prop::bool::weighted(0.9), 1u8..=8), 1..200)
    ) {
        let config = GateConfig { max_charge_secs: 2.0, cooldown_secs: 1.0, regen_per_sec: 1.5 };
        let mut gate = GateBudget::new(config);
        let mut now = 0.0;

        for (raw, tracking, sixteenths) in steps {
            let dt = sixteenths as f64 / 16.0;
            now += dt;
            let was_active = gate.is_active();
            let was_full = gate.is_full();
            let before = gate.charge();

            let active = gate.tick(raw, tracking, dt, now);

            // Always within bounds.
            prop_assert!(gate.charge() >= 0.0 && gate.charge() <= config.max_charge_secs);
            // A session only starts on a full charge.
            if active && !was_active {
                prop_assert!(was_full);
            }
            if tracking && was_active && raw {
                prop_assert!(gate.charge() < before);
            } else if !(tracking && raw && was_full && !was_active) {
                // Not draining: charge never drops.
                prop_assert!(gate.charge() >= before);
            }
            if !tracking {
                prop_assert!(!active);
            }
        }
    }
}

// ---- Resume timer ----

#[test]
fn test_resume_timer_fires_once() {
    let mut schedule = ResumeSchedule::default();
    assert_eq!(schedule.arm(1.0, 6.0, true), 7.0);
    assert_eq!(schedule.poll(6.9), None);
    assert_eq!(schedule.poll(7.0), Some(true));
    assert_eq!(schedule.poll(8.0), None);
}

#[test]
fn test_cancelled_timer_never_fires() {
    let mut schedule = ResumeSchedule::default();
    schedule.arm(0.0, 1.0, false);
    assert!(schedule.cancel());
    assert!(!schedule.cancel());
    assert_eq!(schedule.poll(5.0), None);
    assert!(schedule.pending().is_none());
    assert!(schedule.record().is_some_and(|t| t.cancelled));
}

#[test]
fn test_rearm_replaces_timer() {
    let mut schedule = ResumeSchedule::default();
    schedule.arm(0.0, 1.0, false);
    schedule.arm(0.5, 1.0, true);
    assert_eq!(schedule.poll(1.0), None);
    assert_eq!(schedule.poll(1.5), Some(true));
}

// ---- Arrival ----

#[test]
fn test_pending_or_missing_path_never_arrives() {
    let mut nav = MockNavigator::at(Vec3::ZERO);
    assert!(!is_destination_reached(&nav, 0.6));

    nav.resolve(0.0);
    assert!(is_destination_reached(&nav, 0.6));

    nav.pending = true;
    assert!(!is_destination_reached(&nav, 0.6));

    nav.pending = false;
    nav.status = PathStatus::Invalid;
    assert!(!is_destination_reached(&nav, 0.6));
}

#[test]
fn test_arrival_uses_larger_of_stopping_and_tolerance() {
    let mut nav = MockNavigator::at(Vec3::ZERO);
    nav.resolve(1.0);
    assert!(!is_destination_reached(&nav, 0.6));
    nav.stopping = 1.2;
    assert!(is_destination_reached(&nav, 0.6));
}

// ---- Pursuit controller ----

fn controller() -> PursuitController {
    PursuitController::new(PursuitConfig::default(), route())
}

#[test]
fn test_patrol_advances_after_arrival() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = PursuitController::new(
        PursuitConfig::default(),
        vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
    );

    fsm.start(&mut nav);
    assert_eq!(nav.last_request(), Some(Vec3::ZERO));
    assert_eq!(nav.speed, fsm.config().walk_speed);

    // Already standing on W0 once the path resolves.
    nav.resolve(0.0);
    let out = fsm.tick(&input(DT, None, false, &health), &mut nav);
    assert_eq!(nav.last_request(), Some(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(fsm.memory().waypoint_index, 1);
    assert!(out.events.contains(&PursuitEvent::WaypointAdvanced { index: 1 }));
}

#[test]
fn test_patrol_does_not_skip_while_path_pending() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    // Path still being computed: no arrival even though remaining reads 0.
    fsm.tick(&input(DT, None, false, &health), &mut nav);
    assert_eq!(fsm.memory().waypoint_index, 0);
    assert_eq!(nav.requests.len(), 1);
}

#[test]
fn test_patrol_loops_and_clamps() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    for tick in 1..=3 {
        nav.resolve(0.0);
        fsm.tick(&input(tick as f64 * DT, None, false, &health), &mut nav);
    }
    assert_eq!(fsm.memory().waypoint_index, 0, "loop wraps to the start");

    let config = PursuitConfig {
        loop_patrol: false,
        ..Default::default()
    };
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = PursuitController::new(config, route());
    fsm.start(&mut nav);
    for tick in 1..=5 {
        nav.resolve(0.0);
        fsm.tick(&input(tick as f64 * DT, None, false, &health), &mut nav);
    }
    assert_eq!(fsm.memory().waypoint_index, 2, "non-loop holds the last waypoint");
    assert_eq!(nav.last_request(), Some(route()[2]));
}

#[test]
fn test_no_waypoints_means_no_movement() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = PursuitController::new(PursuitConfig::default(), Vec::new());
    fsm.start(&mut nav);
    for tick in 1..10 {
        let out = fsm.tick(&input(tick as f64 * DT, None, false, &health), &mut nav);
        assert_eq!(out.state, PursuitState::Patrol);
        assert_eq!(out.locomotion, LocomotionClip::Idle);
    }
    assert!(nav.requests.is_empty());
}

#[test]
fn test_rejected_destination_retried() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    nav.off_surface = true;
    let mut fsm = controller();
    fsm.start(&mut nav);
    assert!(nav.requests.is_empty());

    let rejections = |events: &[PursuitEvent]| {
        events
            .iter()
            .filter(|e| matches!(e, PursuitEvent::DestinationRejected { .. }))
            .count()
    };

    // Reported once per failure streak, not every tick.
    let out = fsm.tick(&input(DT, None, false, &health), &mut nav);
    assert_eq!(rejections(&out.events), 1);
    let out = fsm.tick(&input(2.0 * DT, None, false, &health), &mut nav);
    assert_eq!(rejections(&out.events), 0);

    nav.off_surface = false;
    fsm.tick(&input(3.0 * DT, None, false, &health), &mut nav);
    assert_eq!(nav.last_request(), Some(route()[0]));
}

#[test]
fn test_patrol_to_pursuit_on_sight() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    let out = fsm.tick(&input(DT, visible_target(), false, &health), &mut nav);
    assert_eq!(out.state, PursuitState::Pursuit);
    assert!(out.pursuing);
    assert!(out.sighted);
    assert_eq!(out.locomotion, LocomotionClip::Run);
    assert_eq!(nav.speed, fsm.config().run_speed);
    assert_eq!(nav.last_request(), visible_target());
    assert_eq!(fsm.memory().last_seen_time, DT);
}

#[test]
fn test_occluded_target_not_pursued() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    let wall = ObstacleField::new(vec![Obstacle::cuboid(
        Vec3::new(0.0, 1.5, 4.0),
        Vec3::new(2.0, 1.5, 0.2),
        0,
    )]);
    let mut tick_input = input(DT, visible_target(), false, &health);
    tick_input.occlusion = Some(&wall);

    let out = fsm.tick(&tick_input, &mut nav);
    assert_eq!(out.state, PursuitState::Patrol);
    assert!(!out.sighted);
    // Still inside the cone, so the head keeps tracking.
    assert_eq!(out.look_at, visible_target());
}

#[test]
fn test_search_window_bound() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = PursuitController::new(
        PursuitConfig {
            search_duration_secs: 1.0,
            ..Default::default()
        },
        route(),
    );
    fsm.start(&mut nav);

    let t0 = DT;
    fsm.tick(&input(t0, visible_target(), false, &health), &mut nav);
    assert_eq!(fsm.state(), PursuitState::Pursuit);

    // Far from the last known position, so the search does not end early.
    nav.resolve(50.0);
    let mut now = t0;
    loop {
        now += DT;
        let out = fsm.tick(&input(now, hidden_target(), false, &health), &mut nav);
        nav.resolve(50.0);
        if now - t0 <= 1.0 {
            assert_eq!(out.state, PursuitState::Pursuit, "still searching at {now}");
            assert_eq!(nav.last_request(), visible_target(), "heads to last known position");
        } else {
            assert_eq!(out.state, PursuitState::Patrol, "search over at {now}");
            break;
        }
    }
}

#[test]
fn test_natural_chase_end_keeps_route_index() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = PursuitController::new(
        PursuitConfig {
            search_duration_secs: 0.0,
            ..Default::default()
        },
        route(),
    );
    fsm.start(&mut nav);
    nav.resolve(0.0);
    fsm.tick(&input(DT, None, false, &health), &mut nav);
    assert_eq!(fsm.memory().waypoint_index, 1);

    // Chase ends right next to W0, but the route carries on from W1.
    nav.position = Vec3::new(0.5, 0.0, 0.5);
    fsm.tick(&input(2.0 * DT, visible_target(), false, &health), &mut nav);
    let out = fsm.tick(&input(3.0 * DT, hidden_target(), false, &health), &mut nav);
    assert_eq!(out.state, PursuitState::Patrol);
    assert_eq!(fsm.memory().waypoint_index, 1);
    assert_eq!(nav.last_request(), Some(route()[1]));
}

#[test]
fn test_reaching_last_known_position_ends_search() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    fsm.tick(&input(DT, visible_target(), false, &health), &mut nav);
    nav.resolve(0.1);
    let out = fsm.tick(&input(2.0 * DT, hidden_target(), false, &health), &mut nav);
    assert_eq!(out.state, PursuitState::Pursuit);
    assert_eq!(fsm.memory().last_seen_time, f64::NEG_INFINITY);

    let out = fsm.tick(&input(3.0 * DT, hidden_target(), false, &health), &mut nav);
    assert_eq!(out.state, PursuitState::Patrol);
}

#[test]
fn test_gate_while_pursuing_then_release() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    fsm.tick(&input(0.25, visible_target(), false, &health), &mut nav);
    assert_eq!(fsm.state(), PursuitState::Pursuit);

    // Gate opens while the target is in sight.
    let resets_before = nav.resets;
    let out = fsm.tick(&input(0.5, visible_target(), true, &health), &mut nav);
    assert_eq!(out.state, PursuitState::IgnoredLockout);
    assert!(out.gated);
    assert!(!out.sighted);
    assert!(!out.pursuing);
    assert_eq!(nav.resets, resets_before + 1);
    assert!(nav.stopped);
    let timer = *fsm.pending_resume().expect("timer armed");
    assert_eq!(timer.due_at(), 0.5 + fsm.config().ignore_resume_delay_secs);
    assert!(out.events.contains(&PursuitEvent::ResumeTimerArmed { due_at: timer.due_at() }));

    // Gate closes 1s later, well before the delay, target still in sight.
    let moved = Some(Vec3::new(1.0, 1.6, 7.0));
    let out = fsm.tick(&input(1.5, moved, false, &health), &mut nav);
    assert_eq!(out.state, PursuitState::Pursuit);
    assert!(!nav.stopped);
    assert_eq!(nav.last_request(), moved);
    assert_eq!(nav.speed, fsm.config().run_speed);
    assert!(fsm.pending_resume().is_none());
    assert!(fsm.resume_record().is_some_and(|t| t.cancelled));
    assert!(out.events.contains(&PursuitEvent::ResumeTimerCancelled));
    assert!(!out.events.contains(&PursuitEvent::ResumeTimerFired));
}

#[test]
fn test_consecutive_gated_ticks_do_not_rearm() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    fsm.tick(&input(0.25, visible_target(), true, &health), &mut nav);
    let armed = *fsm.pending_resume().expect("timer armed");
    for tick in 2..10 {
        let out = fsm.tick(&input(tick as f64 * 0.25, visible_target(), true, &health), &mut nav);
        assert_eq!(out.state, PursuitState::IgnoredLockout);
        assert!(out.events.is_empty());
        assert_eq!(fsm.pending_resume(), Some(&armed));
    }
}

#[test]
fn test_timer_expiry_resumes_nearest_waypoint_while_gated() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let config = PursuitConfig {
        ignore_resume_delay_secs: 1.0,
        ..Default::default()
    };
    let mut fsm = PursuitController::new(config, route());
    fsm.start(&mut nav);

    fsm.tick(&input(0.25, visible_target(), true, &health), &mut nav);
    nav.position = Vec3::new(9.0, 0.0, 9.0);

    let mut now = 0.25;
    let mut fired = false;
    while now < 1.25 {
        now += 0.25;
        let out = fsm.tick(&input(now, visible_target(), true, &health), &mut nav);
        if out.events.contains(&PursuitEvent::ResumeTimerFired) {
            fired = true;
            assert_eq!(now, 1.25);
            assert_eq!(out.state, PursuitState::Patrol);
            // Still gated: the target is ignored even though it is in view.
            assert!(out.gated);
        }
    }
    assert!(fired);
    assert_eq!(fsm.memory().waypoint_index, 2);
    assert_eq!(nav.last_request(), Some(route()[2]));
    assert!(!nav.stopped);
}

#[test]
fn test_release_without_sight_resumes_nearest_waypoint() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    fsm.tick(&input(0.25, visible_target(), true, &health), &mut nav);
    nav.position = Vec3::new(10.5, 0.0, 0.0);
    let out = fsm.tick(&input(0.5, hidden_target(), true, &health), &mut nav);

    // Target left the cone, so the gate no longer applies.
    assert!(!out.gated);
    assert_eq!(out.state, PursuitState::Patrol);
    assert_eq!(fsm.memory().waypoint_index, 1);
    assert!(fsm.pending_resume().is_none());
}

#[test]
fn test_gate_ignored_without_tracking() {
    let lost = TrackingHealth::default();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    let out = fsm.tick(&input(0.25, visible_target(), true, &lost), &mut nav);
    assert!(!out.gated);
    assert_eq!(out.state, PursuitState::Pursuit);
}

#[test]
fn test_missing_collaborators_degrade() {
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);

    let bare = PursuitInput {
        now: 0.25,
        dt: DT,
        eye: Vec3::new(0.0, 1.6, 0.0),
        forward: Vec3::Z,
        target: None,
        gate_active: None,
        tracking: None,
        occlusion: None,
    };
    let out = fsm.tick(&bare, &mut nav);
    assert_eq!(out.state, PursuitState::Patrol);
    assert!(out.look_at.is_none());

    let no_gate = PursuitInput {
        target: visible_target(),
        ..bare
    };
    let out = fsm.tick(&no_gate, &mut nav);
    assert_eq!(out.state, PursuitState::Pursuit);
}

#[test]
fn test_speed_smoothing_clamps_to_run_speed() {
    let health = tracking_ok();
    let mut nav = MockNavigator::at(Vec3::ZERO);
    let mut fsm = controller();
    fsm.start(&mut nav);
    nav.desired = Vec3::new(50.0, 0.0, 50.0);

    // Fresh chase request: path pending, so the agent reads as standing.
    let out = fsm.tick(&input(0.05, visible_target(), false, &health), &mut nav);
    assert_eq!(out.speed, 0.0);
    assert_eq!(out.locomotion, LocomotionClip::Run);

    let mut last = out.speed;
    for tick in 2..40 {
        nav.resolve(20.0);
        let mut step = input(tick as f64 * 0.05, visible_target(), false, &health);
        step.dt = 0.05;
        let out = fsm.tick(&step, &mut nav);
        assert!(out.speed >= last);
        assert!(out.speed <= fsm.config().run_speed);
        last = out.speed;
    }
    assert!((last - fsm.config().run_speed).abs() < 1e-3);
}
