//! Simulation constants and tuning defaults.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Default seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Vision ---

/// Maximum sight distance (m).
pub const VIEW_RADIUS: f32 = 15.0;

/// Half of the full field-of-view angle (degrees). The full cone is 90°.
pub const VIEW_HALF_ANGLE_DEG: f32 = 45.0;

/// Eye height above the agent's feet when no head transform is given (m).
pub const EYE_HEIGHT: f32 = 1.6;

/// Radius of the swept sphere used for occlusion probes (m).
pub const OCCLUSION_PROBE_RADIUS: f32 = 0.1;

/// Slack applied to the inclusive field-of-view comparison (degrees).
/// Absorbs arccos rounding so a target exactly on the cone edge stays visible.
pub const FOV_EPSILON_DEG: f32 = 1e-3;

/// Physics layer obstacles are placed on by default.
pub const OBSTACLE_LAYER: u8 = 0;

// --- Pursuit ---

/// Grace window after losing sight during which pursuit continues (s).
pub const SEARCH_DURATION_SECS: f64 = 2.5;

/// Patrol speed (m/s).
pub const WALK_SPEED: f32 = 3.5;

/// Pursuit speed (m/s).
pub const RUN_SPEED: f32 = 6.0;

/// Distance at which a destination counts as reached (m).
pub const ARRIVE_DISTANCE: f32 = 0.6;

/// Delay between entering the gated lockout and resuming patrol (s).
pub const IGNORE_RESUME_DELAY_SECS: f64 = 6.0;

// --- Locomotion ---

/// Exponential smoothing rate for the presentation speed (1/s).
pub const SPEED_SMOOTHING_RATE: f32 = 10.0;

/// Desired velocity squared below which the agent counts as standing.
pub const STANDING_SPEED_SQ: f32 = 0.01;

// --- Tracking health ---

/// Minimum mean landmark confidence for a face to count.
pub const MIN_FACE_CONFIDENCE: f32 = 0.25;

/// Packet counter silence after which the transport counts as stalled (s).
pub const RECEIVE_TIMEOUT_SECS: f64 = 0.5;

// --- Smile gate ---

/// Mouth-wide feature value at or above which the raw smile signal is on.
pub const SMILE_THRESHOLD: f32 = 0.5;

/// Full gate budget (seconds of continuous authorized smiling).
pub const GATE_MAX_CHARGE_SECS: f64 = 2.0;

/// Forced inactivity after the budget is depleted (s).
pub const GATE_COOLDOWN_SECS: f64 = 2.0;

/// Charge regenerated per second while not draining.
pub const GATE_REGEN_PER_SEC: f64 = 1.5;

/// Tolerance for the "fully charged" test.
pub const GATE_FULL_EPSILON: f64 = 1e-4;

// --- Navigation ---

/// Default stopping distance of the kinematic navigator (m).
pub const NAV_STOPPING_DISTANCE: f32 = 0.0;

/// Distance below which the kinematic navigator snaps onto its destination (m).
pub const NAV_SNAP_DISTANCE: f32 = 1e-3;
