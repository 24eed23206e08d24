//! Gate budget: turns a raw on/off signal into a rationed "active" signal.
//!
//! A session may only start on a full charge. While active and the raw
//! signal holds, charge drains in real time; running dry forces a cooldown,
//! letting go early does not. Charge regenerates whenever it is not
//! draining, cooldown included.

use tracing::{debug, trace};

use lurker_core::config::GateConfig;
use lurker_core::constants::GATE_FULL_EPSILON;
use lurker_core::enums::GatePhase;

#[derive(Debug, Clone)]
pub struct GateBudget {
    config: GateConfig,
    phase: GatePhase,
    /// Seconds of active time left, within [0, max_charge_secs].
    charge: f64,
    /// Absolute time at which the current cooldown ends.
    lock_until: f64,
}

impl GateBudget {
    /// New gate, fully charged and recovering.
    pub fn new(config: GateConfig) -> Self {
        Self {
            charge: config.max_charge_secs,
            config,
            phase: GatePhase::Recovering,
            lock_until: f64::NEG_INFINITY,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GatePhase::Active
    }

    pub fn is_cooling_down(&self) -> bool {
        self.phase == GatePhase::Cooldown
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Remaining charge as a fraction of the full budget.
    pub fn charge01(&self) -> f64 {
        (self.charge / self.config.max_charge_secs).clamp(0.0, 1.0)
    }

    pub fn lock_until(&self) -> f64 {
        self.lock_until
    }

    pub fn is_full(&self) -> bool {
        self.charge >= self.config.max_charge_secs - GATE_FULL_EPSILON
    }

    /// Advance the gate by `dt` seconds ending at `now`. Returns whether the
    /// gate is active after this tick.
    ///
    /// `tracking_ok == false` means the signal source dropped out; the gate
    /// is reset to a full, idle state instead of keeping a stale session.
    pub fn tick(&mut self, raw_signal: bool, tracking_ok: bool, dt: f64, now: f64) -> bool {
        if !tracking_ok {
            self.hard_reset();
            return false;
        }

        if self.phase == GatePhase::Cooldown && now >= self.lock_until {
            self.set_phase(GatePhase::Recovering);
        }

        match self.phase {
            GatePhase::Cooldown => self.regen(dt),
            GatePhase::Active => {
                if raw_signal {
                    self.drain(dt, now);
                } else {
                    self.set_phase(GatePhase::Recovering);
                }
            }
            GatePhase::Recovering => {
                if raw_signal && self.is_full() {
                    self.set_phase(GatePhase::Active);
                    self.drain(dt, now);
                } else {
                    self.regen(dt);
                }
            }
        }

        trace!(
            raw = raw_signal,
            phase = ?self.phase,
            charge = self.charge,
            "gate tick"
        );
        self.is_active()
    }

    /// Drop any session or cooldown and refill the budget.
    pub fn hard_reset(&mut self) {
        if self.phase != GatePhase::Recovering || !self.is_full() {
            debug!(phase = ?self.phase, charge = self.charge, "gate hard reset");
        }
        self.phase = GatePhase::Recovering;
        self.lock_until = f64::NEG_INFINITY;
        self.charge = self.config.max_charge_secs;
    }

    fn drain(&mut self, dt: f64, now: f64) {
        self.charge -= dt;
        if self.charge <= 0.0 {
            self.charge = 0.0;
            self.lock_until = now + self.config.cooldown_secs;
            self.set_phase(GatePhase::Cooldown);
        }
    }

    fn regen(&mut self, dt: f64) {
        let charge = self.charge + self.config.regen_per_sec * dt;
        self.charge = charge.min(self.config.max_charge_secs);
    }

    fn set_phase(&mut self, phase: GatePhase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, charge = self.charge, "gate phase");
            self.phase = phase;
        }
    }
}
