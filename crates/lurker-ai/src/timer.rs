//! Deferred, cancellable resume action.
//!
//! Stored as plain schedule data and polled every tick. Arming replaces any
//! earlier record, so timers never stack.

/// One scheduled resume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumeTimer {
    pub armed_at: f64,
    pub delay: f64,
    /// Resume at the waypoint nearest the agent rather than the current one.
    pub pick_closest: bool,
    pub cancelled: bool,
}

impl ResumeTimer {
    pub fn due_at(&self) -> f64 {
        self.armed_at + self.delay
    }

    pub fn is_due(&self, now: f64) -> bool {
        !self.cancelled && now >= self.due_at()
    }
}

/// Holder for at most one resume timer.
#[derive(Debug, Clone, Default)]
pub struct ResumeSchedule {
    timer: Option<ResumeTimer>,
}

impl ResumeSchedule {
    /// Schedule a resume `delay` seconds after `now`. Returns the due time.
    pub fn arm(&mut self, now: f64, delay: f64, pick_closest: bool) -> f64 {
        let timer = ResumeTimer {
            armed_at: now,
            delay,
            pick_closest,
            cancelled: false,
        };
        self.timer = Some(timer);
        timer.due_at()
    }

    /// Cancel a live timer. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.timer.as_mut() {
            Some(timer) if !timer.cancelled => {
                timer.cancelled = true;
                true
            }
            _ => false,
        }
    }

    /// Fire the timer if it is due. Returns its `pick_closest` flag once.
    pub fn poll(&mut self, now: f64) -> Option<bool> {
        match self.timer {
            Some(timer) if timer.is_due(now) => {
                self.timer = None;
                Some(timer.pick_closest)
            }
            _ => None,
        }
    }

    /// The live (armed, not cancelled) timer.
    pub fn pending(&self) -> Option<&ResumeTimer> {
        self.timer.as_ref().filter(|t| !t.cancelled)
    }

    /// The last record, including a cancelled one.
    pub fn record(&self) -> Option<&ResumeTimer> {
        self.timer.as_ref()
    }
}
