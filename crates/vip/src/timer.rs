//! Prescaled machine timer.
//!
//! The controller schedules deadlines against `mtime`, a software-visible time base
//! slower than the clock. The driver owns that counter and advances it once per clock
//! cycle through a prescaler, so `mtime` ticks at `1 / (limit + 1)` of the clock rate.

/// Clock divider state.
///
/// Invariant: `count <= limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prescaler {
    /// Cycles counted since the last `mtime` increment.
    pub count: u8,
    /// Count at which `mtime` increments and `count` wraps to zero.
    pub limit: u8,
}

/// Machine timer model.
///
/// Starts disabled; [`MachineTimer::arm`] starts it. There is no way back to disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineTimer {
    running: bool,
    ps: Prescaler,
    mtime: u64,
}

impl MachineTimer {
    /// Creates a disabled timer at `mtime == 0`.
    pub const fn new() -> Self {
        Self {
            running: false,
            ps: Prescaler { count: 0, limit: 0 },
            mtime: 0,
        }
    }

    /// Starts the timer with the given prescaler.
    ///
    /// Re-arming a running timer restarts the prescaler phase but keeps `mtime`.
    pub const fn arm(&mut self, prescaler: u8) {
        self.running = true;
        self.ps = Prescaler {
            count: 0,
            limit: prescaler,
        };
    }

    /// Advances the timer by one clock cycle.
    ///
    /// Returns `true` when `mtime` incremented on this cycle.
    pub const fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.ps.count == self.ps.limit {
            self.mtime = self.mtime.wrapping_add(1);
            self.ps.count = 0;
            true
        } else {
            self.ps.count += 1;
            false
        }
    }

    /// Returns the current virtual time.
    pub const fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Returns whether the timer has been armed.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the prescaler state.
    pub const fn prescaler(&self) -> Prescaler {
        self.ps
    }
}
