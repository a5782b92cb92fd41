//! Driver definition and lifecycle.
//!
//! `EdfIcVip` is the container for everything a run touches. It coordinates:
//! 1. **Ownership:** The device model and waveform tracer, for the driver's whole lifetime.
//! 2. **Time:** The cycle counter and the prescaled machine timer.
//! 3. **Phases:** Reset, idle delays, and the cycle primitive every other operation builds on.
//!
//! Bus transactions live in [`crate::bus`], line configuration in [`crate::cfg`], and
//! randomized stimulus in [`crate::stimulus`].

use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::common::Result;
use crate::config::VipConfig;
use crate::dut::{Dut, NoTrace, WaveTracer};
use crate::stats::VipStats;
use crate::stimulus::{Decisions, ThreadRngDecisions};
use crate::timer::MachineTimer;

/// Bus-functional driver for the EDF interrupt controller.
#[derive(Debug)]
pub struct EdfIcVip<D: Dut, W: WaveTracer = NoTrace, R: Decisions = ThreadRngDecisions> {
    pub(crate) dut: D,
    pub(crate) trace: Option<W>,
    pub(crate) clock: Clock,
    pub(crate) timer: MachineTimer,
    pub(crate) decisions: R,
    pub(crate) config: VipConfig,
    pub(crate) stats: VipStats,
}

impl<D: Dut, W: WaveTracer> EdfIcVip<D, W, ThreadRngDecisions> {
    /// Creates a driver drawing its stimulus decisions from the thread-local RNG.
    pub fn new(dut: D, trace: W, config: VipConfig) -> Result<Self> {
        Self::with_decisions(dut, trace, ThreadRngDecisions::default(), config)
    }
}

impl<D: Dut, W: WaveTracer, R: Decisions> EdfIcVip<D, W, R> {
    /// Creates a driver with an explicit decision source.
    ///
    /// The device is evaluated once with the clock low before any cycle runs.
    pub fn with_decisions(mut dut: D, trace: W, decisions: R, config: VipConfig) -> Result<Self> {
        config.validate()?;
        dut.inputs_mut().clk = false;
        dut.eval();
        debug!(period_ps = config.clock_period_ps, "driver attached");
        Ok(Self {
            dut,
            trace: Some(trace),
            clock: Clock::new(config.clock_period_ps),
            timer: MachineTimer::new(),
            decisions,
            config,
            stats: VipStats::default(),
        })
    }

    /// Holds reset, releases it, arms the machine timer, and lets the device settle.
    pub fn raise_reset(&mut self) -> Result<()> {
        debug!(cycles = self.config.reset_hold_cycles, "holding reset");
        self.cycles(self.config.reset_hold_cycles)?;
        self.dut.inputs_mut().rst_n = true;
        self.arm_timer(self.config.mtime_prescaler);
        self.cycles(self.config.reset_settle_cycles)?;
        debug!(mtime = self.timer.mtime(), "reset released");
        Ok(())
    }

    /// Starts the machine timer with the given prescaler.
    pub fn arm_timer(&mut self, prescaler: u8) {
        self.timer.arm(prescaler);
        debug!(prescaler, "machine timer armed");
    }

    /// Runs `count` idle cycles.
    pub fn delay(&mut self, count: u32) -> Result<()> {
        self.cycles(count)
    }

    /// Runs `num` clock cycles, advancing the timer before each one.
    pub(crate) fn cycles(&mut self, num: u32) -> Result<()> {
        for _ in 0..num {
            if self.timer.tick() {
                trace!(mtime = self.timer.mtime(), "mtime tick");
            }
            self.dut.inputs_mut().mtime = self.timer.mtime();
            self.clock.tick(&mut self.dut, self.trace.as_mut())?;
            self.stats.cycles += 1;
        }
        Ok(())
    }

    /// Closes the waveform tracer. Later cycles run untraced.
    ///
    /// The tracer is released even when closing fails, so it is never closed twice.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut trace) = self.trace.take() {
            trace.close()?;
            debug!(cycles = self.clock.elapsed(), "trace closed");
        }
        Ok(())
    }

    /// Returns the device model.
    pub const fn dut(&self) -> &D {
        &self.dut
    }

    /// Returns the device model for direct port access.
    pub const fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    /// Returns the tracer, unless it has been closed.
    pub const fn tracer(&self) -> Option<&W> {
        self.trace.as_ref()
    }

    /// Returns the machine timer.
    pub const fn timer(&self) -> &MachineTimer {
        &self.timer
    }

    /// Returns the current virtual time.
    pub const fn mtime(&self) -> u64 {
        self.timer.mtime()
    }

    /// Returns the number of cycles run since construction.
    pub const fn elapsed_cycles(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Returns the lifetime statistics.
    pub const fn stats(&self) -> &VipStats {
        &self.stats
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &VipConfig {
        &self.config
    }

    /// Returns the decision source.
    pub const fn decisions(&self) -> &R {
        &self.decisions
    }
}

impl<D: Dut, W: WaveTracer, R: Decisions> Drop for EdfIcVip<D, W, R> {
    fn drop(&mut self) {
        if let Some(mut trace) = self.trace.take() {
            if let Err(err) = trace.close() {
                warn!("failed to close waveform trace: {err}");
            }
        }
    }
}
