//! Clock harness.
//!
//! One clock cycle is three evaluations of the device:
//! 1. **Pre-edge:** Inputs written by the driver settle with `clk` low.
//! 2. **Rising edge:** `clk` goes high; sequential logic captures.
//! 3. **Falling edge:** `clk` goes low again.
//!
//! Each evaluation is followed by a waveform sample. Waveform ticks are numbered from 2
//! (tick 1 is the construction-time evaluation), so for the `n`th cycle run and period `P`
//! the samples land at `(n+1)*P - P/5`, `(n+1)*P`, and `(n+1)*P + P/2`. The tracer is
//! flushed after the last one.

use crate::common::Result;
use crate::dut::{Dut, WaveTracer};

/// Waveform timestamps of one clock cycle, in picoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTimes {
    /// Sample taken after inputs settle, before the rising edge.
    pub pre_rise: u64,
    /// Sample taken after the rising edge.
    pub rise: u64,
    /// Sample taken after the falling edge.
    pub fall: u64,
}

impl EdgeTimes {
    /// Computes the sample times of waveform tick `tick` for a clock of `period_ps`.
    ///
    /// Times saturate at the bounds of `u64` instead of wrapping.
    pub const fn of_cycle(period_ps: u64, tick: u64) -> Self {
        let rise = period_ps.saturating_mul(tick);
        Self {
            pre_rise: rise.saturating_sub(period_ps / 5),
            rise,
            fall: rise.saturating_add(period_ps / 2),
        }
    }
}

/// Cycle counter and edge sequencer.
#[derive(Debug, Clone)]
pub struct Clock {
    period_ps: u64,
    elapsed: u64,
}

impl Clock {
    /// Creates a clock with the given period and no elapsed cycles.
    pub const fn new(period_ps: u32) -> Self {
        Self {
            period_ps: period_ps as u64,
            elapsed: 0,
        }
    }

    /// Returns the number of cycles run so far.
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Returns the clock period in picoseconds.
    pub const fn period_ps(&self) -> u64 {
        self.period_ps
    }

    /// Runs one full clock cycle on `dut`, sampling into `trace` when present.
    pub fn tick<D, W>(&mut self, dut: &mut D, mut trace: Option<&mut W>) -> Result<()>
    where
        D: Dut,
        W: WaveTracer,
    {
        self.elapsed += 1;
        let times = EdgeTimes::of_cycle(self.period_ps, self.elapsed + 1);

        dut.eval();
        sample(dut, trace.as_deref_mut(), times.pre_rise)?;

        dut.inputs_mut().clk = true;
        dut.eval();
        sample(dut, trace.as_deref_mut(), times.rise)?;

        dut.inputs_mut().clk = false;
        dut.eval();
        sample(dut, trace.as_deref_mut(), times.fall)?;

        if let Some(trace) = trace {
            trace.flush()?;
        }
        Ok(())
    }
}

fn sample<D: Dut, W: WaveTracer>(dut: &D, trace: Option<&mut W>, time_ps: u64) -> Result<()> {
    if let Some(trace) = trace {
        trace.dump(time_ps, dut.inputs(), &dut.outputs())?;
    }
    Ok(())
}
