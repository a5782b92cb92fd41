//! Randomized interrupt stimulus.
//!
//! Exercises the controller's acceptance and acknowledgment protocol under random timing.
//! Every cycle of a run, in order:
//! 1. **Clear:** Lines, acknowledgment, and acknowledged id return to zero.
//! 2. **Acknowledge:** If the device presents a valid interrupt and the acknowledgment draw
//!    holds, acknowledge the presented line for this cycle. Interrupts may stay valid for
//!    several cycles first, which models software response latency.
//! 3. **Inject:** If the injection draw holds, drive a random line pattern for this cycle and
//!    count one injection event, even when the pattern is all zeros.
//! 4. **Advance** one clock cycle.
//!
//! Both draws happen every cycle and are independent, so an acknowledgment and an injection
//! can share a cycle.
//!
//! Acknowledgment latency counts the cycles the acknowledged line was continuously
//! presented. A line preempted by an earlier deadline starts over when it is presented again.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::common::{IRQ_LINE_MASK, NR_IRQS, Result};
use crate::dut::{Dut, WaveTracer};
use crate::stats::StimulusReport;
use crate::vip::EdfIcVip;

/// Source of the per-cycle random decisions.
pub trait Decisions {
    /// Acknowledgment draw: holds with probability `1 / one_in`.
    fn acknowledge(&mut self, one_in: u32) -> bool;
    /// Injection draw: holds with probability `1 / one_in`.
    fn inject(&mut self, one_in: u32) -> bool;
    /// Raw line pattern for an injection; bits above the implemented lines are ignored.
    fn line_pattern(&mut self) -> u8;
}

/// Decision source backed by a [`rand`] generator.
#[derive(Debug, Clone)]
pub struct RngDecisions<G> {
    rng: G,
}

/// Non-deterministic decisions from the thread-local generator.
pub type ThreadRngDecisions = RngDecisions<ThreadRng>;

/// Reproducible decisions from a seeded generator.
pub type SeededDecisions = RngDecisions<StdRng>;

impl<G: Rng> RngDecisions<G> {
    /// Wraps an existing generator.
    pub const fn from_rng(rng: G) -> Self {
        Self { rng }
    }
}

impl RngDecisions<StdRng> {
    /// Creates a source that replays the same decisions for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngDecisions<ThreadRng> {
    fn default() -> Self {
        Self::from_rng(rand::thread_rng())
    }
}

impl<G: Rng> Decisions for RngDecisions<G> {
    fn acknowledge(&mut self, one_in: u32) -> bool {
        self.rng.gen_ratio(1, one_in)
    }

    fn inject(&mut self, one_in: u32) -> bool {
        self.rng.gen_ratio(1, one_in)
    }

    fn line_pattern(&mut self) -> u8 {
        self.rng.r#gen()
    }
}

impl<D: Dut, W: WaveTracer, R: Decisions> EdfIcVip<D, W, R> {
    /// Runs the stimulus loop until `limit` injection events have been drawn.
    ///
    /// The loop length in cycles is random. The stimulus inputs are cleared again before
    /// returning, so every driven pattern and acknowledgment lasts exactly one cycle.
    pub fn drive_rand_irqs(&mut self, limit: u32) -> Result<StimulusReport> {
        let ack_one_in = self.config.ack_one_in;
        let inject_one_in = self.config.inject_one_in;
        let mut report = StimulusReport::default();
        // Presented line and the cycle it was first presented on.
        let mut presented: Option<(u8, u64)> = None;

        while report.injections < limit {
            self.dut.inputs_mut().clear_stimulus();
            let out = self.dut.outputs();
            let mtime = self.timer.mtime();

            let ack = self.decisions.acknowledge(ack_one_in);
            if out.irq_valid {
                let since = match presented {
                    Some((line, since)) if line == out.irq_id => since,
                    _ => report.cycles,
                };
                presented = Some((out.irq_id, since));
                if ack {
                    let io = self.dut.inputs_mut();
                    io.irq_ack = true;
                    io.irq_id = out.irq_id;
                    let latency = report.cycles - since;
                    report.acks += 1;
                    report.total_ack_latency += latency;
                    report.max_ack_latency = report.max_ack_latency.max(latency);
                    presented = None;
                    info!(
                        target: "irq_driver",
                        line = out.irq_id,
                        deadline = out.irq_dl,
                        mtime,
                        latency,
                        "ack interrupt"
                    );
                }
            } else {
                presented = None;
            }

            if self.decisions.inject(inject_one_in) {
                let pattern = self.decisions.line_pattern() & IRQ_LINE_MASK;
                self.dut.inputs_mut().irq = pattern;
                for line in (0..NR_IRQS).filter(|line| pattern & (1 << line) != 0) {
                    report.lines_driven += 1;
                    info!(target: "irq_driver", line, mtime, "line driven");
                }
                if pattern == 0 {
                    report.empty_injections += 1;
                }
                report.injections += 1;
            }

            self.cycles(1)?;
            report.cycles += 1;
        }

        self.dut.inputs_mut().clear_stimulus();
        self.stats.record_stimulus(&report);
        Ok(report)
    }
}
