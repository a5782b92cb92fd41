//! Reference testbench sequence.
//!
//! The smoke sequence run against every new controller build: reset, program all
//! lines, pre-load some pending flags, enable everything, then hammer the controller
//! with random injections and acknowledgments.

use tracing::info;

use crate::common::Result;
use crate::config::ScenarioConfig;
use crate::dut::{Dut, WaveTracer};
use crate::stats::StimulusReport;
use crate::stimulus::Decisions;
use crate::vip::EdfIcVip;

/// Runs the reference sequence described by `scenario` on `vip`.
pub fn run_reference_sequence<D, W, R>(
    vip: &mut EdfIcVip<D, W, R>,
    scenario: &ScenarioConfig,
) -> Result<StimulusReport>
where
    D: Dut,
    W: WaveTracer,
    R: Decisions,
{
    vip.raise_reset()?;

    for (idx, &offset) in (0u8..).zip(scenario.line_offsets.iter()) {
        vip.configure_line(idx, offset)?;
    }

    vip.delay(scenario.settle_cycles)?;

    for &idx in &scenario.pending_lines {
        vip.set_pending(idx)?;
    }
    for &idx in &scenario.enable_lines {
        vip.set_enabled(idx)?;
    }

    let report = vip.drive_rand_irqs(scenario.injections)?;
    info!(
        cycles = report.cycles,
        injections = report.injections,
        acks = report.acks,
        "reference sequence complete"
    );
    Ok(report)
}
