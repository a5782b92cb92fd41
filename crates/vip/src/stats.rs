//! Driver statistics collection and reporting.
//!
//! Tracks what the driver did to the device over its lifetime:
//! 1. **Clocking:** Total cycles run.
//! 2. **Bus traffic:** Configuration reads and writes.
//! 3. **Stimulus:** Injection events, empty patterns, driven lines, acknowledgments, and latency.

use std::fmt;

use serde::Serialize;

/// Summary of one `drive_rand_irqs` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StimulusReport {
    /// Cycles the run took.
    pub cycles: u64,
    /// Injection events (cycles where a line pattern was drawn).
    pub injections: u32,
    /// Injection events whose pattern asserted no line.
    pub empty_injections: u32,
    /// Individual line assertions across all injection events.
    pub lines_driven: u64,
    /// Acknowledgments issued.
    pub acks: u64,
    /// Sum of acknowledgment latencies, in cycles.
    pub total_ack_latency: u64,
    /// Longest acknowledgment latency, in cycles.
    pub max_ack_latency: u64,
}

impl StimulusReport {
    /// Average cycles between an interrupt being presented and its acknowledgment.
    pub fn mean_ack_latency(&self) -> f64 {
        mean(self.total_ack_latency, self.acks)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Lifetime counters of a driver instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VipStats {
    /// Total clock cycles run.
    pub cycles: u64,
    /// Configuration bus writes.
    pub cfg_writes: u64,
    /// Configuration bus reads.
    pub cfg_reads: u64,
    /// Injection events across all stimulus runs.
    pub injections: u64,
    /// Injection events that asserted no line.
    pub empty_injections: u64,
    /// Individual line assertions.
    pub lines_driven: u64,
    /// Acknowledgments issued.
    pub acks: u64,
    /// Sum of acknowledgment latencies, in cycles.
    pub total_ack_latency: u64,
    /// Longest acknowledgment latency observed, in cycles.
    pub max_ack_latency: u64,
}

impl VipStats {
    /// Folds a stimulus run into the lifetime counters.
    ///
    /// Cycles are not added here; they are counted as they run.
    pub fn record_stimulus(&mut self, report: &StimulusReport) {
        self.injections += u64::from(report.injections);
        self.empty_injections += u64::from(report.empty_injections);
        self.lines_driven += report.lines_driven;
        self.acks += report.acks;
        self.total_ack_latency += report.total_ack_latency;
        self.max_ack_latency = self.max_ack_latency.max(report.max_ack_latency);
    }

    /// Average acknowledgment latency over every stimulus run.
    pub fn mean_ack_latency(&self) -> f64 {
        mean(self.total_ack_latency, self.acks)
    }
}

impl fmt::Display for VipStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles            {}", self.cycles)?;
        writeln!(f, "cfg writes        {}", self.cfg_writes)?;
        writeln!(f, "cfg reads         {}", self.cfg_reads)?;
        writeln!(
            f,
            "injections        {} ({} empty)",
            self.injections, self.empty_injections
        )?;
        writeln!(f, "lines driven      {}", self.lines_driven)?;
        writeln!(f, "acks              {}", self.acks)?;
        writeln!(f, "mean ack latency  {:.2}", self.mean_ack_latency())?;
        write!(f, "max ack latency   {}", self.max_ack_latency)
    }
}
