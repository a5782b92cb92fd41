//! Configuration for the EDF-IC verification driver.
//!
//! This module defines the settings used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline clocking, reset, and stimulus constants.
//! 2. **Structures:** Driver settings plus the reference-sequence settings.
//! 3. **Loading:** JSON deserialization with per-field defaults and validation.

use serde::Deserialize;

use crate::common::{NR_IRQS, Result, VipError};

/// Default configuration constants for the driver.
mod defaults {
    /// Clock period in picoseconds (100 MHz).
    pub const CLOCK_PERIOD_PS: u32 = 10_000;

    /// Machine timer prescaler; `mtime` advances every `MTIME_PRESCALER + 1` cycles.
    pub const MTIME_PRESCALER: u8 = 3;

    /// Cycles the reset input is held low before release.
    pub const RESET_HOLD_CYCLES: u32 = 12;

    /// Cycles run after reset release and timer arming.
    pub const RESET_SETTLE_CYCLES: u32 = 12;

    /// Acknowledgment odds: a valid interrupt is acknowledged with probability `1 / ACK_ONE_IN`.
    pub const ACK_ONE_IN: u32 = 3;

    /// Injection odds: a line pattern is driven with probability `1 / INJECT_ONE_IN` per cycle.
    pub const INJECT_ONE_IN: u32 = 15;

    /// Per-line delay offsets programmed by the reference sequence.
    pub const LINE_OFFSETS: [u16; super::NR_IRQS] = [200, 100, 300, 50];

    /// Idle cycles between line configuration and enabling.
    pub const SETTLE_CYCLES: u32 = 20;

    /// Lines marked pending by the reference sequence, in order.
    pub const PENDING_LINES: [u8; 2] = [1, 2];

    /// Lines enabled by the reference sequence, in order.
    pub const ENABLE_LINES: [u8; 4] = [3, 2, 1, 0];

    /// Injection events requested by the reference sequence.
    pub const INJECTIONS: u32 = 10;
}

/// Root configuration of the driver.
///
/// Every field has a default, so a partial document only overrides what it names.
///
/// # Examples
///
/// ```
/// use edfic_vip::config::VipConfig;
///
/// let config = VipConfig::default();
/// assert_eq!(config.clock_period_ps, 10_000);
/// assert_eq!(config.mtime_prescaler, 3);
///
/// let json = r#"{ "mtime_prescaler": 7, "scenario": { "injections": 4 } }"#;
/// let config = VipConfig::from_json(json).unwrap();
/// assert_eq!(config.mtime_prescaler, 7);
/// assert_eq!(config.scenario.injections, 4);
/// assert_eq!(config.inject_one_in, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VipConfig {
    /// Clock period in picoseconds, used for waveform timestamps.
    pub clock_period_ps: u32,
    /// Prescaler applied to the machine timer when reset is released.
    pub mtime_prescaler: u8,
    /// Cycles with reset asserted.
    pub reset_hold_cycles: u32,
    /// Cycles after reset release.
    pub reset_settle_cycles: u32,
    /// Acknowledgment odds (`1 / ack_one_in` per cycle while an interrupt is valid).
    pub ack_one_in: u32,
    /// Injection odds (`1 / inject_one_in` per cycle).
    pub inject_one_in: u32,
    /// Reference sequence settings.
    pub scenario: ScenarioConfig,
}

impl Default for VipConfig {
    fn default() -> Self {
        Self {
            clock_period_ps: defaults::CLOCK_PERIOD_PS,
            mtime_prescaler: defaults::MTIME_PRESCALER,
            reset_hold_cycles: defaults::RESET_HOLD_CYCLES,
            reset_settle_cycles: defaults::RESET_SETTLE_CYCLES,
            ack_one_in: defaults::ACK_ONE_IN,
            inject_one_in: defaults::INJECT_ONE_IN,
            scenario: ScenarioConfig::default(),
        }
    }
}

impl VipConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the driver cannot run with.
    ///
    /// The clock period must be non-zero (and at least 5 ps so the pre-edge sample
    /// lands inside the cycle), both odds must be non-zero, and every line index
    /// referenced by the scenario must exist.
    pub fn validate(&self) -> Result<()> {
        if self.clock_period_ps < 5 {
            return Err(VipError::InvalidConfig(format!(
                "clock_period_ps must be at least 5, got {}",
                self.clock_period_ps
            )));
        }
        if self.ack_one_in == 0 {
            return Err(VipError::InvalidConfig("ack_one_in must be non-zero".into()));
        }
        if self.inject_one_in == 0 {
            return Err(VipError::InvalidConfig(
                "inject_one_in must be non-zero".into(),
            ));
        }
        let lines = self.scenario.pending_lines.iter();
        if let Some(&idx) = lines
            .chain(&self.scenario.enable_lines)
            .find(|&&idx| idx as usize >= NR_IRQS)
        {
            return Err(VipError::LineOutOfRange { idx });
        }
        Ok(())
    }
}

/// Settings of the reference testbench sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Delay offset programmed into each line, indexed by line.
    pub line_offsets: [u16; NR_IRQS],
    /// Idle cycles after line configuration.
    pub settle_cycles: u32,
    /// Lines marked pending, in order.
    pub pending_lines: Vec<u8>,
    /// Lines enabled, in order.
    pub enable_lines: Vec<u8>,
    /// Injection events requested from the stimulus engine.
    pub injections: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            line_offsets: defaults::LINE_OFFSETS,
            settle_cycles: defaults::SETTLE_CYCLES,
            pending_lines: defaults::PENDING_LINES.to_vec(),
            enable_lines: defaults::ENABLE_LINES.to_vec(),
            injections: defaults::INJECTIONS,
        }
    }
}
