//! Verification IP for the EDF interrupt controller.
//!
//! This crate implements a cycle-accurate bus-functional driver for the EDF-IC with the following:
//! 1. **Device seam:** A typed signal bundle and the `Dut` / `WaveTracer` traits implemented by RTL bindings.
//! 2. **Clocking:** Three-checkpoint clock harness with picosecond waveform timestamps.
//! 3. **Timer:** Prescaled machine timer driven onto the device in lock-step with the clock.
//! 4. **Configuration:** Single-cycle register bus transactions and per-line configuration.
//! 5. **Stimulus:** Randomized interrupt injection and acknowledgment with variable latency.

/// Common types and constants (register map, errors).
pub mod common;
/// Driver configuration (defaults, JSON loading, validation).
pub mod config;
/// Device-under-test and waveform tracer seams.
pub mod dut;
/// Clock harness (edge sequencing and waveform timestamps).
pub mod clock;
/// Prescaled machine timer model.
pub mod timer;
/// Configuration bus transaction engine.
pub mod bus;
/// Per-line interrupt configuration driver.
pub mod cfg;
/// Randomized interrupt stimulus and acknowledgment.
pub mod stimulus;
/// Driver statistics collection and reporting.
pub mod stats;
/// Reference testbench sequence.
pub mod scenario;
/// The driver object owning device, tracer, timer, and counters.
pub mod vip;

/// Error type and result alias for every driver operation.
pub use crate::common::{Result, VipError};
/// Root configuration type; use `VipConfig::default()` or load it from JSON.
pub use crate::config::VipConfig;
/// Device seam traits and the signal bundle.
pub use crate::dut::{Dut, DutInputs, DutOutputs, NoTrace, WaveTracer};
/// Main driver type.
pub use crate::vip::EdfIcVip;
