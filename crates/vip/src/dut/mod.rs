//! Device-under-test and waveform seams.
//!
//! The driver never sees the controller's internals. It talks to two collaborators:
//! 1. **Device:** A clocked model exposing the EDF-IC port list as a typed signal bundle.
//! 2. **Tracer:** A waveform backend that receives timestamped samples of that bundle.
//!
//! RTL bindings implement these traits; the crate only ships [`NoTrace`].

/// Port list of the controller.
pub mod signals;

use std::io;

pub use signals::{DutInputs, DutOutputs};

/// A clocked model of the interrupt controller.
///
/// Input values persist until overwritten. Outputs reflect the most recent [`Dut::eval`].
pub trait Dut {
    /// Returns the current input port values.
    fn inputs(&self) -> &DutInputs;
    /// Returns the input ports for the driver to overwrite.
    fn inputs_mut(&mut self) -> &mut DutInputs;
    /// Returns the output port values computed by the last evaluation.
    fn outputs(&self) -> DutOutputs;
    /// Settles the model against the current inputs (sequential logic fires on a `clk` rising edge).
    fn eval(&mut self);
}

/// A waveform backend sampling the device ports.
pub trait WaveTracer {
    /// Records the port values at `time_ps`.
    fn dump(&mut self, time_ps: u64, inputs: &DutInputs, outputs: &DutOutputs) -> io::Result<()>;

    /// Pushes buffered samples to the backing store.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Finalizes the waveform. Called once when the driver is closed or dropped.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tracer that discards every sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTrace;

impl WaveTracer for NoTrace {
    fn dump(&mut self, _time_ps: u64, _inputs: &DutInputs, _outputs: &DutOutputs) -> io::Result<()> {
        Ok(())
    }
}
