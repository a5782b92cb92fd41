//! # Unit Tests
//!
//! Per-component tests, from the timer and clock up to the reference sequence.



/// Edge sequencing, waveform timestamps, and tracer lifecycle.
pub mod clock;






/// Machine timer and prescaler.
pub mod timer;
