//! Driver error definitions.
//!
//! Signal manipulation itself cannot fail. Errors come from three places:
//! 1. **Preconditions:** Line indices outside the controller's range.
//! 2. **Tracing:** The waveform backend failing mid-run, which aborts the run.
//! 3. **Configuration:** Malformed or nonsensical driver settings.

use thiserror::Error;

use super::constants::NR_IRQS;

/// Errors reported by the driver.
#[derive(Debug, Error)]
pub enum VipError {
    /// A line index outside `0..NR_IRQS` was passed to a configuration operation.
    ///
    /// Raised before any bus activity, so no cycle is consumed.
    #[error("interrupt line {idx} out of range (controller has {} lines)", NR_IRQS)]
    LineOutOfRange {
        /// The rejected line index.
        idx: u8,
    },

    /// The waveform tracer failed to dump, flush, or close.
    #[error("waveform trace failed: {0}")]
    Trace(#[from] std::io::Error),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used by every fallible driver operation.
pub type Result<T, E = VipError> = std::result::Result<T, E>;
