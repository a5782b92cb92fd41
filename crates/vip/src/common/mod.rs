//! Common definitions shared by every part of the driver.
//!
//! 1. **Constants:** The EDF-IC register map and interrupt line geometry.
//! 2. **Error Handling:** The driver error type and its result alias.

/// Register map and line geometry of the controller.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{IE_OFFS, IP_OFFS, IRQ_LINE_MASK, LINE_STRIDE, NR_IRQS};
pub use error::{Result, VipError};
