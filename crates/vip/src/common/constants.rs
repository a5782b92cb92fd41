//! EDF-IC register map.
//!
//! Each interrupt line owns one 32-bit configuration word at `line * LINE_STRIDE`:
//!
//! * bit `0`: IE (interrupt enable)
//! * bit `1`: IP (interrupt pending)
//! * bits `8..=23`: delay / deadline offset

/// Number of interrupt lines implemented by the controller.
pub const NR_IRQS: usize = 4;

/// Bit position of the interrupt-enable flag in a line register.
pub const IE_OFFS: u32 = 0;

/// Bit position of the interrupt-pending flag in a line register.
pub const IP_OFFS: u32 = 1;

/// Byte stride between consecutive line registers.
pub const LINE_STRIDE: u32 = 4;

/// Bit position of the delay field in a line register.
pub const DELAY_SHIFT: u32 = 8;

/// Mask of the 16-bit delay field, in place.
pub const DELAY_MASK: u32 = 0xFFFF << DELAY_SHIFT;

/// Mask selecting the implemented bits of the interrupt line vector.
pub const IRQ_LINE_MASK: u8 = (1 << NR_IRQS) - 1;
