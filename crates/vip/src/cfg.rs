//! Per-line interrupt configuration.
//!
//! Each line register packs an enable bit, a pending bit, and a 16-bit delay.
//! [`LineReg`] is the typed view of that word; the driver operations below build
//! line programming out of single-cycle bus transactions:
//! 1. **Configure:** One write that sets the delay and clears both flags.
//! 2. **Set pending / set enabled:** Read-modify-write that ORs in one flag and
//!    preserves every other bit.

use std::fmt;

use tracing::info;

use crate::common::constants::{DELAY_MASK, DELAY_SHIFT};
use crate::common::{IE_OFFS, IP_OFFS, LINE_STRIDE, NR_IRQS, Result, VipError};
use crate::dut::{Dut, WaveTracer};
use crate::stimulus::Decisions;
use crate::vip::EdfIcVip;

/// Value of one line configuration register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineReg(u32);

impl LineReg {
    /// Creates a register value holding `delay` with both flags clear.
    pub const fn with_delay(delay: u16) -> Self {
        Self((delay as u32) << DELAY_SHIFT)
    }

    /// Wraps a raw register word.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw register word.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns the delay field.
    pub const fn delay(self) -> u16 {
        ((self.0 & DELAY_MASK) >> DELAY_SHIFT) as u16
    }

    /// Returns the enable flag.
    pub const fn enabled(self) -> bool {
        self.0 & (1 << IE_OFFS) != 0
    }

    /// Returns the pending flag.
    pub const fn pending(self) -> bool {
        self.0 & (1 << IP_OFFS) != 0
    }

    /// Returns this value with the enable flag set.
    #[must_use]
    pub const fn set_enabled(self) -> Self {
        Self(self.0 | (1 << IE_OFFS))
    }

    /// Returns this value with the pending flag set.
    #[must_use]
    pub const fn set_pending(self) -> Self {
        Self(self.0 | (1 << IP_OFFS))
    }
}

impl From<u32> for LineReg {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<LineReg> for u32 {
    fn from(reg: LineReg) -> Self {
        reg.0
    }
}

impl fmt::Display for LineReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delay={} ie={} ip={}",
            self.delay(),
            u8::from(self.enabled()),
            u8::from(self.pending())
        )
    }
}

/// Returns the bus address of line `idx`'s register.
pub const fn line_addr(idx: u8) -> u32 {
    idx as u32 * LINE_STRIDE
}

fn check_line(idx: u8) -> Result<()> {
    if (idx as usize) < NR_IRQS {
        Ok(())
    } else {
        Err(VipError::LineOutOfRange { idx })
    }
}

impl<D: Dut, W: WaveTracer, R: Decisions> EdfIcVip<D, W, R> {
    /// Programs line `idx` with `offset` as its delay, clearing enable and pending.
    pub fn configure_line(&mut self, idx: u8, offset: u16) -> Result<()> {
        check_line(idx)?;
        self.cfg_write(line_addr(idx), LineReg::with_delay(offset).bits())?;
        info!(target: "cfg_driver", line = idx, offset, "set line offset");
        Ok(())
    }

    /// Sets the pending flag of line `idx`, preserving its delay and enable flag.
    pub fn set_pending(&mut self, idx: u8) -> Result<()> {
        let reg = self.modify_line(idx, LineReg::set_pending)?;
        info!(target: "cfg_driver", line = idx, %reg, "set IP");
        Ok(())
    }

    /// Sets the enable flag of line `idx`, preserving its delay and pending flag.
    pub fn set_enabled(&mut self, idx: u8) -> Result<()> {
        let reg = self.modify_line(idx, LineReg::set_enabled)?;
        info!(target: "cfg_driver", line = idx, %reg, "set IE");
        Ok(())
    }

    /// Reads back line `idx`'s register.
    pub fn read_line(&mut self, idx: u8) -> Result<LineReg> {
        check_line(idx)?;
        self.cfg_read(line_addr(idx)).map(LineReg::from)
    }

    /// Read-modify-write of line `idx`; returns the value written.
    fn modify_line(&mut self, idx: u8, update: impl FnOnce(LineReg) -> LineReg) -> Result<LineReg> {
        let current = self.read_line(idx)?;
        let next = update(current);
        self.cfg_write(line_addr(idx), next.bits())?;
        Ok(next)
    }
}
