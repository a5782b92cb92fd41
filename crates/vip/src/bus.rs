//! Configuration bus transaction engine.
//!
//! The EDF-IC register port is a single-cycle request protocol with no backpressure:
//! the driver holds a request for exactly one clock cycle and the device completes it
//! on that cycle's rising edge. One transaction is in flight at a time.

use tracing::trace;

use crate::common::Result;
use crate::dut::{Dut, WaveTracer};
use crate::stimulus::Decisions;
use crate::vip::EdfIcVip;

impl<D: Dut, W: WaveTracer, R: Decisions> EdfIcVip<D, W, R> {
    /// Writes `wdata` to the register at `addr`.
    ///
    /// Address, data, write enable, and request are held for one cycle, then all
    /// return to zero.
    pub fn cfg_write(&mut self, addr: u32, wdata: u32) -> Result<()> {
        let io = self.dut.inputs_mut();
        io.cfg_addr = addr;
        io.cfg_wdata = wdata;
        io.cfg_we = true;
        io.cfg_req = true;
        self.cycles(1)?;
        self.dut.inputs_mut().release_cfg();
        self.stats.cfg_writes += 1;
        trace!(target: "cfg_bus", addr, wdata, "write");
        Ok(())
    }

    /// Reads the register at `addr`.
    ///
    /// Address and request are held for one cycle with write enable low; the read data
    /// is sampled at the end of that cycle, before the bus is released.
    pub fn cfg_read(&mut self, addr: u32) -> Result<u32> {
        let io = self.dut.inputs_mut();
        io.cfg_addr = addr;
        io.cfg_we = false;
        io.cfg_req = true;
        self.cycles(1)?;
        let rdata = self.dut.outputs().cfg_rdata;
        self.dut.inputs_mut().release_cfg();
        self.stats.cfg_reads += 1;
        trace!(target: "cfg_bus", addr, rdata, "read");
        Ok(rdata)
    }
}
