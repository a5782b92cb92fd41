//! EDF-IC port list.
//!
//! Field names follow the RTL ports with the direction suffix dropped
//! (`cfg_addr_i` becomes `cfg_addr`).

/// Ports driven by the verification driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutInputs {
    /// Clock.
    pub clk: bool,
    /// Active-low synchronous reset.
    pub rst_n: bool,
    /// Virtual machine time, advanced by the prescaled timer.
    pub mtime: u64,
    /// Configuration bus address (byte address of a line register).
    pub cfg_addr: u32,
    /// Configuration bus write data.
    pub cfg_wdata: u32,
    /// Configuration bus write enable.
    pub cfg_we: bool,
    /// Configuration bus request.
    pub cfg_req: bool,
    /// Interrupt line vector, one bit per line.
    pub irq: u8,
    /// Interrupt acknowledgment strobe.
    pub irq_ack: bool,
    /// Line being acknowledged.
    pub irq_id: u8,
}

impl DutInputs {
    /// Deasserts the configuration bus (address, data, write enable, request).
    pub const fn release_cfg(&mut self) {
        self.cfg_addr = 0;
        self.cfg_wdata = 0;
        self.cfg_we = false;
        self.cfg_req = false;
    }

    /// Deasserts the interrupt stimulus (lines, acknowledgment, acknowledged id).
    pub const fn clear_stimulus(&mut self) {
        self.irq = 0;
        self.irq_ack = false;
        self.irq_id = 0;
    }
}

/// Ports observed by the verification driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutOutputs {
    /// Configuration bus read data.
    pub cfg_rdata: u32,
    /// An enabled, pending interrupt is being presented.
    pub irq_valid: bool,
    /// Line of the presented interrupt.
    pub irq_id: u8,
    /// Deadline of the presented interrupt.
    pub irq_dl: u32,
}
