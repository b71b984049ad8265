//! Per-chip host record
//!
//! The host framework owns one [`DvoHandle`] per candidate chip. It binds
//! a bus view to a fixed 7-bit slave address and the DVO port the chip
//! feeds. Drivers receive it by reference on every call and never keep it.

use dvolink_hal::I2cTransfer;

use crate::config::DvoPort;

/// Bus view, slave address and port of one DVO chip
pub struct DvoHandle<B> {
    bus: B,
    slave_addr: u8,
    port: DvoPort,
}

impl<B: I2cTransfer> DvoHandle<B> {
    /// Bind a bus view to a slave address
    pub fn new(bus: B, slave_addr: u8, port: DvoPort) -> Self {
        Self {
            bus,
            slave_addr,
            port,
        }
    }

    /// 7-bit slave address of the chip
    pub fn slave_addr(&self) -> u8 {
        self.slave_addr
    }

    /// DVO port the chip is wired to
    pub fn port(&self) -> DvoPort {
        self.port
    }

    /// Bus name for diagnostics
    pub fn bus_name(&self) -> &'static str {
        self.bus.name()
    }

    /// Mutable access to the bus view
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus view
    pub fn release(self) -> B {
        self.bus
    }
}
