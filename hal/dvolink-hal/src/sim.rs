//! Simulated register-store bus for host-side tests
//!
//! [`SimBus`] answers at one 7-bit address and behaves like a chip with a
//! flat 256-byte register file and an auto-incrementing address pointer:
//! a write segment sets the pointer from its first byte and stores the
//! remaining bytes, a read segment returns bytes from the pointer.
//!
//! Every transaction is recorded in an access log before any fault is
//! applied, so tests can count the reads and writes a driver attempted.

use heapless::Vec;

use crate::i2c::{I2cMessage, I2cOp, I2cTransfer};

/// Access log capacity
pub const LOG_CAPACITY: usize = 64;

/// A register access attempted on the simulated bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimAccess {
    /// Register read (pointer write followed by a read segment)
    Read {
        /// Register address
        reg: u8,
    },
    /// Register write (address byte followed by data)
    Write {
        /// Register address
        reg: u8,
        /// Value written
        value: u8,
    },
}

/// Injected transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// Arbitration lost or similar bus fault
    Bus,
}

/// Simulated I2C bus with one register-addressed target
#[derive(Debug, Clone)]
pub struct SimBus {
    addr: u8,
    regs: [u8; 256],
    pointer: u8,
    /// Target does not acknowledge anything
    pub absent: bool,
    /// Read segments fail after the pointer write completed
    pub fail_reads: bool,
    /// Read segments fail when the pointer is at this register
    pub fail_read_at: Option<u8>,
    /// Data writes fail
    pub fail_writes: bool,
    /// Every transfer reports a transport error
    pub bus_error: bool,
    log: Vec<SimAccess, LOG_CAPACITY>,
}

impl SimBus {
    /// Create a bus with a target at `addr` and all registers zero
    pub fn new(addr: u8) -> Self {
        Self {
            addr,
            regs: [0; 256],
            pointer: 0,
            absent: false,
            fail_reads: false,
            fail_read_at: None,
            fail_writes: false,
            bus_error: false,
            log: Vec::new(),
        }
    }

    /// Builder-style register preset
    pub fn with_register(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    /// Target address
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Current register value, bypassing the bus
    pub fn register(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    /// Set a register value, bypassing the bus
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    /// Every access attempted so far, in order
    pub fn accesses(&self) -> &[SimAccess] {
        &self.log
    }

    /// Registers read so far, in order
    pub fn reads(&self) -> impl Iterator<Item = u8> + '_ {
        self.log.iter().filter_map(|a| match *a {
            SimAccess::Read { reg } => Some(reg),
            SimAccess::Write { .. } => None,
        })
    }

    /// Number of register writes attempted
    pub fn write_count(&self) -> usize {
        self.log
            .iter()
            .filter(|a| matches!(a, SimAccess::Write { .. }))
            .count()
    }

    /// Forget recorded accesses
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, msgs: &[I2cMessage<'_>]) {
        let mut iter = msgs.iter().peekable();
        while let Some(msg) = iter.next() {
            if let I2cOp::Write(data) = &msg.op {
                let Some((&reg, values)) = data.split_first() else {
                    continue;
                };
                if values.is_empty() && iter.peek().is_some_and(|m| m.is_read()) {
                    let _ = self.log.push(SimAccess::Read { reg });
                    iter.next();
                    continue;
                }
                for (offset, &value) in values.iter().enumerate() {
                    let reg = reg.wrapping_add(offset as u8);
                    let _ = self.log.push(SimAccess::Write { reg, value });
                }
            }
        }
    }
}

impl I2cTransfer for SimBus {
    type Error = SimError;

    fn name(&self) -> &'static str {
        "sim"
    }

    fn transfer(&mut self, msgs: &mut [I2cMessage<'_>]) -> Result<usize, SimError> {
        self.record(msgs);

        if self.bus_error {
            return Err(SimError::Bus);
        }

        let mut completed = 0;
        for msg in msgs.iter_mut() {
            if self.absent || msg.addr != self.addr {
                break;
            }
            match &mut msg.op {
                I2cOp::Write(data) => {
                    let Some((&reg, values)) = data.split_first() else {
                        completed += 1;
                        continue;
                    };
                    if self.fail_writes && !values.is_empty() {
                        break;
                    }
                    self.pointer = reg;
                    for &value in values {
                        self.regs[self.pointer as usize] = value;
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                I2cOp::Read(buf) => {
                    if self.fail_reads || self.fail_read_at == Some(self.pointer) {
                        break;
                    }
                    for b in buf.iter_mut() {
                        *b = self.regs[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
            completed += 1;
        }

        Ok(completed)
    }
}
