//! Transport over an `embedded-hal` I2C master
//!
//! Consecutive segments addressed to the same target are submitted as one
//! `embedded_hal::i2c::I2c::transaction`, which joins them with repeated
//! starts. A call addressing several targets becomes one transaction per
//! run of same-target segments, so it is atomic per run only. Run lengths
//! are checked before the first transaction is issued. A target that does
//! not acknowledge ends the transfer and the segments completed so far are
//! reported.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, Operation};
use heapless::Vec;

use crate::i2c::{I2cMessage, I2cOp, I2cTransfer};

/// Maximum segments submitted in one underlying transaction
pub const MAX_SEGMENTS: usize = 8;

/// Errors from [`EmbeddedHalBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdapterError<E> {
    /// Error reported by the I2C peripheral
    Bus(E),
    /// More than [`MAX_SEGMENTS`] segments for one target
    TooManySegments,
}

/// [`I2cTransfer`] implementation for any blocking `embedded-hal` I2C master
pub struct EmbeddedHalBus<I> {
    i2c: I,
    name: &'static str,
}

impl<I> EmbeddedHalBus<I> {
    /// Wrap an I2C master
    pub fn new(i2c: I) -> Self {
        Self::with_name(i2c, "i2c")
    }

    /// Wrap an I2C master with a bus name used in diagnostics
    pub fn with_name(i2c: I, name: &'static str) -> Self {
        Self { i2c, name }
    }

    /// Give back the wrapped I2C master
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cTransfer for EmbeddedHalBus<I> {
    type Error = AdapterError<I::Error>;

    fn name(&self) -> &'static str {
        self.name
    }

    fn transfer(&mut self, msgs: &mut [I2cMessage<'_>]) -> Result<usize, Self::Error> {
        if longest_run(msgs) > MAX_SEGMENTS {
            return Err(AdapterError::TooManySegments);
        }

        let mut completed = 0;
        let mut rest = msgs;

        while let Some(addr) = rest.first().map(|m| m.addr) {
            let run = rest.iter().take_while(|m| m.addr == addr).count();
            let (head, tail) = core::mem::take(&mut rest).split_at_mut(run);

            let mut ops: Vec<Operation<'_>, MAX_SEGMENTS> = Vec::new();
            for msg in head.iter_mut() {
                let op = match &mut msg.op {
                    I2cOp::Write(data) => Operation::Write(*data),
                    I2cOp::Read(buf) => Operation::Read(&mut **buf),
                };
                ops.push(op).map_err(|_| AdapterError::TooManySegments)?;
            }

            match self.i2c.transaction(addr, &mut ops) {
                Ok(()) => completed += run,
                Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => return Ok(completed),
                Err(e) => return Err(AdapterError::Bus(e)),
            }

            rest = tail;
        }

        Ok(completed)
    }
}

/// Length of the longest run of consecutive segments to one target
fn longest_run(msgs: &[I2cMessage<'_>]) -> usize {
    let mut longest = 0;
    let mut rest = msgs;
    while let Some(addr) = rest.first().map(|m| m.addr) {
        let run = rest.iter().take_while(|m| m.addr == addr).count();
        longest = longest.max(run);
        rest = &rest[run..];
    }
    longest
}
