//! Sharing one transport between several devices
//!
//! Several DVO chips can sit on the same I2C bus. Each device handle gets
//! its own [`RefCellBus`]; transfers borrow the underlying transport only
//! for the duration of one transaction.

use core::cell::RefCell;

use crate::i2c::{I2cMessage, I2cTransfer};

/// Borrowed view of a transport stored in a `RefCell`
pub struct RefCellBus<'a, T> {
    bus: &'a RefCell<T>,
}

impl<'a, T> RefCellBus<'a, T> {
    /// Create a view of a shared transport
    pub fn new(bus: &'a RefCell<T>) -> Self {
        Self { bus }
    }
}

impl<T> Clone for RefCellBus<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RefCellBus<'_, T> {}

impl<T: I2cTransfer> I2cTransfer for RefCellBus<'_, T> {
    type Error = T::Error;

    fn name(&self) -> &'static str {
        self.bus.borrow().name()
    }

    fn transfer(&mut self, msgs: &mut [I2cMessage<'_>]) -> Result<usize, Self::Error> {
        self.bus.borrow_mut().transfer(msgs)
    }
}
