//! I2C bus abstractions
//!
//! Transfers are expressed as an ordered list of message segments, the
//! way a bus adapter sees them. The transport reports how many segments
//! completed, so a caller can tell a missing device (nothing completed)
//! from a device that stopped answering halfway through.

/// Direction and buffer of a single message segment
#[derive(Debug, PartialEq, Eq)]
pub enum I2cOp<'a> {
    /// Write these bytes to the target
    Write(&'a [u8]),
    /// Fill this buffer from the target
    Read(&'a mut [u8]),
}

/// One segment of an I2C transaction
///
/// Segments of the same transfer are joined with repeated starts and
/// terminated by a single stop.
#[derive(Debug, PartialEq, Eq)]
pub struct I2cMessage<'a> {
    /// 7-bit target address
    pub addr: u8,
    /// Direction and data
    pub op: I2cOp<'a>,
}

impl<'a> I2cMessage<'a> {
    /// Create a write segment
    pub fn write(addr: u8, data: &'a [u8]) -> Self {
        Self {
            addr,
            op: I2cOp::Write(data),
        }
    }

    /// Create a read segment
    pub fn read(addr: u8, buf: &'a mut [u8]) -> Self {
        Self {
            addr,
            op: I2cOp::Read(buf),
        }
    }

    /// Number of bytes carried by this segment
    pub fn len(&self) -> usize {
        match &self.op {
            I2cOp::Write(data) => data.len(),
            I2cOp::Read(buf) => buf.len(),
        }
    }

    /// Check if this segment carries no data
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if this is a read segment
    pub fn is_read(&self) -> bool {
        matches!(self.op, I2cOp::Read(_))
    }
}

/// Errors reported by [`I2cTransfer::transfer_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError<E> {
    /// The transport itself failed
    Bus(E),
    /// The transport stopped before every segment completed
    Incomplete {
        /// Segments that completed
        completed: usize,
        /// Segments submitted
        requested: usize,
    },
}

/// I2C bus master capable of multi-segment transfers
///
/// Segments run in order. Consecutive segments addressed to the same
/// target form one atomic transaction; a call mixing targets may be split
/// into one transaction per run. On failure the transfer stops and reports
/// how far it got.
pub trait I2cTransfer {
    /// Error type for transport failures
    type Error: core::fmt::Debug;

    /// Human-readable bus name used in diagnostics
    fn name(&self) -> &'static str {
        "i2c"
    }

    /// Submit `msgs` as one transaction
    ///
    /// Returns the number of segments that fully completed. A target
    /// that does not acknowledge its address yields `Ok(0)`.
    fn transfer(&mut self, msgs: &mut [I2cMessage<'_>]) -> Result<usize, Self::Error>;

    /// Submit `msgs` and require every segment to complete
    fn transfer_all(
        &mut self,
        msgs: &mut [I2cMessage<'_>],
    ) -> Result<(), TransferError<Self::Error>> {
        let requested = msgs.len();
        match self.transfer(msgs) {
            Ok(completed) if completed == requested => Ok(()),
            Ok(completed) => Err(TransferError::Incomplete {
                completed,
                requested,
            }),
            Err(e) => Err(TransferError::Bus(e)),
        }
    }
}

impl<T: I2cTransfer + ?Sized> I2cTransfer for &mut T {
    type Error = T::Error;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn transfer(&mut self, msgs: &mut [I2cMessage<'_>]) -> Result<usize, Self::Error> {
        (**self).transfer(msgs)
    }
}
