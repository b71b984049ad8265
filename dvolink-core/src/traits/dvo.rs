//! DVO transmitter trait
//!
//! Every chip driver exposes the same operation set so the host can hold
//! heterogeneous chips as `dyn DvoDevice` and drive them uniformly. The
//! driver value is the chip's private state; the bus and slave address
//! travel separately in the [`DvoHandle`].

use dvolink_hal::I2cTransfer;

use crate::error::DvoError;
use crate::handle::DvoHandle;
use crate::mode::DisplayMode;

/// Result of connection detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorStatus {
    /// A receiver is attached
    Connected,
    /// No receiver is attached
    Disconnected,
    /// The chip could not be queried
    Unknown,
}

/// Result of mode validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeStatus {
    /// The chip can drive this mode
    Ok,
    /// Rejected for another reason
    Bad,
}

/// Display power management state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpmsMode {
    /// Fully powered
    #[default]
    On,
    /// Sync off, fast recovery
    Standby,
    /// Sync off, slower recovery
    Suspend,
    /// Powered down
    Off,
}

/// Operations the host framework invokes on an initialized DVO chip
pub trait DvoDevice<B: I2cTransfer> {
    /// Driver name
    fn name(&self) -> &'static str;

    /// Check whether a receiver is attached to the chip's output
    fn detect(&mut self, dvo: &mut DvoHandle<B>) -> ConnectorStatus;

    /// Check whether the chip can drive `mode`
    fn mode_valid(&self, dvo: &DvoHandle<B>, mode: &DisplayMode) -> ModeStatus;

    /// Program the chip for `mode`
    ///
    /// `adjusted` is the mode after the host's own fix-ups; drivers that
    /// need exact timings should use it.
    fn mode_set(&mut self, dvo: &mut DvoHandle<B>, mode: &DisplayMode, adjusted: &DisplayMode);

    /// Change the chip's power state
    fn dpms(&mut self, dvo: &mut DvoHandle<B>, mode: DpmsMode);

    /// Report register contents through the diagnostic log
    fn dump_regs(&self, dvo: &mut DvoHandle<B>);

    /// Release chip resources before the state is dropped
    fn destroy(&mut self, _dvo: &mut DvoHandle<B>) {}
}

/// Chip driver that can probe for and initialize its chip
pub trait DvoDriver<B: I2cTransfer>: DvoDevice<B> + Sized {
    /// Driver name matched against board configuration
    const NAME: &'static str;

    /// Identify the chip behind `dvo` and create its state
    ///
    /// Probing must not log bus failures: the host calls this on every
    /// candidate address and most of them hold no chip.
    fn init(dvo: &mut DvoHandle<B>) -> Result<Self, DvoError>;
}
