//! Host-side registry of DVO outputs
//!
//! The host never dispatches through a global table. Each supported chip
//! contributes a [`DvoChipEntry`] (its name plus a constructor), probing
//! turns matching entries into [`DvoOutput`]s, and the host keeps those
//! as a plain collection of trait objects.

use alloc::boxed::Box;
use alloc::vec::Vec;

use dvolink_hal::I2cTransfer;

use crate::config::{DvoBoardConfig, DvoChipConfig};
use crate::error::DvoError;
use crate::handle::DvoHandle;
use crate::mode::DisplayMode;
use crate::traits::{ConnectorStatus, DpmsMode, DvoDevice, DvoDriver, ModeStatus};

/// Boxed driver state
pub type BoxedDevice<B> = Box<dyn DvoDevice<B>>;

/// Chip constructor: identify the chip behind a handle and box its state
pub type InitFn<B> = fn(&mut DvoHandle<B>) -> Result<BoxedDevice<B>, DvoError>;

/// A supported chip driver
pub struct DvoChipEntry<B> {
    /// Driver name matched against [`DvoChipConfig::name`]
    pub name: &'static str,
    /// Constructor
    pub init: InitFn<B>,
}

impl<B: I2cTransfer> DvoChipEntry<B> {
    /// Entry for a driver type
    pub fn of<D: DvoDriver<B> + 'static>() -> Self {
        Self {
            name: D::NAME,
            init: init_boxed::<B, D>,
        }
    }
}

impl<B> Clone for DvoChipEntry<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for DvoChipEntry<B> {}

fn init_boxed<B: I2cTransfer, D: DvoDriver<B> + 'static>(
    dvo: &mut DvoHandle<B>,
) -> Result<BoxedDevice<B>, DvoError> {
    let device = D::init(dvo)?;
    Ok(Box::new(device))
}

/// An initialized DVO chip and the handle it was found on
pub struct DvoOutput<B> {
    handle: DvoHandle<B>,
    name: &'static str,
    device: Option<BoxedDevice<B>>,
}

impl<B: I2cTransfer> DvoOutput<B> {
    /// Run `entry`'s init sequence on `handle`
    ///
    /// On failure the handle is given back so the caller can try another
    /// driver on the same bus.
    pub fn init(
        entry: &DvoChipEntry<B>,
        mut handle: DvoHandle<B>,
    ) -> Result<Self, (DvoError, DvoHandle<B>)> {
        match (entry.init)(&mut handle) {
            Ok(device) => Ok(Self {
                handle,
                name: entry.name,
                device: Some(device),
            }),
            Err(e) => Err((e, handle)),
        }
    }

    /// Driver name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Handle the chip was found on
    pub fn handle(&self) -> &DvoHandle<B> {
        &self.handle
    }

    /// Check if the driver state is still alive
    pub fn is_present(&self) -> bool {
        self.device.is_some()
    }

    /// Check whether a receiver is attached
    ///
    /// A destroyed output reports [`ConnectorStatus::Unknown`].
    pub fn detect(&mut self) -> ConnectorStatus {
        match self.device.as_mut() {
            Some(device) => device.detect(&mut self.handle),
            None => ConnectorStatus::Unknown,
        }
    }

    /// Check whether the chip can drive `mode`
    ///
    /// A destroyed output rejects every mode.
    pub fn mode_valid(&self, mode: &DisplayMode) -> ModeStatus {
        match self.device.as_ref() {
            Some(device) => device.mode_valid(&self.handle, mode),
            None => ModeStatus::Bad,
        }
    }

    /// Program the chip for `mode`
    pub fn mode_set(&mut self, mode: &DisplayMode, adjusted: &DisplayMode) -> Result<(), DvoError> {
        let device = self.device.as_mut().ok_or(DvoError::NoDevice)?;
        device.mode_set(&mut self.handle, mode, adjusted);
        Ok(())
    }

    /// Change the chip's power state
    pub fn dpms(&mut self, mode: DpmsMode) -> Result<(), DvoError> {
        let device = self.device.as_mut().ok_or(DvoError::NoDevice)?;
        device.dpms(&mut self.handle, mode);
        Ok(())
    }

    /// Log the chip's registers
    pub fn dump_regs(&mut self) -> Result<(), DvoError> {
        let device = self.device.as_ref().ok_or(DvoError::NoDevice)?;
        device.dump_regs(&mut self.handle);
        Ok(())
    }

    /// Release the driver state
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn destroy(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.destroy(&mut self.handle);
            trace!("{} destroyed", self.name);
        }
    }

    /// Tear down and give back the bus view
    pub fn release(mut self) -> B {
        self.destroy();
        self.handle.release()
    }
}

/// Probe every configured chip and collect the ones that identify
///
/// Chips are tried in table order. Once a chip initializes on a port,
/// later candidates for that port are skipped. `bus_for` supplies a bus
/// view for each candidate. Addresses that do not answer are skipped
/// without a log record; a chip that answers with the wrong id is logged
/// at debug level.
pub fn probe_outputs<B, F>(
    config: &DvoBoardConfig,
    entries: &[DvoChipEntry<B>],
    mut bus_for: F,
) -> Vec<DvoOutput<B>>
where
    B: I2cTransfer,
    F: FnMut(&DvoChipConfig) -> B,
{
    let mut outputs: Vec<DvoOutput<B>> = Vec::new();

    for chip in config.chips.iter() {
        if outputs.iter().any(|o| o.handle().port() == chip.port) {
            continue;
        }

        let Some(entry) = entries.iter().find(|e| e.name == chip.name.as_str()) else {
            warn!("no driver for DVO chip {}", chip.name.as_str());
            continue;
        };

        let handle = DvoHandle::new(bus_for(chip), chip.slave_addr, chip.port);
        match DvoOutput::init(entry, handle) {
            Ok(output) => {
                info!(
                    "{} found on port {:?} at {:#04x}",
                    entry.name, chip.port, chip.slave_addr
                );
                outputs.push(output);
            }
            // Nothing answered at this address
            Err((DvoError::Transport { .. }, _)) => {}
            Err((e, _)) => {
                debug!(
                    "{} not detected on port {:?} at {:#04x}: {:?}",
                    entry.name, chip.port, chip.slave_addr, e
                );
            }
        }
    }

    outputs
}
