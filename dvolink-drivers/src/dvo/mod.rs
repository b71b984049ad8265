//! DVO chip drivers

pub mod ns2501;

pub use ns2501::{Ns2501, Ns2501Config};

use dvolink_core::output::DvoChipEntry;
use dvolink_hal::I2cTransfer;

/// Every driver in this crate, in the order the host should try them
pub fn supported_chips<B: I2cTransfer>() -> [DvoChipEntry<B>; 1] {
    [DvoChipEntry::of::<Ns2501>()]
}
