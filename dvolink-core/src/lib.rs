//! Board-agnostic DVO device model
//!
//! This crate contains everything the host display stack needs to drive
//! external DVO transmitter chips without knowing which chip it talks to:
//!
//! - Device traits implemented by each chip driver
//! - The per-chip host record ([`DvoHandle`]) that owns the bus view
//! - The host-side registry of initialized outputs and the probe loop
//! - Display mode descriptors
//! - Board configuration (candidate chips, ports, slave addresses)

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod handle;
pub mod mode;
pub mod output;
pub mod traits;

pub use error::DvoError;
pub use handle::DvoHandle;
pub use mode::DisplayMode;
pub use output::{probe_outputs, DvoChipEntry, DvoOutput};
