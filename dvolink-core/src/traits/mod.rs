//! Device traits
//!
//! These traits define the interface between the host display framework
//! and chip-specific DVO drivers.

pub mod dvo;

pub use dvo::{ConnectorStatus, DpmsMode, DvoDevice, DvoDriver, ModeStatus};
