//! dvolink Hardware Abstraction Layer
//!
//! This crate defines the bus transport that chip drivers talk through.
//! A driver never owns the I2C peripheral: the host hands it a transport
//! implementing [`I2cTransfer`] and every register access becomes one
//! transaction on that transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Chip drivers (dvolink-drivers)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dvolink-hal (this crate - transport)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │    SimBus     │
//! │  I2c master   │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Types
//!
//! - [`i2c::I2cTransfer`] - Segment-level I2C transfers
//! - [`adapter::EmbeddedHalBus`] - Transport over any `embedded_hal::i2c::I2c`
//! - [`shared::RefCellBus`] - One transport shared by several devices
//! - `sim::SimBus` - Simulated register store (feature `sim`)

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod i2c;
pub mod shared;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

// Re-export key types at crate root for convenience
pub use adapter::EmbeddedHalBus;
pub use i2c::{I2cMessage, I2cOp, I2cTransfer, TransferError};
pub use shared::RefCellBus;
#[cfg(any(test, feature = "sim"))]
pub use sim::{SimAccess, SimBus, SimError};
