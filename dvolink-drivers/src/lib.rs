//! DVO transmitter drivers
//!
//! This crate provides implementations of the device traits defined in
//! dvolink-core for specific DVO chips:
//!
//! - NS2501 TMDS transmitter (National Semiconductor)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod dvo;

#[cfg(test)]
mod test_log;
