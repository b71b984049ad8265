//! Configuration types
//!
//! Board-level description of which DVO chips may be present and where.
//! With the `serde` feature the table can be stored as postcard binary data.

pub mod board;

pub use board::*;
