//! Board DVO configuration
//!
//! A board lists every chip that *may* sit behind its DVO ports. The host
//! probes them in order; the first chip that identifies itself on a port
//! claims that port.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum chip name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum candidate chips per board
pub const MAX_DVO_CHIPS: usize = 8;

/// Default NS2501 slave address
pub const NS2501_ADDR: u8 = 0x38;

/// DVO port on the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DvoPort {
    /// DVO A, usually an internal panel link
    A,
    /// DVO B, the reference board's external transmitter
    #[default]
    B,
    /// DVO C
    C,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Chip table is full
    TooManyChips,
    /// Chip name longer than [`MAX_NAME_LEN`]
    NameTooLong,
    /// Slave address outside the 7-bit range
    InvalidAddress,
    /// Stored table could not be decoded
    Deserialize,
    /// Table did not fit the output buffer
    Serialize,
}

/// One candidate DVO chip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DvoChipConfig {
    /// Driver name (e.g., "ns2501")
    pub name: String<MAX_NAME_LEN>,
    /// Port the chip is wired to
    pub port: DvoPort,
    /// 7-bit slave address
    pub slave_addr: u8,
}

impl DvoChipConfig {
    /// Create a validated chip entry
    pub fn new(name: &str, port: DvoPort, slave_addr: u8) -> Result<Self, ConfigError> {
        if slave_addr > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        let name = String::try_from(name).map_err(|_| ConfigError::NameTooLong)?;
        Ok(Self {
            name,
            port,
            slave_addr,
        })
    }
}

/// Candidate DVO chips of one board, in probe order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DvoBoardConfig {
    /// Chips to probe
    pub chips: Vec<DvoChipConfig, MAX_DVO_CHIPS>,
}

impl DvoBoardConfig {
    /// Create an empty table
    pub fn new() -> Self {
        Self { chips: Vec::new() }
    }

    /// Reference board: NS2501 TMDS transmitter on DVO port B
    pub fn reference() -> Self {
        let mut config = Self::new();
        let ns2501 = DvoChipConfig {
            name: String::try_from("ns2501").unwrap_or_default(),
            port: DvoPort::B,
            slave_addr: NS2501_ADDR,
        };
        // Capacity is at least one
        let _ = config.chips.push(ns2501);
        config
    }

    /// Append a chip to the probe order
    pub fn push(&mut self, chip: DvoChipConfig) -> Result<(), ConfigError> {
        if chip.slave_addr > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        self.chips.push(chip).map_err(|_| ConfigError::TooManyChips)
    }

    /// Chips wired to `port`, in probe order
    pub fn chips_on(&self, port: DvoPort) -> impl Iterator<Item = &DvoChipConfig> {
        self.chips.iter().filter(move |c| c.port == port)
    }

    /// Decode a table stored as postcard binary data
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if config.chips.iter().any(|c| c.slave_addr > 0x7F) {
            return Err(ConfigError::InvalidAddress);
        }
        Ok(config)
    }

    /// Encode the table as postcard binary data into `buf`
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }
}
