//! Errors shared by DVO drivers and the host registry

/// Errors from DVO chip operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DvoError {
    /// A register transaction did not complete
    Transport {
        /// Register being accessed
        register: u8,
    },
    /// An identification register held an unexpected value
    NotDetected {
        /// Identification register
        register: u8,
        /// Value the chip should report
        expected: u8,
        /// Value actually read
        found: u8,
    },
    /// The output has been destroyed
    NoDevice,
}

impl DvoError {
    /// Check if the failure came from the bus rather than the chip
    pub fn is_transport(&self) -> bool {
        matches!(self, DvoError::Transport { .. })
    }
}

impl core::fmt::Display for DvoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DvoError::Transport { register } => {
                write!(f, "transfer failed on register {:#04x}", register)
            }
            DvoError::NotDetected {
                register,
                expected,
                found,
            } => write!(
                f,
                "register {:#04x} reads {:#04x}, expected {:#04x}",
                register, found, expected
            ),
            DvoError::NoDevice => f.write_str("no device"),
        }
    }
}
