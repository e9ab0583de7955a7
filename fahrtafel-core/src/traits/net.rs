//! Network link abstraction

/// OS error codes that indicate a wedged Wi-Fi interface.
///
/// EBUSY, EHOSTUNREACH and the vendor's internal association error all
/// mean the radio needs a power cycle rather than a retry.
pub const CORRUPTED_INTERFACE_CODES: [i32; 3] = [16, 118, -202];

/// Errors reported by the network link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The interface is wedged and needs a power cycle
    InterfaceCorrupted,
    /// Association failed but the interface is healthy
    Transient,
}

impl LinkError {
    /// Classify a raw OS error code.
    pub fn from_os_code(code: i32) -> Self {
        if CORRUPTED_INTERFACE_CODES.contains(&code) {
            LinkError::InterfaceCorrupted
        } else {
            LinkError::Transient
        }
    }
}

/// The board's Wi-Fi station interface
pub trait NetworkInterface {
    /// Whether the link is currently associated and usable
    fn is_connected(&mut self) -> bool;

    /// Begin association with the configured access point.
    ///
    /// Returns as soon as the attempt is started; callers poll
    /// [`Self::is_connected`] for the outcome.
    fn connect(&mut self) -> Result<(), LinkError>;

    /// Power the radio on or off
    fn set_enabled(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_codes_classified() {
        for code in CORRUPTED_INTERFACE_CODES {
            assert_eq!(LinkError::from_os_code(code), LinkError::InterfaceCorrupted);
        }
    }

    #[test]
    fn test_other_codes_transient() {
        for code in [0, 1, 110, -1, 113] {
            assert_eq!(LinkError::from_os_code(code), LinkError::Transient);
        }
    }
}
