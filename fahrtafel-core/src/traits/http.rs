//! HTTP client abstraction

use super::net::CORRUPTED_INTERFACE_CODES;

/// Errors reported by an HTTP fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// The server answered with a non-success status
    Status(u16),
    /// Socket-level failure that may succeed on retry
    Transient,
    /// The underlying interface is wedged and needs a power cycle
    InterfaceCorrupted,
    /// The response body does not fit the caller's buffer
    BufferTooSmall,
}

impl FetchError {
    /// Classify a raw OS error code from the socket layer.
    pub fn from_os_code(code: i32) -> Self {
        if CORRUPTED_INTERFACE_CODES.contains(&code) {
            FetchError::InterfaceCorrupted
        } else {
            FetchError::Transient
        }
    }
}

/// Minimal blocking HTTP client
pub trait HttpClient {
    /// GET `url` and copy the response body into `buf`.
    ///
    /// Returns the number of body bytes written.
    fn get(&mut self, url: &str, buf: &mut [u8]) -> Result<usize, FetchError>;
}
