//! Hardware abstraction traits
//!
//! Everything the controller needs from the board is expressed through
//! these traits, so the full application can run against the mocks in
//! [`crate::hal::mock`] on a desktop.

pub mod http;
pub mod net;
pub mod storage;
pub mod system;

pub use http::{FetchError, HttpClient};
pub use net::{LinkError, NetworkInterface, CORRUPTED_INTERFACE_CODES};
pub use storage::{Storage, StorageError, StorageSlot};
pub use system::{SystemClock, SystemControl};
