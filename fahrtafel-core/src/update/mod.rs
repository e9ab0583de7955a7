//! Daily dataset self-update

pub mod manager;

pub use manager::{
    UpdateError, UpdateManager, RETRY_COOLDOWN_MS, UPDATE_FLAG_RESET_HOUR,
    UPDATE_WINDOW_OPEN_HOUR,
};
