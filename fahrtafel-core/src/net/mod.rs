//! Connectivity management

pub mod connectivity;

pub use connectivity::{
    ConnectivityManager, ConnectivityState, CONNECT_POLL_ATTEMPTS, CONNECT_POLL_INTERVAL_MS,
    RECONNECT_INTERVAL_MS,
};
