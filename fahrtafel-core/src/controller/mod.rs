//! Main loop orchestration

pub mod board;
pub mod executor;
pub mod timer;

pub use board::Board;
pub use executor::{
    Controller, BOOT_CONNECT_ROUNDS, DISPLAY_REFRESH_MS, REBOOT_COUNTDOWN_S, SCRATCH_BYTES,
    TICK_MS,
};
pub use timer::IntervalTimer;
