//! Time source and system control abstractions

/// The board's time sources
pub trait SystemClock {
    /// Monotonic milliseconds since boot
    fn ticks_ms(&mut self) -> u64;

    /// Current UTC unix timestamp
    fn now_unix(&mut self) -> i64;

    /// Synchronize the clock against the network time source.
    ///
    /// Returns whether synchronization succeeded.
    fn sync(&mut self) -> bool;
}

/// Blocking delay and reset control
pub trait SystemControl {
    /// Block for `ms` milliseconds
    fn sleep_ms(&mut self, ms: u32);

    /// Reboot the board. Implementations on real hardware do not return.
    fn restart(&mut self);
}
