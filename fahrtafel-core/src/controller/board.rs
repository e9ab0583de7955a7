//! Board peripheral bundle

/// Everything the controller drives, bundled so the main loop takes one
/// value. Firmware constructs this from the real drivers; tests from the
/// mocks.
#[derive(Debug)]
pub struct Board<N, H, S, C, Y, D> {
    /// Wi-Fi station interface
    pub net: N,
    /// HTTP client
    pub http: H,
    /// Persistent storage
    pub storage: S,
    /// Monotonic + wall-clock time source
    pub clock: C,
    /// Delay and reset control
    pub system: Y,
    /// Panel backend
    pub display: D,
}

impl<N, H, S, C, Y, D> Board<N, H, S, C, Y, D> {
    pub fn new(net: N, http: H, storage: S, clock: C, system: Y, display: D) -> Self {
        Self {
            net,
            http,
            storage,
            clock,
            system,
            display,
        }
    }
}
