//! In-memory implementations of the hardware traits
//!
//! Each mock records the calls the controller makes so tests can assert
//! on behavior (polls, power cycles, sleeps, restarts) rather than just
//! outcomes.

use heapless::{String, Vec};

use fahrtafel_display::{DisplayBackend, DisplayError};

use crate::traits::{
    FetchError, HttpClient, LinkError, NetworkInterface, Storage, StorageError, StorageSlot,
    SystemClock, SystemControl,
};

/// Capacity of one in-memory storage slot
pub const SLOT_CAP: usize = 8192;

const STORAGE_SLOTS: usize = 3;
const MOCK_ROUTES: usize = 4;
const ROUTE_BODY_CAP: usize = 2048;
const FAIL_QUEUE_CAP: usize = 8;
const TEXT_LOG_CAP: usize = 64;

/// Scriptable Wi-Fi station interface
#[derive(Debug, Default)]
pub struct MockNetwork {
    /// Current link state, also what `is_connected` reports
    pub connected: bool,
    /// Radio power state
    pub enabled: bool,
    /// Error returned by the next `connect` calls, if set
    pub connect_error: Option<LinkError>,
    /// When set, a successful `connect` immediately establishes the link
    pub connect_establishes: bool,
    /// Number of `connect` calls observed
    pub connect_calls: usize,
    /// Number of `set_enabled(false)` calls observed
    pub power_downs: usize,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// A mock that associates on the first attempt
    pub fn online() -> Self {
        Self {
            enabled: true,
            connect_establishes: true,
            ..Self::default()
        }
    }
}

impl NetworkInterface for MockNetwork {
    fn is_connected(&mut self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<(), LinkError> {
        self.connect_calls += 1;
        if let Some(err) = self.connect_error {
            return Err(err);
        }
        if self.connect_establishes {
            self.connected = true;
        }
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.power_downs += 1;
            self.connected = false;
        }
        self.enabled = enabled;
    }
}

/// One canned response, matched by URL substring
#[derive(Debug)]
pub struct MockRoute {
    pub url_contains: &'static str,
    pub body: Vec<u8, ROUTE_BODY_CAP>,
}

/// Scriptable HTTP client
///
/// Errors queued in `fail_queue` are returned first, one per call; after
/// the queue drains, requests are answered from `routes`. Unmatched URLs
/// get a 404.
#[derive(Debug, Default)]
pub struct MockHttp {
    pub routes: Vec<MockRoute, MOCK_ROUTES>,
    pub fail_queue: Vec<FetchError, FAIL_QUEUE_CAP>,
    /// Number of `get` calls observed
    pub requests: usize,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, url_contains: &'static str, body: &[u8]) -> Self {
        let mut owned = Vec::new();
        let _ = owned.extend_from_slice(body);
        let _ = self.routes.push(MockRoute {
            url_contains,
            body: owned,
        });
        self
    }

    pub fn with_failure(mut self, err: FetchError) -> Self {
        let _ = self.fail_queue.push(err);
        self
    }
}

impl HttpClient for MockHttp {
    fn get(&mut self, url: &str, buf: &mut [u8]) -> Result<usize, FetchError> {
        self.requests += 1;
        if !self.fail_queue.is_empty() {
            return Err(self.fail_queue.remove(0));
        }
        for route in &self.routes {
            if url.contains(route.url_contains) {
                if route.body.len() > buf.len() {
                    return Err(FetchError::BufferTooSmall);
                }
                buf[..route.body.len()].copy_from_slice(&route.body);
                return Ok(route.body.len());
            }
        }
        Err(FetchError::Status(404))
    }
}

/// Slot-addressed in-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: [Option<Vec<u8, SLOT_CAP>>; STORAGE_SLOTS],
    /// When set, every write fails with `Io`
    pub fail_writes: bool,
    /// When set, every rename fails with `Io`
    pub fail_renames: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot (test setup)
    pub fn with_slot(mut self, slot: StorageSlot, data: &[u8]) -> Self {
        let mut contents = Vec::new();
        let _ = contents.extend_from_slice(data);
        self.slots[Self::index(slot)] = Some(contents);
        self
    }

    /// Direct view of a slot's contents (test assertions)
    pub fn slot(&self, slot: StorageSlot) -> Option<&[u8]> {
        self.slots[Self::index(slot)].as_deref()
    }

    fn index(slot: StorageSlot) -> usize {
        match slot {
            StorageSlot::Timetable => 0,
            StorageSlot::TimetableStaging => 1,
            StorageSlot::UpdateRecord => 2,
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&mut self, slot: StorageSlot, buf: &mut [u8]) -> Result<usize, StorageError> {
        let data = self.slots[Self::index(slot)]
            .as_ref()
            .ok_or(StorageError::NotFound)?;
        if data.len() > buf.len() {
            return Err(StorageError::TooLarge);
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, slot: StorageSlot, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        let mut contents = Vec::new();
        contents
            .extend_from_slice(data)
            .map_err(|_| StorageError::TooLarge)?;
        self.slots[Self::index(slot)] = Some(contents);
        Ok(())
    }

    fn len(&mut self, slot: StorageSlot) -> Result<usize, StorageError> {
        self.slots[Self::index(slot)]
            .as_ref()
            .map(|data| data.len())
            .ok_or(StorageError::NotFound)
    }

    fn remove(&mut self, slot: StorageSlot) -> Result<(), StorageError> {
        self.slots[Self::index(slot)]
            .take()
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    fn rename(&mut self, from: StorageSlot, to: StorageSlot) -> Result<(), StorageError> {
        if self.fail_renames {
            return Err(StorageError::Io);
        }
        let data = self.slots[Self::index(from)]
            .take()
            .ok_or(StorageError::NotFound)?;
        self.slots[Self::index(to)] = Some(data);
        Ok(())
    }
}

/// Manually advanced time source
#[derive(Debug)]
pub struct MockClock {
    /// Monotonic milliseconds, advanced by tests
    pub ticks: u64,
    /// UTC unix timestamp, advanced by tests
    pub unix: i64,
    /// Result every `sync` call reports
    pub sync_result: bool,
    /// Number of `sync` calls observed
    pub syncs: usize,
}

impl MockClock {
    pub fn at(unix: i64) -> Self {
        Self {
            ticks: 0,
            unix,
            sync_result: true,
            syncs: 0,
        }
    }
}

impl SystemClock for MockClock {
    fn ticks_ms(&mut self) -> u64 {
        self.ticks
    }

    fn now_unix(&mut self) -> i64 {
        self.unix
    }

    fn sync(&mut self) -> bool {
        self.syncs += 1;
        self.sync_result
    }
}

/// Records sleeps and restarts instead of performing them
#[derive(Debug, Default)]
pub struct MockSystem {
    /// Total milliseconds slept
    pub slept_ms: u64,
    /// Number of `restart` calls observed
    pub restarts: usize,
}

impl MockSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemControl for MockSystem {
    fn sleep_ms(&mut self, ms: u32) {
        self.slept_ms += ms as u64;
    }

    fn restart(&mut self) {
        // Unlike hardware, returns, so tests can assert what came before
        self.restarts += 1;
    }
}

/// Display backend that logs drawn text
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub clears: usize,
    pub presents: usize,
    /// Every `draw_text` call in order
    pub texts: Vec<(u16, u16, String<64>), TEXT_LOG_CAP>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any drawn text contains `needle`
    pub fn shows(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, _, text)| text.contains(needle))
    }
}

impl DisplayBackend for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        _intensity: u8,
    ) -> Result<(), DisplayError> {
        let mut owned = String::new();
        let _ = owned.push_str(text);
        let _ = self.texts.push((x, y, owned));
        Ok(())
    }

    fn draw_pixel(&mut self, _x: u16, _y: u16, _intensity: u8) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_line(
        &mut self,
        _x0: u16,
        _y0: u16,
        _x1: u16,
        _y1: u16,
        _intensity: u8,
    ) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_hline(
        &mut self,
        _x: u16,
        _y: u16,
        _length: u16,
        _intensity: u8,
    ) -> Result<(), DisplayError> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.presents += 1;
        Ok(())
    }
}
