//! Offline dataset self-update
//!
//! Once a day, in the small hours, the board downloads a fresh offline
//! timetable. The download lands in a staging slot and only replaces the
//! live dataset via remove-then-rename, so a crash mid-update never leaves
//! a half-written dataset as the live one. The day of the last successful
//! update is persisted; a reboot inside the update window must not trigger
//! a second download.

use fahrtafel_feed::TIMETABLE_MIN_BYTES;

use crate::traits::{FetchError, HttpClient, Storage, StorageError, StorageSlot};

/// Local hour from which the daily update may run
pub const UPDATE_WINDOW_OPEN_HOUR: u8 = 3;

/// Local hour at which the in-RAM "updated today" flag is cleared
pub const UPDATE_FLAG_RESET_HOUR: u8 = 2;

/// Cooldown after a failed update attempt
pub const RETRY_COOLDOWN_MS: u64 = 600_000;

/// Why an update attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Download failed
    Fetch(FetchError),
    /// Download succeeded but is not larger than the size floor
    TooSmall { len: usize },
    /// Persisting the dataset failed
    Storage(StorageError),
}

impl From<FetchError> for UpdateError {
    fn from(err: FetchError) -> Self {
        UpdateError::Fetch(err)
    }
}

impl From<StorageError> for UpdateError {
    fn from(err: StorageError) -> Self {
        UpdateError::Storage(err)
    }
}

/// Schedules and performs the daily dataset update
#[derive(Debug)]
pub struct UpdateManager {
    updated_today: bool,
    last_failure_ms: Option<u64>,
}

impl UpdateManager {
    pub fn new() -> Self {
        Self {
            updated_today: false,
            last_failure_ms: None,
        }
    }

    /// Restore the "updated today" flag from the persisted record.
    ///
    /// An unreadable or missing record reads as "not updated", which at
    /// worst causes one extra download.
    pub fn seed(&mut self, storage: &mut impl Storage, today_day: u8) {
        let mut record = [0u8; 1];
        self.updated_today = match storage.read(StorageSlot::UpdateRecord, &mut record) {
            Ok(1) => record[0] == today_day,
            _ => false,
        };
    }

    /// Clear the flag when the local clock passes the reset hour.
    ///
    /// The persisted record already rolls over with the date; this covers
    /// a board that stays up across midnight.
    pub fn maintain_window(&mut self, hour: u8) {
        if hour == UPDATE_FLAG_RESET_HOUR {
            self.updated_today = false;
        }
    }

    /// Whether an update should run now.
    pub fn due(&self, hour: u8, online: bool, now_ms: u64) -> bool {
        if !online || self.updated_today || hour < UPDATE_WINDOW_OPEN_HOUR {
            return false;
        }
        match self.last_failure_ms {
            None => true,
            Some(at) => now_ms.saturating_sub(at) >= RETRY_COOLDOWN_MS,
        }
    }

    pub fn updated_today(&self) -> bool {
        self.updated_today
    }

    /// Download and install a fresh dataset.
    ///
    /// On success the caller is expected to reboot; the freshly installed
    /// dataset is only loaded at startup.
    pub fn run(
        &mut self,
        http: &mut impl HttpClient,
        storage: &mut impl Storage,
        buf: &mut [u8],
        url: &str,
        today_day: u8,
    ) -> Result<(), UpdateError> {
        let len = http.get(url, buf)?;
        if len <= TIMETABLE_MIN_BYTES {
            return Err(UpdateError::TooSmall { len });
        }

        storage.write(StorageSlot::TimetableStaging, &buf[..len])?;
        match storage.remove(StorageSlot::Timetable) {
            // first-ever update has no live dataset to remove
            Ok(()) | Err(StorageError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }
        storage.rename(StorageSlot::TimetableStaging, StorageSlot::Timetable)?;
        storage.write(StorageSlot::UpdateRecord, &[today_day])?;

        self.updated_today = true;
        self.last_failure_ms = None;
        Ok(())
    }

    /// Start the retry cooldown after a failed attempt.
    pub fn record_failure(&mut self, now_ms: u64) {
        self.last_failure_ms = Some(now_ms);
    }
}

impl Default for UpdateManager {
    fn default() -> Self {
        Self::new()
    }
}
