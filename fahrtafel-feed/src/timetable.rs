//! Offline timetable
//!
//! Static per-hour departure table used when the live endpoint is
//! unreachable. Produced off-device by the dataset generator, shipped as a
//! postcard-serialized payload, loaded once at startup and never mutated
//! in place while in use — replacement happens through the update
//! manager's staging slot followed by a restart.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::departure::MAX_LINE_LEN;
use crate::text::MAX_DIRECTION_BYTES;
use crate::ParseError;

/// Hour buckets per day
pub const TIMETABLE_HOURS: usize = 24;

/// Maximum departures per hour bucket
pub const MAX_PER_HOUR: usize = 12;

/// Size floor for an encoded timetable in bytes.
///
/// Downloads at or below this size read as truncated or empty and must
/// never be installed.
pub const TIMETABLE_MIN_BYTES: usize = 100;

/// One static timetable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimetableEntry {
    /// Departure minute within the bucket hour
    pub minute: u8,
    /// Line symbol ("S3")
    pub line: String<MAX_LINE_LEN>,
    /// Destination, shortened at generation time
    pub direction: String<MAX_DIRECTION_BYTES>,
}

/// Per-hour static departure table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Departures indexed by hour of day, each bucket sorted by minute
    pub hours: [Vec<TimetableEntry, MAX_PER_HOUR>; TIMETABLE_HOURS],
}

impl Timetable {
    /// Timetable with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a stored or downloaded timetable payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        postcard::from_bytes(bytes).map_err(|_| ParseError::Malformed)
    }

    /// Encode into `buf`, returning the used prefix.
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], ParseError> {
        postcard::to_slice(self, buf)
            .map(|used| &*used)
            .map_err(|_| ParseError::TooLarge)
    }

    /// Entries departing within the bucket for `hour` (wrapped mod 24).
    pub fn bucket(&self, hour: u8) -> &[TimetableEntry] {
        &self.hours[(hour as usize) % TIMETABLE_HOURS]
    }

    /// Append an entry to an hour bucket.
    ///
    /// Returns the entry back if the bucket is full.
    pub fn add(&mut self, hour: u8, entry: TimetableEntry) -> Result<(), TimetableEntry> {
        self.hours[(hour as usize) % TIMETABLE_HOURS].push(entry)
    }

    /// True when no bucket holds any entry.
    pub fn is_empty(&self) -> bool {
        self.hours.iter().all(|bucket| bucket.is_empty())
    }
}

impl TimetableEntry {
    /// Construct an entry, clipping over-long fields to capacity.
    pub fn new(minute: u8, line: &str, direction: &str) -> Self {
        Self {
            minute,
            line: crate::text::clip(line),
            direction: crate::text::clip(direction),
        }
    }
}
