//! Wire formats and shared schedule model for the Fahrtafel departure board
//!
//! This crate contains everything both the controller core and the display
//! layer need to agree on:
//!
//! - The `Departure` / `ScheduleSnapshot` data model
//! - Transit endpoint JSON parsing (EFA `departureList` format)
//! - Weather endpoint JSON parsing (open-meteo `current_weather`)
//! - The offline timetable type and its postcard codec
//! - Destination text shortening

#![no_std]
#![deny(unsafe_code)]

pub mod departure;
pub mod text;
pub mod timetable;
pub mod weather;

pub use departure::{
    format_hhmm, parse_departures, Departure, ScheduleSnapshot, SnapshotSource, MAX_DEPARTURES,
    MAX_LINE_LEN, SNAPSHOT_CAP,
};
pub use text::{clip, shorten_text, MAX_DIRECTION_BYTES, MAX_DIRECTION_CHARS};
pub use timetable::{
    Timetable, TimetableEntry, MAX_PER_HOUR, TIMETABLE_HOURS, TIMETABLE_MIN_BYTES,
};
pub use weather::{parse_weather, MAX_WEATHER_LEN};

/// Errors that can occur while decoding feed payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Payload is not decodable as the expected format
    Malformed,
    /// Payload does not fit the capacity-bounded target
    TooLarge,
}
