//! Departure model and transit endpoint parsing
//!
//! The transit endpoint (EFA direct departure monitor) returns a JSON
//! object with a `departureList` array. Numeric fields arrive as strings;
//! every field is optional and substituted with a default on parse failure
//! so one malformed departure never discards the batch.

use core::fmt::Write;

use heapless::{String, Vec};
use serde::Deserialize;

use crate::text::{clip, shorten_text, MAX_DIRECTION_BYTES};
use crate::ParseError;

/// Maximum line symbol length ("S32")
pub const MAX_LINE_LEN: usize = 5;

/// Length of a "HH:MM" time label
pub const TIME_LEN: usize = 5;

/// Maximum departures taken from one endpoint response
pub const MAX_DEPARTURES: usize = 8;

/// Maximum departures held in one snapshot
pub const SNAPSHOT_CAP: usize = 16;

/// One row of the composed departure view
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Departure {
    /// Line symbol ("S3")
    pub line: String<MAX_LINE_LEN>,
    /// Destination, already shortened to the display width
    pub direction: String<MAX_DIRECTION_BYTES>,
    /// Scheduled (or real-time) departure as "HH:MM"
    pub scheduled_time: String<TIME_LEN>,
    /// Minutes until departure
    pub countdown_minutes: u16,
    /// True when taken from the real-time endpoint
    pub is_live: bool,
}

/// Where a snapshot's departures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SnapshotSource {
    /// Real-time endpoint
    Live,
    /// Static on-device timetable
    Offline,
    /// No departures could be produced
    Empty,
}

/// Result of one schedule acquisition cycle
///
/// Built fresh by whichever provider ran, consumed immediately by the
/// display composer, never retained across cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleSnapshot {
    /// Departures ordered ascending by countdown
    pub departures: Vec<Departure, SNAPSHOT_CAP>,
    /// Provider that produced this snapshot
    pub source: SnapshotSource,
    /// Connectivity at acquisition time
    pub online: bool,
}

impl ScheduleSnapshot {
    /// Snapshot with no departures
    pub fn empty(online: bool) -> Self {
        Self {
            departures: Vec::new(),
            source: SnapshotSource::Empty,
            online,
        }
    }

    /// True when no departures are present
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}

#[derive(Deserialize)]
struct DepartureResponse<'a> {
    #[serde(rename = "departureList", borrow, default)]
    departure_list: Vec<RawDeparture<'a>, MAX_DEPARTURES>,
}

#[derive(Deserialize, Default)]
struct RawDeparture<'a> {
    #[serde(rename = "servingLine", borrow, default)]
    serving_line: Option<ServingLine<'a>>,
    #[serde(rename = "realDateTime", borrow, default)]
    real_date_time: Option<RawDateTime<'a>>,
    #[serde(rename = "dateTime", borrow, default)]
    date_time: Option<RawDateTime<'a>>,
    #[serde(default)]
    countdown: Option<&'a str>,
}

#[derive(Deserialize, Default)]
struct ServingLine<'a> {
    #[serde(default)]
    symbol: Option<&'a str>,
    #[serde(default)]
    direction: Option<&'a str>,
}

#[derive(Deserialize, Default)]
struct RawDateTime<'a> {
    #[serde(default)]
    hour: Option<&'a str>,
    #[serde(default)]
    minute: Option<&'a str>,
}

/// Parse a transit endpoint response body into live departures.
///
/// Field-level problems degrade to defaults; only an undecodable document
/// yields an error.
pub fn parse_departures(
    payload: &[u8],
) -> Result<Vec<Departure, MAX_DEPARTURES>, ParseError> {
    let (response, _) = serde_json_core::de::from_slice::<DepartureResponse>(payload)
        .map_err(|_| ParseError::Malformed)?;

    let mut out = Vec::new();
    for raw in &response.departure_list {
        if out.push(parse_one(raw)).is_err() {
            break;
        }
    }
    Ok(out)
}

fn parse_one(raw: &RawDeparture<'_>) -> Departure {
    let (symbol, direction) = match &raw.serving_line {
        Some(line) => (
            line.symbol.unwrap_or("?"),
            line.direction.unwrap_or("Unknown"),
        ),
        None => ("?", "Unknown"),
    };

    // Route-branch suffixes ("Menzingen > Odenheim") are noise on a 17
    // character row; keep the text before the delimiter.
    let direction = match direction.split_once('>') {
        Some((before, _)) => before.trim(),
        None => direction.trim(),
    };

    // Real-time timestamp wins over the scheduled one
    let timestamp = raw.real_date_time.as_ref().or(raw.date_time.as_ref());
    let hour = timestamp.and_then(|t| t.hour).map_or(0, int_or_zero);
    let minute = timestamp.and_then(|t| t.minute).map_or(0, int_or_zero);

    let countdown = raw.countdown.map_or(0, int_or_zero);

    Departure {
        line: clip(symbol),
        direction: shorten_text(direction),
        scheduled_time: format_hhmm(hour as u8 % 24, minute as u8 % 60),
        countdown_minutes: countdown.max(0) as u16,
        is_live: true,
    }
}

/// Lenient integer parse: whitespace tolerated, anything else reads as 0.
fn int_or_zero(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

/// Format a "HH:MM" label
pub fn format_hhmm(hour: u8, minute: u8) -> String<TIME_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}", hour, minute);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &[u8] = br#"{
        "stopName": "Bad Schonborn Sud",
        "departureList": [
            {
                "countdown": "4",
                "dateTime": { "hour": "14", "minute": "32", "day": "12" },
                "realDateTime": { "hour": "14", "minute": "35" },
                "servingLine": {
                    "symbol": "S32",
                    "direction": "Karlsruhe Hauptbahnhof",
                    "delay": "3"
                }
            },
            {
                "countdown": "12",
                "dateTime": { "hour": "14", "minute": "44" },
                "servingLine": { "symbol": "S3", "direction": "Menzingen > Odenheim" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let deps = parse_departures(RESPONSE).unwrap();
        assert_eq!(deps.len(), 2);

        // Real-time timestamp preferred over scheduled
        assert_eq!(deps[0].line.as_str(), "S32");
        assert_eq!(deps[0].scheduled_time.as_str(), "14:35");
        assert_eq!(deps[0].direction.as_str(), "Karlsruhe Hbf");
        assert_eq!(deps[0].countdown_minutes, 4);
        assert!(deps[0].is_live);

        // No realDateTime: scheduled one used; branch suffix trimmed
        assert_eq!(deps[1].scheduled_time.as_str(), "14:44");
        assert_eq!(deps[1].direction.as_str(), "Menzingen");
    }

    #[test]
    fn test_missing_fields_default() {
        let deps = parse_departures(br#"{"departureList": [{}]}"#).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].line.as_str(), "?");
        assert_eq!(deps[0].direction.as_str(), "Unknown");
        assert_eq!(deps[0].scheduled_time.as_str(), "00:00");
        assert_eq!(deps[0].countdown_minutes, 0);
    }

    #[test]
    fn test_bad_countdown_reads_as_zero() {
        let deps = parse_departures(
            br#"{"departureList": [{"countdown": "n/a", "servingLine": {"symbol": "S4"}}]}"#,
        )
        .unwrap();
        assert_eq!(deps[0].countdown_minutes, 0);
    }

    #[test]
    fn test_empty_list() {
        let deps = parse_departures(br#"{"departureList": []}"#).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(parse_departures(b"not json"), Err(ParseError::Malformed));
    }

    #[test]
    fn test_snapshot_empty() {
        let snap = ScheduleSnapshot::empty(false);
        assert!(snap.is_empty());
        assert_eq!(snap.source, SnapshotSource::Empty);
        assert!(!snap.online);
    }
}
