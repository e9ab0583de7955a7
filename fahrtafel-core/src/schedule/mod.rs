//! Schedule acquisition
//!
//! Two providers produce [`fahrtafel_feed::ScheduleSnapshot`]s: the live
//! endpoint fetcher and the offline timetable projection. The controller
//! tries live first and falls back to offline.

pub mod live;
pub mod offline;

pub use live::{fetch_live, FETCH_ATTEMPTS, RETRY_PAUSE_MS};
pub use offline::{offline_snapshot, OFFLINE_WINDOW_MIN};

use fahrtafel_feed::Departure;
use heapless::Vec;

/// Stable in-place sort ascending by countdown.
///
/// Insertion sort: snapshots hold at most a handful of rows, and equal
/// countdowns must keep their bucket order.
pub(crate) fn sort_by_countdown<const N: usize>(departures: &mut Vec<Departure, N>) {
    for i in 1..departures.len() {
        let mut j = i;
        while j > 0 && departures[j - 1].countdown_minutes > departures[j].countdown_minutes {
            departures.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fahrtafel_feed::{clip, format_hhmm, shorten_text, SNAPSHOT_CAP};

    fn dep(line: &str, countdown: u16) -> Departure {
        Departure {
            line: clip(line),
            direction: shorten_text("Karlsruhe"),
            scheduled_time: format_hhmm(12, 0),
            countdown_minutes: countdown,
            is_live: false,
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let mut departures: Vec<Departure, SNAPSHOT_CAP> = Vec::new();
        for (line, countdown) in [("S3", 9), ("S32", 2), ("S4", 2), ("S1", 0)] {
            departures.push(dep(line, countdown)).unwrap();
        }
        sort_by_countdown(&mut departures);

        let order: Vec<&str, SNAPSHOT_CAP> =
            departures.iter().map(|d| d.line.as_str()).collect();
        // equal countdowns (S32, S4) keep their input order
        assert_eq!(order.as_slice(), ["S1", "S32", "S4", "S3"]);
    }
}
