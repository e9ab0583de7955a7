//! Offline timetable projection
//!
//! Projects the static timetable onto "departures in the next hour and a
//! half": the current hour bucket and the next one, with a midnight wrap,
//! filtered to a bounded look-ahead window.

use heapless::Vec;

use fahrtafel_feed::{
    format_hhmm, shorten_text, Departure, ScheduleSnapshot, SnapshotSource, Timetable,
    TIMETABLE_HOURS,
};

/// Look-ahead window in minutes
pub const OFFLINE_WINDOW_MIN: u16 = 90;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Build a snapshot from the static timetable for the given local time.
///
/// Entries earlier in the current hour than `minute` wrap a full day
/// forward and fall out of the window, so the board never shows a
/// departure that already left.
pub fn offline_snapshot(
    timetable: &Timetable,
    hour: u8,
    minute: u8,
    online: bool,
) -> ScheduleSnapshot {
    let now = hour as u16 * 60 + minute as u16;
    let mut departures = Vec::new();

    for offset in 0..2usize {
        let bucket_hour = ((hour as usize + offset) % TIMETABLE_HOURS) as u8;
        for entry in timetable.bucket(bucket_hour) {
            let mut departs_at = bucket_hour as u16 * 60 + entry.minute as u16;
            if departs_at < now {
                departs_at += MINUTES_PER_DAY;
            }
            let countdown = departs_at - now;
            if countdown > OFFLINE_WINDOW_MIN {
                continue;
            }
            let _ = departures.push(Departure {
                line: entry.line.clone(),
                direction: shorten_text(&entry.direction),
                scheduled_time: format_hhmm(bucket_hour, entry.minute),
                countdown_minutes: countdown,
                is_live: false,
            });
        }
    }

    crate::schedule::sort_by_countdown(&mut departures);

    let source = if departures.is_empty() {
        SnapshotSource::Empty
    } else {
        SnapshotSource::Offline
    };
    ScheduleSnapshot {
        departures,
        source,
        online,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fahrtafel_feed::TimetableEntry;

    fn table() -> Timetable {
        let mut t = Timetable::empty();
        let _ = t.add(14, TimetableEntry::new(10, "S3", "Karlsruhe Hbf"));
        let _ = t.add(14, TimetableEntry::new(40, "S32", "Menzingen"));
        let _ = t.add(15, TimetableEntry::new(5, "S3", "Germersheim"));
        let _ = t.add(15, TimetableEntry::new(55, "S4", "Bruchsal"));
        t
    }

    #[test]
    fn test_window_and_ordering() {
        // 14:20: the 14:10 already left, 15:55 is 95 min out
        let snap = offline_snapshot(&table(), 14, 20, false);
        assert_eq!(snap.source, SnapshotSource::Offline);
        assert_eq!(snap.departures.len(), 2);
        assert_eq!(snap.departures[0].scheduled_time.as_str(), "14:40");
        assert_eq!(snap.departures[0].countdown_minutes, 20);
        assert_eq!(snap.departures[1].scheduled_time.as_str(), "15:05");
        assert_eq!(snap.departures[1].countdown_minutes, 45);
        assert!(!snap.departures[0].is_live);
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let mut t = Timetable::empty();
        let _ = t.add(15, TimetableEntry::new(30, "S3", "Karlsruhe"));
        let _ = t.add(15, TimetableEntry::new(31, "S3", "Karlsruhe"));

        // 14:00 -> 15:30 is exactly 90 min out, 15:31 is past the window
        let snap = offline_snapshot(&t, 14, 0, false);
        assert_eq!(snap.departures.len(), 1);
        assert_eq!(snap.departures[0].countdown_minutes, OFFLINE_WINDOW_MIN);
    }

    #[test]
    fn test_midnight_wrap() {
        let mut t = Timetable::empty();
        let _ = t.add(23, TimetableEntry::new(50, "S3", "Karlsruhe"));
        let _ = t.add(0, TimetableEntry::new(15, "S32", "Menzingen"));

        let snap = offline_snapshot(&t, 23, 40, false);
        assert_eq!(snap.departures.len(), 2);
        assert_eq!(snap.departures[0].countdown_minutes, 10);
        assert_eq!(snap.departures[1].countdown_minutes, 35);
        assert_eq!(snap.departures[1].scheduled_time.as_str(), "00:15");
    }

    #[test]
    fn test_empty_result_marks_source_empty() {
        let snap = offline_snapshot(&Timetable::empty(), 9, 0, true);
        assert!(snap.is_empty());
        assert_eq!(snap.source, SnapshotSource::Empty);
        assert!(snap.online);
    }

    #[test]
    fn test_directions_are_shortened() {
        let mut t = Timetable::empty();
        let _ = t.add(10, TimetableEntry::new(30, "S3", "Karlsruhe Hauptbahnhof"));
        let snap = offline_snapshot(&t, 10, 0, false);
        assert_eq!(snap.departures[0].direction.as_str(), "Karlsruhe Hbf");
    }
}
