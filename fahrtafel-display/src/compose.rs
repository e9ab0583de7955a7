//! Snapshot composition
//!
//! Turns a schedule snapshot into the bounded render model: at most four
//! rows, at most two per direction, countdown-style time labels, and the
//! offline/no-data status flags.

use core::fmt::Write;

use heapless::{String, Vec};

use fahrtafel_feed::{Departure, ScheduleSnapshot, SnapshotSource, MAX_WEATHER_LEN};

use crate::render::{
    HeaderModel, RenderModel, RenderRow, MAX_LABEL_LEN, MAX_ROWS, MAX_ROWS_PER_DIRECTION,
};

/// Compose a snapshot into a render model.
///
/// `clock` is the local wall time as "HH:MM"; `weather` is the last-known
/// temperature readout (shown only while online).
pub fn compose(
    snapshot: &ScheduleSnapshot,
    clock: &str,
    weather: Option<&str>,
) -> RenderModel {
    let mut rows: Vec<RenderRow, MAX_ROWS> = Vec::new();
    let mut seen: Vec<(&str, u8), MAX_ROWS> = Vec::new();

    for departure in &snapshot.departures {
        if rows.is_full() {
            break;
        }
        if !admit(&mut seen, &departure.direction) {
            continue;
        }
        let _ = rows.push(RenderRow {
            line: departure.line.clone(),
            direction: departure.direction.clone(),
            label: time_label(departure),
        });
    }

    let no_data = rows.is_empty();
    RenderModel {
        header: HeaderModel {
            clock: fahrtafel_feed::text::clip(clock),
            weather: weather.and_then(bounded_weather),
            online: snapshot.online,
        },
        offline_banner: !no_data && snapshot.source == SnapshotSource::Offline,
        no_data,
        waiting_for_network: no_data && !snapshot.online,
        rows,
    }
}

/// Count directions as they are admitted; reject past the per-direction cap.
fn admit<'a>(seen: &mut Vec<(&'a str, u8), MAX_ROWS>, direction: &'a str) -> bool {
    for entry in seen.iter_mut() {
        if entry.0 == direction {
            if entry.1 as usize >= MAX_ROWS_PER_DIRECTION {
                return false;
            }
            entry.1 += 1;
            return true;
        }
    }
    // A full tally table means MAX_ROWS distinct directions already admitted
    seen.push((direction, 1)).is_ok()
}

/// Time label rule: "sofort" now, relative inside ten minutes, absolute after.
fn time_label(departure: &Departure) -> String<MAX_LABEL_LEN> {
    let mut label = String::new();
    match departure.countdown_minutes {
        0 => {
            let _ = label.push_str("sofort");
        }
        n @ 1..=9 => {
            let _ = write!(label, "in {} min", n);
        }
        _ => {
            let _ = label.push_str(&departure.scheduled_time);
        }
    }
    label
}

fn bounded_weather(weather: &str) -> Option<String<MAX_WEATHER_LEN>> {
    if weather.is_empty() {
        return None;
    }
    Some(fahrtafel_feed::text::clip(weather))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fahrtafel_feed::{format_hhmm, SNAPSHOT_CAP};

    fn departure(line: &str, direction: &str, countdown: u16, is_live: bool) -> Departure {
        Departure {
            line: fahrtafel_feed::text::clip(line),
            direction: fahrtafel_feed::shorten_text(direction),
            scheduled_time: format_hhmm(
                (14 + (countdown as u8) / 60) % 24,
                (countdown as u8) % 60,
            ),
            countdown_minutes: countdown,
            is_live,
        }
    }

    fn snapshot(
        departures: &[Departure],
        source: SnapshotSource,
        online: bool,
    ) -> ScheduleSnapshot {
        let mut list = heapless::Vec::<_, SNAPSHOT_CAP>::new();
        for d in departures {
            let _ = list.push(d.clone());
        }
        ScheduleSnapshot {
            departures: list,
            source,
            online,
        }
    }

    #[test]
    fn test_row_cap() {
        let deps: heapless::Vec<Departure, 8> = (0..8)
            .map(|i| departure("S3", "Karlsruhe", 10 + i, true))
            .collect();
        // 8 distinct directions would still cap at 4 rows
        let mut distinct = heapless::Vec::<Departure, 8>::new();
        for (i, mut d) in deps.into_iter().enumerate() {
            d.direction.clear();
            let _ = write!(d.direction, "Ziel {}", i);
            let _ = distinct.push(d);
        }
        let model = compose(&snapshot(&distinct, SnapshotSource::Live, true), "14:00", None);
        assert_eq!(model.rows.len(), MAX_ROWS);
    }

    #[test]
    fn test_direction_diversity_cap() {
        // Spec scenario: one direction, countdowns [2, 5, 40]
        let deps = [
            departure("S3", "Menzingen", 2, true),
            departure("S3", "Menzingen", 5, true),
            departure("S3", "Menzingen", 40, true),
        ];
        let model = compose(&snapshot(&deps, SnapshotSource::Live, true), "14:00", None);

        assert_eq!(model.rows.len(), 2);
        assert_eq!(model.rows[0].label.as_str(), "in 2 min");
        assert_eq!(model.rows[1].label.as_str(), "in 5 min");
    }

    #[test]
    fn test_time_labels() {
        let now = departure("S3", "Bruchsal", 0, true);
        let soon = departure("S3", "Bruchsal", 9, true);
        let later = departure("S4", "Germersheim", 40, true);
        let model = compose(
            &snapshot(&[now, soon, later.clone()], SnapshotSource::Live, true),
            "14:00",
            None,
        );

        assert_eq!(model.rows[0].label.as_str(), "sofort");
        assert_eq!(model.rows[1].label.as_str(), "in 9 min");
        assert_eq!(model.rows[2].label.as_str(), later.scheduled_time.as_str());
    }

    #[test]
    fn test_offline_banner() {
        let deps = [departure("S3", "Odenheim", 15, false)];
        let model = compose(&snapshot(&deps, SnapshotSource::Offline, false), "05:10", None);
        assert!(model.offline_banner);
        assert!(!model.no_data);
    }

    #[test]
    fn test_empty_snapshot_flags() {
        let offline = compose(&ScheduleSnapshot::empty(false), "03:00", None);
        assert!(offline.no_data);
        assert!(offline.waiting_for_network);
        assert!(!offline.offline_banner);

        let online = compose(&ScheduleSnapshot::empty(true), "03:00", None);
        assert!(online.no_data);
        assert!(!online.waiting_for_network);
    }

    #[test]
    fn test_weather_suppressed_offline() {
        let deps = [departure("S3", "Odenheim", 3, false)];
        let model = compose(
            &snapshot(&deps, SnapshotSource::Offline, false),
            "05:10",
            Some("8.5C"),
        );
        // Last-known weather is carried but the header hides it offline
        assert!(!model.header.online);
        let shown = compose(
            &snapshot(&deps, SnapshotSource::Live, true),
            "05:10",
            Some("8.5C"),
        );
        assert_eq!(shown.header.weather.as_deref(), Some("8.5C"));
    }
}
