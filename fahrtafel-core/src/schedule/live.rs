//! Live endpoint fetching
//!
//! One acquisition cycle makes a bounded number of transit fetch attempts
//! and piggybacks a best-effort weather fetch on the first one. Responses
//! land in the caller's scratch buffer; only one is in flight at a time.

use heapless::{String, Vec};

use fahrtafel_feed::{
    parse_departures, parse_weather, ScheduleSnapshot, SnapshotSource, MAX_WEATHER_LEN,
};

use crate::config::EndpointConfig;
use crate::net::ConnectivityManager;
use crate::traits::{FetchError, HttpClient, NetworkInterface, SystemControl};

/// Transit fetch attempts per acquisition cycle
pub const FETCH_ATTEMPTS: u32 = 2;

/// Pause before a transit retry
pub const RETRY_PAUSE_MS: u32 = 1000;

/// Fetch a live snapshot from the transit endpoint.
///
/// Returns `None` when no live data could be produced this cycle, in which
/// case the caller falls back to the offline timetable. A successfully
/// parsed but empty departure list also yields `None` without a retry; the
/// endpoint answered, it just has nothing to show.
///
/// The weather readout is refreshed opportunistically on the first attempt
/// and kept stale on failure.
pub fn fetch_live(
    endpoints: &EndpointConfig,
    conn: &mut ConnectivityManager,
    net: &mut impl NetworkInterface,
    http: &mut impl HttpClient,
    system: &mut impl SystemControl,
    buf: &mut [u8],
    last_weather: &mut Option<String<MAX_WEATHER_LEN>>,
) -> Option<ScheduleSnapshot> {
    for attempt in 0..FETCH_ATTEMPTS {
        if attempt == 0 {
            if let Ok(len) = http.get(&endpoints.weather_url, buf) {
                if let Some(weather) = parse_weather(&buf[..len]) {
                    *last_weather = Some(weather);
                }
            }
        }

        match http.get(&endpoints.departures_url, buf) {
            Ok(len) => match parse_departures(&buf[..len]) {
                Ok(deps) if !deps.is_empty() => {
                    let mut departures = Vec::new();
                    for dep in deps {
                        let _ = departures.push(dep);
                    }
                    crate::schedule::sort_by_countdown(&mut departures);
                    return Some(ScheduleSnapshot {
                        departures,
                        source: SnapshotSource::Live,
                        online: true,
                    });
                }
                Ok(_) => return None,
                Err(_) => system.sleep_ms(RETRY_PAUSE_MS),
            },
            Err(FetchError::InterfaceCorrupted) => conn.reset(net, system),
            Err(_) => system.sleep_ms(RETRY_PAUSE_MS),
        }
    }
    None
}
