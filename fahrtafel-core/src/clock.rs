//! Local time resolution for Germany (CET/CEST)
//!
//! The target has no OS timezone database, so the daylight-saving switch
//! is computed algorithmically: the last Sunday of March and October via a
//! closed-form remainder formula, the DST predicate from the spec'd EU
//! rule (transitions at 01:00 UTC), and the local calendar tuple
//! re-derived from the *shifted* absolute timestamp so hour-boundary
//! day/month rollovers come out right. Valid for the proleptic Gregorian
//! calendar; no external time source is consulted.

use heapless::String;

use fahrtafel_feed::departure::{format_hhmm, TIME_LEN};

/// Seconds per day
const SECS_PER_DAY: i64 = 86_400;

/// Standard (winter) UTC offset in hours
const CET_OFFSET_H: i64 = 1;

/// Daylight-saving UTC offset in hours
const CEST_OFFSET_H: i64 = 2;

/// Remainder constant selecting the last Sunday of March
const MARCH_K: u32 = 4;

/// Remainder constant selecting the last Sunday of October
const OCTOBER_K: u32 = 1;

/// A resolved local wall-clock instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u8,
}

impl LocalTime {
    /// Wall clock as a "HH:MM" label
    pub fn hhmm(&self) -> String<TIME_LEN> {
        format_hhmm(self.hour, self.minute)
    }
}

/// Day of month (in a 31-day month) of the last Sunday, by Gauss remainder.
fn last_sunday(year: u16, k: u32) -> u8 {
    (31 - ((5 * year as u32 / 4 + k) % 7)) as u8
}

/// Last Sunday of March for `year`
pub fn last_sunday_of_march(year: u16) -> u8 {
    last_sunday(year, MARCH_K)
}

/// Last Sunday of October for `year`
pub fn last_sunday_of_october(year: u16) -> u8 {
    last_sunday(year, OCTOBER_K)
}

/// Whether daylight-saving time is active at the given UTC instant.
///
/// EU rule: DST runs from 01:00 UTC on the last Sunday of March to
/// 01:00 UTC on the last Sunday of October.
pub fn is_dst(year: u16, month: u8, day: u8, utc_hour: u8) -> bool {
    let march = last_sunday_of_march(year);
    let october = last_sunday_of_october(year);

    (month > 3 && month < 10)
        || (month == 3 && (day > march || (day == march && utc_hour >= 1)))
        || (month == 10 && (day < october || (day == october && utc_hour < 1)))
}

/// Resolve a UTC unix timestamp to German local wall-clock time.
pub fn local_time(utc_unix: i64) -> LocalTime {
    let utc = civil_from_unix(utc_unix);
    let offset_h = if is_dst(utc.year, utc.month, utc.day, utc.hour) {
        CEST_OFFSET_H
    } else {
        CET_OFFSET_H
    };
    civil_from_unix(utc_unix + offset_h * 3600)
}

/// Derive the full calendar tuple from a unix timestamp.
fn civil_from_unix(t: i64) -> LocalTime {
    let days = t.div_euclid(SECS_PER_DAY);
    let secs = t.rem_euclid(SECS_PER_DAY);

    let (year, month, day) = civil_from_days(days);
    LocalTime {
        year,
        month,
        day,
        hour: (secs / 3600) as u8,
        minute: (secs / 60 % 60) as u8,
        second: (secs % 60) as u8,
        // 1970-01-01 was a Thursday
        weekday: (days + 3).rem_euclid(7) as u8,
    }
}

/// Days-since-epoch to (year, month, day), proleptic Gregorian.
fn civil_from_days(z: i64) -> (u16, u8, u8) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as u16, m as u8, d as u8)
}
