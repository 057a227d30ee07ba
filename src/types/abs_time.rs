//! Wall-clock helpers shared by the log store and the trace renderers.
//!
//! All instants are local wall-clock [`NaiveDateTime`] values, captured once
//! per entry. Offsets are always computed against an explicit session start.
use chrono::{Local, NaiveDateTime, TimeDelta};

/// `HH:mm:ss.mmm`, 24-hour, zero-padded milliseconds.
pub const CLOCK_FORMAT: &str = "%H:%M:%S%.3f";

/// OLE automation date of the Unix epoch (days since 1899-12-30).
const OLE_UNIX_EPOCH_DAYS: f64 = 25_569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Formats `ts` as `HH:mm:ss.mmm`.
pub fn format_clock(ts: &NaiveDateTime) -> String {
    ts.format(CLOCK_FORMAT).to_string()
}

/// Seconds elapsed from `start` to `ts` with microsecond resolution.
/// Negative when `ts` precedes `start`.
pub fn offset_seconds(start: &NaiveDateTime, ts: &NaiveDateTime) -> f64 {
    let delta: TimeDelta = *ts - *start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // only overflows for spans of ~290k years
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Whole milliseconds elapsed from `start` to `ts`.
pub fn offset_millis(start: &NaiveDateTime, ts: &NaiveDateTime) -> i64 {
    (*ts - *start).num_milliseconds()
}

/// Fractional days since 1899-12-30 00:00, the `$STARTTIME` unit of PEAK traces.
pub fn ole_date(ts: &NaiveDateTime) -> f64 {
    OLE_UNIX_EPOCH_DAYS + ts.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(hh, mm, ss, ms)
            .unwrap()
    }

    #[test]
    fn clock_is_24h_with_padded_millis() {
        assert_eq!(format_clock(&dt(2024, 3, 15, 14, 5, 9, 7)), "14:05:09.007");
        assert_eq!(format_clock(&dt(2024, 3, 15, 0, 0, 0, 0)), "00:00:00.000");
    }

    #[test]
    fn offsets_are_relative_to_start() {
        let start = dt(2024, 3, 15, 10, 30, 0, 0);
        let later = dt(2024, 3, 15, 10, 30, 1, 250);
        assert_eq!(offset_seconds(&start, &later), 1.25);
        assert_eq!(offset_millis(&start, &later), 1250);
        // earlier than the anchor
        assert_eq!(offset_millis(&later, &start), -1250);
    }

    #[test]
    fn ole_date_matches_spreadsheet_serials() {
        // 1970-01-01 is serial 25569, 2024-03-15 is serial 45366
        assert_eq!(ole_date(&dt(1970, 1, 1, 0, 0, 0, 0)), 25_569.0);
        assert_eq!(ole_date(&dt(2024, 3, 15, 10, 30, 0, 0)), 45_366.4375);
    }
}
