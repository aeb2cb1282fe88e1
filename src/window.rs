//! The "yesterday" reporting window.
//!
//! Yesterday is the half-open local-time interval `[Y0, Y1)`: `Y0` is local
//! midnight one calendar day before `now`, `Y1` the midnight after it. The
//! bounds are recomputed on every call so callers (and tests) can pin `now`.

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};

/// Start and end of yesterday's window relative to `now`. End is exclusive.
pub fn yesterday_window(now: DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
    let today_start = day_start(now);
    (today_start - Duration::days(1), today_start)
}

/// True iff `timestamp` falls inside yesterday's window relative to `now`.
///
/// A timestamp exactly at the window start counts; one exactly at the window
/// end (today's midnight) does not, so no event is counted on two days.
pub fn is_yesterday(timestamp: DateTime<Utc>, now: DateTime<Local>) -> bool {
    let (start, end) = yesterday_window(now);
    let local = timestamp.with_timezone(&Local);
    start <= local && local < end
}

fn day_start(date: DateTime<Local>) -> DateTime<Local> {
    date.with_time(NaiveTime::MIN).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn utc_of(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        local(y, mo, d, h, mi, s).with_timezone(&Utc)
    }

    #[test]
    fn test_window_bounds() {
        let now = local(2026, 8, 21, 10, 30, 0);
        let (start, end) = yesterday_window(now);

        assert_eq!(start, local(2026, 8, 20, 0, 0, 0));
        assert_eq!(end, local(2026, 8, 21, 0, 0, 0));
    }

    #[test]
    fn test_midday_yesterday_is_inside() {
        let now = local(2026, 8, 21, 10, 30, 0);
        assert!(is_yesterday(utc_of(2026, 8, 20, 15, 4, 33), now));
    }

    #[test]
    fn test_start_boundary_included() {
        let now = local(2026, 8, 21, 10, 30, 0);
        assert!(is_yesterday(utc_of(2026, 8, 20, 0, 0, 0), now));
    }

    #[test]
    fn test_end_boundary_excluded() {
        let now = local(2026, 8, 21, 10, 30, 0);
        assert!(!is_yesterday(utc_of(2026, 8, 21, 0, 0, 0), now));
    }

    #[test]
    fn test_two_days_ago_is_outside() {
        let now = local(2026, 8, 21, 10, 30, 0);
        assert!(!is_yesterday(utc_of(2026, 8, 19, 23, 59, 59), now));
    }

    #[test]
    fn test_window_follows_injected_now() {
        // The same timestamp flips in and out of the window as `now` moves,
        // so nothing can be cached between calls.
        let timestamp = utc_of(2026, 8, 20, 12, 0, 0);
        assert!(is_yesterday(timestamp, local(2026, 8, 21, 9, 0, 0)));
        assert!(!is_yesterday(timestamp, local(2026, 8, 22, 9, 0, 0)));
        assert!(!is_yesterday(timestamp, local(2026, 8, 20, 23, 0, 0)));
    }
}
