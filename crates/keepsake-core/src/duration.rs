//! Calendar-aware elapsed time.
//!
//! Computes "X years Y months Z days ..." between two instants the way a
//! person counts it: advance whole calendar years, then whole months, then
//! whole days, and convert the remainder to h/m/s. Month and year steps
//! clamp the day-of-month to the target month's last valid day, so
//! Jan 31 + 1 month is Feb 28 (or 29), never Mar 3. Time-of-day is
//! preserved across every date shift.
//!
//! All functions are pure; callers pass `now` explicitly.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Elapsed time split into calendar parts. All components non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn with_clamped_day(dt: NaiveDateTime, year: i32, month: u32) -> NaiveDateTime {
    let day = dt.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(dt.time()))
        .unwrap_or(dt)
}

/// Advance by whole years, clamping Feb 29 to Feb 28 in non-leap targets.
pub fn add_years_clamped(dt: NaiveDateTime, years: i32) -> NaiveDateTime {
    with_clamped_day(dt, dt.year() + years, dt.month())
}

/// Advance by whole months, clamping the day to the target month's length.
pub fn add_months_clamped(dt: NaiveDateTime, months: u32) -> NaiveDateTime {
    let total = dt.year() * 12 + dt.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    with_clamped_day(dt, year, month)
}

/// Calendar duration from `from` to `to`.
///
/// Returns all-zero parts when `to < from`; there are no negative
/// durations here. Greedy: whole clamped years first, then whole clamped
/// months, then whole days, remainder as h/m/s.
pub fn calendar_duration(from: NaiveDateTime, to: NaiveDateTime) -> DurationParts {
    if to < from {
        return DurationParts::default();
    }

    let mut cursor = from;

    let mut years = 0u32;
    loop {
        let next = add_years_clamped(cursor, 1);
        if next <= to {
            cursor = next;
            years += 1;
        } else {
            break;
        }
    }

    let mut months = 0u32;
    loop {
        let next = add_months_clamped(cursor, 1);
        if next <= to {
            cursor = next;
            months += 1;
        } else {
            break;
        }
    }

    let mut days = 0u32;
    loop {
        let next = cursor + Duration::days(1);
        if next <= to {
            cursor = next;
            days += 1;
        } else {
            break;
        }
    }

    let mut remainder = (to - cursor).num_seconds().max(0);
    let hours = (remainder / 3600) as u32;
    remainder -= hours as i64 * 3600;
    let minutes = (remainder / 60) as u32;
    remainder -= minutes as i64 * 60;
    let seconds = remainder as u32;

    DurationParts {
        years,
        months,
        days,
        hours,
        minutes,
        seconds,
    }
}

/// Time until the next anniversary of `start`, as (days, hours).
///
/// Hours are rounded up, so "0 days 0 hours" only appears at the exact
/// anniversary instant.
pub fn until_next_anniversary(start: NaiveDateTime, now: NaiveDateTime) -> (u64, u64) {
    let mut next = with_clamped_day(start, now.year(), start.month());
    if next <= now {
        next = add_years_clamped(next, 1);
    }
    let secs = (next - now).num_seconds().max(0);
    let total_hours = (secs as u64).div_ceil(3600);
    (total_hours / 24, total_hours % 24)
}

/// Next 100-day milestone: (target day count, days left until it).
pub fn next_hundred_day_milestone(start: NaiveDateTime, now: NaiveDateTime) -> (u64, u64) {
    let total_days = ((now - start).num_seconds().max(0) / 86_400) as u64;
    let target = (total_days + 1).div_ceil(100) * 100;
    (target, (target - total_days).max(1))
}

/// "1 year 2 months 3 days 4 hours 5 minutes 6 seconds" with pluralized units.
pub fn format_together(parts: &DurationParts) -> String {
    [
        plural(parts.years, "year"),
        plural(parts.months, "month"),
        plural(parts.days, "day"),
        plural(parts.hours, "hour"),
        plural(parts.minutes, "minute"),
        plural(parts.seconds, "second"),
    ]
    .join(" ")
}

fn plural(value: u32, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

impl DurationParts {
    pub fn is_zero(&self) -> bool {
        *self == DurationParts::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn same_instant_is_all_zero() {
        let d = dt(2025, 11, 1, 19, 17, 10);
        assert!(calendar_duration(d, d).is_zero());
    }

    #[test]
    fn reversed_range_is_all_zero() {
        let from = dt(2026, 1, 1, 0, 0, 0);
        let to = dt(2025, 1, 1, 0, 0, 0);
        assert!(calendar_duration(from, to).is_zero());
    }

    #[test]
    fn month_advance_clamps_jan_31() {
        let jan31 = dt(2025, 1, 31, 12, 30, 0);
        let feb = add_months_clamped(jan31, 1);
        assert_eq!(feb, dt(2025, 2, 28, 12, 30, 0));
        let feb_leap = add_months_clamped(dt(2024, 1, 31, 12, 30, 0), 1);
        assert_eq!(feb_leap, dt(2024, 2, 29, 12, 30, 0));
    }

    #[test]
    fn year_advance_clamps_feb_29() {
        let leap = dt(2024, 2, 29, 8, 0, 0);
        assert_eq!(add_years_clamped(leap, 1), dt(2025, 2, 28, 8, 0, 0));
        assert_eq!(add_years_clamped(leap, 4), dt(2028, 2, 29, 8, 0, 0));
    }

    #[test]
    fn clamped_cursor_carries_forward() {
        // Jan 31 → (1 month) Feb 28 → the day loop continues from the
        // clamped cursor, not from a rolled-over Mar 3.
        let from = dt(2025, 1, 31, 0, 0, 0);
        let to = dt(2025, 3, 2, 0, 0, 0);
        let parts = calendar_duration(from, to);
        assert_eq!(
            parts,
            DurationParts {
                months: 1,
                days: 2,
                ..Default::default()
            }
        );
    }

    #[test]
    fn full_parts_example() {
        let from = dt(2025, 11, 1, 19, 17, 10);
        let to = dt(2027, 1, 3, 21, 20, 15);
        let parts = calendar_duration(from, to);
        assert_eq!(
            parts,
            DurationParts {
                years: 1,
                months: 2,
                days: 2,
                hours: 2,
                minutes: 3,
                seconds: 5,
            }
        );
    }

    #[test]
    fn anniversary_rounds_hours_up() {
        let start = dt(2025, 11, 1, 19, 17, 10);
        let now = dt(2026, 10, 30, 19, 17, 10);
        let (days, hours) = until_next_anniversary(start, now);
        assert_eq!((days, hours), (2, 0));

        // 30 minutes short of 2 days rounds up to 2 days 0 hours... the
        // partial hour always counts as a full one.
        let now = dt(2026, 10, 30, 19, 47, 10);
        let (days, hours) = until_next_anniversary(start, now);
        assert_eq!(days * 24 + hours, 48);
    }

    #[test]
    fn anniversary_already_passed_this_year() {
        let start = dt(2025, 3, 10, 0, 0, 0);
        let now = dt(2026, 6, 1, 0, 0, 0);
        let (days, _) = until_next_anniversary(start, now);
        // Next is 2027-03-10.
        assert!(days > 250 && days < 290);
    }

    #[test]
    fn milestone_counts_in_hundreds() {
        let start = dt(2025, 11, 1, 0, 0, 0);
        let now = start + Duration::days(137);
        let (target, left) = next_hundred_day_milestone(start, now);
        assert_eq!(target, 200);
        assert_eq!(left, 63);
    }

    #[test]
    fn milestone_on_the_day_moves_to_next() {
        let start = dt(2025, 11, 1, 0, 0, 0);
        let now = start + Duration::days(100);
        let (target, left) = next_hundred_day_milestone(start, now);
        assert_eq!(target, 200);
        assert_eq!(left, 100);
    }

    #[test]
    fn together_formatting_pluralizes() {
        let parts = DurationParts {
            years: 1,
            months: 0,
            days: 2,
            hours: 1,
            minutes: 0,
            seconds: 10,
        };
        assert_eq!(
            format_together(&parts),
            "1 year 0 months 2 days 1 hour 0 minutes 10 seconds"
        );
    }

    proptest! {
        #[test]
        fn zero_for_equal_instants(secs in 0i64..4_000_000_000) {
            let d = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
            prop_assert!(calendar_duration(d, d).is_zero());
        }

        #[test]
        fn zero_when_reversed(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
            let from = chrono::DateTime::from_timestamp(a.max(b), 0).unwrap().naive_utc();
            let to = chrono::DateTime::from_timestamp(a.min(b), 0).unwrap().naive_utc();
            if to < from {
                prop_assert!(calendar_duration(from, to).is_zero());
            }
        }

        #[test]
        fn parts_reconstruct_the_target(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
            let from = chrono::DateTime::from_timestamp(a.min(b), 0).unwrap().naive_utc();
            let to = chrono::DateTime::from_timestamp(a.max(b), 0).unwrap().naive_utc();
            let p = calendar_duration(from, to);
            // Replay the greedy algorithm's steps: one clamped unit at a
            // time, since a single n-unit jump clamps differently.
            let mut cursor = from;
            for _ in 0..p.years {
                cursor = add_years_clamped(cursor, 1);
            }
            for _ in 0..p.months {
                cursor = add_months_clamped(cursor, 1);
            }
            cursor += Duration::days(p.days as i64)
                + Duration::hours(p.hours as i64)
                + Duration::minutes(p.minutes as i64)
                + Duration::seconds(p.seconds as i64);
            prop_assert_eq!(cursor, to);
        }
    }
}
