//! Round-to-nearest calendar boundaries.
//!
//! Distinct from truncation: the field immediately below the target unit
//! decides the direction, and values at or past the midpoint round up.
//! Rounding a timestamp past noon to days therefore lands on the *next*
//! midnight, and rounding any day in July or later to years lands on
//! January 1 of the next year.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{DateMathError, Result};
use crate::expr::Unit;

/// Round `ts` to the nearest boundary of `unit`.
///
/// Boundaries are whole seconds, whole minutes, whole hours, midnight, the
/// first of the month at midnight, and January 1 at midnight.
///
/// # Errors
///
/// [`DateMathError::OutOfRange`] when the upper boundary does not exist,
/// which only happens at the very edge of the representable date range.
pub fn round_to_nearest(ts: NaiveDateTime, unit: Unit) -> Result<NaiveDateTime> {
    rounded(ts, unit).ok_or_else(|| {
        DateMathError::OutOfRange(format!(
            "rounding {ts} to {unit:?} leaves the supported range"
        ))
    })
}

fn rounded(ts: NaiveDateTime, unit: Unit) -> Option<NaiveDateTime> {
    match unit {
        Unit::Seconds => {
            let floor = ts.with_nanosecond(0)?;
            step_up(floor, ts.nanosecond() >= 500_000_000, Duration::seconds(1))
        }
        Unit::Minutes => {
            let floor = ts.with_second(0)?.with_nanosecond(0)?;
            step_up(floor, ts.second() >= 30, Duration::minutes(1))
        }
        Unit::Hours => {
            let floor = ts.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
            step_up(floor, ts.minute() >= 30, Duration::hours(1))
        }
        Unit::Days => {
            let floor = ts.date().and_hms_opt(0, 0, 0)?;
            if ts.hour() >= 12 {
                floor.checked_add_days(Days::new(1))
            } else {
                Some(floor)
            }
        }
        Unit::Months => {
            let floor = NaiveDate::from_ymd_opt(ts.year(), ts.month(), 1)?.and_hms_opt(0, 0, 0)?;
            let length = days_in_month(ts.year(), ts.month());
            if ts.day() - 1 > (length - 1) / 2 {
                floor.checked_add_months(Months::new(1))
            } else {
                Some(floor)
            }
        }
        Unit::Years => {
            let floor = NaiveDate::from_ymd_opt(ts.year(), 1, 1)?.and_hms_opt(0, 0, 0)?;
            if ts.month() >= 7 {
                floor.checked_add_months(Months::new(12))
            } else {
                Some(floor)
            }
        }
    }
}

fn step_up(floor: NaiveDateTime, up: bool, step: Duration) -> Option<NaiveDateTime> {
    if up {
        floor.checked_add_signed(step)
    } else {
        Some(floor)
    }
}

/// Day count of a month in the proleptic Gregorian calendar.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
