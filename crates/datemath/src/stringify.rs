//! Serialize the difference between two timestamps back into shorthand.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::expr::Unit;
use crate::round::days_in_month;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;

/// Render `target` as a date-math expression relative to `reference`.
///
/// The date portions are compared with calendar-period semantics, a genuine
/// years/months/days breakdown honoring variable month lengths, and the
/// time-of-day portions with plain clock arithmetic, each independent of the
/// other. Components are emitted in years, months, days, hours, minutes,
/// seconds order; zero components are omitted; positive values carry an
/// explicit `+`. Equal inputs produce the literal `now`.
///
/// The output never contains round operations, so feeding it back into
/// [`parse`](crate::parse) reproduces `target` to second precision, except
/// that the bare `now` produced for equal inputs is not itself a parseable
/// expression.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use datemath::stringify;
///
/// let reference: NaiveDateTime = "2021-07-01T15:00:00".parse().unwrap();
/// let target: NaiveDateTime = "2021-06-30T17:00:00".parse().unwrap();
/// assert_eq!(stringify(target, reference), "now-1d+2h");
/// ```
pub fn stringify(target: NaiveDateTime, reference: NaiveDateTime) -> String {
    let (years, months, days) = calendar_period(reference.date(), target.date());
    let clock_seconds = (target.time() - reference.time()).num_seconds();

    let components = [
        (years, Unit::Years),
        (months, Unit::Months),
        (days, Unit::Days),
        (clock_seconds / SECONDS_PER_HOUR, Unit::Hours),
        (clock_seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE, Unit::Minutes),
        (clock_seconds % SECONDS_PER_MINUTE, Unit::Seconds),
    ];

    let mut rendered = String::from("now");
    for (value, unit) in components {
        if value != 0 {
            if value > 0 {
                rendered.push('+');
            }
            rendered.push_str(&format!("{}{}", value, unit.token()));
        }
    }
    rendered
}

/// Years, months, and days between two dates.
///
/// Follows the month-borrow convention: when the raw month delta and day
/// delta disagree in sign, one month is borrowed so that every component
/// shares the overall direction. Applying the components to `start` in
/// years, months, days order reproduces `end` exactly whenever no
/// end-of-month clamping is involved.
fn calendar_period(start: NaiveDate, end: NaiveDate) -> (i64, i64, i64) {
    let mut total_months = proleptic_month(end) - proleptic_month(start);
    let mut days = i64::from(end.day()) - i64::from(start.day());

    if total_months > 0 && days < 0 {
        total_months -= 1;
        // Distance from the day `start` lands on in the month before `end`
        // (day-of-month clamped to that month's length) up to `end`.
        let (year, month) = previous_month(end.year(), end.month());
        let length = days_in_month(year, month);
        let anchored_day = start.day().min(length);
        days = i64::from(length) - i64::from(anchored_day) + i64::from(end.day());
    } else if total_months < 0 && days > 0 {
        total_months += 1;
        days -= i64::from(days_in_month(end.year(), end.month()));
    }

    (total_months / 12, total_months % 12, days)
}

fn proleptic_month(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_stringify_borrows_a_year_into_eleven_months() {
        // Five years forward minus one month is four years and eleven months.
        let reference = ts("2021-07-15T10:00:00");
        let target = ts("2026-06-15T11:05:20");
        assert_eq!(stringify(target, reference), "now+4y+11M+1h+5m+20s");
    }

    #[test]
    fn test_stringify_equal_inputs_is_bare_now() {
        let reference = ts("2021-07-01T15:00:00");
        assert_eq!(stringify(reference, reference), "now");
    }

    #[test]
    fn test_stringify_single_negative_component() {
        let reference = ts("2021-07-02T15:00:00");
        assert_eq!(stringify(ts("2021-07-01T15:00:00"), reference), "now-1d");
    }

    #[test]
    fn test_stringify_date_and_clock_deltas_are_independent() {
        // One calendar day back, but 22 hours forward on the clock.
        let reference = ts("2021-07-01T01:00:00");
        let target = ts("2021-06-30T23:00:00");
        assert_eq!(stringify(target, reference), "now-1d+22h");
    }

    #[test]
    fn test_stringify_borrows_forward_across_short_month() {
        let reference = ts("2021-01-31T00:00:00");
        let target = ts("2021-03-01T00:00:00");
        assert_eq!(stringify(target, reference), "now+1M+1d");
    }

    #[test]
    fn test_stringify_borrows_backward_across_short_month() {
        let reference = ts("2021-03-01T00:00:00");
        let target = ts("2021-01-31T00:00:00");
        assert_eq!(stringify(target, reference), "now-1M-1d");
    }

    #[test]
    fn test_stringify_seconds_only() {
        let reference = ts("2021-07-01T15:00:00");
        assert_eq!(stringify(ts("2021-07-01T15:00:45"), reference), "now+45s");
    }

    #[test]
    fn test_stringify_negative_clock_components() {
        let reference = ts("2021-07-01T10:30:30");
        let target = ts("2021-07-01T09:00:00");
        assert_eq!(stringify(target, reference), "now-1h-30m-30s");
    }

    #[test]
    fn test_stringify_ignores_sub_second_fraction() {
        let reference = ts("2021-07-01T15:00:00");
        assert_eq!(stringify(ts("2021-07-01T15:00:00.900"), reference), "now");
    }

    #[test]
    fn test_calendar_period_whole_years() {
        let period = calendar_period(
            ts("2020-02-29T00:00:00").date(),
            ts("2024-02-29T00:00:00").date(),
        );
        assert_eq!(period, (4, 0, 0));
    }

    #[test]
    fn test_calendar_period_borrow_day_count_uses_prior_month_length() {
        // 2020-02-29 to 2021-02-28 is eleven months and thirty days, counted
        // through January's 31 days.
        let period = calendar_period(
            ts("2020-02-29T00:00:00").date(),
            ts("2021-02-28T00:00:00").date(),
        );
        assert_eq!(period, (0, 11, 30));
    }
}
