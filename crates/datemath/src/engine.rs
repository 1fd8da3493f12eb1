//! Ordered application of operations to a reference timestamp.
//!
//! Month and year offsets use calendar arithmetic (variable month lengths,
//! leap years, end-of-month clamping); day, hour, minute, and second offsets
//! are fixed-duration arithmetic. All shifts go through chrono's checked
//! APIs, so a magnitude that leaves the representable range surfaces as an
//! error rather than a panic.

use chrono::{Days, Duration, Months, NaiveDateTime};

use crate::error::{DateMathError, Result};
use crate::expr::{Operation, Operator, Unit};
use crate::grammar::{self, EXPRESSION_GRAMMAR};
use crate::round::round_to_nearest;

/// Resolve a date-math expression against a reference timestamp.
///
/// The reference supplies the `now` anchor, and the result inherits its
/// zone semantics. No clock is read here; callers inject the reference
/// explicitly, which keeps every call deterministic.
///
/// # Errors
///
/// Returns [`DateMathError::InvalidExpression`] if no substring of the input
/// matches the grammar, [`DateMathError::MalformedToken`] if a matched token
/// cannot be fully decoded, or [`DateMathError::OutOfRange`] if the
/// arithmetic leaves the representable timestamp range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use datemath::parse;
///
/// let reference: NaiveDateTime = "2021-07-01T15:40:00".parse().unwrap();
/// let resolved = parse("now+60s/h", reference).unwrap();
/// assert_eq!(resolved, "2021-07-01T16:01:00".parse().unwrap());
/// ```
pub fn parse(expression: &str, reference: NaiveDateTime) -> Result<NaiveDateTime> {
    if !grammar::validate(expression) {
        return Err(DateMathError::InvalidExpression(format!(
            "input must contain a date-math expression matching {EXPRESSION_GRAMMAR}"
        )));
    }
    let operations = grammar::extract_operations(expression)?;
    apply(reference, &operations)
}

/// Apply an operation sequence to `reference`, strictly in sequence order.
pub fn apply(reference: NaiveDateTime, operations: &[Operation]) -> Result<NaiveDateTime> {
    let mut current = reference;
    for operation in operations {
        current = match operation.operator {
            Operator::Add => shift(current, operation, true)?,
            Operator::Subtract => shift(current, operation, false)?,
            Operator::Round => round_to_nearest(current, operation.unit)?,
        };
    }
    Ok(current)
}

/// Shift `ts` by the operation's magnitude of its unit, forward or backward.
fn shift(ts: NaiveDateTime, operation: &Operation, forward: bool) -> Result<NaiveDateTime> {
    let magnitude = operation.magnitude.ok_or_else(|| {
        DateMathError::MalformedToken(format!(
            "additive operation on {:?} has no magnitude",
            operation.unit
        ))
    })?;
    shifted(ts, operation.unit, magnitude, forward).ok_or_else(|| {
        DateMathError::OutOfRange(format!(
            "shifting {ts} by {magnitude} {:?} leaves the supported range",
            operation.unit
        ))
    })
}

fn shifted(ts: NaiveDateTime, unit: Unit, magnitude: i64, forward: bool) -> Option<NaiveDateTime> {
    match unit {
        Unit::Years => by_months(ts, magnitude.checked_mul(12)?, forward),
        Unit::Months => by_months(ts, magnitude, forward),
        Unit::Days => {
            let days = Days::new(u64::try_from(magnitude).ok()?);
            if forward {
                ts.checked_add_days(days)
            } else {
                ts.checked_sub_days(days)
            }
        }
        Unit::Hours => by_duration(ts, Duration::try_hours(magnitude)?, forward),
        Unit::Minutes => by_duration(ts, Duration::try_minutes(magnitude)?, forward),
        Unit::Seconds => by_duration(ts, Duration::try_seconds(magnitude)?, forward),
    }
}

fn by_months(ts: NaiveDateTime, months: i64, forward: bool) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(months).ok()?);
    if forward {
        ts.checked_add_months(months)
    } else {
        ts.checked_sub_months(months)
    }
}

fn by_duration(ts: NaiveDateTime, delta: Duration, forward: bool) -> Option<NaiveDateTime> {
    if forward {
        ts.checked_add_signed(delta)
    } else {
        ts.checked_sub_signed(delta)
    }
}
