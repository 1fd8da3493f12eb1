//! Grammar acceptance and operation extraction.
//!
//! Expressions anchor on the literal `now` followed by one or more operation
//! tokens; see [`EXPRESSION_GRAMMAR`]. Both the validator and the extractor
//! are hand-rolled character scans, which keeps the "first round suffix wins"
//! rule an explicit branch instead of an artifact of regex engine ordering.

use crate::error::{DateMathError, Result};
use crate::expr::{Operation, Operator, Unit};

/// The accepted expression shape, in regex notation.
///
/// Acceptance uses substring semantics: an input is valid when any contiguous
/// substring of it matches this pattern.
pub const EXPRESSION_GRAMMAR: &str = r"now([+\-/][0-9]+[smhdMy](/[smhdMy])?)+";

/// Whole-input acceptance check.
///
/// Scans for a `now` anchor followed immediately by at least one operation
/// token. Leading and trailing noise around the matching substring is
/// tolerated; a missing anchor, missing digits, or an unknown unit or
/// operator character rejects the input.
pub fn validate(text: &str) -> bool {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .any(|i| bytes[i..].starts_with(b"now") && match_operation_token(bytes, i + 3).is_some())
}

/// Extract the ordered operation sequence from an expression.
///
/// The first `/<unit>` pair anywhere in the input, standalone or attached as
/// the suffix of an additive token (the trailing `/y` of `now-1d/y`),
/// contributes a single Round operation at the head of the sequence: rounding
/// runs before the additive operations rebuild detail below the rounded
/// boundary. Later `/<unit>` pairs contribute nothing. The additive tokens
/// follow in textual order.
///
/// # Errors
///
/// [`DateMathError::MalformedToken`] when a matched token cannot be fully
/// decoded, for example a magnitude too large for `i64`.
pub fn extract_operations(text: &str) -> Result<Vec<Operation>> {
    let bytes = text.as_bytes();
    let mut operations = Vec::new();

    if let Some(unit) = first_round_suffix(bytes) {
        operations.push(Operation::round(unit));
    }

    let mut i = 0;
    while i < bytes.len() {
        match match_operation_token(bytes, i) {
            Some(end) => {
                operations.push(read_operation(bytes, i, end)?);
                i = end;
            }
            None => i += 1,
        }
    }
    Ok(operations)
}

/// Match one `<operator><digits><unit>(/<unit>)?` token starting at `pos`.
/// Returns the exclusive end position of the match.
fn match_operation_token(bytes: &[u8], pos: usize) -> Option<usize> {
    if !is_operator_byte(*bytes.get(pos)?) {
        return None;
    }
    let mut i = pos + 1;
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start || !is_unit_byte(*bytes.get(i)?) {
        return None;
    }
    i += 1;
    // Attached round suffix is consumed with the token.
    if i + 1 < bytes.len() && bytes[i] == b'/' && is_unit_byte(bytes[i + 1]) {
        i += 2;
    }
    Some(i)
}

/// The unit of the first `/<unit>` pair in the input, if any.
fn first_round_suffix(bytes: &[u8]) -> Option<Unit> {
    bytes
        .windows(2)
        .find(|pair| pair[0] == b'/' && is_unit_byte(pair[1]))
        .and_then(|pair| Unit::from_token(pair[1] as char))
}

/// Decode a matched token into an [`Operation`], failing fast when any
/// sub-component cannot be resolved.
fn read_operation(bytes: &[u8], start: usize, end: usize) -> Result<Operation> {
    let token = String::from_utf8_lossy(&bytes[start..end]);

    let operator = Operator::from_token(bytes[start] as char).ok_or_else(|| {
        DateMathError::MalformedToken(format!("no operator in '{token}'"))
    })?;

    let mut magnitude: i64 = 0;
    let mut i = start + 1;
    let digits_start = i;
    while i < end && bytes[i].is_ascii_digit() {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(i64::from(bytes[i] - b'0')))
            .ok_or_else(|| {
                DateMathError::MalformedToken(format!("magnitude overflows in '{token}'"))
            })?;
        i += 1;
    }
    if i == digits_start {
        return Err(DateMathError::MalformedToken(format!(
            "no magnitude in '{token}'"
        )));
    }

    let unit = bytes
        .get(i)
        .and_then(|b| Unit::from_token(*b as char))
        .ok_or_else(|| DateMathError::MalformedToken(format!("no unit in '{token}'")))?;

    Ok(Operation {
        operator,
        magnitude: Some(magnitude),
        unit,
    })
}

fn is_operator_byte(b: u8) -> bool {
    Operator::from_token(b as char).is_some()
}

fn is_unit_byte(b: u8) -> bool {
    Unit::from_token(b as char).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_single_term() {
        assert!(validate("now+1d"));
        assert!(validate("now-30m"));
        assert!(validate("now/1d"));
    }

    #[test]
    fn test_validate_accepts_multiple_terms() {
        assert!(validate("now-1d+2h"));
        assert!(validate("now+1y-2M+3d-4h+5m-6s"));
    }

    #[test]
    fn test_validate_accepts_round_suffix() {
        assert!(validate("now-1d/y"));
        assert!(validate("now+60s/h"));
    }

    #[test]
    fn test_validate_tolerates_surrounding_noise() {
        assert!(validate("due by now+1d at the latest"));
        assert!(validate("xxnow-1d/yzz"));
    }

    #[test]
    fn test_validate_rejects_bare_anchor() {
        assert!(!validate("now"));
        assert!(!validate("now "));
    }

    #[test]
    fn test_validate_rejects_malformed_inputs() {
        assert!(!validate(""));
        assert!(!validate("tomorrow"));
        assert!(!validate("now-133j/y"));
        assert!(!validate("now+d"));
        assert!(!validate("now*1d"));
        assert!(!validate("1d+now"));
    }

    #[test]
    fn test_extract_round_is_listed_first() {
        let operations = extract_operations("now-1d/y").unwrap();
        assert_eq!(
            operations,
            vec![
                Operation::round(Unit::Years),
                Operation {
                    operator: Operator::Subtract,
                    magnitude: Some(1),
                    unit: Unit::Days,
                },
            ]
        );
    }

    #[test]
    fn test_extract_preserves_textual_order() {
        let operations = extract_operations("now-1d+2h").unwrap();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].operator, Operator::Subtract);
        assert_eq!(operations[0].unit, Unit::Days);
        assert_eq!(operations[1].operator, Operator::Add);
        assert_eq!(operations[1].magnitude, Some(2));
        assert_eq!(operations[1].unit, Unit::Hours);
    }

    #[test]
    fn test_extract_uses_only_first_round_suffix() {
        let operations = extract_operations("now+1d/s+2h/m").unwrap();
        assert_eq!(operations.len(), 3);
        assert_eq!(operations[0], Operation::round(Unit::Seconds));
        assert_eq!(operations[1].operator, Operator::Add);
        assert_eq!(operations[1].unit, Unit::Days);
        assert_eq!(operations[2].operator, Operator::Add);
        assert_eq!(operations[2].unit, Unit::Hours);
    }

    #[test]
    fn test_extract_round_operator_keeps_captured_magnitude() {
        let operations = extract_operations("now/1d").unwrap();
        assert_eq!(
            operations,
            vec![Operation {
                operator: Operator::Round,
                magnitude: Some(1),
                unit: Unit::Days,
            }]
        );
    }

    #[test]
    fn test_extract_multi_digit_magnitude() {
        let operations = extract_operations("now+604800s").unwrap();
        assert_eq!(operations[0].magnitude, Some(604_800));
    }

    #[test]
    fn test_extract_fails_on_magnitude_overflow() {
        let err = extract_operations("now+99999999999999999999999s").unwrap_err();
        assert!(matches!(err, DateMathError::MalformedToken(_)));
        assert!(err.to_string().contains("overflows"), "got: {err}");
    }

    #[test]
    fn test_extract_without_tokens_is_empty() {
        assert!(extract_operations("no operations here").unwrap().is_empty());
    }
}
