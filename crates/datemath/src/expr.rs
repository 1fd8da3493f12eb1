//! The operation vocabulary: units, operators, and the operations built from
//! them.
//!
//! Both enumerations are closed: every token maps through an exhaustive match
//! table, and a character outside the table resolves to `None` rather than a
//! placeholder variant. The tokenizer turns such a `None` into a hard error,
//! so no half-resolved operation can enter an operation sequence.

use serde::Serialize;

/// A calendar or clock unit addressable by a date-math expression.
///
/// Tokens are case-sensitive: `m` is minutes, `M` is months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    /// The canonical single-character token for this unit.
    pub const fn token(self) -> char {
        match self {
            Unit::Years => 'y',
            Unit::Months => 'M',
            Unit::Days => 'd',
            Unit::Hours => 'h',
            Unit::Minutes => 'm',
            Unit::Seconds => 's',
        }
    }

    /// Resolve a token character to a unit.
    pub const fn from_token(token: char) -> Option<Unit> {
        match token {
            'y' => Some(Unit::Years),
            'M' => Some(Unit::Months),
            'd' => Some(Unit::Days),
            'h' => Some(Unit::Hours),
            'm' => Some(Unit::Minutes),
            's' => Some(Unit::Seconds),
            _ => None,
        }
    }
}

/// An operator in a date-math expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Add,
    Subtract,
    Round,
}

impl Operator {
    /// The canonical token for this operator.
    pub const fn token(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Round => '/',
        }
    }

    /// Resolve a token character to an operator.
    pub const fn from_token(token: char) -> Option<Operator> {
        match token {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '/' => Some(Operator::Round),
            _ => None,
        }
    }
}

/// One step of a date-math expression.
///
/// Add and Subtract carry a magnitude. Round normally has none; when a `/`
/// is matched as the operator of an additive-shaped token (`now/1d`), the
/// digits are captured here but rounding ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub operator: Operator,
    pub magnitude: Option<i64>,
    pub unit: Unit,
}

impl Operation {
    /// A magnitude-free rounding step.
    pub(crate) const fn round(unit: Unit) -> Self {
        Operation {
            operator: Operator::Round,
            magnitude: None,
            unit,
        }
    }
}
