//! Equality and ordering between values.

use std::cmp::Ordering;

use num_traits::{Float, ToPrimitive};

use crate::value::Value;

/// How a tolerance amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToleranceMode {
    /// Absolute difference.
    Linear,
    /// Difference relative to the expected value, in percent.
    Percent,
    /// Absolute difference, applied only when a float takes part.
    /// Installed from configuration on equality constraints without `within`.
    Fallback,
}

/// Allowed numeric difference for equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub amount: f64,
    pub mode: ToleranceMode,
}

impl Tolerance {
    pub fn linear(amount: f64) -> Self {
        Self {
            amount,
            mode: ToleranceMode::Linear,
        }
    }

    pub fn percent(amount: f64) -> Self {
        Self {
            amount,
            mode: ToleranceMode::Percent,
        }
    }

    pub fn fallback(amount: f64) -> Self {
        Self {
            amount,
            mode: ToleranceMode::Fallback,
        }
    }

    fn admits(&self, expected: f64, actual: f64) -> bool {
        let difference = (expected - actual).abs();
        match self.mode {
            ToleranceMode::Linear | ToleranceMode::Fallback => difference <= self.amount,
            ToleranceMode::Percent => difference <= (expected * self.amount / 100.0).abs(),
        }
    }

    /// Integer comparison in integer arithmetic, exact across the whole
    /// `i64` range.
    fn admits_ints(&self, expected: i64, actual: i64) -> bool {
        if self.amount.is_nan() {
            return false;
        }
        let difference = (i128::from(expected) - i128::from(actual)).unsigned_abs();
        match self.mode {
            ToleranceMode::Linear | ToleranceMode::Fallback => {
                self.amount >= 0.0 && difference <= whole_part(self.amount)
            }
            // difference <= |expected * amount| / 100
            ToleranceMode::Percent => difference * 100 <= scaled_floor(expected.unsigned_abs(), self.amount),
        }
    }
}

/// `floor(amount)` for a non-negative amount, saturating.
fn whole_part(amount: f64) -> u128 {
    amount.floor().to_u128().unwrap_or(u128::MAX)
}

/// `floor(magnitude * |factor|)` without rounding `magnitude` through a float.
fn scaled_floor(magnitude: u64, factor: f64) -> u128 {
    if factor.is_infinite() {
        return u128::MAX;
    }
    let (mantissa, exponent, _) = Float::integer_decode(factor);
    let product = u128::from(magnitude) * u128::from(mantissa);
    if exponent >= 0 {
        let shift = u32::from(exponent.unsigned_abs());
        if product == 0 {
            0
        } else if shift >= product.leading_zeros() {
            u128::MAX
        } else {
            product << shift
        }
    } else {
        product.checked_shr(u32::from(exponent.unsigned_abs())).unwrap_or(0)
    }
}

/// Ordering comparisons supported by the ordering constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Comparison {
    /// Whether `actual.cmp(expected)` satisfies the comparison.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::GreaterThan => ordering.is_gt(),
            Comparison::GreaterThanOrEqual => ordering.is_ge(),
            Comparison::LessThan => ordering.is_lt(),
            Comparison::LessThanOrEqual => ordering.is_le(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Comparison::GreaterThan => "greater than",
            Comparison::GreaterThanOrEqual => "greater than or equal to",
            Comparison::LessThan => "less than",
            Comparison::LessThanOrEqual => "less than or equal to",
        }
    }
}

/// Equality used by the equality and containment constraints.
///
/// Ints and floats compare numerically across types. A NaN or infinite
/// expected value ignores the tolerance and requires exact equality, with
/// NaN equal to NaN.
pub fn values_equal(
    expected: &Value,
    actual: &Value,
    tolerance: Option<Tolerance>,
    ignore_case: bool,
) -> bool {
    match (expected, actual) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => match tolerance {
            Some(t) if t.mode != ToleranceMode::Fallback => t.admits_ints(*a, *b),
            _ => a == b,
        },
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (expected.as_f64(), actual.as_f64()) {
                (Some(e), Some(a)) => floats_equal(e, a, tolerance),
                _ => false,
            }
        }
        (Value::Str(a), Value::Str(b)) => {
            if ignore_case {
                a.to_lowercase() == b.to_lowercase()
            } else {
                a == b
            }
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b.iter())
                    .all(|(x, y)| values_equal(x, y, tolerance, ignore_case))
        }
        (Value::Object(_), Value::Object(_)) | (Value::Code(_), Value::Code(_)) => expected == actual,
        _ => false,
    }
}

fn floats_equal(expected: f64, actual: f64, tolerance: Option<Tolerance>) -> bool {
    if expected.is_nan() || expected.is_infinite() {
        return expected == actual || (expected.is_nan() && actual.is_nan());
    }
    match tolerance {
        Some(t) => t.admits(expected, actual),
        None => expected == actual,
    }
}

/// Orders `actual` against `expected`. Returns `None` for values that have
/// no ordering between them, including NaN.
pub fn compare_values(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            actual.as_f64()?.partial_cmp(&expected.as_f64()?)
        }
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Identity test used by `same_as`: strings, objects and code compare by
/// pointer, scalars by value, lists never.
pub fn same_instance(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Str(a), Value::Str(b)) => std::sync::Arc::ptr_eq(a, b),
        (Value::List(_), _) | (_, Value::List(_)) => false,
        _ => expected == actual,
    }
}
