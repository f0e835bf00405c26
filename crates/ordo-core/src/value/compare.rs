use crate::{
    config::{self, TextMode},
    value::Value,
};
use std::cmp::Ordering;

///
/// Canonical Value Rank
///
/// Stable rank used for cross-variant ordering. Numeric variants share one
/// rank so mixed int/uint/float keys compare by magnitude.
///
/// Rank order is part of deterministic query behavior.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Float(_) | Value::Int(_) | Value::Uint(_) => 2,
        Value::Text(_) => 3,
        Value::List(_) => 4,
        Value::Map(_) => 5,
    }
}

/// Total canonical comparator used for dynamic keys.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Text compares under the active `TextMode`. Floats use `total_cmp`, so NaN
/// has a fixed position instead of poisoning the sort.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right, config::text_mode())
}

fn canonical_cmp_same_rank(left: &Value, right: &Value, mode: TextMode) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => cmp_text(a, b, mode),
        (Value::List(a), Value::List(b)) => cmp_list(a, b, mode),
        (Value::Map(a), Value::Map(b)) => cmp_map(a, b, mode),
        (Value::Int(_) | Value::Uint(_) | Value::Float(_), _) => cmp_numeric(left, right),
        _ => Ordering::Equal,
    }
}

///
/// Number
/// Numeric value widened for exact cross-variant comparison.
///

#[derive(Clone, Copy)]
enum Number {
    Exact(i128),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Exact(i128::from(*n))),
        Value::Uint(n) => Some(Number::Exact(i128::from(*n))),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn cmp_numeric(left: &Value, right: &Value) -> Ordering {
    match (number(left), number(right)) {
        (Some(Number::Exact(a)), Some(Number::Exact(b))) => a.cmp(&b),
        (Some(Number::Exact(a)), Some(Number::Float(b))) => cmp_exact_float(a, b),
        (Some(Number::Float(a)), Some(Number::Exact(b))) => cmp_exact_float(b, a).reverse(),
        (Some(Number::Float(a)), Some(Number::Float(b))) => cmp_float(a, b),
        _ => Ordering::Equal,
    }
}

// Numerically equal floats tie (so -0.0 == 0.0, matching Int(0)); everything
// else, NaN included, follows `total_cmp`.
#[allow(clippy::float_cmp)]
fn cmp_float(left: f64, right: f64) -> Ordering {
    if left == right {
        Ordering::Equal
    } else {
        left.total_cmp(&right)
    }
}

// Integer part first, fraction second; never rounds the integer through f64.
fn cmp_exact_float(int: i128, float: f64) -> Ordering {
    // Every Int/Uint lies in [-2^63, 2^64).
    const UPPER: f64 = 18_446_744_073_709_551_616.0;
    const LOWER: f64 = -9_223_372_036_854_775_808.0;

    if float.is_nan() {
        // Matches total_cmp: negative NaN below everything, positive above.
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let whole = float.trunc();
    if whole >= UPPER {
        return Ordering::Less;
    }
    if whole < LOWER {
        return Ordering::Greater;
    }

    #[allow(clippy::cast_possible_truncation)]
    let whole_int = whole as i128;
    let fraction = float - whole;

    int.cmp(&whole_int).then(if fraction > 0.0 {
        Ordering::Less
    } else if fraction < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

fn cmp_text(left: &str, right: &str, mode: TextMode) -> Ordering {
    match mode {
        TextMode::Cs => left.cmp(right),
        TextMode::Ci => left
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(right.chars().flat_map(char::to_lowercase)),
    }
}

fn cmp_list(left: &[Value], right: &[Value], mode: TextMode) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = cmp_ranked(left, right, mode);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn cmp_map(left: &[(String, Value)], right: &[(String, Value)], mode: TextMode) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = cmp_text(left_key, right_key, mode);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = cmp_ranked(left_value, right_value, mode);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}

// Nested comparison keeps the outer text mode instead of re-reading config.
fn cmp_ranked(left: &Value, right: &Value, mode: TextMode) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right, mode)
}
