use crate::value::Value;
use std::cmp::Ordering;

///
/// CONSTANTS
///

const F64_SAFE_I64: i64 = 1i64 << 53;
const F64_SAFE_U64: u64 = 1u64 << 53;

/// Wildcard matching any run of characters in a like pattern.
pub const LIKE_ANY: char = '%';

/// Wildcard matching exactly one character in a like pattern.
pub const LIKE_ONE: char = '_';

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched or non-orderable variants.
fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
        (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.partial_cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.partial_cmp(b),
        (Value::Ulid(a), Value::Ulid(b)) => a.partial_cmp(b),
        _ => None,
    }
}

/// Ordering used by range predicates.
///
/// Same-variant values use their natural order; numeric variants widen
/// across each other. Null, lists and records never order.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if left.is_numeric() && right.is_numeric() {
        return cmp_numeric(left, right);
    }

    strict_order_cmp(left, right)
}

/// Equality used by equality and membership predicates.
///
/// Returns `None` when either side is null (unknown), or when the
/// variants cannot be compared at all.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (l, r) if l.is_numeric() && r.is_numeric() => cmp_numeric(l, r).map(Ordering::is_eq),
        (l, r) if std::mem::discriminant(l) == std::mem::discriminant(r) => Some(l == r),
        _ => None,
    }
}

// Compare numeric variants. Integers compare exactly; floats only against
// integers inside the f64-exact range.
fn cmp_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Float64(a), other) => to_f64_lossless(other).and_then(|b| a.get().partial_cmp(&b)),
        (other, Value::Float64(b)) => to_f64_lossless(other).and_then(|a| a.partial_cmp(&b.get())),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64_lossless(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) if (-F64_SAFE_I64..=F64_SAFE_I64).contains(v) => Some(*v as f64),
        Value::Uint(v) if *v <= F64_SAFE_U64 => Some(*v as f64),
        Value::Float64(v) => Some(v.get()),
        _ => None,
    }
}

/// Match `text` against a like `pattern`.
///
/// `%` matches any run of characters (including none) and `_` matches
/// exactly one character. There is no escape character, so literal `%`
/// or `_` in a search term behave as wildcards.
#[must_use]
pub fn like_matches(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Position of the last `%` seen, and the text position it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(&LIKE_ANY) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == LIKE_ONE || c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    t = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == LIKE_ANY)
}
