use crate::{
    predicate::{Path, Predicate},
    value::{TextMode, Value},
};

///
/// Normalize a predicate into a canonical, deterministic form.
///
/// Normalization guarantees:
/// - Evaluation outcome is preserved for every row
/// - Nested AND / OR nodes are flattened
/// - Neutral elements are removed (True / False)
/// - Single-child AND / OR nodes collapse to the child
/// - Double negation is eliminated
/// - Child predicates are deterministically ordered
///
/// Note: this pass does not rewrite literal values.
///
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::And(children) => normalize_and(children),
        Predicate::Or(children) => normalize_or(children),
        Predicate::Not(inner) => normalize_not(inner),
        Predicate::Any { path, predicate } => Predicate::Any {
            path: path.clone(),
            predicate: Box::new(normalize(predicate)),
        },
        leaf => leaf.clone(),
    }
}

///
/// Normalize a NOT expression.
///
/// Rules:
/// - NOT (NOT x)  →  x
/// - NOT True     →  False
/// - NOT False    →  True
///
fn normalize_not(inner: &Predicate) -> Predicate {
    match normalize(inner) {
        Predicate::Not(double) => *double,
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        other => Predicate::Not(Box::new(other)),
    }
}

///
/// Normalize an AND expression.
///
/// Rules:
/// - AND(True, x)        → x
/// - AND(False, x)       → False
/// - AND(AND(a, b), c)   → AND(a, b, c)
/// - AND(x)              → x
/// - AND()               → True
///
/// Children are sorted deterministically.
///
fn normalize_and(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    collapse(out, Predicate::True, Predicate::And)
}

///
/// Normalize an OR expression.
///
/// Rules:
/// - OR(False, x)       → x
/// - OR(True, x)        → True
/// - OR(OR(a, b), c)    → OR(a, b, c)
/// - OR(x)              → x
/// - OR()               → False
///
/// Children are sorted deterministically.
///
fn normalize_or(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    collapse(out, Predicate::False, Predicate::Or)
}

fn collapse(
    mut out: Vec<Predicate>,
    empty: Predicate,
    wrap: fn(Vec<Predicate>) -> Predicate,
) -> Predicate {
    out.sort_by_cached_key(sort_key);
    out.dedup();

    match out.len() {
        0 => empty,
        1 => out.pop().unwrap_or(empty),
        _ => wrap(out),
    }
}

///
/// Generate a deterministic, length-prefixed key for a predicate.
///
/// This key is used **only for sorting**, not for display.
///
fn sort_key(predicate: &Predicate) -> Vec<u8> {
    let mut out = Vec::new();
    encode_predicate_key(&mut out, predicate);
    out
}

const PRED_TRUE: u8 = 0x00;
const PRED_FALSE: u8 = 0x01;
const PRED_AND: u8 = 0x02;
const PRED_OR: u8 = 0x03;
const PRED_NOT: u8 = 0x04;
const PRED_COMPARE: u8 = 0x05;
const PRED_IS_NULL: u8 = 0x06;
const PRED_IS_NOT_NULL: u8 = 0x07;
const PRED_LIKE: u8 = 0x08;
const PRED_IS_EMPTY: u8 = 0x09;
const PRED_IS_NOT_EMPTY: u8 = 0x0A;
const PRED_ANY: u8 = 0x0B;

// Encode predicate keys with length-prefixed segments to avoid collisions.
fn encode_predicate_key(out: &mut Vec<u8>, predicate: &Predicate) {
    match predicate {
        Predicate::True => out.push(PRED_TRUE),
        Predicate::False => out.push(PRED_FALSE),
        Predicate::And(children) => {
            out.push(PRED_AND);
            push_len(out, children.len());
            for child in children {
                push_predicate(out, child);
            }
        }
        Predicate::Or(children) => {
            out.push(PRED_OR);
            push_len(out, children.len());
            for child in children {
                push_predicate(out, child);
            }
        }
        Predicate::Not(inner) => {
            out.push(PRED_NOT);
            push_predicate(out, inner);
        }
        Predicate::Compare(cmp) => {
            out.push(PRED_COMPARE);
            push_path(out, &cmp.path);
            out.push(cmp.op.tag());
            push_value(out, &cmp.value);
        }
        Predicate::IsNull { path } => {
            out.push(PRED_IS_NULL);
            push_path(out, path);
        }
        Predicate::IsNotNull { path } => {
            out.push(PRED_IS_NOT_NULL);
            push_path(out, path);
        }
        Predicate::Like {
            path,
            pattern,
            mode,
        } => {
            out.push(PRED_LIKE);
            push_path(out, path);
            out.push(match mode {
                TextMode::Cs => 0,
                TextMode::Ci => 1,
            });
            push_str(out, pattern);
        }
        Predicate::IsEmpty { path } => {
            out.push(PRED_IS_EMPTY);
            push_path(out, path);
        }
        Predicate::IsNotEmpty { path } => {
            out.push(PRED_IS_NOT_EMPTY);
            push_path(out, path);
        }
        Predicate::Any { path, predicate } => {
            out.push(PRED_ANY);
            push_path(out, path);
            push_predicate(out, predicate);
        }
    }
}

const fn value_tag(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0x01,
        Value::Date(_) => 0x02,
        Value::Float64(_) => 0x03,
        Value::Int(_) => 0x04,
        Value::List(_) => 0x05,
        Value::Null => 0x06,
        Value::Record(_) => 0x07,
        Value::Text(_) => 0x08,
        Value::Timestamp(_) => 0x09,
        Value::Uint(_) => 0x0A,
        Value::Ulid(_) => 0x0B,
    }
}

fn encode_value_key(out: &mut Vec<u8>, value: &Value) {
    out.push(value_tag(value));

    match value {
        Value::Bool(v) => out.push(u8::from(*v)),
        Value::Date(v) => out.extend_from_slice(&v.get().to_be_bytes()),
        Value::Float64(v) => out.extend_from_slice(&v.get().to_bits().to_be_bytes()),
        Value::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::List(items) => {
            push_len(out, items.len());
            for item in items {
                push_value(out, item);
            }
        }
        Value::Null => {}
        Value::Record(fields) => {
            push_len(out, fields.len());
            for (name, value) in fields {
                push_str(out, name);
                push_value(out, value);
            }
        }
        Value::Text(v) => push_str(out, v),
        Value::Timestamp(v) => out.extend_from_slice(&v.get().to_be_bytes()),
        Value::Uint(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Ulid(v) => out.extend_from_slice(&v.to_bytes()),
    }
}

fn push_predicate(out: &mut Vec<u8>, predicate: &Predicate) {
    push_framed(out, |buf| encode_predicate_key(buf, predicate));
}

fn push_value(out: &mut Vec<u8>, value: &Value) {
    push_framed(out, |buf| encode_value_key(buf, value));
}

fn push_path(out: &mut Vec<u8>, path: &Path) {
    push_len(out, path.len());
    for segment in path.segments() {
        push_str(out, segment);
    }
}

fn push_len(out: &mut Vec<u8>, len: usize) {
    // NOTE: Sort keys are ordering-only; overflow saturates for determinism.
    let len = u64::try_from(len).unwrap_or(u64::MAX);
    out.extend_from_slice(&len.to_be_bytes());
}

// Write one nested deterministic payload as [len:u64be][payload] without
// allocating an intermediate buffer.
fn push_framed(out: &mut Vec<u8>, encode: impl FnOnce(&mut Vec<u8>)) {
    let len_pos = out.len();
    out.extend_from_slice(&0u64.to_be_bytes());
    let payload_start = out.len();

    encode(out);

    let payload_len = out.len().saturating_sub(payload_start);
    let payload_len = u64::try_from(payload_len).unwrap_or(u64::MAX);
    out[len_pos..len_pos + std::mem::size_of::<u64>()].copy_from_slice(&payload_len.to_be_bytes());
}

fn push_str(out: &mut Vec<u8>, s: &str) {
    push_len(out, s.len());
    out.extend_from_slice(s.as_bytes());
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::CompareOp;

    #[test]
    fn sort_key_distinguishes_list_text_with_delimiters() {
        let left = Predicate::compare(
            Path::field("field"),
            CompareOp::In,
            Value::List(vec![Value::Text("a,b".to_string())]),
        );
        let right = Predicate::compare(
            Path::field("field"),
            CompareOp::In,
            Value::List(vec![
                Value::Text("a".to_string()),
                Value::Text("b".to_string()),
            ]),
        );

        assert_ne!(sort_key(&left), sort_key(&right));
    }

    #[test]
    fn sort_key_distinguishes_dotted_paths_from_segments() {
        let left = Predicate::is_null(Path::field("owner.id"));
        let right = Predicate::is_null(Path::field("owner").join("id"));

        assert_ne!(sort_key(&left), sort_key(&right));
    }
}
