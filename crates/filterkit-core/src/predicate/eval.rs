use crate::{
    predicate::{CompareOp, ComparePredicate, Path, Predicate},
    value::{TextMode, Value, compare_eq, compare_order, like_matches},
};
use std::{borrow::Cow, cmp::Ordering, collections::BTreeMap};

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Value::Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence<'a> {
    /// Field exists and has a value (including `Value::Null`).
    Present(Cow<'a, Value>),

    /// Field is not present on the row.
    Missing,
}

impl FieldPresence<'_> {
    // Missing attributes read as null: entity attributes always exist,
    // a row that omits one simply has no value for it.
    fn into_value(self) -> Value {
        match self {
            Self::Present(value) => value.into_owned(),
            Self::Missing => Value::Null,
        }
    }
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete entity types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence<'_>;
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        match self.get(name) {
            Some(value) => FieldPresence::Present(Cow::Borrowed(value)),
            None => FieldPresence::Missing,
        }
    }
}

/// A record value is a row; anything else exposes no fields.
impl Row for Value {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        match self.get(name) {
            Some(value) => FieldPresence::Present(Cow::Borrowed(value)),
            None => FieldPresence::Missing,
        }
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        (**self).field(name)
    }
}

///
/// Resolve a path against a row.
///
/// The head segment is read from the row; each later segment steps into
/// a record. Stepping through a null reference yields null, so
/// `owner.name` on a row without an owner reads as null.
///
#[must_use]
pub fn resolve<R: Row + ?Sized>(row: &R, path: &Path) -> Value {
    let Some((head, rest)) = path.segments().split_first() else {
        return Value::Null;
    };

    let mut current = row.field(head).into_value();
    for segment in rest {
        current = match current {
            Value::Record(mut fields) => fields.remove(segment).unwrap_or(Value::Null),
            _ => Value::Null,
        };
    }

    current
}

///
/// Evaluate a predicate against a single row.
///
/// This function performs **pure runtime evaluation**:
/// - no schema access
/// - no planning or index logic
/// - no validation
///
/// Comparisons against null, and comparisons between values that have no
/// defined relation, evaluate to `false`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),

        Predicate::IsNull { path } => resolve(row, path).is_null(),
        Predicate::IsNotNull { path } => !resolve(row, path).is_null(),

        Predicate::Like {
            path,
            pattern,
            mode,
        } => match resolve(row, path) {
            Value::Text(text) => match mode {
                TextMode::Cs => like_matches(&text, pattern),
                TextMode::Ci => like_matches(&Value::fold_upper(&text), pattern),
            },
            // NOTE: like against non-text is a non-match.
            _ => false,
        },

        Predicate::IsEmpty { path } => resolve(row, path).is_empty().unwrap_or(false),
        Predicate::IsNotEmpty { path } => resolve(row, path).is_empty().is_some_and(|e| !e),

        Predicate::Any { path, predicate } => match resolve(row, path) {
            Value::List(items) => items.iter().any(|item| eval(item, predicate)),
            _ => false,
        },
    }
}

///
/// Evaluate a single comparison predicate against a row.
///
/// Returns `false` if:
/// - the resolved value is null
/// - the comparison is not defined for the operand kinds
///
fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let ComparePredicate { path, op, value } = cmp;
    let actual = resolve(row, path);

    match op {
        CompareOp::Eq => compare_eq(&actual, value).unwrap_or(false),
        CompareOp::In => !actual.is_null() && actual.in_list(value).unwrap_or(false),
        CompareOp::Gt => compare_order(&actual, value).is_some_and(Ordering::is_gt),
        CompareOp::Gte => compare_order(&actual, value).is_some_and(Ordering::is_ge),
        CompareOp::Lt => compare_order(&actual, value).is_some_and(Ordering::is_lt),
        CompareOp::Lte => compare_order(&actual, value).is_some_and(Ordering::is_le),
    }
}
