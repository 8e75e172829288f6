use crate::{
    field::{CollectionField, FieldRef, ReferenceField},
    filter::{Filter, RangeFilter, StringFilter},
    predicate::{Path, Predicate},
    traits::{FieldValue, OrderedValue},
    value::{LIKE_ANY, TextMode, Value},
};

///
/// Predicate builder
///
/// Each function maps one filter onto one predicate for one field, and
/// returns `None` when the filter carries no applicable intent. None of
/// them fail. When several fields of a base filter are set, only the
/// first in priority order is used (equals, in, [contains,] specified).
///

/// Equality, else membership, else a null check on `field`.
#[must_use]
pub fn build_scalar<T: FieldValue>(filter: &Filter<T>, field: FieldRef<T>) -> Option<Predicate> {
    let path = field.path();

    equals_or_in(filter, &path).or_else(|| filter.specified.map(|s| specified(path, s)))
}

/// Like `build_scalar`, with a case-insensitive `contains` tried after `in`.
#[must_use]
pub fn build_string(filter: &StringFilter, field: FieldRef<String>) -> Option<Predicate> {
    let path = field.path();

    if let Some(pred) = equals_or_in(&filter.base, &path) {
        return Some(pred);
    }
    if let Some(term) = &filter.contains {
        return Some(Predicate::like(path, wrap_like(term), TextMode::Ci));
    }

    filter.specified.map(|s| specified(path, s))
}

/// Equality or membership when present; otherwise the conjunction of
/// `specified` and every set bound.
#[must_use]
pub fn build_range<T: OrderedValue>(
    filter: &RangeFilter<T>,
    field: FieldRef<T>,
) -> Option<Predicate> {
    let path = field.path();

    if let Some(pred) = equals_or_in(&filter.base, &path) {
        return Some(pred);
    }

    let bounds: [(Option<&T>, fn(Path, Value) -> Predicate); 4] = [
        (filter.greater_than.as_ref(), Predicate::gt),
        (filter.greater_or_equal_than.as_ref(), Predicate::gte),
        (filter.less_than.as_ref(), Predicate::lt),
        (filter.less_or_equal_than.as_ref(), Predicate::lte),
    ];

    let mut preds: Vec<Predicate> = filter
        .specified
        .map(|s| specified(path.clone(), s))
        .into_iter()
        .collect();
    for (bound, make) in bounds {
        if let Some(bound) = bound {
            preds.push(make(path.clone(), bound.to_value()));
        }
    }

    match preds.len() {
        0 => None,
        1 => preds.pop(),
        _ => Some(Predicate::And(preds)),
    }
}

/// Equality or membership on the referenced attribute; `specified`
/// tests the reference itself for null.
#[must_use]
pub fn build_reference_scalar<T: FieldValue>(
    filter: &Filter<T>,
    field: ReferenceField<T>,
) -> Option<Predicate> {
    equals_or_in(filter, &field.value_path())
        .or_else(|| filter.specified.map(|s| specified(field.reference_path(), s)))
}

/// Equality or membership matches when any element of the collection
/// satisfies it; `specified` tests the collection for emptiness, since
/// a to-many relationship is never null.
#[must_use]
pub fn build_reference_collection<T: FieldValue>(
    filter: &Filter<T>,
    field: CollectionField<T>,
) -> Option<Predicate> {
    let collection = field.collection_path();

    if let Some(pred) = equals_or_in(filter, &field.element_path()) {
        return Some(Predicate::any(collection, pred));
    }

    filter.specified.map(|s| {
        if s {
            Predicate::is_not_empty(collection)
        } else {
            Predicate::is_empty(collection)
        }
    })
}

/// Upper-case `term` and bracket it with any-sequence wildcards.
///
/// The evaluator folds the stored value the same way before matching, so
/// `contains` is case-insensitive on both sides. Wildcard characters in
/// `term` are not escaped.
#[must_use]
pub fn wrap_like(term: &str) -> String {
    let folded = Value::fold_upper(term);
    let mut pattern = String::with_capacity(folded.len() + 2);

    pattern.push(LIKE_ANY);
    pattern.push_str(&folded);
    pattern.push(LIKE_ANY);

    pattern
}

// equals beats in
fn equals_or_in<T: FieldValue>(filter: &Filter<T>, path: &Path) -> Option<Predicate> {
    if let Some(value) = &filter.equals {
        return Some(Predicate::eq(path.clone(), value.to_value()));
    }

    filter.in_list().map(|values| {
        Predicate::in_(
            path.clone(),
            values.iter().map(FieldValue::to_value).collect(),
        )
    })
}

const fn specified(path: Path, present: bool) -> Predicate {
    if present {
        Predicate::is_not_null(path)
    } else {
        Predicate::is_null(path)
    }
}
