use crate::{
    filter::{
        BooleanFilter, Filter, FilterKind, InstantFilter, IntegerFilter, LocalDateFilter,
        RangeFilter, StringFilter, UlidFilter,
    },
    types::{Date, Timestamp, Ulid},
};
use serde_json::json;

// ---- construction ------------------------------------------------------

#[test]
fn default_filters_are_unset() {
    assert!(Filter::<i32>::default().is_unset());
    assert!(StringFilter::default().is_unset());
    assert!(IntegerFilter::default().is_unset());

    assert!(!BooleanFilter::new().with_specified(false).is_unset());
    assert!(!StringFilter::new().with_contains("x").is_unset());
    assert!(!IntegerFilter::new().with_less_than(3).is_unset());
}

#[test]
fn setters_chain_on_the_same_instance() {
    let mut filter = IntegerFilter::new();
    filter
        .set_greater_than(1)
        .set_less_or_equal_than(9)
        .set_specified(true);

    assert_eq!(filter.greater_than, Some(1));
    assert_eq!(filter.less_or_equal_than, Some(9));
    assert_eq!(filter.specified, Some(true));
}

#[test]
fn derived_filters_deref_to_the_base() {
    let filter = StringFilter::new().with_equals("ada".to_string()).with_in(["a".to_string()]);

    assert_eq!(filter.equals.as_deref(), Some("ada"));
    assert_eq!(filter.in_list(), Some(&["a".to_string()][..]));
    assert!(!filter.base.is_unset());
}

#[test]
fn kinds_are_exposed() {
    assert_eq!(Filter::<bool>::KIND, FilterKind::Scalar);
    assert_eq!(StringFilter::KIND, FilterKind::String);
    assert_eq!(RangeFilter::<i64>::KIND, FilterKind::Range);
    assert_eq!(FilterKind::Range.to_string(), "range");
}

// ---- display -----------------------------------------------------------

#[test]
fn display_lists_only_set_fields() {
    let filter = Filter::new()
        .with_in([1, 2])
        .with_specified(true)
        .with_equals(5);

    assert_eq!(filter.to_string(), "Filter [equals=5, specified=true, in=[1, 2]]");
    assert_eq!(Filter::<i32>::new().to_string(), "Filter []");
}

#[test]
fn display_orders_contains_first() {
    let filter = StringFilter::new()
        .with_specified(false)
        .with_equals("x".to_string())
        .with_contains("abc");

    assert_eq!(
        filter.to_string(),
        "StringFilter [contains=abc, equals=x, specified=false]"
    );
}

#[test]
fn display_orders_bounds_between_equals_and_specified() {
    let filter = IntegerFilter::new()
        .with_in([7])
        .with_less_or_equal_than(4)
        .with_greater_or_equal_than(3)
        .with_less_than(2)
        .with_greater_than(1)
        .with_specified(true)
        .with_equals(0);

    assert_eq!(
        filter.to_string(),
        "RangeFilter [equals=0, greaterThan=1, lessThan=2, greaterOrEqualThan=3, \
         lessOrEqualThan=4, specified=true, in=[7]]"
    );
}

// ---- serde -------------------------------------------------------------

#[test]
fn serde_uses_operator_keys_and_skips_unset() {
    let filter = IntegerFilter::new()
        .with_in([1, 2])
        .with_greater_or_equal_than(5);

    let json = serde_json::to_value(&filter).unwrap();
    assert_eq!(json, json!({ "in": [1, 2], "greaterOrEqualThan": 5 }));

    let back: IntegerFilter = serde_json::from_value(json).unwrap();
    assert_eq!(back, filter);
}

#[test]
fn string_filter_flattens_base_keys() {
    let json = json!({ "contains": "smith", "specified": true });
    let filter: StringFilter = serde_json::from_value(json).unwrap();

    assert_eq!(filter.contains.as_deref(), Some("smith"));
    assert_eq!(filter.specified, Some(true));
    assert_eq!(filter.equals, None);
}

#[test]
fn temporal_filters_use_canonical_wire_forms() {
    let dates = LocalDateFilter::new().with_greater_than(Date::new(2024, 2, 29));
    assert_eq!(
        serde_json::to_value(&dates).unwrap(),
        json!({ "greaterThan": "2024-02-29" })
    );

    let instants: InstantFilter =
        serde_json::from_value(json!({ "lessThan": "2024-05-01T14:30:00+02:00" })).unwrap();
    assert_eq!(instants.less_than, Some(Timestamp::from_seconds(1_714_566_600)));
    assert_eq!(
        instants.to_string(),
        "RangeFilter [lessThan=2024-05-01T12:30:00Z]"
    );
}

#[test]
fn pre_epoch_instants_survive_the_wire() {
    let instants: InstantFilter =
        serde_json::from_value(json!({ "greaterThan": "1969-07-20T20:17:00Z" })).unwrap();
    assert_eq!(instants.greater_than, Some(Timestamp::from_seconds(-14_182_980)));
    assert_eq!(
        serde_json::to_value(&instants).unwrap(),
        json!({ "greaterThan": "1969-07-20T20:17:00Z" })
    );
}

#[test]
fn ulid_filters_use_the_text_form() {
    let id = Ulid::from_string("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
    let ids = UlidFilter::new().with_in(vec![id]);

    let json = serde_json::to_value(&ids).unwrap();
    assert_eq!(json, json!({ "in": ["01ARZ3NDEKTSV4RRFFQ69G5FAV"] }));

    let back: UlidFilter = serde_json::from_value(json).unwrap();
    assert_eq!(back, ids);
}
