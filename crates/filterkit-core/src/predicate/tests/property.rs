use crate::{
    predicate::{CompareOp, Path, Predicate, eval, normalize},
    value::{TextMode, Value},
};
use proptest::prelude::*;
use std::collections::BTreeMap;

type TestRow = BTreeMap<String, Value>;

const FIELDS: [&str; 4] = ["a", "b", "c", "d"];

fn arb_field() -> impl Strategy<Value = Path> {
    prop::sample::select(FIELDS.to_vec()).prop_map(Path::field)
}

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-5i64..5).prop_map(Value::Int),
        (0u64..5).prop_map(Value::Uint),
        any::<bool>().prop_map(Value::Bool),
        "[a-cA-C]{0,3}".prop_map(Value::Text),
        Just(Value::Null),
    ]
}

fn arb_row() -> impl Strategy<Value = TestRow> {
    prop::collection::btree_map(
        prop::sample::select(FIELDS.to_vec()).prop_map(str::to_string),
        arb_scalar_value(),
        0..4,
    )
}

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::In),
        Just(CompareOp::Gt),
        Just(CompareOp::Gte),
        Just(CompareOp::Lt),
        Just(CompareOp::Lte),
    ]
}

fn arb_predicate() -> impl Strategy<Value = Predicate> {
    let leaf = prop_oneof![
        Just(Predicate::True),
        Just(Predicate::False),
        arb_field().prop_map(Predicate::is_null),
        arb_field().prop_map(Predicate::is_not_null),
        (arb_field(), "[A-C%_]{0,3}").prop_map(|(path, pattern)| {
            Predicate::like(path, pattern, TextMode::Ci)
        }),
        (arb_field(), arb_compare_op(), arb_scalar_value()).prop_map(|(path, op, value)| {
            let value = match op {
                CompareOp::In => Value::List(vec![value]),
                _ => value,
            };
            Predicate::compare(path, op, value)
        }),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::And),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::Or),
            inner.prop_map(Predicate::not),
        ]
    })
}

proptest! {
    #[test]
    fn normalize_preserves_evaluation(row in arb_row(), pred in arb_predicate()) {
        prop_assert_eq!(eval(&row, &pred), eval(&row, &normalize(&pred)));
    }

    #[test]
    fn normalize_is_idempotent(pred in arb_predicate()) {
        let once = normalize(&pred);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn and_is_order_insensitive(
        row in arb_row(),
        mut children in prop::collection::vec(arb_predicate(), 0..5),
    ) {
        let forward = eval(&row, &Predicate::And(children.clone()));
        children.reverse();
        prop_assert_eq!(forward, eval(&row, &Predicate::And(children)));
    }

    #[test]
    fn null_and_not_null_partition_rows(row in arb_row(), path in arb_field()) {
        let null = eval(&row, &Predicate::is_null(path.clone()));
        let not_null = eval(&row, &Predicate::is_not_null(path));
        prop_assert!(null ^ not_null);
    }
}
