use crate::{
    field::{
        CollectionField, EntityKind, EntitySchema, FieldKind, FieldModel, FieldRef, ReferenceField,
        SchemaError,
    },
    predicate::{Path, Predicate},
    value::{TextMode, Value, ValueKind},
};
use std::collections::HashSet;

///
/// Fixture entities
///

struct Owner;
struct Tag;
struct Pet;

static OWNER_SCHEMA: EntitySchema = EntitySchema {
    entity: "Owner",
    fields: &[
        FieldModel::scalar("id", ValueKind::Uint),
        FieldModel::scalar("name", ValueKind::Text),
        FieldModel::collection("pets", Pet::schema),
    ],
};

static TAG_SCHEMA: EntitySchema = EntitySchema {
    entity: "Tag",
    fields: &[FieldModel::scalar("name", ValueKind::Text)],
};

static PET_SCHEMA: EntitySchema = EntitySchema {
    entity: "Pet",
    fields: &[
        FieldModel::scalar("name", ValueKind::Text),
        FieldModel::scalar("age", ValueKind::Int),
        FieldModel::scalar("active", ValueKind::Bool),
        FieldModel::reference("owner", Owner::schema),
        FieldModel::collection("tags", Tag::schema),
    ],
};

impl EntityKind for Owner {
    fn schema() -> &'static EntitySchema {
        &OWNER_SCHEMA
    }
}

impl EntityKind for Tag {
    fn schema() -> &'static EntitySchema {
        &TAG_SCHEMA
    }
}

impl EntityKind for Pet {
    fn schema() -> &'static EntitySchema {
        &PET_SCHEMA
    }
}

// ---- handles -----------------------------------------------------------

#[test]
fn handles_build_paths() {
    let name: FieldRef<String> = FieldRef::new("name");
    let owner: ReferenceField<u64> = ReferenceField::new("owner", "id");
    let tags: CollectionField<String> = CollectionField::new("tags", "name");

    assert_eq!(name.path(), Path::field("name"));
    assert_eq!(owner.reference_path(), Path::field("owner"));
    assert_eq!(owner.value_path().to_string(), "owner.id");
    assert_eq!(tags.collection_path(), Path::field("tags"));
    assert_eq!(tags.element_path(), Path::field("name"));
}

#[test]
fn handles_are_plain_keys() {
    struct NotClone;

    let a: FieldRef<NotClone> = FieldRef::new("a");
    let copy = a;

    assert_eq!(a, copy);
    assert_eq!(format!("{a:?}"), "FieldRef(a)");

    let set: HashSet<ReferenceField<NotClone>> = [
        ReferenceField::new("owner", "id"),
        ReferenceField::new("owner", "id"),
        ReferenceField::new("owner", "name"),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}

// ---- resolution --------------------------------------------------------

#[test]
fn resolve_steps_through_references() {
    let schema = Pet::schema();

    assert!(matches!(
        schema.resolve(&Path::parse("owner.name")),
        Ok(FieldKind::Scalar(ValueKind::Text))
    ));
    assert!(matches!(
        schema.resolve(&Path::parse("owner")),
        Ok(FieldKind::Reference(_))
    ));
}

#[test]
fn resolve_rejects_unknown_and_untraversable_paths() {
    let schema = Pet::schema();

    assert_eq!(
        schema.resolve(&Path::parse("owner.email")).unwrap_err(),
        SchemaError::UnknownField {
            entity: "Owner".to_string(),
            path: "owner.email".to_string(),
        }
    );
    assert!(matches!(
        schema.resolve(&Path::parse("tags.name")),
        Err(SchemaError::NotTraversable { .. })
    ));
    assert!(matches!(
        schema.resolve(&Path::parse("")),
        Err(SchemaError::UnknownField { .. })
    ));
}

// ---- validation --------------------------------------------------------

#[test]
fn validate_accepts_well_typed_predicates() {
    let pred = Predicate::And(vec![
        Predicate::like(Path::field("name"), "%REX%".to_string(), TextMode::Ci),
        Predicate::gte(Path::field("age"), Value::Uint(2)),
        Predicate::eq(Path::field("active"), Value::Bool(true)),
        Predicate::in_(Path::parse("owner.id"), vec![Value::Uint(1), Value::Uint(2)]),
        Predicate::is_not_null(Path::field("owner")),
        Predicate::any(
            Path::field("tags"),
            Predicate::eq(Path::field("name"), Value::from("good")),
        ),
        Predicate::is_not_empty(Path::field("tags")),
    ]);

    assert_eq!(Pet::schema().validate(&pred), Ok(()));
}

#[test]
fn validate_rejects_mismatched_literals() {
    let err = Pet::schema()
        .validate(&Predicate::eq(Path::field("active"), Value::from("yes")))
        .unwrap_err();

    assert_eq!(
        err,
        SchemaError::TypeMismatch {
            path: "active".to_string(),
            expected: ValueKind::Bool,
            found: ValueKind::Text,
        }
    );
    assert_eq!(
        err.to_string(),
        "literal for 'active' has kind text, expected bool"
    );
}

#[test]
fn validate_rejects_misapplied_operators() {
    let schema = Pet::schema();

    assert!(matches!(
        schema.validate(&Predicate::gt(Path::field("active"), Value::Bool(true))),
        Err(SchemaError::Unordered { .. })
    ));
    assert!(matches!(
        schema.validate(&Predicate::like(
            Path::field("age"),
            "%1%".to_string(),
            TextMode::Ci
        )),
        Err(SchemaError::NotText { .. })
    ));
    assert!(matches!(
        schema.validate(&Predicate::is_empty(Path::field("name"))),
        Err(SchemaError::NotCollection { .. })
    ));
    assert!(matches!(
        schema.validate(&Predicate::is_null(Path::field("tags"))),
        Err(SchemaError::NotNullable { .. })
    ));
}

#[test]
fn validate_checks_any_against_the_element_schema() {
    let pred = Predicate::any(
        Path::field("tags"),
        Predicate::eq(Path::field("colour"), Value::from("red")),
    );

    assert_eq!(
        Pet::schema().validate(&pred),
        Err(SchemaError::UnknownField {
            entity: "Tag".to_string(),
            path: "colour".to_string(),
        })
    );
}

#[test]
fn cyclic_schemas_resolve() {
    let pred = Predicate::any(
        Path::field("pets"),
        Predicate::eq(Path::parse("owner.name"), Value::from("ada")),
    );

    assert_eq!(Owner::schema().validate(&pred), Ok(()));
}
