use crate::{
    predicate::{CompareOp, ComparePredicate, Path, Predicate},
    value::{Value, ValueKind},
};
use thiserror::Error as ThisError;

///
/// EntityKind
///
/// A type whose attributes are described by a static schema table.
///

pub trait EntityKind {
    fn schema() -> &'static EntitySchema;
}

///
/// FieldKind
///
/// Relationship targets are schema accessors, so entities may refer to
/// each other (or themselves) without a construction order.
///

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Scalar(ValueKind),
    Reference(fn() -> &'static EntitySchema),
    Collection(fn() -> &'static EntitySchema),
}

///
/// FieldModel
///

#[derive(Clone, Copy, Debug)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn scalar(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar(kind),
        }
    }

    #[must_use]
    pub const fn reference(name: &'static str, target: fn() -> &'static EntitySchema) -> Self {
        Self {
            name,
            kind: FieldKind::Reference(target),
        }
    }

    #[must_use]
    pub const fn collection(name: &'static str, target: fn() -> &'static EntitySchema) -> Self {
        Self {
            name,
            kind: FieldKind::Collection(target),
        }
    }
}

///
/// EntitySchema
///
/// Registered attribute table for one entity type. Predicates compiled
/// from criteria can be checked against it before they reach storage.
///

#[derive(Debug)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub fields: &'static [FieldModel],
}

impl EntitySchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolve a dotted path, stepping through to-one references.
    pub fn resolve(&self, path: &Path) -> Result<FieldKind, SchemaError> {
        let mut schema = self;
        let mut segments = path.segments().iter().peekable();

        while let Some(segment) = segments.next() {
            let field = schema
                .field(segment)
                .ok_or_else(|| SchemaError::UnknownField {
                    entity: schema.entity.to_string(),
                    path: path.to_string(),
                })?;

            if segments.peek().is_none() {
                return Ok(field.kind);
            }

            schema = match field.kind {
                FieldKind::Reference(target) => target(),
                _ => {
                    return Err(SchemaError::NotTraversable {
                        path: path.to_string(),
                        segment: segment.clone(),
                    });
                }
            };
        }

        Err(SchemaError::UnknownField {
            entity: self.entity.to_string(),
            path: path.to_string(),
        })
    }

    /// Check that every node of `predicate` addresses a known attribute
    /// with an operation its kind supports.
    pub fn validate(&self, predicate: &Predicate) -> Result<(), SchemaError> {
        match predicate {
            Predicate::True | Predicate::False => Ok(()),
            Predicate::And(children) | Predicate::Or(children) => children
                .iter()
                .try_for_each(|child| self.validate(child)),
            Predicate::Not(inner) => self.validate(inner),
            Predicate::Compare(cmp) => self.validate_compare(cmp),
            Predicate::IsNull { path } | Predicate::IsNotNull { path } => {
                match self.resolve(path)? {
                    FieldKind::Scalar(_) | FieldKind::Reference(_) => Ok(()),
                    FieldKind::Collection(_) => Err(SchemaError::NotNullable {
                        path: path.to_string(),
                    }),
                }
            }
            Predicate::Like { path, .. } => match self.resolve(path)? {
                FieldKind::Scalar(ValueKind::Text | ValueKind::Any) => Ok(()),
                FieldKind::Scalar(kind) => Err(SchemaError::NotText {
                    path: path.to_string(),
                    kind,
                }),
                _ => Err(SchemaError::NotScalar {
                    path: path.to_string(),
                }),
            },
            Predicate::IsEmpty { path } | Predicate::IsNotEmpty { path } => {
                self.collection_target(path).map(|_| ())
            }
            Predicate::Any { path, predicate } => {
                self.collection_target(path)?.validate(predicate)
            }
        }
    }

    fn collection_target(&self, path: &Path) -> Result<&'static Self, SchemaError> {
        match self.resolve(path)? {
            FieldKind::Collection(target) => Ok(target()),
            _ => Err(SchemaError::NotCollection {
                path: path.to_string(),
            }),
        }
    }

    fn validate_compare(&self, cmp: &ComparePredicate) -> Result<(), SchemaError> {
        let FieldKind::Scalar(expected) = self.resolve(&cmp.path)? else {
            return Err(SchemaError::NotScalar {
                path: cmp.path.to_string(),
            });
        };

        if cmp.op.is_ordering() && !expected.is_ordered() {
            return Err(SchemaError::Unordered {
                path: cmp.path.to_string(),
                kind: expected,
            });
        }

        let literals: &[Value] = match (cmp.op, &cmp.value) {
            (CompareOp::In, Value::List(items)) => items,
            (CompareOp::In, other) => {
                return Err(SchemaError::TypeMismatch {
                    path: cmp.path.to_string(),
                    expected: ValueKind::List,
                    found: other.kind(),
                });
            }
            (_, value) => std::slice::from_ref(value),
        };

        for literal in literals {
            if !expected.accepts(literal.kind()) {
                return Err(SchemaError::TypeMismatch {
                    path: cmp.path.to_string(),
                    expected,
                    found: literal.kind(),
                });
            }
        }

        Ok(())
    }
}

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("unknown field '{path}' on entity '{entity}'")]
    UnknownField { entity: String, path: String },

    #[error("cannot traverse '{segment}' in '{path}': not a to-one reference")]
    NotTraversable { path: String, segment: String },

    #[error("field '{path}' is not a scalar attribute")]
    NotScalar { path: String },

    #[error("field '{path}' is a collection; test emptiness instead of null")]
    NotNullable { path: String },

    #[error("field '{path}' is not a collection")]
    NotCollection { path: String },

    #[error("field '{path}' has kind {kind}, substring match requires text")]
    NotText { path: String, kind: ValueKind },

    #[error("field '{path}' has kind {kind}, which has no ordering")]
    Unordered { path: String, kind: ValueKind },

    #[error("literal for '{path}' has kind {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },
}
