//! Module: field
//! Responsibility: typed handles naming entity attributes and relationship paths.
//! Does not own: predicate construction or evaluation.
//! Boundary: opaque keys handed from criteria objects to the predicate builder.

mod schema;

#[cfg(test)]
mod tests;

use crate::predicate::Path;
use std::{fmt, marker::PhantomData};

pub use schema::{EntityKind, EntitySchema, FieldKind, FieldModel, SchemaError};

///
/// FieldRef
///
/// Zero-cost handle naming one scalar attribute of an entity.
/// The type parameter is the attribute's value type, so a `Filter<T>`
/// can only be compiled against a `FieldRef<T>`.
///

pub struct FieldRef<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FieldRef<T> {
    /// Create a new field reference.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Return the underlying field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn path(self) -> Path {
        Path::field(self.name)
    }
}

///
/// ReferenceField
///
/// A to-one relationship (`reference`) paired with an attribute (`value`)
/// on the referenced entity, e.g. `owner` + `id`.
///

pub struct ReferenceField<T> {
    reference: &'static str,
    value: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ReferenceField<T> {
    #[must_use]
    pub const fn new(reference: &'static str, value: &'static str) -> Self {
        Self {
            reference,
            value,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn reference(self) -> &'static str {
        self.reference
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        self.value
    }

    /// Path of the relationship attribute itself.
    #[must_use]
    pub fn reference_path(self) -> Path {
        Path::field(self.reference)
    }

    /// Path through the relationship to the referenced attribute.
    #[must_use]
    pub fn value_path(self) -> Path {
        Path::field(self.reference).join(self.value)
    }
}

///
/// CollectionField
///
/// A to-many relationship (`collection`) paired with an attribute (`value`)
/// on the element entity, e.g. `tags` + `name`.
///

pub struct CollectionField<T> {
    collection: &'static str,
    value: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionField<T> {
    #[must_use]
    pub const fn new(collection: &'static str, value: &'static str) -> Self {
        Self {
            collection,
            value,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn collection(self) -> &'static str {
        self.collection
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        self.value
    }

    #[must_use]
    pub fn collection_path(self) -> Path {
        Path::field(self.collection)
    }

    /// Path of the attribute relative to one collection element.
    #[must_use]
    pub fn element_path(self) -> Path {
        Path::field(self.value)
    }
}

// Handles are plain keys; implement the marker traits without bounding `T`.
macro_rules! impl_handle_traits {
    ($($handle:ident { $($part:ident),+ }),* $(,)?) => {
        $(
            impl<T> Clone for $handle<T> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<T> Copy for $handle<T> {}

            impl<T> PartialEq for $handle<T> {
                fn eq(&self, other: &Self) -> bool {
                    true $(&& self.$part == other.$part)+
                }
            }

            impl<T> Eq for $handle<T> {}

            impl<T> std::hash::Hash for $handle<T> {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    $(self.$part.hash(state);)+
                }
            }
        )*
    };
}

impl_handle_traits! {
    FieldRef { name },
    ReferenceField { reference, value },
    CollectionField { collection, value },
}

impl<T> fmt::Debug for FieldRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({})", self.name)
    }
}

impl<T> fmt::Debug for ReferenceField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceField({}.{})", self.reference, self.value)
    }
}

impl<T> fmt::Debug for CollectionField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionField({}[].{})", self.collection, self.value)
    }
}
