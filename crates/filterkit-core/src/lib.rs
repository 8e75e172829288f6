//! Core of filterkit: typed per-field filters, field handles, and the
//! compiler that turns them into backend-neutral predicates, plus the
//! reference evaluator and the textual decoding helpers.
//!
//! `StringFilter::contains` compiles to a case-insensitive like pattern
//! without escaping, so `%` and `_` in the term behave as wildcards
//! rather than literal characters.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod criteria;
pub mod decode;
pub mod error;
pub mod field;
pub mod filter;
pub mod predicate;
pub mod traits;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Vocabulary needed to declare criteria for an entity.
/// Decoding, configuration, and errors stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        criteria::{
            Criteria, build_range, build_reference_collection, build_reference_scalar,
            build_scalar, build_string,
        },
        field::{CollectionField, EntityKind, FieldRef, ReferenceField},
        filter::{
            BooleanFilter, DoubleFilter, Filter, FloatFilter, InstantFilter, IntegerFilter,
            LocalDateFilter, LongFilter, RangeFilter, StringFilter, UlidFilter,
        },
        predicate::Predicate,
        value::Value,
    };
}
