//! Module: predicate
//! Responsibility: backend-neutral predicate algebra, normalization, and
//! the in-memory reference evaluator.
//! Does not own: filter semantics or schema validation.
//! Boundary: the composed `Predicate` is what persistence collaborators consume.

mod ast;
mod eval;
mod normalize;

#[cfg(test)]
mod tests;

pub use ast::{CompareOp, ComparePredicate, Path, Predicate};
pub use eval::{FieldPresence, Row, eval, resolve};
pub use normalize::normalize;
