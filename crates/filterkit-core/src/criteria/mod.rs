//! Module: criteria
//! Responsibility: compile filters into predicates and compose them.
//! Does not own: filter decoding or predicate evaluation.
//! Boundary: `Criteria` implementations call the builder functions;
//! the compiler hands the composed predicate to a persistence layer.

mod build;


use crate::{
    config::CompilerConfig,
    field::{EntityKind, SchemaError},
    predicate::{Predicate, normalize},
};

pub use build::{
    build_range, build_reference_collection, build_reference_scalar, build_scalar, build_string,
    wrap_like,
};

///
/// Criteria
///
/// A per-entity aggregate of filters, one per queryable attribute.
/// Implementations list one builder result per field; unset fields
/// contribute `None`.
///

pub trait Criteria {
    fn predicates(&self) -> Vec<Option<Predicate>>;

    /// Conjunction of every field predicate.
    fn to_predicate(&self) -> Predicate {
        compose(self.predicates())
    }
}

/// AND together every present predicate.
///
/// No predicates yields `Predicate::True`; exactly one is returned as is.
#[must_use]
pub fn compose<I>(predicates: I) -> Predicate
where
    I: IntoIterator<Item = Option<Predicate>>,
{
    let mut present: Vec<Predicate> = predicates.into_iter().flatten().collect();

    match present.len() {
        0 => Predicate::True,
        1 => present.pop().unwrap_or_default(),
        _ => Predicate::And(present),
    }
}

///
/// CriteriaCompiler
///
/// Composes criteria under a `CompilerConfig`. Stateless apart from the
/// configuration, so one instance can be shared freely.
///

#[derive(Clone, Debug, Default)]
pub struct CriteriaCompiler {
    config: CompilerConfig,
}

impl CriteriaCompiler {
    #[must_use]
    pub const fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compose `criteria` and, when configured, normalize the result.
    #[must_use]
    pub fn compile<C: Criteria + ?Sized>(&self, criteria: &C) -> Predicate {
        let predicates = criteria.predicates();
        let total = predicates.len();
        let active = predicates.iter().filter(|p| p.is_some()).count();
        log::trace!("composing {active} of {total} field predicates");

        let composed = compose(predicates);
        let predicate = if self.config.normalize {
            normalize(&composed)
        } else {
            composed
        };
        if predicate.is_true() {
            log::debug!("compiled criteria are unconstrained");
        } else {
            log::debug!("compiled criteria: {predicate}");
        }

        predicate
    }

    /// Compile and check the result against the schema of `E`.
    pub fn compile_for<E, C>(&self, criteria: &C) -> Result<Predicate, SchemaError>
    where
        E: EntityKind,
        C: Criteria + ?Sized,
    {
        let predicate = self.compile(criteria);

        E::schema().validate(&predicate).inspect_err(|err| {
            log::warn!("criteria rejected by {} schema: {err}", E::schema().entity);
        })?;

        Ok(predicate)
    }
}
