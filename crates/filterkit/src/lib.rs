//! ## Crate layout
//! - `core`: filters, field handles, predicate algebra, and the compiler.
//!
//! The `prelude` module covers what a criteria declaration needs; the
//! compiler, decoder, and evaluator entry points sit at the crate root.

pub use filterkit_core as core;

pub use crate::core::{
    config::CompilerConfig,
    criteria::{Criteria, CriteriaCompiler, compose},
    decode::Decoder,
    predicate::{Predicate, eval, normalize},
};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::core::{
        criteria::CriteriaCompiler,
        predicate::Row as _,
        types::{Date, Timestamp, Ulid},
    };
}
