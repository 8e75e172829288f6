use crate::{decode::Operator, filter::FilterKind};
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Raised while mapping textual `(field.operator, value)` pairs onto
/// typed filters. The compiler itself never fails.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("unknown filter operator in '{key}'")]
    UnknownOperator { key: String },

    #[error("missing field name in '{key}'")]
    MissingField { key: String },

    #[error("no filterable field '{field}'")]
    UnknownField { field: String },

    #[error("operator {op} is not supported by the {kind} filter on '{field}'")]
    UnsupportedOperator {
        field: String,
        op: Operator,
        kind: FilterKind,
    },

    #[error("invalid value '{raw}' for '{field}.{op}': {reason}")]
    InvalidValue {
        field: String,
        op: Operator,
        raw: String,
        reason: String,
    },

    #[error("'{field}.in' lists {count} values, the limit is {max}")]
    TooManyValues {
        field: String,
        count: usize,
        max: usize,
    },
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
