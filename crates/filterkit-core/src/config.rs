//! Compiler configuration, usually loaded from a `filterkit.toml`.
//!
//! ```toml
//! normalize = true
//! in_separator = ","
//! max_in_values = 100
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// CompilerConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Normalize composed predicates before handing them on.
    pub normalize: bool,

    /// Separator between items of a textual `in` value.
    pub in_separator: char,

    /// Upper bound on decoded `in` lists; `None` is unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_in_values: Option<usize>,
}

impl CompilerConfig {
    pub const DEFAULT_IN_SEPARATOR: char = ',';

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading compiler config from {}", path.display());

        Self::from_toml_str(&text)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.in_separator.is_alphanumeric() || self.in_separator.is_whitespace() {
            return Err(ConfigError::Invalid(format!(
                "in_separator {:?} would split ordinary values",
                self.in_separator
            )));
        }
        if self.max_in_values == Some(0) {
            return Err(ConfigError::Invalid(
                "max_in_values must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            in_separator: Self::DEFAULT_IN_SEPARATOR,
            max_in_values: None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CompilerConfig::from_toml_str("").unwrap();

        assert_eq!(config, CompilerConfig::default());
        assert!(config.normalize);
        assert_eq!(config.in_separator, ',');
    }

    #[test]
    fn fields_override_defaults() {
        let config = CompilerConfig::from_toml_str(
            "normalize = false\nin_separator = \"|\"\nmax_in_values = 3\n",
        )
        .unwrap();

        assert!(!config.normalize);
        assert_eq!(config.in_separator, '|');
        assert_eq!(config.max_in_values, Some(3));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CompilerConfig::from_toml_str("like_wildcard = \"*\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn nonsensical_values_are_rejected() {
        assert!(matches!(
            CompilerConfig::from_toml_str("in_separator = \"a\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CompilerConfig::from_toml_str("max_in_values = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn from_path_reads_files() {
        let path = std::env::temp_dir().join(format!("filterkit-config-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "max_in_values = 10").unwrap();
        drop(file);

        let config = CompilerConfig::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.max_in_values, Some(10));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CompilerConfig::from_path("/nonexistent/filterkit.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/filterkit.toml"));
    }
}
