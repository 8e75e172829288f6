use crate::filter::{Filter, FilterKind, impl_base_builders, write_filter};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// StringFilter
///
/// Text criteria: the base fields plus a case-insensitive `contains`.
/// Priority is `equals`, `in`, `contains`, `specified`.
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
pub struct StringFilter {
    #[deref]
    #[deref_mut]
    #[serde(flatten)]
    pub base: Filter<String>,

    /// Case-insensitive match of the term anywhere in the value. The term
    /// is used as a like pattern body, so `%` and `_` inside it still act
    /// as wildcards: `"a_c"` matches `"abc"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl StringFilter {
    pub const KIND: FilterKind = FilterKind::String;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: Filter::new(),
            contains: None,
        }
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.base.is_unset() && self.contains.is_none()
    }

    impl_base_builders!(String);

    #[must_use]
    pub fn with_contains(mut self, term: impl Into<String>) -> Self {
        self.contains = Some(term.into());
        self
    }

    pub fn set_contains(&mut self, term: impl Into<String>) -> &mut Self {
        self.contains = Some(term.into());
        self
    }
}

impl fmt::Display for StringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_filter(f, "StringFilter", self.contains.as_deref(), &self.base, &[])
    }
}
