use crate::filter::{Filter, FilterKind, impl_base_builders, write_filter};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RangeFilter
///
/// Criteria over an ordered value. `equals` and `in` short-circuit as
/// in the base filter; otherwise `specified` and every present bound
/// are combined conjunctively.
///

#[derive(Clone, Debug, Deref, DerefMut, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    #[deref]
    #[deref_mut]
    #[serde(flatten)]
    pub base: Filter<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_or_equal_than: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_or_equal_than: Option<T>,
}

impl<T> RangeFilter<T> {
    pub const KIND: FilterKind = FilterKind::Range;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: Filter::new(),
            greater_than: None,
            greater_or_equal_than: None,
            less_than: None,
            less_or_equal_than: None,
        }
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.base.is_unset() && !self.has_bounds()
    }

    #[must_use]
    pub const fn has_bounds(&self) -> bool {
        self.greater_than.is_some()
            || self.greater_or_equal_than.is_some()
            || self.less_than.is_some()
            || self.less_or_equal_than.is_some()
    }

    impl_base_builders!(T);

    #[must_use]
    pub fn with_greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    #[must_use]
    pub fn with_greater_or_equal_than(mut self, value: T) -> Self {
        self.greater_or_equal_than = Some(value);
        self
    }

    #[must_use]
    pub fn with_less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    #[must_use]
    pub fn with_less_or_equal_than(mut self, value: T) -> Self {
        self.less_or_equal_than = Some(value);
        self
    }

    pub fn set_greater_than(&mut self, value: T) -> &mut Self {
        self.greater_than = Some(value);
        self
    }

    pub fn set_greater_or_equal_than(&mut self, value: T) -> &mut Self {
        self.greater_or_equal_than = Some(value);
        self
    }

    pub fn set_less_than(&mut self, value: T) -> &mut Self {
        self.less_than = Some(value);
        self
    }

    pub fn set_less_or_equal_than(&mut self, value: T) -> &mut Self {
        self.less_or_equal_than = Some(value);
        self
    }
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_filter(
            f,
            "RangeFilter",
            None,
            &self.base,
            &[
                ("greaterThan", self.greater_than.as_ref()),
                ("lessThan", self.less_than.as_ref()),
                ("greaterOrEqualThan", self.greater_or_equal_than.as_ref()),
                ("lessOrEqualThan", self.less_or_equal_than.as_ref()),
            ],
        )
    }
}
