//! Module: filter
//! Responsibility: per-field criteria containers decoded from a request.
//! Does not own: predicate construction or value parsing.
//! Boundary: plain value objects; the builder in `criteria` reads them.

mod range;
mod string;

#[cfg(test)]
mod tests;

use crate::types::{Date, Timestamp, Ulid};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use range::RangeFilter;
pub use string::StringFilter;

///
/// Aliases
///

pub type BooleanFilter = Filter<bool>;
pub type ShortFilter = RangeFilter<i16>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LongFilter = RangeFilter<i64>;
pub type UnsignedFilter = RangeFilter<u64>;
pub type FloatFilter = RangeFilter<f32>;
pub type DoubleFilter = RangeFilter<f64>;
pub type LocalDateFilter = RangeFilter<Date>;
pub type InstantFilter = RangeFilter<Timestamp>;
pub type UlidFilter = Filter<Ulid>;

///
/// FilterKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FilterKind {
    #[display("scalar")]
    Scalar,
    #[display("string")]
    String,
    #[display("range")]
    Range,
}

///
/// Filter
///
/// Matching intent for one attribute. Any subset of the fields may be
/// set, but the builder applies only the first one present, in the
/// order `equals`, `in`, `specified`; lower priority fields are
/// silently ignored.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Filter<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<T>,

    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_: Option<Vec<T>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified: Option<bool>,
}

impl<T> Filter<T> {
    pub const KIND: FilterKind = FilterKind::Scalar;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            equals: None,
            in_: None,
            specified: None,
        }
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.equals.is_none() && self.in_.is_none() && self.specified.is_none()
    }

    #[must_use]
    pub fn in_list(&self) -> Option<&[T]> {
        self.in_.as_deref()
    }

    #[must_use]
    pub fn with_equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    #[must_use]
    pub fn with_in(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.in_ = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub const fn with_specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    pub fn set_equals(&mut self, value: T) -> &mut Self {
        self.equals = Some(value);
        self
    }

    pub fn set_in(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        self.in_ = Some(values.into_iter().collect());
        self
    }

    pub const fn set_specified(&mut self, specified: bool) -> &mut Self {
        self.specified = Some(specified);
        self
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_filter(f, "Filter", None, self, &[])
    }
}

// Derived filters shadow the base builders so chains keep their type.
macro_rules! impl_base_builders {
    ($value:ty) => {
        #[must_use]
        pub fn with_equals(mut self, value: $value) -> Self {
            self.base.equals = Some(value);
            self
        }

        #[must_use]
        pub fn with_in(mut self, values: impl IntoIterator<Item = $value>) -> Self {
            self.base.in_ = Some(values.into_iter().collect());
            self
        }

        #[must_use]
        pub const fn with_specified(mut self, specified: bool) -> Self {
            self.base.specified = Some(specified);
            self
        }

        pub fn set_equals(&mut self, value: $value) -> &mut Self {
            self.base.equals = Some(value);
            self
        }

        pub fn set_in(&mut self, values: impl IntoIterator<Item = $value>) -> &mut Self {
            self.base.in_ = Some(values.into_iter().collect());
            self
        }

        pub const fn set_specified(&mut self, specified: bool) -> &mut Self {
            self.base.specified = Some(specified);
            self
        }
    };
}

pub(crate) use impl_base_builders;

///
/// DISPLAY
///
/// Canonical diagnostic form `Name [field=value, ...]` listing only set
/// fields, in the order: contains, equals, bounds, specified, in.
///

fn write_filter<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    contains: Option<&str>,
    base: &Filter<T>,
    bounds: &[(&str, Option<&T>)],
) -> fmt::Result {
    write!(f, "{name} [")?;
    let mut out = Entries { f, first: true };

    if let Some(contains) = contains {
        out.entry("contains", &contains)?;
    }
    if let Some(equals) = &base.equals {
        out.entry("equals", equals)?;
    }
    for (key, bound) in bounds {
        if let Some(bound) = bound {
            out.entry(key, bound)?;
        }
    }
    if let Some(specified) = base.specified {
        out.entry("specified", &specified)?;
    }
    if let Some(values) = &base.in_ {
        out.entry("in", &DisplayList(values))?;
    }

    out.f.write_str("]")
}

struct Entries<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl Entries<'_, '_> {
    fn entry(&mut self, key: &str, value: &dyn fmt::Display) -> fmt::Result {
        if !self.first {
            self.f.write_str(", ")?;
        }
        self.first = false;

        write!(self.f, "{key}={value}")
    }
}

struct DisplayList<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for DisplayList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}
