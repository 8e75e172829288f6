//! Module: decode
//! Responsibility: map already-split `(field.operator, value)` pairs onto
//! typed filters using the textual operator vocabulary.
//! Does not own: query-string splitting or predicate construction.
//! Boundary: produces filters; the criteria layer compiles them.

mod value;


use crate::{
    config::CompilerConfig,
    error::DecodeError,
    filter::{Filter, FilterKind, RangeFilter, StringFilter},
};
use std::{fmt, str::FromStr};

pub use value::FromParamValue;

///
/// Operator
///
/// The textual operator vocabulary, e.g. `age.greaterThan=18`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Equals,
    In,
    Specified,
    Contains,
    GreaterThan,
    GreaterOrEqualThan,
    LessThan,
    LessOrEqualThan,
}

impl Operator {
    pub const ALL: [Self; 8] = [
        Self::Equals,
        Self::In,
        Self::Specified,
        Self::Contains,
        Self::GreaterThan,
        Self::GreaterOrEqualThan,
        Self::LessThan,
        Self::LessOrEqualThan,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::In => "in",
            Self::Specified => "specified",
            Self::Contains => "contains",
            Self::GreaterThan => "greaterThan",
            Self::GreaterOrEqualThan => "greaterOrEqualThan",
            Self::LessThan => "lessThan",
            Self::LessOrEqualThan => "lessOrEqualThan",
        }
    }

    /// Whether a filter of `kind` has a slot for this operator.
    #[must_use]
    pub const fn supported_by(self, kind: FilterKind) -> bool {
        match self {
            Self::Equals | Self::In | Self::Specified => true,
            Self::Contains => matches!(kind, FilterKind::String),
            Self::GreaterThan
            | Self::GreaterOrEqualThan
            | Self::LessThan
            | Self::LessOrEqualThan => matches!(kind, FilterKind::Range),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownOperator { key: s.to_string() })
    }
}

///
/// FilterParam
///
/// A parameter key split into its field path and operator. The operator
/// is the last dotted segment, so `owner.id.equals` targets `owner.id`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FilterParam<'a> {
    pub field: &'a str,
    pub op: Operator,
}

impl<'a> FilterParam<'a> {
    pub fn parse(key: &'a str) -> Result<Self, DecodeError> {
        let Some((field, op)) = key.rsplit_once('.') else {
            return Err(DecodeError::UnknownOperator {
                key: key.to_string(),
            });
        };

        let op = op.parse().map_err(|_| DecodeError::UnknownOperator {
            key: key.to_string(),
        })?;
        if field.is_empty() {
            return Err(DecodeError::MissingField {
                key: key.to_string(),
            });
        }

        Ok(Self { field, op })
    }
}

impl fmt::Display for FilterParam<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.op)
    }
}

///
/// Decoder
///
/// Applies one textual operator/value pair at a time to a filter,
/// following the separator and list limit of a `CompilerConfig`.
///

#[derive(Clone, Debug)]
pub struct Decoder {
    in_separator: char,
    max_in_values: Option<usize>,
}

impl Decoder {
    #[must_use]
    pub const fn new(config: &CompilerConfig) -> Self {
        Self {
            in_separator: config.in_separator,
            max_in_values: config.max_in_values,
        }
    }

    pub fn decode_filter<T: FromParamValue>(
        &self,
        filter: &mut Filter<T>,
        param: FilterParam<'_>,
        raw: &str,
    ) -> Result<(), DecodeError> {
        let kind = ensure_supported(param, Filter::<T>::KIND)?;

        self.apply_base(filter, kind, param, raw)
    }

    pub fn decode_string_filter(
        &self,
        filter: &mut StringFilter,
        param: FilterParam<'_>,
        raw: &str,
    ) -> Result<(), DecodeError> {
        let kind = ensure_supported(param, StringFilter::KIND)?;
        if param.op == Operator::Contains {
            filter.contains = Some(raw.to_string());
            return Ok(());
        }

        self.apply_base(&mut filter.base, kind, param, raw)
    }

    pub fn decode_range_filter<T: FromParamValue>(
        &self,
        filter: &mut RangeFilter<T>,
        param: FilterParam<'_>,
        raw: &str,
    ) -> Result<(), DecodeError> {
        let kind = ensure_supported(param, RangeFilter::<T>::KIND)?;
        let slot = match param.op {
            Operator::GreaterThan => &mut filter.greater_than,
            Operator::GreaterOrEqualThan => &mut filter.greater_or_equal_than,
            Operator::LessThan => &mut filter.less_than,
            Operator::LessOrEqualThan => &mut filter.less_or_equal_than,
            _ => return self.apply_base(&mut filter.base, kind, param, raw),
        };
        *slot = Some(parse_one(param, raw)?);

        Ok(())
    }

    fn apply_base<T: FromParamValue>(
        &self,
        base: &mut Filter<T>,
        kind: FilterKind,
        param: FilterParam<'_>,
        raw: &str,
    ) -> Result<(), DecodeError> {
        match param.op {
            Operator::Equals => {
                base.equals = Some(parse_one(param, raw)?);
            }
            Operator::In => {
                base.in_ = Some(self.parse_list(param, raw)?);
            }
            Operator::Specified => {
                base.specified = Some(parse_one(param, raw)?);
            }
            _ => return Err(unsupported(param, kind)),
        }

        log::trace!("decoded {param}={raw}");

        Ok(())
    }

    // An empty value is an empty list, which matches nothing.
    fn parse_list<T: FromParamValue>(
        &self,
        param: FilterParam<'_>,
        raw: &str,
    ) -> Result<Vec<T>, DecodeError> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<&str> = raw.split(self.in_separator).map(str::trim).collect();
        if let Some(max) = self.max_in_values
            && items.len() > max
        {
            return Err(DecodeError::TooManyValues {
                field: param.field.to_string(),
                count: items.len(),
                max,
            });
        }

        items.into_iter().map(|item| parse_one(param, item)).collect()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(&CompilerConfig::default())
    }
}

// Reject operators the filter kind has no slot for.
fn ensure_supported(param: FilterParam<'_>, kind: FilterKind) -> Result<FilterKind, DecodeError> {
    if param.op.supported_by(kind) {
        Ok(kind)
    } else {
        Err(unsupported(param, kind))
    }
}

fn unsupported(param: FilterParam<'_>, kind: FilterKind) -> DecodeError {
    DecodeError::UnsupportedOperator {
        field: param.field.to_string(),
        op: param.op,
        kind,
    }
}

fn parse_one<T: FromParamValue>(param: FilterParam<'_>, raw: &str) -> Result<T, DecodeError> {
    T::from_param(raw).map_err(|reason| DecodeError::InvalidValue {
        field: param.field.to_string(),
        op: param.op,
        raw: raw.to_string(),
        reason,
    })
}
