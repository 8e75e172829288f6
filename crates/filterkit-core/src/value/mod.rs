mod compare;


use crate::types::{Date, Float64, Timestamp, Ulid};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeMap, fmt};

// re-exports
pub use compare::{
    LIKE_ANY, LIKE_ONE, compare_eq, compare_order, like_matches,
};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TextMode {
    #[default]
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// ValueKind
///
/// Declared kind of a field value. Used by entity schemas to describe
/// attributes and by the decoder to pick a literal parser.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ValueKind {
    Any,
    Bool,
    Date,
    Float,
    Int,
    List,
    Record,
    Text,
    Timestamp,
    Uint,
    Ulid,
}

impl ValueKind {
    /// Whether values of this kind carry a total order usable by range bounds.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(
            self,
            Self::Date
                | Self::Float
                | Self::Int
                | Self::Text
                | Self::Timestamp
                | Self::Uint
                | Self::Ulid
        )
    }

    /// Whether a value of kind `other` may be compared against this kind.
    /// Numeric kinds compare across each other; everything else is exact.
    #[must_use]
    pub const fn accepts(self, other: Self) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Int | Self::Uint | Self::Float, Self::Int | Self::Uint | Self::Float) => true,
            _ => self as u8 == other as u8,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Float => "float",
            Self::Int => "int",
            Self::List => "list",
            Self::Record => "record",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
            Self::Ulid => "ulid",
        };

        f.write_str(label)
    }
}

///
/// Value
///
/// Runtime value carried by predicates and read from rows.
///
/// Null    → the field has no value (SQL NULL).
/// Record  → a nested entity reached through a to-one relationship.
/// List    → ordered values; also the shape of to-many relationships.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Float64(Float64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Record(BTreeMap<String, Self>),
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a record value from `(name, value)` pairs.
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Date(_) => ValueKind::Date,
            Self::Float64(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::List(_) => ValueKind::List,
            Self::Null => ValueKind::Any,
            Self::Record(_) => ValueKind::Record,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Uint(_) => ValueKind::Uint,
            Self::Ulid(_) => ValueKind::Ulid,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Float64(_) | Self::Int(_) | Self::Uint(_))
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&BTreeMap<String, Self>> {
        if let Self::Record(fields) = self {
            Some(fields)
        } else {
            None
        }
    }

    /// Look up one attribute of a record value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.as_record().and_then(|fields| fields.get(name))
    }

    ///
    /// TEXT COMPARISON
    ///

    /// Fold text to the shared upper-case form used by like patterns.
    #[must_use]
    pub fn fold_upper(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            if s.bytes().any(|b| b.is_ascii_lowercase()) {
                return Cow::Owned(s.to_ascii_uppercase());
            }

            return Cow::Borrowed(s);
        }

        Cow::Owned(s.to_uppercase())
    }

    ///
    /// COLLECTIONS
    ///

    /// Emptiness of a collection-shaped value. Null counts as empty
    /// because to-many relationships are never null.
    #[must_use]
    pub const fn is_empty(&self) -> Option<bool> {
        match self {
            Self::List(xs) => Some(xs.is_empty()),
            Self::Text(s) => Some(s.is_empty()),
            Self::Null => Some(true),
            _ => None,
        }
    }

    /// Membership under `compare_eq`; an empty haystack never matches.
    #[must_use]
    pub fn in_list(&self, haystack: &Self) -> Option<bool> {
        let items = haystack.as_list()?;

        Some(
            items
                .iter()
                .any(|item| compare_eq(self, item).unwrap_or(false)),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool => Bool,
    Date => Date,
    Float64 => Float64,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    &str => Text,
    String => Text,
    Timestamp => Timestamp,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    Ulid => Ulid,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
