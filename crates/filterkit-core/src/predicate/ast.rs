use crate::value::{TextMode, Value};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Predicate AST
///
/// Backend-neutral representation of compiled criteria.
/// This layer contains no schema knowledge and no storage access; a
/// persistence collaborator interprets the nodes, and `eval` is the
/// in-memory reference interpretation.
///

///
/// Path
///
/// Dotted attribute path, e.g. `owner.name`. The first segment names an
/// attribute of the row; later segments step through to-one relationships.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<String>);

impl Path {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Parse a dotted path; empty segments are dropped.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub fn join(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    In = 0x02,
    Gt = 0x03,
    Gte = 0x04,
    Lt = 0x05,
    Lte = 0x06,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::In => "IN",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Whether the operator relies on a total order of the operand kind.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub path: Path,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(path: Path, op: CompareOp, value: Value) -> Self {
        Self { path, op, value }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    /// Matches every row; the neutral element of `And`.
    #[default]
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull {
        path: Path,
    },
    IsNotNull {
        path: Path,
    },
    /// Like-pattern match. Under `TextMode::Ci` the stored value is
    /// upper-cased before matching, and the pattern is expected to be
    /// upper-cased already.
    Like {
        path: Path,
        pattern: String,
        mode: TextMode,
    },
    IsEmpty {
        path: Path,
    },
    IsNotEmpty {
        path: Path,
    },
    /// Some element of the collection at `path` satisfies `predicate`,
    /// whose paths are relative to the element.
    Any {
        path: Path,
        predicate: Box<Self>,
    },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn compare(path: Path, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(path, op, value))
    }

    #[must_use]
    pub fn eq(path: Path, value: Value) -> Self {
        Self::compare(path, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn in_(path: Path, values: Vec<Value>) -> Self {
        Self::compare(path, CompareOp::In, Value::List(values))
    }

    #[must_use]
    pub fn gt(path: Path, value: Value) -> Self {
        Self::compare(path, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(path: Path, value: Value) -> Self {
        Self::compare(path, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(path: Path, value: Value) -> Self {
        Self::compare(path, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(path: Path, value: Value) -> Self {
        Self::compare(path, CompareOp::Lte, value)
    }

    #[must_use]
    pub const fn is_null(path: Path) -> Self {
        Self::IsNull { path }
    }

    #[must_use]
    pub const fn is_not_null(path: Path) -> Self {
        Self::IsNotNull { path }
    }

    #[must_use]
    pub const fn like(path: Path, pattern: String, mode: TextMode) -> Self {
        Self::Like {
            path,
            pattern,
            mode,
        }
    }

    #[must_use]
    pub const fn is_empty(path: Path) -> Self {
        Self::IsEmpty { path }
    }

    #[must_use]
    pub const fn is_not_empty(path: Path) -> Self {
        Self::IsNotEmpty { path }
    }

    #[must_use]
    pub fn any(path: Path, predicate: Self) -> Self {
        Self::Any {
            path,
            predicate: Box::new(predicate),
        }
    }

    /// Whether this predicate is the match-everything identity.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}

// Infix rendering for diagnostics and logs.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(children) => join(f, children, " AND "),
            Self::Or(children) => join(f, children, " OR "),
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::Compare(cmp) => write!(f, "{} {} {}", cmp.path, cmp.op.symbol(), cmp.value),
            Self::IsNull { path } => write!(f, "{path} IS NULL"),
            Self::IsNotNull { path } => write!(f, "{path} IS NOT NULL"),
            Self::Like {
                path,
                pattern,
                mode: TextMode::Ci,
            } => write!(f, "UPPER({path}) LIKE {pattern:?}"),
            Self::Like { path, pattern, .. } => write!(f, "{path} LIKE {pattern:?}"),
            Self::IsEmpty { path } => write!(f, "{path} IS EMPTY"),
            Self::IsNotEmpty { path } => write!(f, "{path} IS NOT EMPTY"),
            Self::Any { path, predicate } => write!(f, "ANY {path} ({predicate})"),
        }
    }
}
