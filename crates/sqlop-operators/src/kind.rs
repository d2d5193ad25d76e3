//! Operator kinds, syntax kinds and function categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a call to the operator is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    /// `F(a, b)`
    Function,
    /// `F(*)`, e.g. `COUNT(*)`
    FunctionStar,
    /// Function called without parentheses, e.g. `CURRENT_DATE`
    FunctionId,
    /// `a OP b`
    Binary,
    /// `OP a`
    Prefix,
    /// `a OP`
    Postfix,
    /// Operator with its own grammar, e.g. `CASE` or `TRIM(... FROM ...)`
    Special,
}

impl SyntaxKind {
    /// Syntax family used when filtering lookups
    ///
    /// All function syntaxes share the `Function` family, so a lookup for
    /// `F(*)` also finds definitions registered as plain functions.
    pub const fn family(&self) -> SyntaxKind {
        match self {
            Self::Function | Self::FunctionStar | Self::FunctionId => Self::Function,
            other => *other,
        }
    }

    /// Check if this is one of the function syntaxes
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function | Self::FunctionStar | Self::FunctionId)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::FunctionStar => "function_star",
            Self::FunctionId => "function_id",
            Self::Binary => "binary",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of a function, used as a lookup hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCategory {
    Numeric,
    String,
    Timedate,
    System,
    /// Aggregate functions
    Aggregate,
    UserDefined,
}

impl FunctionCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::String => "string",
            Self::Timedate => "timedate",
            Self::System => "system",
            Self::Aggregate => "aggregate",
            Self::UserDefined => "user_defined",
        }
    }
}

impl fmt::Display for FunctionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the operator does, independent of its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    /// Unary minus
    MinusPrefix,
    Mod,

    // Comparison
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical
    And,
    Or,
    Not,
    IsNull,
    IsNotNull,

    // Strings
    Concat,
    Like,
    Trim,

    // Functions with dedicated kinds
    Floor,
    Ceil,
    Coalesce,
    NullIf,
    Greatest,
    Least,

    // Aggregates
    Count,
    Sum,
    Min,
    Max,
    Avg,

    /// Any other function
    OtherFunction,
    /// Anything else; accepted with every syntax
    Other,
}

impl OperatorKind {
    /// Check whether a definition of this kind may use `syntax`
    pub const fn allows(&self, syntax: SyntaxKind) -> bool {
        match self {
            Self::Plus
            | Self::Minus
            | Self::Times
            | Self::Divide
            | Self::Equals
            | Self::NotEquals
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::And
            | Self::Or
            | Self::Concat
            | Self::Like => matches!(syntax, SyntaxKind::Binary),
            Self::MinusPrefix | Self::Not => matches!(syntax, SyntaxKind::Prefix),
            Self::IsNull | Self::IsNotNull => matches!(syntax, SyntaxKind::Postfix),
            // TRIM(BOTH ' ' FROM s) has its own grammar
            Self::Trim => syntax.is_function() || matches!(syntax, SyntaxKind::Special),
            Self::Mod
            | Self::Floor
            | Self::Ceil
            | Self::Coalesce
            | Self::NullIf
            | Self::Greatest
            | Self::Least
            | Self::Count
            | Self::Sum
            | Self::Min
            | Self::Max
            | Self::Avg
            | Self::OtherFunction => syntax.is_function(),
            Self::Other => true,
        }
    }

    /// Check if this is an aggregate
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Count | Self::Sum | Self::Min | Self::Max | Self::Avg)
    }
}
