//! SQL Type System
//!
//! This module defines the SQL type model used during operator resolution:
//! - `SqlType` for the concrete scalar and composite types
//! - `DataType` pairing a type with its nullability
//! - `OperandType` / `InferredType` for call-site operands and results that
//!   may not be known yet

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeFamily;

/// Maximum precision of an exact numeric
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Default precision used for a bare `DECIMAL`
pub const DEFAULT_DECIMAL_PRECISION: u8 = 19;

/// A concrete SQL type, without nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SqlType {
    // === Special Types ===
    /// Type of the untyped `NULL` literal
    Null,
    /// Supertype of all types (values of dynamic type)
    Any,

    // === Boolean ===
    Boolean,

    // === Exact Numeric Types ===
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    /// Fixed-point decimal
    Decimal { precision: u8, scale: u8 },

    // === Approximate Numeric Types ===
    Real,
    Double,

    // === Character Types ===
    /// Fixed-length character string
    Char { length: u32 },
    /// Variable-length character string, unbounded when `length` is `None`
    Varchar { length: Option<u32> },

    // === Binary ===
    Varbinary,

    // === Datetime Types ===
    Date,
    Time,
    Timestamp,

    // === Composite Types ===
    /// Array of elements
    Array { element: Box<SqlType> },
}

impl SqlType {
    // === Constructors ===

    /// Create a decimal type
    ///
    /// Precision is clamped to `1..=MAX_DECIMAL_PRECISION` and scale to the
    /// precision, so a constructed `DECIMAL` always has `scale <= precision`.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        let precision = precision.clamp(1, MAX_DECIMAL_PRECISION);
        Self::Decimal {
            precision,
            scale: scale.min(precision),
        }
    }

    /// Create a fixed-length character type
    pub fn char(length: u32) -> Self {
        Self::Char { length }
    }

    /// Create an unbounded varchar
    pub fn varchar() -> Self {
        Self::Varchar { length: None }
    }

    /// Create a bounded varchar
    pub fn varchar_of(length: u32) -> Self {
        Self::Varchar {
            length: Some(length),
        }
    }

    /// Create an array type
    pub fn array(element: SqlType) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// This type, nullable
    pub fn nullable(self) -> DataType {
        DataType::new(self, true)
    }

    /// This type, not nullable
    pub fn not_null(self) -> DataType {
        DataType::new(self, false)
    }

    // === Type Properties ===

    /// Most specific family this type belongs to
    pub fn family(&self) -> TypeFamily {
        match self {
            Self::Null => TypeFamily::Null,
            Self::Any => TypeFamily::Any,
            Self::Boolean => TypeFamily::Boolean,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt => TypeFamily::Integer,
            Self::Decimal { .. } => TypeFamily::ExactNumeric,
            Self::Real | Self::Double => TypeFamily::ApproximateNumeric,
            Self::Char { .. } | Self::Varchar { .. } => TypeFamily::Character,
            Self::Varbinary => TypeFamily::Binary,
            Self::Date => TypeFamily::Date,
            Self::Time => TypeFamily::Time,
            Self::Timestamp => TypeFamily::Timestamp,
            Self::Array { .. } => TypeFamily::Array,
        }
    }

    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt
        )
    }

    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Decimal { .. } | Self::Real | Self::Double)
    }

    /// Check if this is a character type
    pub fn is_character(&self) -> bool {
        matches!(self, Self::Char { .. } | Self::Varchar { .. })
    }

    /// Check if this is a datetime type
    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    /// Position in the numeric widening order
    /// `TINYINT < SMALLINT < INTEGER < BIGINT < DECIMAL < REAL < DOUBLE`
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            Self::TinyInt => Some(1),
            Self::SmallInt => Some(2),
            Self::Integer => Some(3),
            Self::BigInt => Some(4),
            Self::Decimal { .. } => Some(5),
            Self::Real => Some(6),
            Self::Double => Some(7),
            _ => None,
        }
    }

    /// Number of decimal digits needed to hold any value of an integer type
    pub fn integer_digits(&self) -> Option<u8> {
        match self {
            Self::TinyInt => Some(3),
            Self::SmallInt => Some(5),
            Self::Integer => Some(10),
            Self::BigInt => Some(19),
            _ => None,
        }
    }

    /// SQL name of the type without parameters
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Any => "ANY",
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal { .. } => "DECIMAL",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Char { .. } => "CHAR",
            Self::Varchar { .. } => "VARCHAR",
            Self::Varbinary => "VARBINARY",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Array { .. } => "ARRAY",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({}, {})", precision, scale),
            Self::Char { length } => write!(f, "CHAR({})", length),
            Self::Varchar { length: Some(length) } => write!(f, "VARCHAR({})", length),
            Self::Array { element } => write!(f, "{} ARRAY", element),
            other => f.write_str(other.name()),
        }
    }
}

/// A SQL type together with its nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// The underlying type
    pub sql_type: SqlType,
    /// Whether values of this type may be NULL
    pub nullable: bool,
}

impl DataType {
    /// Create a new data type
    pub fn new(sql_type: SqlType, nullable: bool) -> Self {
        Self { sql_type, nullable }
    }

    /// Type of the `NULL` literal
    pub fn null() -> Self {
        Self::new(SqlType::Null, true)
    }

    /// Family of the underlying type
    pub fn family(&self) -> TypeFamily {
        self.sql_type.family()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable || self.sql_type == SqlType::Null {
            write!(f, "{}", self.sql_type)
        } else {
            write!(f, "{} NOT NULL", self.sql_type)
        }
    }
}

/// Type of one call-site operand as seen by the validator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandType {
    /// The operand's type is known
    Known(DataType),
    /// The operand is a parameter whose type has not been resolved yet
    Unknown,
}

impl OperandType {
    /// The known type, if any
    pub fn known(&self) -> Option<&DataType> {
        match self {
            Self::Known(ty) => Some(ty),
            Self::Unknown => None,
        }
    }

    /// Check if the operand type is still unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<DataType> for OperandType {
    fn from(ty: DataType) -> Self {
        Self::Known(ty)
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(ty) => write!(f, "{}", ty),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// Result of return-type inference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferredType {
    /// The result type is known
    Known(DataType),
    /// Some operand is still unknown; infer again once it is resolved
    Deferred,
}

impl InferredType {
    /// The known type, if any
    pub fn known(&self) -> Option<&DataType> {
        match self {
            Self::Known(ty) => Some(ty),
            Self::Deferred => None,
        }
    }

    /// Check if inference was deferred
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(ty) => write!(f, "{}", ty),
            Self::Deferred => f.write_str("<deferred>"),
        }
    }
}

/// Render a list of operand types as `(A, B, C)`
pub fn format_operand_types(types: &[OperandType]) -> String {
    let rendered: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    format!("({})", rendered.join(", "))
}
