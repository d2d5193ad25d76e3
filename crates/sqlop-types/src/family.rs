//! Type families
//!
//! A family is a coarse classification of SQL types used by operand
//! signatures. Families nest: `INTEGER` is inside `EXACT_NUMERIC`, which is
//! inside `NUMERIC`; `DATE`, `TIME` and `TIMESTAMP` are inside `DATETIME`;
//! everything is inside `ANY`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SqlType;

/// Operand family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFamily {
    /// Every type
    Any,
    /// Only the type of the untyped `NULL` literal
    Null,
    Boolean,
    Character,
    Binary,
    /// Exact and approximate numerics
    Numeric,
    /// Integers and decimals
    ExactNumeric,
    /// `TINYINT`, `SMALLINT`, `INTEGER`, `BIGINT`
    Integer,
    /// `REAL`, `DOUBLE`
    ApproximateNumeric,
    Date,
    Time,
    Timestamp,
    /// `DATE`, `TIME`, `TIMESTAMP`
    Datetime,
    Array,
}

impl TypeFamily {
    /// Check whether a value of `sql_type` is acceptable where this family is
    /// declared.
    ///
    /// `NULL` and `ANY` typed values are accepted by every family; they get
    /// their concrete type from the operator's other operands or at runtime.
    pub fn contains(&self, sql_type: &SqlType) -> bool {
        if matches!(self, Self::Any) || matches!(sql_type, SqlType::Null | SqlType::Any) {
            return true;
        }

        match self {
            Self::Any => true,
            Self::Null => false,
            Self::Boolean => matches!(sql_type, SqlType::Boolean),
            Self::Character => sql_type.is_character(),
            Self::Binary => matches!(sql_type, SqlType::Varbinary),
            Self::Numeric => sql_type.is_numeric(),
            Self::ExactNumeric => {
                sql_type.is_integer() || matches!(sql_type, SqlType::Decimal { .. })
            }
            Self::Integer => sql_type.is_integer(),
            Self::ApproximateNumeric => matches!(sql_type, SqlType::Real | SqlType::Double),
            Self::Date => matches!(sql_type, SqlType::Date),
            Self::Time => matches!(sql_type, SqlType::Time),
            Self::Timestamp => matches!(sql_type, SqlType::Timestamp),
            Self::Datetime => sql_type.is_datetime(),
            Self::Array => matches!(sql_type, SqlType::Array { .. }),
        }
    }

    /// Upper-case family name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::Character => "CHARACTER",
            Self::Binary => "BINARY",
            Self::Numeric => "NUMERIC",
            Self::ExactNumeric => "EXACT_NUMERIC",
            Self::Integer => "INTEGER",
            Self::ApproximateNumeric => "APPROXIMATE_NUMERIC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Datetime => "DATETIME",
            Self::Array => "ARRAY",
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_membership() {
        assert!(TypeFamily::Integer.contains(&SqlType::BigInt));
        assert!(!TypeFamily::Integer.contains(&SqlType::Double));
        assert!(TypeFamily::Numeric.contains(&SqlType::decimal(5, 2)));
        assert!(TypeFamily::Character.contains(&SqlType::char(3)));
        assert!(!TypeFamily::Character.contains(&SqlType::Integer));
        assert!(TypeFamily::Datetime.contains(&SqlType::Date));
        assert!(!TypeFamily::Timestamp.contains(&SqlType::Date));
    }

    #[test]
    fn test_null_and_any_belong_everywhere() {
        for family in [TypeFamily::Integer, TypeFamily::Character, TypeFamily::Timestamp] {
            assert!(family.contains(&SqlType::Null));
            assert!(family.contains(&SqlType::Any));
        }
        assert!(!TypeFamily::Null.contains(&SqlType::Integer));
    }

    #[test]
    fn test_family_of_type_contains_it() {
        for ty in [SqlType::SmallInt, SqlType::decimal(4, 1), SqlType::Real] {
            let family = ty.family();
            assert!(family.contains(&ty));
            assert!(TypeFamily::Numeric.contains(&ty));
            assert!(TypeFamily::Any.contains(&ty));
        }
    }
}
