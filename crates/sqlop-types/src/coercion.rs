//! Type Coercion Rules
//!
//! This module implements the implicit widening rules used when several
//! operand types must meet in one result type:
//! - Numeric widening (`TINYINT -> SMALLINT -> INTEGER -> BIGINT -> DECIMAL -> REAL -> DOUBLE`)
//! - Character widening (`CHAR(n) -> VARCHAR`)
//! - `DATE -> TIMESTAMP`
//! - `NULL` to any type

use crate::{DataType, MAX_DECIMAL_PRECISION, SqlType};

/// Implicit coercion rules
#[derive(Debug, Clone, Default)]
pub struct TypeCoercer;

impl TypeCoercer {
    /// Create a new type coercer
    pub fn new() -> Self {
        Self
    }

    /// Least restrictive type of a list of types
    ///
    /// The result is nullable if any input is nullable. Returns `None` for an
    /// empty list or when two of the types have no common type.
    pub fn least_restrictive(&self, types: &[DataType]) -> Option<DataType> {
        let (first, rest) = types.split_first()?;
        let mut result = first.sql_type.clone();
        let mut nullable = first.nullable;
        for ty in rest {
            result = self.common_type(&result, &ty.sql_type)?;
            nullable |= ty.nullable;
        }
        Some(DataType::new(result, nullable))
    }

    /// Least restrictive type of two types, ignoring nullability
    pub fn common_type(&self, a: &SqlType, b: &SqlType) -> Option<SqlType> {
        if a == b {
            return Some(a.clone());
        }

        match (a, b) {
            (SqlType::Null, other) | (other, SqlType::Null) => Some(other.clone()),
            (SqlType::Any, _) | (_, SqlType::Any) => Some(SqlType::Any),

            _ if a.is_numeric() && b.is_numeric() => Some(self.common_numeric(a, b)),

            (SqlType::Char { length: la }, SqlType::Char { length: lb }) => {
                Some(SqlType::char((*la).max(*lb)))
            }
            (SqlType::Char { length: lc }, SqlType::Varchar { length: lv })
            | (SqlType::Varchar { length: lv }, SqlType::Char { length: lc }) => {
                Some(SqlType::Varchar {
                    length: lv.map(|lv| lv.max(*lc)),
                })
            }
            (SqlType::Varchar { length: la }, SqlType::Varchar { length: lb }) => {
                let length = match (la, lb) {
                    (Some(la), Some(lb)) => Some((*la).max(*lb)),
                    _ => None,
                };
                Some(SqlType::Varchar { length })
            }

            (SqlType::Date, SqlType::Timestamp) | (SqlType::Timestamp, SqlType::Date) => {
                Some(SqlType::Timestamp)
            }

            (SqlType::Array { element: ea }, SqlType::Array { element: eb }) => {
                self.common_type(ea, eb).map(SqlType::array)
            }

            _ => None,
        }
    }

    /// Common type of two numeric types
    fn common_numeric(&self, a: &SqlType, b: &SqlType) -> SqlType {
        match (a, b) {
            (
                SqlType::Decimal {
                    precision: pa,
                    scale: sa,
                },
                SqlType::Decimal {
                    precision: pb,
                    scale: sb,
                },
            ) => Self::widen_decimal(pa.saturating_sub(*sa), *sa, pb.saturating_sub(*sb), *sb),
            (SqlType::Decimal { precision, scale }, int) | (int, SqlType::Decimal { precision, scale })
                if int.is_integer() =>
            {
                let digits = int.integer_digits().unwrap_or(MAX_DECIMAL_PRECISION);
                Self::widen_decimal(precision.saturating_sub(*scale), *scale, digits, 0)
            }
            // A REAL mantissa only holds small integers exactly
            (SqlType::Real, SqlType::TinyInt | SqlType::SmallInt)
            | (SqlType::TinyInt | SqlType::SmallInt, SqlType::Real) => SqlType::Real,
            (SqlType::Real, other) | (other, SqlType::Real) if !matches!(other, SqlType::Double) => {
                SqlType::Double
            }
            _ => {
                if a.numeric_rank() >= b.numeric_rank() {
                    a.clone()
                } else {
                    b.clone()
                }
            }
        }
    }

    /// Integer digits win over fractional digits once precision is capped
    fn widen_decimal(int_a: u8, scale_a: u8, int_b: u8, scale_b: u8) -> SqlType {
        let int_digits = int_a.max(int_b).min(MAX_DECIMAL_PRECISION);
        let scale = scale_a
            .max(scale_b)
            .min(MAX_DECIMAL_PRECISION - int_digits);
        SqlType::decimal(int_digits + scale, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        let coercer = TypeCoercer::new();
        assert_eq!(
            coercer.common_type(&SqlType::SmallInt, &SqlType::BigInt),
            Some(SqlType::BigInt)
        );
        assert_eq!(
            coercer.common_type(&SqlType::Integer, &SqlType::Double),
            Some(SqlType::Double)
        );
    }

    #[test]
    fn test_decimal_widening() {
        let coercer = TypeCoercer::new();
        assert_eq!(
            coercer.common_type(&SqlType::decimal(10, 2), &SqlType::decimal(5, 4)),
            Some(SqlType::decimal(12, 4))
        );
        assert_eq!(
            coercer.common_type(&SqlType::Integer, &SqlType::decimal(5, 2)),
            Some(SqlType::decimal(12, 2))
        );
    }

    #[test]
    fn test_decimal_widening_keeps_integer_digits_at_max_precision() {
        let coercer = TypeCoercer::new();
        assert_eq!(
            coercer.common_type(&SqlType::decimal(38, 38), &SqlType::Integer),
            Some(SqlType::decimal(38, 28))
        );
        assert_eq!(
            coercer.common_type(&SqlType::decimal(38, 30), &SqlType::BigInt),
            Some(SqlType::decimal(38, 19))
        );
    }

    #[test]
    fn test_decimal_scale_above_precision() {
        assert_eq!(
            SqlType::decimal(2, 5),
            SqlType::Decimal {
                precision: 2,
                scale: 2
            }
        );

        // A deserialized DECIMAL can still carry scale > precision
        let malformed = SqlType::Decimal {
            precision: 2,
            scale: 5,
        };
        let coercer = TypeCoercer::new();
        assert_eq!(
            coercer.common_type(&malformed, &SqlType::Integer),
            Some(SqlType::decimal(15, 5))
        );
    }

    #[test]
    fn test_real_widening() {
        let coercer = TypeCoercer::new();
        assert_eq!(
            coercer.common_type(&SqlType::SmallInt, &SqlType::Real),
            Some(SqlType::Real)
        );
        assert_eq!(
            coercer.common_type(&SqlType::BigInt, &SqlType::Real),
            Some(SqlType::Double)
        );
    }

    #[test]
    fn test_incompatible_types() {
        let coercer = TypeCoercer::new();
        assert_eq!(coercer.common_type(&SqlType::Integer, &SqlType::Date), None);
        assert_eq!(coercer.common_type(&SqlType::Boolean, &SqlType::varchar()), None);
        assert_eq!(coercer.common_type(&SqlType::Time, &SqlType::Timestamp), None);
    }

    #[test]
    fn test_least_restrictive_nullability() {
        let coercer = TypeCoercer::new();
        let result = coercer.least_restrictive(&[
            SqlType::Integer.not_null(),
            SqlType::Double.nullable(),
        ]);
        assert_eq!(result, Some(SqlType::Double.nullable()));

        let result = coercer.least_restrictive(&[
            SqlType::Integer.not_null(),
            SqlType::BigInt.not_null(),
        ]);
        assert_eq!(result, Some(SqlType::BigInt.not_null()));

        assert_eq!(coercer.least_restrictive(&[]), None);
    }
}
