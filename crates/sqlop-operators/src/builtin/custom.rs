//! Project-specific functions
//!
//! Registered at the highest priority by [`OperatorResolver::standard`], so
//! `GREATEST`, `LEAST` and `LOG` here shadow the dialect definitions.
//!
//! [`OperatorResolver::standard`]: crate::OperatorResolver::standard

use sqlop_types::{DataType, SqlType, TypeCoercer, TypeFamily};

use crate::definition::{DefinitionError, OperatorDefinition};
use crate::inference::{ReturnTypeRule, TypeInferenceError};
use crate::kind::{FunctionCategory, OperatorKind};
use crate::operand::OperandSignature;
use crate::table::OperatorCatalog;

/// Widest type of the operands; `NULL` when there are none
fn widest_type(operands: &[DataType]) -> Result<SqlType, TypeInferenceError> {
    if operands.is_empty() {
        return Ok(SqlType::Null);
    }
    TypeCoercer::new()
        .least_restrictive(operands)
        .map(|ty| ty.sql_type)
        .ok_or_else(|| TypeInferenceError::Rejected {
            rule: "WIDEST",
            reason: format!(
                "no common type for {}",
                operands
                    .iter()
                    .map(|o| o.sql_type.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

/// Return rule shared by `GREATEST` and `LEAST`
pub fn widest_nullable() -> ReturnTypeRule {
    ReturnTypeRule::custom("WIDEST", widest_type).nullable_if_any()
}

fn extremum(name: &str, kind: OperatorKind) -> Result<OperatorDefinition, DefinitionError> {
    OperatorDefinition::function(
        name,
        kind,
        FunctionCategory::System,
        OperandSignature::variadic().same_type(),
        widest_nullable(),
    )
}

fn double_of_numeric(name: &str) -> Result<OperatorDefinition, DefinitionError> {
    OperatorDefinition::function(
        name,
        OperatorKind::OtherFunction,
        FunctionCategory::Numeric,
        OperandSignature::numeric(),
        ReturnTypeRule::explicit(SqlType::Double).nullable_if_any(),
    )
}

/// Build the custom catalog
pub fn custom_catalog() -> Result<OperatorCatalog, DefinitionError> {
    let definitions = vec![
        OperatorDefinition::function(
            "DATE_TRUNC",
            OperatorKind::OtherFunction,
            FunctionCategory::Timedate,
            OperandSignature::family([TypeFamily::Character, TypeFamily::Timestamp]),
            ReturnTypeRule::explicit(SqlType::Timestamp),
        )?,
        extremum("GREATEST", OperatorKind::Greatest)?,
        extremum("LEAST", OperatorKind::Least)?,
        double_of_numeric("LOG")?,
        double_of_numeric("LOG2")?,
        // Bitwise exclusive or
        OperatorDefinition::function(
            "XOR",
            OperatorKind::OtherFunction,
            FunctionCategory::Numeric,
            OperandSignature::family([TypeFamily::Integer, TypeFamily::Integer]),
            ReturnTypeRule::explicit(SqlType::Integer),
        )?,
    ];
    Ok(OperatorCatalog::with_definitions("custom", definitions))
}
