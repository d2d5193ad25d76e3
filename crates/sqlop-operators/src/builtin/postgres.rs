//! PostgreSQL dialect functions

use sqlop_types::{SqlType, TypeFamily};

use crate::definition::{DefinitionError, OperatorDefinition};
use crate::inference::ReturnTypeRule;
use crate::kind::{FunctionCategory, OperatorKind};
use crate::operand::OperandSignature;
use crate::table::OperatorCatalog;

fn function(
    name: &str,
    category: FunctionCategory,
    operands: OperandSignature,
    return_type: ReturnTypeRule,
) -> Result<OperatorDefinition, DefinitionError> {
    OperatorDefinition::function(name, OperatorKind::OtherFunction, category, operands, return_type)
}

/// Build the PostgreSQL catalog
pub fn postgres_catalog() -> Result<OperatorCatalog, DefinitionError> {
    let varchar_nullable = || ReturnTypeRule::explicit(SqlType::varchar()).nullable_if_any();
    let string_and_int = || OperandSignature::family([TypeFamily::Character, TypeFamily::Integer]);

    let definitions = vec![
        OperatorDefinition::function(
            "GREATEST",
            OperatorKind::Greatest,
            FunctionCategory::System,
            OperandSignature::variadic_of(TypeFamily::Any, 1).same_type(),
            ReturnTypeRule::least_restrictive(),
        )?,
        OperatorDefinition::function(
            "LEAST",
            OperatorKind::Least,
            FunctionCategory::System,
            OperandSignature::variadic_of(TypeFamily::Any, 1).same_type(),
            ReturnTypeRule::least_restrictive(),
        )?,
        // Separator plus at least one value
        function(
            "CONCAT_WS",
            FunctionCategory::String,
            OperandSignature::variadic_of(TypeFamily::Character, 2),
            varchar_nullable(),
        )?,
        function(
            "DATE_PART",
            FunctionCategory::Timedate,
            OperandSignature::family([TypeFamily::Character, TypeFamily::Datetime]),
            ReturnTypeRule::explicit(SqlType::Double).nullable_if_any(),
        )?,
        function(
            "TO_CHAR",
            FunctionCategory::String,
            OperandSignature::family([TypeFamily::Timestamp, TypeFamily::Character]),
            varchar_nullable(),
        )?,
        function("LEFT", FunctionCategory::String, string_and_int(), ReturnTypeRule::arg(0).nullable_if_any())?,
        function("RIGHT", FunctionCategory::String, string_and_int(), ReturnTypeRule::arg(0).nullable_if_any())?,
        function(
            "MD5",
            FunctionCategory::String,
            OperandSignature::family([TypeFamily::Character]),
            ReturnTypeRule::explicit(SqlType::varchar_of(32)).nullable_if_any(),
        )?,
        // LOG(base, x)
        function(
            "LOG",
            FunctionCategory::Numeric,
            OperandSignature::numeric_numeric(),
            ReturnTypeRule::explicit(SqlType::Double).nullable_if_any(),
        )?,
    ];
    Ok(OperatorCatalog::with_definitions("postgres", definitions))
}
