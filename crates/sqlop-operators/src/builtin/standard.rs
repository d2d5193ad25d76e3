//! Standard SQL operators and functions

use sqlop_types::{SqlType, TypeFamily};

use crate::definition::{DefinitionError, OperatorDefinition};
use crate::inference::ReturnTypeRule;
use crate::kind::{FunctionCategory, OperatorKind, SyntaxKind};
use crate::operand::OperandSignature;
use crate::table::OperatorCatalog;

type Def = Result<OperatorDefinition, DefinitionError>;

fn arithmetic(name: &str, kind: OperatorKind) -> Def {
    OperatorDefinition::binary(
        name,
        kind,
        OperandSignature::numeric_numeric(),
        ReturnTypeRule::least_restrictive().nullable_if_any(),
    )
}

fn comparison(name: &str, kind: OperatorKind) -> Def {
    OperatorDefinition::binary(
        name,
        kind,
        OperandSignature::comparable_pair(),
        ReturnTypeRule::boolean_nullable(),
    )
}

fn numeric_fn(name: &str, kind: OperatorKind, return_type: ReturnTypeRule) -> Def {
    OperatorDefinition::function(
        name,
        kind,
        FunctionCategory::Numeric,
        OperandSignature::numeric(),
        return_type,
    )
}

fn string_fn(name: &str, operands: OperandSignature, return_type: ReturnTypeRule) -> Def {
    OperatorDefinition::function(
        name,
        OperatorKind::OtherFunction,
        FunctionCategory::String,
        operands,
        return_type,
    )
}

fn aggregate(name: &str, kind: OperatorKind, operands: OperandSignature, return_type: ReturnTypeRule) -> Def {
    OperatorDefinition::function(name, kind, FunctionCategory::Aggregate, operands, return_type)
}

fn niladic(name: &str, sql_type: SqlType) -> Def {
    OperatorDefinition::new(
        name,
        OperatorKind::OtherFunction,
        SyntaxKind::FunctionId,
        Some(FunctionCategory::Timedate),
        OperandSignature::niladic(),
        ReturnTypeRule::explicit(sql_type),
    )
}

/// Build the standard catalog
pub fn standard_catalog() -> Result<OperatorCatalog, DefinitionError> {
    let double_nullable = || ReturnTypeRule::explicit(SqlType::Double).nullable_if_any();
    let boolean_pair = || OperandSignature::family([TypeFamily::Boolean, TypeFamily::Boolean]);
    let string_pair = || OperandSignature::family([TypeFamily::Character, TypeFamily::Character]);

    let definitions = vec![
        // Arithmetic
        arithmetic("+", OperatorKind::Plus)?,
        arithmetic("-", OperatorKind::Minus)?,
        arithmetic("*", OperatorKind::Times)?,
        arithmetic("/", OperatorKind::Divide)?,
        OperatorDefinition::prefix(
            "-",
            OperatorKind::MinusPrefix,
            OperandSignature::numeric(),
            ReturnTypeRule::arg(0),
        )?,
        OperatorDefinition::function(
            "MOD",
            OperatorKind::Mod,
            FunctionCategory::Numeric,
            OperandSignature::family([TypeFamily::ExactNumeric, TypeFamily::ExactNumeric]),
            ReturnTypeRule::arg(1).nullable_if_any(),
        )?,
        // Comparison
        comparison("=", OperatorKind::Equals)?,
        comparison("<>", OperatorKind::NotEquals)?,
        comparison("<", OperatorKind::LessThan)?,
        comparison("<=", OperatorKind::LessThanOrEqual)?,
        comparison(">", OperatorKind::GreaterThan)?,
        comparison(">=", OperatorKind::GreaterThanOrEqual)?,
        // Logical
        OperatorDefinition::binary("AND", OperatorKind::And, boolean_pair(), ReturnTypeRule::boolean_nullable())?,
        OperatorDefinition::binary("OR", OperatorKind::Or, boolean_pair(), ReturnTypeRule::boolean_nullable())?,
        OperatorDefinition::prefix(
            "NOT",
            OperatorKind::Not,
            OperandSignature::family([TypeFamily::Boolean]),
            ReturnTypeRule::boolean_nullable(),
        )?,
        OperatorDefinition::postfix(
            "IS NULL",
            OperatorKind::IsNull,
            OperandSignature::any(),
            ReturnTypeRule::explicit(SqlType::Boolean),
        )?,
        OperatorDefinition::postfix(
            "IS NOT NULL",
            OperatorKind::IsNotNull,
            OperandSignature::any(),
            ReturnTypeRule::explicit(SqlType::Boolean),
        )?,
        // Strings
        OperatorDefinition::binary(
            "||",
            OperatorKind::Concat,
            string_pair(),
            ReturnTypeRule::explicit(SqlType::varchar()).nullable_if_any(),
        )?,
        OperatorDefinition::binary("LIKE", OperatorKind::Like, string_pair(), ReturnTypeRule::boolean_nullable())?,
        // Numeric functions
        numeric_fn("ABS", OperatorKind::OtherFunction, ReturnTypeRule::arg(0))?,
        OperatorDefinition::function(
            "POWER",
            OperatorKind::OtherFunction,
            FunctionCategory::Numeric,
            OperandSignature::numeric_numeric(),
            double_nullable(),
        )?,
        numeric_fn("LN", OperatorKind::OtherFunction, double_nullable())?,
        numeric_fn("LOG10", OperatorKind::OtherFunction, double_nullable())?,
        numeric_fn("SQRT", OperatorKind::OtherFunction, double_nullable())?,
        numeric_fn("FLOOR", OperatorKind::Floor, ReturnTypeRule::arg(0))?,
        numeric_fn("CEIL", OperatorKind::Ceil, ReturnTypeRule::arg(0))?,
        // String functions
        string_fn("UPPER", OperandSignature::string(), ReturnTypeRule::arg(0))?,
        string_fn("LOWER", OperandSignature::string(), ReturnTypeRule::arg(0))?,
        string_fn(
            "CHAR_LENGTH",
            OperandSignature::string(),
            ReturnTypeRule::explicit(SqlType::Integer).nullable_if_any(),
        )?,
        string_fn(
            "SUBSTRING",
            OperandSignature::family([TypeFamily::Character, TypeFamily::Integer]),
            ReturnTypeRule::arg(0).nullable_if_any(),
        )?,
        string_fn(
            "SUBSTRING",
            OperandSignature::family([TypeFamily::Character, TypeFamily::Integer, TypeFamily::Integer]),
            ReturnTypeRule::arg(0).nullable_if_any(),
        )?,
        OperatorDefinition::function(
            "TRIM",
            OperatorKind::Trim,
            FunctionCategory::String,
            OperandSignature::string(),
            ReturnTypeRule::arg(0),
        )?,
        // Null handling
        OperatorDefinition::function(
            "COALESCE",
            OperatorKind::Coalesce,
            FunctionCategory::System,
            OperandSignature::variadic_of(TypeFamily::Any, 1).same_type(),
            ReturnTypeRule::least_restrictive().nullable_if_all(),
        )?,
        OperatorDefinition::function(
            "NULLIF",
            OperatorKind::NullIf,
            FunctionCategory::System,
            OperandSignature::comparable_pair(),
            ReturnTypeRule::arg(0).force_nullable(),
        )?,
        // Date and time
        niladic("CURRENT_TIMESTAMP", SqlType::Timestamp)?,
        niladic("CURRENT_DATE", SqlType::Date)?,
        // Aggregates
        aggregate(
            "COUNT",
            OperatorKind::Count,
            OperandSignature::variadic(),
            ReturnTypeRule::explicit(SqlType::BigInt),
        )?,
        aggregate(
            "SUM",
            OperatorKind::Sum,
            OperandSignature::numeric(),
            ReturnTypeRule::arg(0).force_nullable(),
        )?,
        aggregate(
            "MIN",
            OperatorKind::Min,
            OperandSignature::any(),
            ReturnTypeRule::arg(0).force_nullable(),
        )?,
        aggregate(
            "MAX",
            OperatorKind::Max,
            OperandSignature::any(),
            ReturnTypeRule::arg(0).force_nullable(),
        )?,
        aggregate(
            "AVG",
            OperatorKind::Avg,
            OperandSignature::numeric(),
            ReturnTypeRule::arg(0).force_nullable(),
        )?,
    ];
    Ok(OperatorCatalog::with_definitions("standard", definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlop_types::{InferredType, OperandType};

    fn find<'a>(catalog: &'a OperatorCatalog, name: &str, syntax: SyntaxKind) -> &'a OperatorDefinition {
        catalog
            .all()
            .iter()
            .find(|d| d.name() == name && d.syntax() == syntax)
            .unwrap()
    }

    fn known(ty: sqlop_types::DataType) -> OperandType {
        OperandType::Known(ty)
    }

    #[test]
    fn test_minus_has_binary_and_prefix_forms() {
        let catalog = standard_catalog().unwrap();
        let minus: Vec<SyntaxKind> = catalog
            .all()
            .iter()
            .filter(|d| d.name() == "-")
            .map(|d| d.syntax())
            .collect();
        assert_eq!(minus, [SyntaxKind::Binary, SyntaxKind::Prefix]);
    }

    #[test]
    fn test_plus_widens() {
        let catalog = standard_catalog().unwrap();
        let plus = find(&catalog, "+", SyntaxKind::Binary);
        assert_eq!(
            plus.infer(&[known(SqlType::Integer.not_null()), known(SqlType::BigInt.nullable())]),
            Ok(InferredType::Known(SqlType::BigInt.nullable()))
        );
    }

    #[test]
    fn test_coalesce_is_nullable_only_if_all_are() {
        let catalog = standard_catalog().unwrap();
        let coalesce = find(&catalog, "COALESCE", SyntaxKind::Function);
        assert_eq!(
            coalesce.infer(&[known(SqlType::Integer.nullable()), known(SqlType::Integer.not_null())]),
            Ok(InferredType::Known(SqlType::Integer.not_null()))
        );
        assert!(!coalesce.matches(&[]));
    }

    #[test]
    fn test_sum_is_always_nullable() {
        let catalog = standard_catalog().unwrap();
        let sum = find(&catalog, "SUM", SyntaxKind::Function);
        assert_eq!(
            sum.infer(&[known(SqlType::Integer.not_null())]),
            Ok(InferredType::Known(SqlType::Integer.nullable()))
        );
    }

    #[test]
    fn test_current_date_needs_no_operands() {
        let catalog = standard_catalog().unwrap();
        let current_date = find(&catalog, "CURRENT_DATE", SyntaxKind::FunctionId);
        assert_eq!(current_date.signature(), "CURRENT_DATE");
        assert_eq!(
            current_date.infer(&[]),
            Ok(InferredType::Known(SqlType::Date.not_null()))
        );
    }
}
