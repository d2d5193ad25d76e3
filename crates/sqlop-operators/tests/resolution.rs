//! Tests for overload resolution over the built-in catalogs
//!
//! Covers:
//! - Custom functions (DATE_TRUNC, GREATEST, LEAST, LOG, LOG2, XOR)
//! - Shadowing of dialect definitions by the custom catalog
//! - Lookup filtering by syntax, category and name policy
//! - Deferred inference for unknown operands

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use sqlop_operators::{
    CallSite, FunctionCategory, NameMatchPolicy, OperatorResolver, OperatorTable, ResolutionError, SyntaxKind,
};
use sqlop_types::{DataType, InferredType, OperandType, SqlType};

#[fixture]
fn resolver() -> OperatorResolver {
    OperatorResolver::standard().unwrap()
}

fn ty(spec: &str) -> OperandType {
    spec.parse()
        .unwrap_or_else(|e| panic!("Failed to parse type '{}': {:?}", spec, e))
}

fn known(spec: &str) -> InferredType {
    let ty: DataType = spec
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse type '{}': {:?}", spec, e));
    InferredType::Known(ty)
}

fn resolve(resolver: &OperatorResolver, name: &str, operands: &[&str]) -> Result<InferredType, ResolutionError> {
    let call = CallSite::function(name, operands.iter().map(|s| ty(s)));
    resolver.resolve(&call).map(|r| r.return_type)
}

// === Custom functions ===

#[rstest]
#[case("XOR", &["INTEGER NOT NULL", "INTEGER NOT NULL"], "INTEGER NOT NULL")]
#[case("XOR", &["SMALLINT", "BIGINT"], "INTEGER NOT NULL")]
#[case("DATE_TRUNC", &["VARCHAR NOT NULL", "TIMESTAMP NOT NULL"], "TIMESTAMP NOT NULL")]
#[case("DATE_TRUNC", &["CHAR(5)", "TIMESTAMP"], "TIMESTAMP NOT NULL")]
#[case("LOG2", &["INTEGER NOT NULL"], "DOUBLE NOT NULL")]
#[case("LOG2", &["DECIMAL(10, 2)"], "DOUBLE")]
#[case("LOG", &["REAL NOT NULL"], "DOUBLE NOT NULL")]
#[case("GREATEST", &["INTEGER NOT NULL", "DOUBLE NULLABLE"], "DOUBLE")]
#[case("GREATEST", &["INTEGER NOT NULL", "BIGINT NOT NULL"], "BIGINT NOT NULL")]
#[case("GREATEST", &["DECIMAL(38, 38) NOT NULL", "INTEGER NOT NULL"], "DECIMAL(38, 28) NOT NULL")]
#[case("LEAST", &["CHAR(3) NOT NULL", "VARCHAR(10) NOT NULL"], "VARCHAR(10) NOT NULL")]
#[case("LEAST", &["DATE NOT NULL", "TIMESTAMP NOT NULL", "NULL"], "TIMESTAMP")]
fn test_custom_function_types(
    resolver: OperatorResolver,
    #[case] name: &str,
    #[case] operands: &[&str],
    #[case] expected: &str,
) {
    assert_eq!(resolve(&resolver, name, operands), Ok(known(expected)));
}

#[rstest]
#[case("XOR", &["INTEGER", "VARCHAR"])]
#[case("XOR", &["INTEGER"])]
#[case("XOR", &["DOUBLE", "INTEGER"])]
#[case("DATE_TRUNC", &["VARCHAR"])]
#[case("DATE_TRUNC", &["VARCHAR", "DATE"])]
#[case("LOG2", &["VARCHAR"])]
#[case("GREATEST", &["INTEGER", "DATE"])]
fn test_custom_function_rejects(resolver: OperatorResolver, #[case] name: &str, #[case] operands: &[&str]) {
    let err = resolve(&resolver, name, operands).unwrap_err();
    assert!(
        matches!(err, ResolutionError::NoMatchingOverload { .. }),
        "expected no match for {}{:?}, got {:?}",
        name,
        operands,
        err
    );
}

#[rstest]
fn test_greatest_without_operands(resolver: OperatorResolver) {
    assert_eq!(
        resolve(&resolver, "GREATEST", &[]),
        Ok(InferredType::Known(DataType::null()))
    );
}

// === Priority ===

#[rstest]
fn test_custom_shadows_postgres(resolver: OperatorResolver) {
    let overloads = resolver.lookup(
        "GREATEST",
        None,
        SyntaxKind::Function,
        NameMatchPolicy::CaseInsensitive,
    );
    assert_eq!(overloads.len(), 2);
    // Custom GREATEST accepts zero operands, the PostgreSQL one does not
    assert!(overloads[0].matches(&[]));
    assert!(!overloads[1].matches(&[]));

    let resolved = resolver
        .resolve(&CallSite::function("greatest", [ty("INTEGER")]))
        .unwrap();
    assert_eq!(resolved.table, "custom");
}

#[rstest]
fn test_lower_tier_used_when_higher_rejects(resolver: OperatorResolver) {
    // Custom LOG takes one operand; the two-operand form comes from postgres
    let resolved = resolver
        .resolve(&CallSite::function("LOG", [ty("INTEGER NOT NULL"), ty("DOUBLE NOT NULL")]))
        .unwrap();
    assert_eq!(resolved.table, "postgres");
    assert_eq!(resolved.tier, 2);
    assert_eq!(resolved.return_type, known("DOUBLE NOT NULL"));
}

// === Standard operators ===

#[rstest]
#[case("+", SyntaxKind::Binary, &["INTEGER NOT NULL", "DECIMAL(5, 2) NOT NULL"], "DECIMAL(12, 2) NOT NULL")]
#[case("-", SyntaxKind::Prefix, &["SMALLINT"], "SMALLINT")]
#[case("=", SyntaxKind::Binary, &["INTEGER NOT NULL", "DOUBLE"], "BOOLEAN")]
#[case("IS NULL", SyntaxKind::Postfix, &["DATE"], "BOOLEAN NOT NULL")]
#[case("||", SyntaxKind::Binary, &["CHAR(2) NOT NULL", "VARCHAR NOT NULL"], "VARCHAR NOT NULL")]
#[case("CURRENT_TIMESTAMP", SyntaxKind::FunctionId, &[], "TIMESTAMP NOT NULL")]
#[case("COUNT", SyntaxKind::FunctionStar, &[], "BIGINT NOT NULL")]
fn test_standard_operators(
    resolver: OperatorResolver,
    #[case] name: &str,
    #[case] syntax: SyntaxKind,
    #[case] operands: &[&str],
    #[case] expected: &str,
) {
    let call = CallSite::function(name, operands.iter().map(|s| ty(s))).with_syntax(syntax);
    let resolved = resolver.resolve(&call).unwrap();
    assert_eq!(resolved.table, "standard");
    assert_eq!(resolved.return_type, known(expected));
}

#[rstest]
fn test_comparison_needs_common_type(resolver: OperatorResolver) {
    let call = CallSite::function("<", [ty("INTEGER"), ty("DATE")]).with_syntax(SyntaxKind::Binary);
    assert!(matches!(
        resolver.resolve(&call),
        Err(ResolutionError::NoMatchingOverload { .. })
    ));
}

// === Lookup ===

#[rstest]
fn test_lookup_by_syntax(resolver: OperatorResolver) {
    let policy = NameMatchPolicy::CaseInsensitive;
    let binary = resolver.lookup("-", None, SyntaxKind::Binary, policy);
    let prefix = resolver.lookup("-", None, SyntaxKind::Prefix, policy);
    assert_eq!(binary.len(), 1);
    assert_eq!(prefix.len(), 1);
    assert_eq!(prefix[0].syntax(), SyntaxKind::Prefix);
    assert!(resolver.lookup("-", None, SyntaxKind::Function, policy).is_empty());
}

#[rstest]
fn test_lookup_by_category(resolver: OperatorResolver) {
    let policy = NameMatchPolicy::CaseInsensitive;
    assert_eq!(
        resolver
            .lookup("LOG", Some(FunctionCategory::Numeric), SyntaxKind::Function, policy)
            .len(),
        2
    );
    assert!(
        resolver
            .lookup("LOG", Some(FunctionCategory::String), SyntaxKind::Function, policy)
            .is_empty()
    );
}

#[rstest]
fn test_lookup_name_policy(resolver: OperatorResolver) {
    assert_eq!(
        resolver
            .lookup("date_trunc", None, SyntaxKind::Function, NameMatchPolicy::CaseInsensitive)
            .len(),
        1
    );
    assert!(
        resolver
            .lookup("date_trunc", None, SyntaxKind::Function, NameMatchPolicy::CaseSensitive)
            .is_empty()
    );
    assert!(
        resolver
            .lookup("NOT_AN_OPERATOR", None, SyntaxKind::Function, NameMatchPolicy::CaseInsensitive)
            .is_empty()
    );
}

#[rstest]
fn test_all_operators_in_priority_order(resolver: OperatorResolver) {
    let all = resolver.all_operators();
    let total: usize = resolver.tables().iter().map(|t| t.operators().len()).sum();
    assert_eq!(all.len(), total);
    assert_eq!(all[0].name(), "DATE_TRUNC");
    assert_eq!(all.last().map(|d| d.name()), Some("LOG"));
}

// === Unknown operands ===

#[rstest]
#[case("GREATEST", &["?", "INTEGER"])]
#[case("LOG", &["?"])]
#[case("+", &["?", "INTEGER"])]
fn test_unknown_operands_defer(resolver: OperatorResolver, #[case] name: &str, #[case] operands: &[&str]) {
    let syntax = if name == "+" { SyntaxKind::Binary } else { SyntaxKind::Function };
    let call = CallSite::function(name, operands.iter().map(|s| ty(s))).with_syntax(syntax);
    assert_eq!(resolver.resolve(&call).unwrap().return_type, InferredType::Deferred);
}

#[rstest]
#[case("XOR", &["?", "INTEGER"], "INTEGER NOT NULL")]
#[case("DATE_TRUNC", &["?", "?"], "TIMESTAMP NOT NULL")]
fn test_constant_rules_ignore_unknowns(
    resolver: OperatorResolver,
    #[case] name: &str,
    #[case] operands: &[&str],
    #[case] expected: &str,
) {
    assert_eq!(resolve(&resolver, name, operands), Ok(known(expected)));
}

#[rstest]
fn test_unknown_operand_does_not_fix_arity(resolver: OperatorResolver) {
    assert!(matches!(
        resolve(&resolver, "XOR", &["?"]),
        Err(ResolutionError::NoMatchingOverload { .. })
    ));
}
