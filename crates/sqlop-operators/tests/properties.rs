//! Property tests for matching, inference and lookup

use proptest::prelude::*;
use sqlop_operators::{
    CallSite, NameMatchPolicy, OperandSignature, OperatorResolver, OperatorTable, ReturnTypeRule, SyntaxKind,
};
use sqlop_types::{DataType, InferredType, OperandType, SqlType, TypeFamily};

fn arb_sql_type() -> impl Strategy<Value = SqlType> {
    prop_oneof![
        Just(SqlType::Boolean),
        Just(SqlType::TinyInt),
        Just(SqlType::SmallInt),
        Just(SqlType::Integer),
        Just(SqlType::BigInt),
        (1u8..=38).prop_flat_map(|p| (Just(p), 0..=p)).prop_map(|(p, s)| SqlType::decimal(p, s)),
        Just(SqlType::Real),
        Just(SqlType::Double),
        (1u32..64).prop_map(SqlType::char),
        Just(SqlType::varchar()),
        Just(SqlType::Date),
        Just(SqlType::Time),
        Just(SqlType::Timestamp),
    ]
}

fn arb_numeric_type() -> impl Strategy<Value = SqlType> {
    prop_oneof![
        Just(SqlType::TinyInt),
        Just(SqlType::SmallInt),
        Just(SqlType::Integer),
        Just(SqlType::BigInt),
        (1u8..=38).prop_flat_map(|p| (Just(p), 0..=p)).prop_map(|(p, s)| SqlType::decimal(p, s)),
        Just(SqlType::Real),
        Just(SqlType::Double),
    ]
}

fn arb_data_type(types: impl Strategy<Value = SqlType>) -> impl Strategy<Value = DataType> {
    (types, any::<bool>()).prop_map(|(ty, nullable)| DataType::new(ty, nullable))
}

fn known(types: &[DataType]) -> Vec<OperandType> {
    types.iter().cloned().map(OperandType::Known).collect()
}

proptest! {
    #[test]
    fn propagating_rule_is_nullable_iff_an_operand_is(
        types in prop::collection::vec(arb_data_type(arb_numeric_type()), 1..6)
    ) {
        let rule = ReturnTypeRule::explicit(SqlType::Double).nullable_if_any();
        let inferred = rule.infer(&known(&types)).unwrap();
        let expected = types.iter().any(|t| t.nullable);
        prop_assert_eq!(inferred, InferredType::Known(DataType::new(SqlType::Double, expected)));
    }

    #[test]
    fn greatest_is_nullable_iff_an_operand_is(
        types in prop::collection::vec(arb_data_type(arb_numeric_type()), 1..6)
    ) {
        let resolver = OperatorResolver::standard().unwrap();
        let resolved = resolver.resolve(&CallSite::function("GREATEST", known(&types))).unwrap();
        let inferred = resolved.return_type.known().cloned().unwrap();
        prop_assert_eq!(inferred.nullable, types.iter().any(|t| t.nullable));
        prop_assert!(inferred.sql_type.is_numeric());
    }

    #[test]
    fn inference_terminates_for_accepted_operands(
        types in prop::collection::vec(arb_data_type(arb_sql_type()), 0..4)
    ) {
        let resolver = OperatorResolver::standard().unwrap();
        let operands = known(&types);
        for definition in resolver.all_operators() {
            if definition.matches(&operands) {
                // Accepted operands never fail inference
                prop_assert!(definition.infer(&operands).is_ok(), "{} rejected {:?}", definition, types);
            }
        }
    }

    #[test]
    fn variadic_minimum_zero_accepts_any_count(
        types in prop::collection::vec(arb_data_type(arb_sql_type()), 0..8)
    ) {
        let signature = OperandSignature::variadic();
        prop_assert!(signature.matches(&known(&types)));
    }

    #[test]
    fn unknown_operands_match_every_family(count in 0usize..5) {
        let signature = OperandSignature::variadic_of(TypeFamily::Timestamp, 0);
        let operands = vec![OperandType::Unknown; count];
        prop_assert!(signature.matches(&operands));
    }

    #[test]
    fn lookup_is_repeatable(name in prop::sample::select(vec!["GREATEST", "log", "Xor", "+", "missing"])) {
        let resolver = OperatorResolver::standard().unwrap();
        let syntax = if name == "+" { SyntaxKind::Binary } else { SyntaxKind::Function };
        let first = resolver.lookup(name, None, syntax, NameMatchPolicy::CaseInsensitive);
        let second = resolver.lookup(name, None, syntax, NameMatchPolicy::CaseInsensitive);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn all_operators_counts_every_table() {
    let resolver = OperatorResolver::standard().unwrap();
    let total: usize = resolver.tables().iter().map(|t| t.operators().len()).sum();
    assert_eq!(resolver.all_operators().len(), total);
}

#[test]
fn resolver_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OperatorResolver>();

    let resolver = std::sync::Arc::new(OperatorResolver::standard().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = std::sync::Arc::clone(&resolver);
            std::thread::spawn(move || {
                resolver
                    .resolve(&CallSite::function(
                        "XOR",
                        [
                            OperandType::Known(SqlType::Integer.not_null()),
                            OperandType::Known(SqlType::Integer.not_null()),
                        ],
                    ))
                    .map(|r| r.return_type)
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Ok(InferredType::Known(SqlType::Integer.not_null()))
        );
    }
}
