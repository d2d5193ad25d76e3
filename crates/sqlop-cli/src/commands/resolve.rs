//! Resolve command implementation

use anyhow::{Context, Result};
use colored::Colorize;

use sqlop_diagnostics::SqlOpError;
use sqlop_operators::{CallSite, FunctionCategory, NameMatchPolicy, OperatorResolver, ResolvedCall, SyntaxKind};
use sqlop_types::OperandType;

/// Configuration for resolve command
pub struct ResolveConfig {
    pub name: String,
    pub types: Vec<String>,
    pub syntax: SyntaxKind,
    pub category: Option<FunctionCategory>,
    pub case_sensitive: bool,
}

/// Parse operand type strings such as `INTEGER`, `VARCHAR(20) NOT NULL` or `?`
pub fn parse_operands(types: &[String]) -> Result<Vec<OperandType>> {
    types
        .iter()
        .map(|spec| {
            spec.parse::<OperandType>()
                .with_context(|| format!("Invalid operand type '{}'", spec))
        })
        .collect()
}

/// Build the call site described by the config
pub fn call_site(config: &ResolveConfig) -> Result<CallSite> {
    let mut call = CallSite::function(&config.name, parse_operands(&config.types)?).with_syntax(config.syntax);
    if let Some(category) = config.category {
        call = call.with_category(category);
    }
    if config.case_sensitive {
        call = call.with_name_match(NameMatchPolicy::CaseSensitive);
    }
    Ok(call)
}

fn describe(resolved: &ResolvedCall) -> String {
    format!(
        "{} {}\n{} {} (tier {})\n{} {}",
        "Operator:".bold(),
        resolved.operator.signature(),
        "Catalog: ".bold(),
        resolved.table,
        resolved.tier,
        "Returns: ".bold(),
        resolved.return_type.to_string().green()
    )
}

/// Resolve a call and print the chosen overload
///
/// A resolution failure comes back as a [`SqlOpError`] inside the
/// `anyhow::Error`, which [`format_error`] renders as a diagnostic.
///
/// [`format_error`]: crate::output::format_error
pub fn resolve(resolver: &OperatorResolver, config: ResolveConfig) -> Result<()> {
    let call = call_site(&config)?;
    let resolved = resolver.resolve(&call).map_err(SqlOpError::from)?;
    println!("{}", describe(&resolved));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlop_diagnostics::SQL0101;
    use sqlop_types::{InferredType, SqlType};

    fn config(name: &str, types: &[&str]) -> ResolveConfig {
        ResolveConfig {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            syntax: SyntaxKind::Function,
            category: None,
            case_sensitive: false,
        }
    }

    #[test]
    fn test_parse_operands() {
        let operands = parse_operands(&["INTEGER NOT NULL".to_string(), "?".to_string()]).unwrap();
        assert_eq!(
            operands,
            [OperandType::Known(SqlType::Integer.not_null()), OperandType::Unknown]
        );
        let err = parse_operands(&["INTEGR".to_string()]).unwrap_err();
        assert!(err.to_string().contains("INTEGR"));
    }

    #[test]
    fn test_call_site_resolves() {
        let resolver = OperatorResolver::standard().unwrap();
        let call = call_site(&config("xor", &["INTEGER NOT NULL", "SMALLINT"])).unwrap();
        let resolved = resolver.resolve(&call).unwrap();
        assert_eq!(resolved.table, "custom");
        assert_eq!(
            resolved.return_type,
            InferredType::Known(SqlType::Integer.not_null())
        );
    }

    #[test]
    fn test_failure_renders_candidates() {
        let resolver = OperatorResolver::standard().unwrap();
        let call = call_site(&config("XOR", &["DOUBLE", "INTEGER"])).unwrap();
        let err = SqlOpError::from(resolver.resolve(&call).unwrap_err());
        assert_eq!(err.code(), SQL0101);
        let rendered = err.to_diagnostic().render(None);
        assert!(rendered.contains("XOR(<INTEGER>, <INTEGER>)"));
    }

    #[test]
    fn test_resolve_failure_is_returned() {
        let resolver = OperatorResolver::standard().unwrap();
        let err = resolve(&resolver, config("XOR", &["DOUBLE", "INTEGER"])).unwrap_err();
        let diagnostic = err
            .downcast_ref::<SqlOpError>()
            .expect("resolution failure keeps its diagnostic");
        assert_eq!(diagnostic.code(), SQL0101);
    }
}
