//! Lookup command implementation

use anyhow::Result;
use colored::Colorize;

use sqlop_operators::{FunctionCategory, NameMatchPolicy, OperatorResolver, OperatorTable, SyntaxKind};

use crate::output::{self, OperatorSummary, OutputFormat};

/// Configuration for lookup command
pub struct LookupConfig {
    pub name: String,
    pub syntax: SyntaxKind,
    pub category: Option<FunctionCategory>,
    pub case_sensitive: bool,
    pub format: OutputFormat,
}

impl LookupConfig {
    fn policy(&self, resolver: &OperatorResolver) -> NameMatchPolicy {
        if self.case_sensitive {
            NameMatchPolicy::CaseSensitive
        } else {
            resolver.name_match()
        }
    }
}

/// Overloads for a name, tagged with the catalog that holds each one
pub fn overloads(resolver: &OperatorResolver, config: &LookupConfig) -> Vec<OperatorSummary> {
    let policy = config.policy(resolver);
    let mut rows = Vec::new();
    for table in resolver.tables() {
        let mut found = Vec::new();
        table.lookup_overloads(&config.name, config.category, config.syntax, policy, &mut found);
        rows.extend(found.iter().map(|def| OperatorSummary::new(table.name(), def)));
    }
    rows
}

/// Print the raw overload list for a name
pub fn lookup(resolver: &OperatorResolver, config: LookupConfig) -> Result<()> {
    let rows = overloads(resolver, &config);
    if rows.is_empty() && config.format == OutputFormat::Table {
        eprintln!(
            "{}",
            output::format_warning(&format!(
                "no {} operator named {}",
                config.syntax,
                config.name.bold()
            ))
        );
        return Ok(());
    }
    println!("{}", output::render_operators(&rows, config.format)?);
    Ok(())
}
