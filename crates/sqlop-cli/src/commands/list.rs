//! List command implementation

use anyhow::Result;

use sqlop_operators::{FunctionCategory, OperatorResolver, OperatorTable};

use crate::output::{self, OperatorSummary, OutputFormat};

/// Configuration for list command
pub struct ListConfig {
    pub category: Option<FunctionCategory>,
    pub format: OutputFormat,
}

/// Every operator of every catalog in priority order
pub fn summaries(resolver: &OperatorResolver, category: Option<FunctionCategory>) -> Vec<OperatorSummary> {
    resolver
        .tables()
        .iter()
        .flat_map(|table| {
            table
                .operators()
                .into_iter()
                .filter(|def| category.is_none() || def.category() == category)
                .map(|def| OperatorSummary::new(table.name(), &def))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Print the operator catalog
pub fn list(resolver: &OperatorResolver, config: ListConfig) -> Result<()> {
    let rows = summaries(resolver, config.category);
    log::debug!("listing {} operators", rows.len());
    println!("{}", output::render_operators(&rows, config.format)?);
    Ok(())
}
