//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use tabled::{Table, Tabled, settings::Style};

use sqlop_diagnostics::SqlOpError;
use sqlop_operators::OperatorDefinition;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stdout().is_terminal()),
    }
}

/// Format an error for display
///
/// Operator errors carried inside the `anyhow::Error` are rendered as
/// diagnostics with their code and help text.
pub fn format_error(error: &anyhow::Error) -> String {
    if let Some(err) = error.downcast_ref::<SqlOpError>() {
        return err.to_diagnostic().render(None);
    }
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// One operator as shown by `list` and `lookup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct OperatorSummary {
    #[tabled(rename = "Catalog")]
    pub catalog: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Syntax")]
    pub syntax: String,
    #[tabled(rename = "Category", display_with = "display_category")]
    pub category: Option<String>,
    #[tabled(rename = "Signature")]
    pub signature: String,
    #[tabled(rename = "Returns")]
    pub returns: String,
}

fn display_category(category: &Option<String>) -> String {
    category.clone().unwrap_or_else(|| "-".to_string())
}

impl OperatorSummary {
    pub fn new(catalog: &str, definition: &OperatorDefinition) -> Self {
        Self {
            catalog: catalog.to_string(),
            name: definition.name().to_string(),
            syntax: definition.syntax().to_string(),
            category: definition.category().map(|c| c.to_string()),
            signature: definition.signature(),
            returns: definition.return_type().to_string(),
        }
    }
}

/// Render summaries in the requested format
pub fn render_operators(rows: &[OperatorSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows).context("Failed to serialize JSON"),
        OutputFormat::Table if rows.is_empty() => Ok("(no operators)".to_string()),
        OutputFormat::Table => Ok(Table::new(rows).with(Style::modern()).to_string()),
    }
}
