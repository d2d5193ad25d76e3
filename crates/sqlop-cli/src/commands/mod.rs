//! `sqlop` subcommands

pub mod list;
pub mod lookup;
pub mod resolve;

use anyhow::{Context, Result};
use std::path::Path;

use sqlop_operators::{FunctionCategory, OperatorResolver, ResolverConfig, SyntaxKind};

/// Build the resolver from a config file, or the built-in catalogs
pub fn load_resolver(config: Option<&Path>) -> Result<OperatorResolver> {
    let config = match config {
        Some(path) => ResolverConfig::from_path(path)
            .with_context(|| format!("Failed to load resolver config {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    OperatorResolver::from_config(&config).context("Failed to build resolver")
}

/// Parse a syntax name such as `binary` or `function-star`
pub fn parse_syntax(value: &str) -> Result<SyntaxKind, String> {
    parse_snake_case(value)
}

/// Parse a category name such as `numeric` or `user-defined`
pub fn parse_category(value: &str) -> Result<FunctionCategory, String> {
    parse_snake_case(value)
}

fn parse_snake_case<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, String> {
    let normalized = value.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized)).map_err(|e| e.to_string())
}
