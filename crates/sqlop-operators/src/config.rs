//! Resolver configuration
//!
//! ```json
//! { "catalogs": ["custom", "standard", "postgres"], "name_match": "case_insensitive" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use sqlop_diagnostics::{ErrorBuilder, SQL0401, SQL0402, SqlOpError};

use crate::builtin::BuiltinCatalog;
use crate::definition::DefinitionError;
use crate::name_match::NameMatchPolicy;
use crate::resolver::OperatorResolver;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resolver configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No catalogs configured")]
    NoCatalogs,

    #[error("Catalog '{0}' is listed more than once")]
    DuplicateCatalog(BuiltinCatalog),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl From<ConfigError> for SqlOpError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::Definition(def) => return def.clone().into(),
            ConfigError::Io { .. } => SQL0401,
            _ => SQL0402,
        };
        ErrorBuilder::new(code, err.to_string()).system()
    }
}

/// Which catalogs a resolver uses, and how names are matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Catalogs in priority order
    pub catalogs: Vec<BuiltinCatalog>,
    /// Default policy for call sites that do not set one
    pub name_match: NameMatchPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catalogs: BuiltinCatalog::DEFAULT_ORDER.to_vec(),
            name_match: NameMatchPolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the catalog list is non-empty and has no repeats
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalogs.is_empty() {
            return Err(ConfigError::NoCatalogs);
        }
        for (i, id) in self.catalogs.iter().enumerate() {
            if self.catalogs[..i].contains(id) {
                return Err(ConfigError::DuplicateCatalog(*id));
            }
        }
        Ok(())
    }
}

impl OperatorResolver {
    /// Build a resolver from a configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut builder = Self::builder();
        builder.name_match(config.name_match);
        for id in &config.catalogs {
            builder.add_table(id.build()?);
        }
        Ok(builder.build())
    }
}
