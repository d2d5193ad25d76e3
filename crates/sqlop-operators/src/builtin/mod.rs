//! Built-in operator catalogs

mod custom;
mod postgres;
mod standard;

pub use custom::{custom_catalog, widest_nullable};
pub use postgres::postgres_catalog;
pub use standard::standard_catalog;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::definition::DefinitionError;
use crate::table::OperatorCatalog;

/// Identifier of a built-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCatalog {
    Custom,
    Standard,
    Postgres,
}

impl BuiltinCatalog {
    /// Default priority order
    pub const DEFAULT_ORDER: [BuiltinCatalog; 3] = [Self::Custom, Self::Standard, Self::Postgres];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Standard => "standard",
            Self::Postgres => "postgres",
        }
    }

    /// Build the catalog
    pub fn build(&self) -> Result<OperatorCatalog, DefinitionError> {
        match self {
            Self::Custom => custom_catalog(),
            Self::Standard => standard_catalog(),
            Self::Postgres => postgres_catalog(),
        }
    }
}

impl fmt::Display for BuiltinCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
