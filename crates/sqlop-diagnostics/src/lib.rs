//! Diagnostics for SQL operator resolution
//!
//! This crate provides the error handling infrastructure shared by the type
//! model, the operator catalogs and the resolver: structured error codes,
//! source spans of call sites, and diagnostic reporting.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for operator resolution
pub type Result<T> = std::result::Result<T, SqlOpError>;
