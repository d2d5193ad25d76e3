//! Error codes following a structured numbering system
//!
//! Error code ranges:
//! - SQL0001-SQL0099: Type syntax errors (type names in call-site descriptions)
//! - SQL0100-SQL0199: Semantic errors (operator lookup, overload resolution)
//! - SQL0200-SQL0299: Definition errors (malformed operators and catalogs)
//! - SQL0400-SQL0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a type syntax error (0001-0099)
    pub const fn is_type_syntax_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a semantic error (0100-0199)
    pub const fn is_semantic_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a definition error (0200-0299)
    pub const fn is_definition_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Type syntax errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unknown type name"));
    map.insert(2, ErrorInfo::new("Invalid type parameters"));
    map.insert(3, ErrorInfo::new("Invalid nullability clause"));

    // Semantic errors (0100-0199)
    map.insert(100, ErrorInfo::new("Operator not found")
        .with_help("Check the spelling of the function name and the enabled operator catalogs"));
    map.insert(101, ErrorInfo::new("No matching operator overload")
        .with_help("Cast the arguments to types accepted by one of the overloads"));
    map.insert(102, ErrorInfo::new("Ambiguous operator overload"));

    // Definition errors (0200-0299)
    map.insert(201, ErrorInfo::new("Empty operator name"));
    map.insert(202, ErrorInfo::new("Function category inconsistent with syntax"));
    map.insert(203, ErrorInfo::new("Operator kind inconsistent with syntax"));
    map.insert(204, ErrorInfo::new("Return type rule refers to a missing operand"));
    map.insert(205, ErrorInfo::new("Type inference failed for accepted operands"));

    // System errors (0400-0499)
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));

    map
});

// Convenient error code constants

// Type syntax errors
pub const SQL0001: ErrorCode = ErrorCode::new(1);
pub const SQL0002: ErrorCode = ErrorCode::new(2);
pub const SQL0003: ErrorCode = ErrorCode::new(3);

// Semantic errors
pub const SQL0100: ErrorCode = ErrorCode::new(100);
pub const SQL0101: ErrorCode = ErrorCode::new(101);
pub const SQL0102: ErrorCode = ErrorCode::new(102);

// Definition errors
pub const SQL0201: ErrorCode = ErrorCode::new(201);
pub const SQL0202: ErrorCode = ErrorCode::new(202);
pub const SQL0203: ErrorCode = ErrorCode::new(203);
pub const SQL0204: ErrorCode = ErrorCode::new(204);
pub const SQL0205: ErrorCode = ErrorCode::new(205);

// System errors
pub const SQL0401: ErrorCode = ErrorCode::new(401);
pub const SQL0402: ErrorCode = ErrorCode::new(402);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(SQL0001.to_string(), "SQL0001");
        assert_eq!(SQL0101.to_string(), "SQL0101");
    }

    #[test]
    fn test_error_categories() {
        assert!(SQL0001.is_type_syntax_error());
        assert!(!SQL0001.is_semantic_error());

        assert!(SQL0100.is_semantic_error());
        assert!(SQL0204.is_definition_error());
        assert!(SQL0402.is_system_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(SQL0101.info().description, "No matching operator overload");
        assert!(SQL0100.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }

    #[test]
    fn test_only_emitted_codes_are_registered() {
        for code in [103, 104, 200, 400] {
            assert_eq!(ErrorCode::new(code).info().description, "Unknown error");
        }
        assert_eq!(SQL0201.info().description, "Empty operator name");
        assert_eq!(SQL0401.info().description, "I/O error");
    }
}
