//! Error and diagnostic types

use crate::{ErrorCode, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the call cannot be resolved
    Error,
    /// Warning - resolution succeeded but needs attention
    Warning,
    /// Information - informational message
    Info,
    /// Hint - suggestion for improvement
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Span of the offending call site, when the parser supplied one
    pub span: Option<Span>,
    /// Additional context or help
    pub help: Option<String>,
    /// Related notes (e.g. the candidate overloads that were rejected)
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span: None,
            help: None,
            notes: Vec::new(),
        }
    }

    /// Set the span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a related note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render the diagnostic for a terminal, optionally pointing into `source`
    pub fn render(&self, source: Option<&str>) -> String {
        let mut out = String::new();
        out.push_str(&self.header());
        if let (Some(span), Some(source)) = (self.span, source) {
            let (line, col) = span.line_col(source);
            out.push_str(&format!("\n  --> {}:{}", line, col));
        }
        for note in &self.notes {
            out.push_str(&format!("\n  = note: {}", note));
        }
        let help = self.help.as_deref().or(self.code.info().help);
        if let Some(help) = help {
            out.push_str(&format!("\n  = help: {}", help));
        }
        out
    }

    #[cfg(feature = "colored")]
    fn header(&self) -> String {
        use colored::Colorize;

        let label = format!("{}[{}]", self.severity, self.code);
        let label = match self.severity {
            Severity::Error => label.red().bold(),
            Severity::Warning => label.yellow().bold(),
            Severity::Info | Severity::Hint => label.cyan().bold(),
        };
        format!("{}: {}", label, self.message.bold())
    }

    #[cfg(not(feature = "colored"))]
    fn header(&self) -> String {
        format!("{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(span) = &self.span {
            write!(f, " at {}", span)?;
        }
        Ok(())
    }
}

/// Umbrella error for operator resolution
#[derive(Debug, Clone, Error)]
pub enum SqlOpError {
    /// Malformed type name in a call-site description
    #[error("{code}: {message}")]
    TypeSyntax {
        code: ErrorCode,
        message: String,
        input: String,
    },

    /// Semantic error (lookup, overload resolution, inference)
    #[error("{code}: {message}")]
    Semantic {
        code: ErrorCode,
        message: String,
        span: Option<Span>,
        context: Option<String>,
    },

    /// Malformed operator definition or catalog, detected at build time
    #[error("{code}: {message}")]
    Definition {
        code: ErrorCode,
        message: String,
        operator: Option<String>,
    },

    /// System error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },
}

impl SqlOpError {
    /// Create a type syntax error
    pub fn type_syntax(code: ErrorCode, message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::TypeSyntax {
            code,
            message: message.into(),
            input: input.into(),
        }
    }

    /// Create a semantic error
    pub fn semantic(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Semantic {
            code,
            message: message.into(),
            span: None,
            context: None,
        }
    }

    /// Create a definition error
    pub fn definition(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Definition {
            code,
            message: message.into(),
            operator: None,
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeSyntax { code, .. } => *code,
            Self::Semantic { code, .. } => *code,
            Self::Definition { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Get the span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Semantic { span, .. } => *span,
            _ => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::TypeSyntax { code, message, input } => {
                Diagnostic::error(*code, message.clone()).with_note(format!("in type `{}`", input))
            }
            Self::Semantic { code, message, span, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(span) = span {
                    diag = diag.with_span(*span);
                }
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Definition { code, message, operator } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(op) = operator {
                    diag = diag.with_note(format!("while registering `{}`", op));
                }
                diag
            }
            Self::System { code, message, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
        }
    }
}

/// Builder for creating errors with fluent API
pub struct ErrorBuilder {
    code: ErrorCode,
    message: String,
    span: Option<Span>,
    context: Option<String>,
}

impl ErrorBuilder {
    /// Create a new error builder
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
            context: None,
        }
    }

    /// Set the call-site span
    pub fn at(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// Add context information
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Build a semantic error
    pub fn semantic(self) -> SqlOpError {
        SqlOpError::Semantic {
            code: self.code,
            message: self.message,
            span: self.span,
            context: self.context,
        }
    }

    /// Build a definition error for the named operator
    pub fn definition(self, operator: impl Into<String>) -> SqlOpError {
        SqlOpError::Definition {
            code: self.code,
            message: self.message,
            operator: Some(operator.into()),
        }
    }

    /// Build a system error
    pub fn system(self) -> SqlOpError {
        SqlOpError::System {
            code: self.code,
            message: self.message,
            context: self.context,
        }
    }
}
