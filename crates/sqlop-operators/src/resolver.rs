//! Operator resolution
//!
//! The resolver owns an ordered list of tables. Earlier tables have higher
//! priority: when overloads from several tables accept a call, the first
//! table that has any accepting overload wins, and within it the first
//! accepting overload in declaration order.
//!
//! A resolver is assembled once and never mutated afterwards, so a single
//! `Arc<OperatorResolver>` can serve any number of threads.

use std::sync::Arc;
use thiserror::Error;

use sqlop_diagnostics::{ErrorBuilder, SQL0100, SQL0101, SQL0102, SQL0205, Span, SqlOpError};
use sqlop_types::{InferredType, OperandType, format_operand_types};

use crate::builtin::BuiltinCatalog;
use crate::definition::{DefinitionError, OperatorDefinition};
use crate::inference::TypeInferenceError;
use crate::kind::{FunctionCategory, SyntaxKind};
use crate::name_match::NameMatchPolicy;
use crate::table::OperatorTable;

/// Resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No table has an operator with this name and syntax
    #[error("No operator named '{name}' with {syntax} syntax")]
    OperatorNotFound {
        name: String,
        syntax: SyntaxKind,
        span: Option<Span>,
    },

    /// The name resolved but no overload accepts the operand types
    #[error("No overload of '{name}' accepts operand types {operands}")]
    NoMatchingOverload {
        name: String,
        operands: String,
        /// Signatures of the rejected candidates
        candidates: Vec<String>,
        span: Option<Span>,
    },

    /// Several overloads with the same signature accept the call
    #[error("Call to '{name}' with operand types {operands} is ambiguous: {count} overloads in '{table}' declare {signature}")]
    AmbiguousOverload {
        name: String,
        operands: String,
        table: String,
        signature: String,
        count: usize,
        span: Option<Span>,
    },

    /// The chosen overload could not infer a result type
    #[error("Cannot infer the type of '{name}': {source}")]
    Inference {
        name: String,
        #[source]
        source: TypeInferenceError,
        span: Option<Span>,
    },
}

impl ResolutionError {
    /// Span of the offending call, when known
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::OperatorNotFound { span, .. }
            | Self::NoMatchingOverload { span, .. }
            | Self::AmbiguousOverload { span, .. }
            | Self::Inference { span, .. } => *span,
        }
    }
}

impl From<ResolutionError> for SqlOpError {
    fn from(err: ResolutionError) -> Self {
        let span = err.span();
        let message = err.to_string();
        match err {
            ResolutionError::OperatorNotFound { .. } => {
                ErrorBuilder::new(SQL0100, message).at(span).semantic()
            }
            ResolutionError::NoMatchingOverload { candidates, .. } => {
                let context = format!("candidates: {}", candidates.join("; "));
                ErrorBuilder::new(SQL0101, message).at(span).context(context).semantic()
            }
            ResolutionError::AmbiguousOverload { .. } => {
                ErrorBuilder::new(SQL0102, message).at(span).semantic()
            }
            ResolutionError::Inference { .. } => {
                ErrorBuilder::new(SQL0205, message).at(span).semantic()
            }
        }
    }
}

/// Result type for resolution
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// A call to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub name: String,
    pub syntax: SyntaxKind,
    /// Lookup hint; `None` accepts any category
    pub category: Option<FunctionCategory>,
    pub operand_types: Vec<OperandType>,
    /// Overrides the resolver's default policy
    pub name_match: Option<NameMatchPolicy>,
    pub span: Option<Span>,
}

impl CallSite {
    /// Function call `name(operands...)`
    pub fn function(name: impl Into<String>, operand_types: impl IntoIterator<Item = OperandType>) -> Self {
        Self {
            name: name.into(),
            syntax: SyntaxKind::Function,
            category: None,
            operand_types: operand_types.into_iter().collect(),
            name_match: None,
            span: None,
        }
    }

    pub fn with_syntax(mut self, syntax: SyntaxKind) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_category(mut self, category: FunctionCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_name_match(mut self, policy: NameMatchPolicy) -> Self {
        self.name_match = Some(policy);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    /// The selected overload
    pub operator: Arc<OperatorDefinition>,
    /// Name of the table it came from
    pub table: String,
    /// Position of that table in priority order
    pub tier: usize,
    pub return_type: InferredType,
}

/// Priority-ordered collection of operator tables
#[derive(Debug, Clone)]
pub struct OperatorResolver {
    tables: Vec<Arc<dyn OperatorTable>>,
    name_match: NameMatchPolicy,
}

impl OperatorResolver {
    /// Start assembling a resolver
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolver over the built-in catalogs: custom, then standard, then
    /// postgres
    pub fn standard() -> Result<Self, DefinitionError> {
        let mut builder = Self::builder();
        for id in BuiltinCatalog::DEFAULT_ORDER {
            builder.add_table(id.build()?);
        }
        Ok(builder.build())
    }

    /// Tables in priority order
    pub fn tables(&self) -> &[Arc<dyn OperatorTable>] {
        &self.tables
    }

    /// Default name matching policy
    pub fn name_match(&self) -> NameMatchPolicy {
        self.name_match
    }

    /// Overloads registered under `name`, in priority then declaration order
    ///
    /// An empty result is not an error.
    pub fn lookup(
        &self,
        name: &str,
        category: Option<FunctionCategory>,
        syntax: SyntaxKind,
        policy: NameMatchPolicy,
    ) -> Vec<Arc<OperatorDefinition>> {
        let mut out = Vec::new();
        for table in &self.tables {
            table.lookup_overloads(name, category, syntax, policy, &mut out);
        }
        out
    }

    /// Every definition of every table, in priority order
    pub fn all_operators(&self) -> Vec<Arc<OperatorDefinition>> {
        self.tables.iter().flat_map(|t| t.operators()).collect()
    }

    /// Select the overload for a call and infer its result type
    pub fn resolve(&self, call: &CallSite) -> ResolutionResult<ResolvedCall> {
        let policy = call.name_match.unwrap_or(self.name_match);
        let operands = &call.operand_types;
        let mut candidates = Vec::new();

        for (tier, table) in self.tables.iter().enumerate() {
            let mut overloads = Vec::new();
            table.lookup_overloads(&call.name, call.category, call.syntax, policy, &mut overloads);

            let accepting: Vec<&Arc<OperatorDefinition>> =
                overloads.iter().filter(|def| def.matches(operands)).collect();

            let Some(&chosen) = accepting.first() else {
                candidates.extend(overloads.iter().map(|def| def.signature()));
                continue;
            };

            let duplicates = accepting
                .iter()
                .filter(|def| def.operands() == chosen.operands())
                .count();
            if duplicates > 1 {
                return Err(ResolutionError::AmbiguousOverload {
                    name: call.name.clone(),
                    operands: format_operand_types(operands),
                    table: table.name().to_string(),
                    signature: chosen.signature(),
                    count: duplicates,
                    span: call.span,
                });
            }

            let return_type = chosen.infer(operands).map_err(|source| ResolutionError::Inference {
                name: call.name.clone(),
                source,
                span: call.span,
            })?;

            log::debug!(
                "resolved {}{} to {} from '{}' -> {}",
                call.name,
                format_operand_types(operands),
                chosen.signature(),
                table.name(),
                return_type
            );

            return Ok(ResolvedCall {
                operator: Arc::clone(chosen),
                table: table.name().to_string(),
                tier,
                return_type,
            });
        }

        if candidates.is_empty() {
            return Err(ResolutionError::OperatorNotFound {
                name: call.name.clone(),
                syntax: call.syntax,
                span: call.span,
            });
        }

        Err(ResolutionError::NoMatchingOverload {
            name: call.name.clone(),
            operands: format_operand_types(operands),
            candidates,
            span: call.span,
        })
    }
}

/// Builder for [`OperatorResolver`]
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    tables: Vec<Arc<dyn OperatorTable>>,
    name_match: NameMatchPolicy,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table at the lowest priority so far
    pub fn add_table(&mut self, table: impl OperatorTable + 'static) -> &mut Self {
        self.tables.push(Arc::new(table));
        self
    }

    /// Set the default name matching policy
    pub fn name_match(&mut self, policy: NameMatchPolicy) -> &mut Self {
        self.name_match = policy;
        self
    }

    /// Build the resolver
    pub fn build(&self) -> OperatorResolver {
        for (i, table) in self.tables.iter().enumerate() {
            if self.tables[..i].iter().any(|t| t.name() == table.name()) {
                log::warn!("operator table '{}' is registered more than once", table.name());
            }
        }
        log::debug!(
            "operator resolver with {} table(s): {}",
            self.tables.len(),
            self.tables
                .iter()
                .map(|t| format!("{} ({})", t.name(), t.operators().len()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        OperatorResolver {
            tables: self.tables.clone(),
            name_match: self.name_match,
        }
    }
}
