//! SQL operator resolution
//!
//! This crate provides:
//! - Operand signatures and the operand matcher
//! - Return type rules with nullability transforms
//! - Validated operator definitions and list-backed catalogs
//! - The built-in custom, standard and PostgreSQL catalogs
//! - A priority-ordered resolver that selects an overload and infers its
//!   result type

pub mod builtin;
pub mod config;
pub mod definition;
pub mod inference;
pub mod kind;
pub mod name_match;
pub mod operand;
pub mod resolver;
pub mod table;

pub use builtin::BuiltinCatalog;
pub use config::{ConfigError, ResolverConfig};
pub use definition::{DefinitionError, OperatorDefinition};
pub use inference::{NullPolicy, ReturnTypeRule, TypeInferenceError, TypeRule};
pub use kind::{FunctionCategory, OperatorKind, SyntaxKind};
pub use name_match::NameMatchPolicy;
pub use operand::{Consistency, OperandSignature};
pub use resolver::{
    CallSite, OperatorResolver, ResolutionError, ResolutionResult, ResolvedCall, ResolverBuilder,
};
pub use table::{OperatorCatalog, OperatorTable};
