//! Operator definitions
//!
//! An [`OperatorDefinition`] is validated when it is built and immutable
//! afterwards. Catalogs hold them behind `Arc` so lookups hand out cheap
//! shared references.

use std::fmt;
use thiserror::Error;

use sqlop_diagnostics::{ErrorBuilder, SQL0201, SQL0202, SQL0203, SQL0204, SqlOpError};
use sqlop_types::{InferredType, OperandType, format_operand_types};

use crate::inference::{ReturnTypeRule, TypeInferenceError};
use crate::kind::{FunctionCategory, OperatorKind, SyntaxKind};
use crate::operand::OperandSignature;

/// Invalid operator definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Operator name must not be empty")]
    EmptyName,

    #[error("{name}: {syntax} syntax requires a function category")]
    MissingCategory { name: String, syntax: SyntaxKind },

    #[error("{name}: {syntax} syntax must not have a function category, found {category}")]
    UnexpectedCategory {
        name: String,
        syntax: SyntaxKind,
        category: FunctionCategory,
    },

    #[error("{name}: kind {kind:?} cannot use {syntax} syntax")]
    KindMismatch {
        name: String,
        kind: OperatorKind,
        syntax: SyntaxKind,
    },

    /// Binary, prefix and postfix operators have a fixed operand count
    #[error("{name}: {syntax} syntax takes {expected} operand(s), signature is {signature}")]
    ArityMismatch {
        name: String,
        syntax: SyntaxKind,
        expected: usize,
        signature: String,
    },

    /// The return rule cannot be applied to every accepted call
    #[error("{name}: {source}")]
    ReturnType {
        name: String,
        #[source]
        source: TypeInferenceError,
    },
}

impl From<DefinitionError> for SqlOpError {
    fn from(err: DefinitionError) -> Self {
        let (code, operator) = match &err {
            DefinitionError::EmptyName => (SQL0201, String::new()),
            DefinitionError::MissingCategory { name, .. }
            | DefinitionError::UnexpectedCategory { name, .. } => (SQL0202, name.clone()),
            DefinitionError::KindMismatch { name, .. }
            | DefinitionError::ArityMismatch { name, .. } => (SQL0203, name.clone()),
            DefinitionError::ReturnType { name, .. } => (SQL0204, name.clone()),
        };
        ErrorBuilder::new(code, err.to_string()).definition(operator)
    }
}

/// A registered operator or function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDefinition {
    name: String,
    kind: OperatorKind,
    syntax: SyntaxKind,
    category: Option<FunctionCategory>,
    operands: OperandSignature,
    return_type: ReturnTypeRule,
}

impl OperatorDefinition {
    /// Validate and create a definition
    pub fn new(
        name: impl Into<String>,
        kind: OperatorKind,
        syntax: SyntaxKind,
        category: Option<FunctionCategory>,
        operands: OperandSignature,
        return_type: ReturnTypeRule,
    ) -> Result<Self, DefinitionError> {
        let definition = Self {
            name: name.into(),
            kind,
            syntax,
            category,
            operands,
            return_type,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Function called as `NAME(args)`
    pub fn function(
        name: impl Into<String>,
        kind: OperatorKind,
        category: FunctionCategory,
        operands: OperandSignature,
        return_type: ReturnTypeRule,
    ) -> Result<Self, DefinitionError> {
        Self::new(name, kind, SyntaxKind::Function, Some(category), operands, return_type)
    }

    /// Infix operator
    pub fn binary(
        name: impl Into<String>,
        kind: OperatorKind,
        operands: OperandSignature,
        return_type: ReturnTypeRule,
    ) -> Result<Self, DefinitionError> {
        Self::new(name, kind, SyntaxKind::Binary, None, operands, return_type)
    }

    /// Prefix operator
    pub fn prefix(
        name: impl Into<String>,
        kind: OperatorKind,
        operands: OperandSignature,
        return_type: ReturnTypeRule,
    ) -> Result<Self, DefinitionError> {
        Self::new(name, kind, SyntaxKind::Prefix, None, operands, return_type)
    }

    /// Postfix operator
    pub fn postfix(
        name: impl Into<String>,
        kind: OperatorKind,
        operands: OperandSignature,
        return_type: ReturnTypeRule,
    ) -> Result<Self, DefinitionError> {
        Self::new(name, kind, SyntaxKind::Postfix, None, operands, return_type)
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        match (self.syntax.is_function(), self.category) {
            (true, None) => {
                return Err(DefinitionError::MissingCategory {
                    name: self.name.clone(),
                    syntax: self.syntax,
                });
            }
            (false, Some(category)) => {
                return Err(DefinitionError::UnexpectedCategory {
                    name: self.name.clone(),
                    syntax: self.syntax,
                    category,
                });
            }
            _ => {}
        }

        if !self.kind.allows(self.syntax) {
            return Err(DefinitionError::KindMismatch {
                name: self.name.clone(),
                kind: self.kind,
                syntax: self.syntax,
            });
        }

        let expected = match self.syntax {
            SyntaxKind::Binary => Some(2),
            SyntaxKind::Prefix | SyntaxKind::Postfix => Some(1),
            _ => None,
        };
        if let Some(expected) = expected {
            let fixed = self.operands.max_operands() == Some(expected)
                && self.operands.min_operands() == expected;
            if !fixed {
                return Err(DefinitionError::ArityMismatch {
                    name: self.name.clone(),
                    syntax: self.syntax,
                    expected,
                    signature: self.operands.to_string(),
                });
            }
        }

        if let Some(index) = self.return_type.operand_index() {
            let min = self.operands.min_operands();
            if index >= min {
                return Err(DefinitionError::ReturnType {
                    name: self.name.clone(),
                    source: TypeInferenceError::MissingOperand { index, count: min },
                });
            }
        }

        Ok(())
    }

    // === Accessors ===

    /// Canonical name, as registered
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn syntax(&self) -> SyntaxKind {
        self.syntax
    }

    pub fn category(&self) -> Option<FunctionCategory> {
        self.category
    }

    pub fn operands(&self) -> &OperandSignature {
        &self.operands
    }

    pub fn return_type(&self) -> &ReturnTypeRule {
        &self.return_type
    }

    // === Matching and inference ===

    /// Check whether this definition accepts these operand types
    pub fn matches(&self, operand_types: &[OperandType]) -> bool {
        self.operands.matches(operand_types)
    }

    /// Infer the result type of a call with these operand types
    ///
    /// Fails if the operand types are not accepted by the signature.
    pub fn infer(&self, operand_types: &[OperandType]) -> Result<InferredType, TypeInferenceError> {
        if !self.matches(operand_types) {
            return Err(TypeInferenceError::SignatureMismatch {
                signature: self.signature(),
                operands: format_operand_types(operand_types),
            });
        }
        self.return_type.infer(operand_types)
    }

    /// Call shape with operand families, e.g. `XOR(<INTEGER>, <INTEGER>)`
    /// or `<NUMERIC> + <NUMERIC>`
    pub fn signature(&self) -> String {
        let family = |i: usize| {
            self.operands
                .family_at(i)
                .map(|f| format!("<{}>", f))
                .unwrap_or_default()
        };
        match self.syntax {
            SyntaxKind::Binary => format!("{} {} {}", family(0), self.name, family(1)),
            SyntaxKind::Prefix => format!("{}{}", self.name, family(0)),
            SyntaxKind::Postfix => format!("{} {}", family(0), self.name),
            SyntaxKind::FunctionId if self.operands.max_operands() == Some(0) => self.name.clone(),
            SyntaxKind::FunctionStar => format!("{}(*)", self.name),
            _ => format!("{}{}", self.name, self.operands),
        }
    }
}

impl fmt::Display for OperatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.signature(), self.return_type)
    }
}
