//! Return type inference
//!
//! A [`ReturnTypeRule`] is a base rule that picks the result type plus a
//! [`NullPolicy`] that settles its nullability. The named combinations
//! (`DOUBLE_NULLABLE`, `ARG0_FORCE_NULLABLE`, `LEAST_RESTRICTIVE`, ...) are
//! built with the constructors and transforms on [`ReturnTypeRule`].

use std::fmt;
use thiserror::Error;

use sqlop_diagnostics::{SQL0204, SQL0205, SqlOpError};
use sqlop_types::{DataType, InferredType, OperandType, SqlType, TypeCoercer, format_operand_types};

/// Return type inference errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeInferenceError {
    /// The rule takes its type from an operand the call does not have
    #[error("Return type refers to operand {index} but only {count} operand(s) are available")]
    MissingOperand { index: usize, count: usize },

    /// The operands have no least restrictive common type
    #[error("No common type for operands {operands}")]
    NoCommonType { operands: String },

    /// The operands violate the operator's signature
    #[error("Operands {operands} do not match signature {signature}")]
    SignatureMismatch { signature: String, operands: String },

    /// A custom rule rejected an operand
    #[error("{rule}: {reason}")]
    Rejected { rule: &'static str, reason: String },
}

impl From<TypeInferenceError> for SqlOpError {
    fn from(err: TypeInferenceError) -> Self {
        let code = match &err {
            TypeInferenceError::MissingOperand { .. } => SQL0204,
            _ => SQL0205,
        };
        SqlOpError::semantic(code, err.to_string())
    }
}

/// Signature of a custom inference function
///
/// Receives the known operand types and returns the result type; the
/// nullability of the result is applied afterwards by the rule's policy.
pub type CustomInference = fn(&[DataType]) -> Result<SqlType, TypeInferenceError>;

/// How the result type is chosen
#[derive(Clone)]
pub enum TypeRule {
    /// Always this type
    Explicit(SqlType),
    /// Same type as the operand at this position
    Operand(usize),
    /// Least restrictive type of all operands
    LeastRestrictive,
    /// Operator-specific logic
    Custom {
        name: &'static str,
        infer: CustomInference,
    },
}

impl fmt::Debug for TypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(ty) => f.debug_tuple("Explicit").field(ty).finish(),
            Self::Operand(index) => f.debug_tuple("Operand").field(index).finish(),
            Self::LeastRestrictive => f.write_str("LeastRestrictive"),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

impl PartialEq for TypeRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Explicit(a), Self::Explicit(b)) => a == b,
            (Self::Operand(a), Self::Operand(b)) => a == b,
            (Self::LeastRestrictive, Self::LeastRestrictive) => true,
            // Custom rules are identified by name
            (Self::Custom { name: a, .. }, Self::Custom { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeRule {}

/// How the nullability of the result is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullPolicy {
    /// Keep what the base rule produced
    #[default]
    Inherit,
    /// Never nullable
    NotNull,
    /// Nullable if the base type or any operand is nullable
    Propagate,
    /// Always nullable
    Force,
    /// Nullable only if every operand is nullable
    AllNullable,
}

impl NullPolicy {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Inherit => "",
            Self::NotNull => "_NOT_NULL",
            Self::Propagate => "_NULLABLE",
            Self::Force => "_FORCE_NULLABLE",
            Self::AllNullable => "_LEAST_NULLABLE",
        }
    }
}

/// Return type rule of an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTypeRule {
    rule: TypeRule,
    nulls: NullPolicy,
}

impl ReturnTypeRule {
    // === Base rules ===

    /// Always `sql_type`, not nullable
    pub fn explicit(sql_type: SqlType) -> Self {
        Self {
            rule: TypeRule::Explicit(sql_type),
            nulls: NullPolicy::Inherit,
        }
    }

    /// Type of the operand at `index`
    pub fn arg(index: usize) -> Self {
        Self {
            rule: TypeRule::Operand(index),
            nulls: NullPolicy::Inherit,
        }
    }

    /// Least restrictive type of all operands
    pub fn least_restrictive() -> Self {
        Self {
            rule: TypeRule::LeastRestrictive,
            nulls: NullPolicy::Inherit,
        }
    }

    /// Operator-specific inference
    pub fn custom(name: &'static str, infer: CustomInference) -> Self {
        Self {
            rule: TypeRule::Custom { name, infer },
            nulls: NullPolicy::Inherit,
        }
    }

    /// `BOOLEAN`, nullable if any operand is
    pub fn boolean_nullable() -> Self {
        Self::explicit(SqlType::Boolean).nullable_if_any()
    }

    // === Nullability transforms ===

    /// Nullable if any operand is nullable
    pub fn nullable_if_any(self) -> Self {
        self.with_nulls(NullPolicy::Propagate)
    }

    /// Always nullable
    pub fn force_nullable(self) -> Self {
        self.with_nulls(NullPolicy::Force)
    }

    /// Nullable only if all operands are nullable
    pub fn nullable_if_all(self) -> Self {
        self.with_nulls(NullPolicy::AllNullable)
    }

    /// Never nullable
    pub fn not_null(self) -> Self {
        self.with_nulls(NullPolicy::NotNull)
    }

    fn with_nulls(mut self, nulls: NullPolicy) -> Self {
        self.nulls = nulls;
        self
    }

    // === Accessors ===

    pub fn rule(&self) -> &TypeRule {
        &self.rule
    }

    pub fn null_policy(&self) -> NullPolicy {
        self.nulls
    }

    /// Operand index the rule reads its type from, if any
    pub fn operand_index(&self) -> Option<usize> {
        match self.rule {
            TypeRule::Operand(index) => Some(index),
            _ => None,
        }
    }

    /// Name of the rule, e.g. `DOUBLE_NULLABLE` or `ARG0_FORCE_NULLABLE`
    pub fn name(&self) -> String {
        let base = match &self.rule {
            TypeRule::Explicit(ty) => ty.name().to_string(),
            TypeRule::Operand(index) => format!("ARG{}", index),
            TypeRule::LeastRestrictive => "LEAST_RESTRICTIVE".to_string(),
            TypeRule::Custom { name, .. } => (*name).to_string(),
        };
        format!("{}{}", base, self.nulls.suffix())
    }

    /// Check whether the result is known without looking at any operand
    fn is_constant(&self) -> bool {
        matches!(self.rule, TypeRule::Explicit(_))
            && matches!(
                self.nulls,
                NullPolicy::Inherit | NullPolicy::NotNull | NullPolicy::Force
            )
    }

    // === Inference ===

    /// Infer the result type for these operand types
    ///
    /// Returns [`InferredType::Deferred`] when an operand is still unknown and
    /// the result depends on it.
    pub fn infer(&self, operands: &[OperandType]) -> Result<InferredType, TypeInferenceError> {
        if operands.iter().any(OperandType::is_unknown) {
            if !self.is_constant() {
                return Ok(InferredType::Deferred);
            }
            return self.infer_known(&[]).map(InferredType::Known);
        }

        let known: Vec<DataType> = operands.iter().filter_map(|o| o.known().cloned()).collect();
        self.infer_known(&known).map(InferredType::Known)
    }

    /// Infer the result type when every operand type is known
    pub fn infer_known(&self, operands: &[DataType]) -> Result<DataType, TypeInferenceError> {
        let any_nullable = operands.iter().any(|o| o.nullable);

        let (sql_type, base_nullable) = match &self.rule {
            TypeRule::Explicit(ty) => (ty.clone(), false),
            TypeRule::Operand(index) => {
                let operand = operands
                    .get(*index)
                    .ok_or(TypeInferenceError::MissingOperand {
                        index: *index,
                        count: operands.len(),
                    })?;
                (operand.sql_type.clone(), operand.nullable)
            }
            TypeRule::LeastRestrictive => {
                if operands.is_empty() {
                    (SqlType::Null, true)
                } else {
                    let common = TypeCoercer::new().least_restrictive(operands).ok_or_else(|| {
                        TypeInferenceError::NoCommonType {
                            operands: render(operands),
                        }
                    })?;
                    (common.sql_type, common.nullable)
                }
            }
            TypeRule::Custom { infer, .. } => (infer(operands)?, any_nullable),
        };

        let nullable = match self.nulls {
            NullPolicy::Inherit => base_nullable,
            NullPolicy::NotNull => false,
            NullPolicy::Propagate => base_nullable || any_nullable,
            NullPolicy::Force => true,
            NullPolicy::AllNullable => !operands.is_empty() && operands.iter().all(|o| o.nullable),
        };

        // The NULL type only has the NULL value
        let nullable = nullable || sql_type == SqlType::Null;
        Ok(DataType::new(sql_type, nullable))
    }
}

impl fmt::Display for ReturnTypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn render(operands: &[DataType]) -> String {
    let operands: Vec<OperandType> = operands.iter().cloned().map(OperandType::Known).collect();
    format_operand_types(&operands)
}
