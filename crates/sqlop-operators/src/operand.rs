//! Operand signatures and the operand matcher
//!
//! A signature is either a fixed list of families (one per operand) or a
//! variadic family with a minimum count. Matching is a plain predicate: it
//! does not rank overloads, callers break ties by catalog priority and
//! declaration order.

use smallvec::SmallVec;
use std::fmt;

use sqlop_types::{DataType, OperandType, TypeCoercer, TypeFamily};

/// Extra constraint across all operands of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Consistency {
    /// Operands are checked independently
    #[default]
    None,
    /// Known operands must share a least restrictive common type
    LeastRestrictive,
}

/// Operand signature of an operator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperandSignature {
    /// Exactly one operand per family, in order
    Fixed {
        families: SmallVec<[TypeFamily; 4]>,
        consistency: Consistency,
    },
    /// Any number of operands, at least `min`, each of `family`
    Variadic {
        family: TypeFamily,
        min: usize,
        consistency: Consistency,
    },
}

impl OperandSignature {
    // === Constructors ===

    /// Fixed signature with one operand per family
    pub fn family(families: impl IntoIterator<Item = TypeFamily>) -> Self {
        Self::Fixed {
            families: families.into_iter().collect(),
            consistency: Consistency::None,
        }
    }

    /// No operands at all
    pub fn niladic() -> Self {
        Self::family([])
    }

    /// Single numeric operand
    pub fn numeric() -> Self {
        Self::family([TypeFamily::Numeric])
    }

    /// Two numeric operands
    pub fn numeric_numeric() -> Self {
        Self::family([TypeFamily::Numeric, TypeFamily::Numeric])
    }

    /// Single character operand
    pub fn string() -> Self {
        Self::family([TypeFamily::Character])
    }

    /// Single operand of any type
    pub fn any() -> Self {
        Self::family([TypeFamily::Any])
    }

    /// Two operands of any type that can be compared with each other
    pub fn comparable_pair() -> Self {
        Self::family([TypeFamily::Any, TypeFamily::Any]).same_type()
    }

    /// Any number of operands of any type
    pub fn variadic() -> Self {
        Self::variadic_of(TypeFamily::Any, 0)
    }

    /// At least `min` operands of `family`
    pub fn variadic_of(family: TypeFamily, min: usize) -> Self {
        Self::Variadic {
            family,
            min,
            consistency: Consistency::None,
        }
    }

    /// Require the known operands to share a common type
    pub fn same_type(self) -> Self {
        match self {
            Self::Fixed { families, .. } => Self::Fixed {
                families,
                consistency: Consistency::LeastRestrictive,
            },
            Self::Variadic { family, min, .. } => Self::Variadic {
                family,
                min,
                consistency: Consistency::LeastRestrictive,
            },
        }
    }

    // === Properties ===

    /// Smallest number of operands accepted
    pub fn min_operands(&self) -> usize {
        match self {
            Self::Fixed { families, .. } => families.len(),
            Self::Variadic { min, .. } => *min,
        }
    }

    /// Largest number of operands accepted, `None` when unbounded
    pub fn max_operands(&self) -> Option<usize> {
        match self {
            Self::Fixed { families, .. } => Some(families.len()),
            Self::Variadic { .. } => None,
        }
    }

    /// Check if a call with `count` operands has an acceptable arity
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_operands() && self.max_operands().is_none_or(|max| count <= max)
    }

    /// Declared family of the operand at `index`
    pub fn family_at(&self, index: usize) -> Option<TypeFamily> {
        match self {
            Self::Fixed { families, .. } => families.get(index).copied(),
            Self::Variadic { family, .. } => Some(*family),
        }
    }

    fn consistency(&self) -> Consistency {
        match self {
            Self::Fixed { consistency, .. } | Self::Variadic { consistency, .. } => *consistency,
        }
    }

    // === Matching ===

    /// Check whether this signature accepts a call with these operand types
    ///
    /// Unknown operands are accepted in any position; their type is settled
    /// in a later pass.
    pub fn matches(&self, operands: &[OperandType]) -> bool {
        if !self.accepts_arity(operands.len()) {
            return false;
        }

        let families_ok = operands.iter().enumerate().all(|(i, operand)| match operand {
            OperandType::Unknown => true,
            OperandType::Known(ty) => self
                .family_at(i)
                .is_some_and(|family| family.contains(&ty.sql_type)),
        });
        if !families_ok {
            return false;
        }

        match self.consistency() {
            Consistency::None => true,
            Consistency::LeastRestrictive => {
                let known: Vec<DataType> =
                    operands.iter().filter_map(|o| o.known().cloned()).collect();
                known.is_empty() || TypeCoercer::new().least_restrictive(&known).is_some()
            }
        }
    }
}

impl fmt::Display for OperandSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { families, .. } => {
                let rendered: Vec<String> = families.iter().map(|fam| format!("<{}>", fam)).collect();
                write!(f, "({})", rendered.join(", "))
            }
            Self::Variadic { family, min, .. } => match min {
                0 => write!(f, "(<{}>*)", family),
                1 => write!(f, "(<{}>+)", family),
                n => write!(f, "(<{}>{{{},}})", family, n),
            },
        }
    }
}
