//! Operator tables
//!
//! [`OperatorTable`] is the seam the resolver works against; any source of
//! definitions can sit behind it. [`OperatorCatalog`] is the list-backed
//! implementation used for the built-in catalogs.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::definition::OperatorDefinition;
use crate::kind::{FunctionCategory, SyntaxKind};
use crate::name_match::NameMatchPolicy;

/// A source of operator definitions
pub trait OperatorTable: Send + Sync + fmt::Debug {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Append the overloads registered under `name` to `out`
    ///
    /// Filters by syntax family, and by category when one is given. Results
    /// are in declaration order.
    fn lookup_overloads(
        &self,
        name: &str,
        category: Option<FunctionCategory>,
        syntax: SyntaxKind,
        policy: NameMatchPolicy,
        out: &mut Vec<Arc<OperatorDefinition>>,
    );

    /// Every definition in declaration order
    fn operators(&self) -> Vec<Arc<OperatorDefinition>>;
}

/// Ordered list of operator definitions
///
/// Duplicate names are allowed; each is an overload.
#[derive(Debug, Clone, Default)]
pub struct OperatorCatalog {
    name: String,
    definitions: Vec<Arc<OperatorDefinition>>,
    /// Upper-cased name -> positions in `definitions`
    by_name: IndexMap<String, SmallVec<[usize; 2]>>,
}

impl OperatorCatalog {
    /// Create an empty catalog
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a catalog from definitions, keeping their order
    pub fn with_definitions(
        name: impl Into<String>,
        definitions: impl IntoIterator<Item = OperatorDefinition>,
    ) -> Self {
        let mut catalog = Self::new(name);
        for definition in definitions {
            catalog.add(definition);
        }
        catalog
    }

    /// Append a definition
    pub fn add(&mut self, definition: OperatorDefinition) -> &mut Self {
        let key = definition.name().to_ascii_uppercase();
        self.by_name
            .entry(key)
            .or_default()
            .push(self.definitions.len());
        self.definitions.push(Arc::new(definition));
        self
    }

    /// All definitions in declaration order
    pub fn all(&self) -> &[Arc<OperatorDefinition>] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Distinct upper-cased names in first-registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl OperatorTable for OperatorCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_overloads(
        &self,
        name: &str,
        category: Option<FunctionCategory>,
        syntax: SyntaxKind,
        policy: NameMatchPolicy,
        out: &mut Vec<Arc<OperatorDefinition>>,
    ) {
        let Some(positions) = self.by_name.get(&name.to_ascii_uppercase()) else {
            return;
        };

        let before = out.len();
        out.extend(
            positions
                .iter()
                .map(|&i| &self.definitions[i])
                .filter(|def| policy.matches(def.name(), name))
                .filter(|def| def.syntax().family() == syntax.family())
                .filter(|def| category.is_none() || def.category() == category)
                .cloned(),
        );
        log::trace!(
            "{}: {} overload(s) of {} ({})",
            self.name,
            out.len() - before,
            name,
            syntax
        );
    }

    fn operators(&self) -> Vec<Arc<OperatorDefinition>> {
        self.definitions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ReturnTypeRule;
    use crate::kind::OperatorKind;
    use crate::operand::OperandSignature;
    use sqlop_types::SqlType;

    fn function(name: &str, category: FunctionCategory) -> OperatorDefinition {
        OperatorDefinition::function(
            name,
            OperatorKind::OtherFunction,
            category,
            OperandSignature::numeric(),
            ReturnTypeRule::explicit(SqlType::Double),
        )
        .unwrap()
    }

    fn lookup(
        catalog: &OperatorCatalog,
        name: &str,
        category: Option<FunctionCategory>,
        syntax: SyntaxKind,
        policy: NameMatchPolicy,
    ) -> Vec<Arc<OperatorDefinition>> {
        let mut out = Vec::new();
        catalog.lookup_overloads(name, category, syntax, policy, &mut out);
        out
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut catalog = OperatorCatalog::new("test");
        catalog
            .add(function("LOG", FunctionCategory::Numeric))
            .add(function("LN", FunctionCategory::Numeric))
            .add(function("LOG", FunctionCategory::Numeric));
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.all().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["LOG", "LN", "LOG"]);
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["LOG", "LN"]);
    }

    #[test]
    fn test_lookup_name_policy() {
        let catalog = OperatorCatalog::with_definitions("test", [function("LOG2", FunctionCategory::Numeric)]);
        let insensitive = NameMatchPolicy::CaseInsensitive;
        let sensitive = NameMatchPolicy::CaseSensitive;
        assert_eq!(lookup(&catalog, "log2", None, SyntaxKind::Function, insensitive).len(), 1);
        assert!(lookup(&catalog, "log2", None, SyntaxKind::Function, sensitive).is_empty());
        assert_eq!(lookup(&catalog, "LOG2", None, SyntaxKind::Function, sensitive).len(), 1);
    }

    #[test]
    fn test_lookup_filters_syntax_and_category() {
        let catalog = OperatorCatalog::with_definitions(
            "test",
            [function("F", FunctionCategory::Numeric), function("F", FunctionCategory::String)],
        );
        let policy = NameMatchPolicy::CaseInsensitive;
        assert_eq!(lookup(&catalog, "F", None, SyntaxKind::FunctionId, policy).len(), 2);
        assert_eq!(
            lookup(&catalog, "F", Some(FunctionCategory::String), SyntaxKind::Function, policy).len(),
            1
        );
        assert!(lookup(&catalog, "F", None, SyntaxKind::Binary, policy).is_empty());
        assert!(lookup(&catalog, "G", None, SyntaxKind::Function, policy).is_empty());
    }
}
