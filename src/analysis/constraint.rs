use crate::model::PackageGraph;
use crate::output::text;
use serde::Serialize;
use std::collections::BTreeSet;

/// An expected package graph that the real graph must equal exactly.
///
/// Every real package has to be declared, and every declared package that
/// exists has to have the same afferent and efferent names as its real
/// counterpart.
#[derive(Debug, Clone, Default)]
pub struct DependencyConstraint {
    base: String,
    expected: PackageGraph,
}

impl DependencyConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared names are prefixed with `base`, followed by a dot unless it
    /// already ends with one.
    pub fn with_base(base: &str) -> Self {
        let base = if base.is_empty() || base.ends_with('.') {
            base.to_string()
        } else {
            format!("{}.", base)
        };
        Self {
            base,
            expected: PackageGraph::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Declare a package and return its full name. Declaring twice is a no-op.
    pub fn add_package(&mut self, name: &str) -> String {
        let full = self.qualify(name);
        self.expected.add_package(&full);
        full
    }

    /// Declare that `from` depends upon `to`, declaring both packages.
    pub fn depends_upon(&mut self, from: &str, to: &str) -> &mut Self {
        let from = self.add_package(from);
        let to = self.add_package(to);
        self.expected.depends_upon(&from, &to);
        self
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.expected.package_names()
    }

    pub fn matches(&self, graph: &PackageGraph) -> MatchResult {
        let mut result = MatchResult::default();

        for actual in graph.packages() {
            let Some(expected) = self.expected.package(actual.name()) else {
                result.undefined.push(actual.name().to_string());
                continue;
            };

            let mismatch = PackageMismatch {
                name: actual.name().to_string(),
                expected_afferents: expected.afferents().iter().cloned().collect(),
                actual_afferents: actual.afferents().iter().cloned().collect(),
                expected_efferents: expected.efferents().iter().cloned().collect(),
                actual_efferents: actual.efferents().iter().cloned().collect(),
            };
            if mismatch.afferents_differ() || mismatch.efferents_differ() {
                result.non_matching.push(mismatch);
            }
        }

        result
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }
}

/// Outcome of [`DependencyConstraint::matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Real packages the constraint does not declare, in graph order.
    pub undefined: Vec<String>,
    pub non_matching: Vec<PackageMismatch>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.undefined.is_empty() && self.non_matching.is_empty()
    }

    pub fn check(&self) -> Result<(), String> {
        if self.is_match() {
            Ok(())
        } else {
            Err(text::constraint_mismatch(self))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMismatch {
    pub name: String,
    pub expected_afferents: BTreeSet<String>,
    pub actual_afferents: BTreeSet<String>,
    pub expected_efferents: BTreeSet<String>,
    pub actual_efferents: BTreeSet<String>,
}

impl PackageMismatch {
    pub fn afferents_differ(&self) -> bool {
        self.expected_afferents != self.actual_afferents
    }

    pub fn efferents_differ(&self) -> bool {
        self.expected_efferents != self.actual_efferents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real_graph() -> PackageGraph {
        let mut graph = PackageGraph::new();
        graph.depends_upon("com.xyz.ejb", "com.xyz.util");
        graph.depends_upon("com.xyz.web", "com.xyz.util");
        graph
    }

    #[test]
    fn test_exact_match() {
        let mut constraint = DependencyConstraint::with_base("com.xyz");
        constraint
            .depends_upon("ejb", "util")
            .depends_upon("web", "util");

        let result = constraint.matches(&real_graph());
        assert!(result.is_match());
        assert!(result.check().is_ok());
    }

    #[test]
    fn test_base_is_normalized() {
        assert_eq!(DependencyConstraint::with_base("com.xyz").base(), "com.xyz.");
        assert_eq!(DependencyConstraint::with_base("com.xyz.").base(), "com.xyz.");
        assert_eq!(DependencyConstraint::with_base("").base(), "");

        let mut constraint = DependencyConstraint::new();
        assert_eq!(constraint.add_package("a.b"), "a.b");
    }

    #[test]
    fn test_undeclared_package_is_undefined() {
        let mut constraint = DependencyConstraint::with_base("com.xyz");
        constraint.depends_upon("ejb", "util");

        let result = constraint.matches(&real_graph());
        assert_eq!(result.undefined, vec!["com.xyz.web"]);
        assert_eq!(result.non_matching.len(), 1);
        assert_eq!(result.non_matching[0].name, "com.xyz.util");
        assert!(result.non_matching[0].afferents_differ());
        assert!(!result.non_matching[0].efferents_differ());
    }

    #[test]
    fn test_declared_but_absent_is_ignored() {
        let mut constraint = DependencyConstraint::with_base("com.xyz");
        constraint
            .depends_upon("ejb", "util")
            .depends_upon("web", "util");
        constraint.add_package("unused");

        assert!(constraint.matches(&real_graph()).is_match());
    }

    #[test]
    fn test_mismatch_description() {
        let mut constraint = DependencyConstraint::with_base("com.xyz");
        constraint
            .depends_upon("ejb", "util")
            .depends_upon("web", "ejb");

        let message = constraint.matches(&real_graph()).check().unwrap_err();
        assert_eq!(
            message,
            "Non matching packages:\n\
             com.xyz.ejb\n\
             Expected afferents: com.xyz.web\n\
             Found    afferents: \n\
             \n\
             com.xyz.util\n\
             Expected afferents: com.xyz.ejb\n\
             Found    afferents: com.xyz.web, com.xyz.ejb\n\
             \n\
             com.xyz.web\n\
             Expected efferents: com.xyz.ejb\n\
             Found    efferents: com.xyz.util\n"
        );
    }
}
