use crate::model::DependencyMap;
use crate::output::text;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which parts of a [`RuleResult`] count as a violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Missing and forbidden dependencies.
    #[default]
    Rules,
    /// Everything, including rules without packages and packages without rules.
    Exactly,
    /// Everything except rules that match no package.
    IgnoringNonExisting,
    /// Everything except packages that no rule covers.
    IgnoringUndefined,
}

impl Strictness {
    pub fn checks_not_existing(self) -> bool {
        matches!(self, Strictness::Exactly | Strictness::IgnoringUndefined)
    }

    pub fn checks_undefined(self) -> bool {
        matches!(self, Strictness::Exactly | Strictness::IgnoringNonExisting)
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Rules => write!(f, "rules"),
            Strictness::Exactly => write!(f, "exactly"),
            Strictness::IgnoringNonExisting => write!(f, "ignoring-non-existing"),
            Strictness::IgnoringUndefined => write!(f, "ignoring-undefined"),
        }
    }
}

impl std::str::FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rules" => Ok(Strictness::Rules),
            "exactly" | "exact" => Ok(Strictness::Exactly),
            "ignoring-non-existing" => Ok(Strictness::IgnoringNonExisting),
            "ignoring-undefined" => Ok(Strictness::IgnoringUndefined),
            _ => Err(format!("Unknown strictness: {}", s)),
        }
    }
}

/// Classification of every observed edge against a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    pub allowed: DependencyMap,
    pub missing: DependencyMap,
    pub denied: DependencyMap,
    /// Rule patterns that matched no package, in declaration order.
    pub not_existing: IndexSet<String>,
    /// Packages that no rule pattern matched.
    pub undefined: BTreeSet<String>,
}

impl RuleResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: RuleResult) {
        self.allowed.merge(other.allowed);
        self.missing.merge(other.missing);
        self.denied.merge(other.denied);
        self.not_existing.extend(other.not_existing);
        self.undefined.extend(other.undefined);
    }

    /// An explicitly allowed edge overrides every denial of it.
    pub fn normalize(&mut self) {
        self.denied.without(&self.allowed);
        self.allowed.clear();
    }

    pub fn is_compliant(&self, strictness: Strictness) -> bool {
        self.missing.is_empty()
            && self.denied.is_empty()
            && (!strictness.checks_not_existing() || self.not_existing.is_empty())
            && (!strictness.checks_undefined() || self.undefined.is_empty())
    }

    /// `Ok` when compliant, otherwise the rendered violations.
    pub fn check(&self, strictness: Strictness) -> Result<(), String> {
        if self.is_compliant(strictness) {
            Ok(())
        } else {
            Err(text::rule_violations(self, strictness))
        }
    }
}
