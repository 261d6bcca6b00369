use crate::model::{DependencyMap, Package, PackageGraph};
use crate::rules::{Pattern, PatternError, RuleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How a rule treats efferents it says nothing about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleMode {
    /// Only `must_not` targets are forbidden.
    #[default]
    AllowAll,
    /// Only `must` and `may` targets are permitted.
    DenyAll,
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleMode::AllowAll => write!(f, "allow-all"),
            RuleMode::DenyAll => write!(f, "deny-all"),
        }
    }
}

impl std::str::FromStr for RuleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow-all" | "allow" => Ok(RuleMode::AllowAll),
            "deny-all" | "deny" => Ok(RuleMode::DenyAll),
            _ => Err(format!("Unknown rule mode: {}", s)),
        }
    }
}

/// Dependency policy for the packages matching one pattern.
///
/// Targets are captured as patterns when they are added, so later changes to
/// the target rule do not affect this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRule {
    pattern: Pattern,
    mode: RuleMode,
    must: Vec<Pattern>,
    may: Vec<Pattern>,
    must_not: Vec<Pattern>,
}

impl PackageRule {
    pub fn new(pattern: &str, mode: RuleMode) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            mode,
            must: Vec::new(),
            may: Vec::new(),
            must_not: Vec::new(),
        })
    }

    pub fn allow_all(pattern: &str) -> Result<Self, PatternError> {
        Self::new(pattern, RuleMode::AllowAll)
    }

    pub fn deny_all(pattern: &str) -> Result<Self, PatternError> {
        Self::new(pattern, RuleMode::DenyAll)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }

    pub fn must(&self) -> &[Pattern] {
        &self.must
    }

    pub fn may(&self) -> &[Pattern] {
        &self.may
    }

    pub fn must_not(&self) -> &[Pattern] {
        &self.must_not
    }

    pub fn must_depend_upon<'a, I>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        self.must.extend(targets.into_iter().cloned());
        self
    }

    pub fn may_depend_upon<'a, I>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        self.may.extend(targets.into_iter().cloned());
        self
    }

    pub fn must_not_depend_upon<'a, I>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        self.must_not.extend(targets.into_iter().cloned());
        self
    }

    pub fn analyze(&self, graph: &PackageGraph) -> RuleResult {
        let mut result = RuleResult::new();
        let this_packages = find_packages(graph, &self.pattern);

        if this_packages.is_empty() {
            result.not_existing.insert(self.pattern.to_string());
        }

        for must in &self.must {
            for target in find_packages(graph, must) {
                for package in &this_packages {
                    if !package.depends_on(target.name()) {
                        add_dependency(&mut result.missing, package, target.name());
                    }
                }
            }
        }

        match self.mode {
            RuleMode::AllowAll => {
                for must_not in &self.must_not {
                    for target in find_packages(graph, must_not) {
                        if any_match(&self.may, target.name()) {
                            continue;
                        }
                        for package in &this_packages {
                            if package.depends_on(target.name()) {
                                add_dependency(&mut result.denied, package, target.name());
                            }
                        }
                    }
                }
            }
            RuleMode::DenyAll => {
                for package in &this_packages {
                    for target in package.efferents() {
                        let allowed = any_match(&self.must, target) || any_match(&self.may, target);
                        let forbidden = any_match(&self.must_not, target);
                        if allowed && !forbidden {
                            add_dependency(&mut result.allowed, package, target);
                        } else {
                            add_dependency(&mut result.denied, package, target);
                        }
                    }
                }
            }
        }

        debug!(
            rule = %self.pattern,
            packages = this_packages.len(),
            missing = result.missing.edge_count(),
            denied = result.denied.edge_count(),
            "rule analyzed"
        );
        result
    }
}

fn find_packages<'g>(graph: &'g PackageGraph, pattern: &Pattern) -> Vec<&'g Package> {
    graph
        .packages()
        .filter(|p| pattern.matches(p.name()))
        .collect()
}

fn any_match(patterns: &[Pattern], package: &str) -> bool {
    patterns.iter().any(|p| p.matches(package))
}

fn add_dependency(map: &mut DependencyMap, from: &Package, to: &str) {
    map.insert(from.name(), from.classes_importing(to), to);
}
