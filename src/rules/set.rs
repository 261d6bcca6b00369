use crate::model::PackageGraph;
use crate::rules::{PackageRule, Pattern, PatternError, RuleMode, RuleResult};
use tracing::debug;

/// Handle to a rule registered in a [`DependencyRules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

/// An ordered set of package rules sharing a default mode.
///
/// ```
/// use depcheck::rules::DependencyRules;
///
/// let mut rules = DependencyRules::allow_all();
/// let a = rules.add_rule("com.acme.a.*")?;
/// let b = rules.add_rule("com.acme.sub.b")?;
/// rules.rule(a).must_not_depend_upon(&[b]);
/// # Ok::<(), depcheck::rules::PatternError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DependencyRules {
    mode: RuleMode,
    rules: Vec<PackageRule>,
}

impl DependencyRules {
    pub fn new(mode: RuleMode) -> Self {
        Self {
            mode,
            rules: Vec::new(),
        }
    }

    pub fn allow_all() -> Self {
        Self::new(RuleMode::AllowAll)
    }

    pub fn deny_all() -> Self {
        Self::new(RuleMode::DenyAll)
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }

    /// Register a rule for `pattern` using this set's mode.
    pub fn add_rule(&mut self, pattern: &str) -> Result<RuleId, PatternError> {
        let rule = PackageRule::new(pattern, self.mode)?;
        Ok(self.add_package_rule(rule))
    }

    /// Register an already built rule, keeping its own mode.
    pub fn add_package_rule(&mut self, rule: PackageRule) -> RuleId {
        self.rules.push(rule);
        RuleId(self.rules.len() - 1)
    }

    /// Register a rule named below `parent`.
    ///
    /// The child pattern is the parent pattern without its trailing `.*`,
    /// followed by `.name`. A `name` of `*` yields a wildcard child.
    pub fn add_child(&mut self, parent: RuleId, name: &str) -> Result<RuleId, PatternError> {
        let base = self
            .rules
            .get(parent.0)
            .map(|rule| rule.pattern().base().to_string())
            .ok_or_else(|| PatternError::UnknownParent(name.to_string()))?;
        self.add_rule(&format!("{}.{}", base, name))
    }

    pub fn get(&self, id: RuleId) -> Option<&PackageRule> {
        self.rules.get(id.0)
    }

    pub fn rules(&self) -> &[PackageRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Edit the targets of a registered rule.
    pub fn rule(&mut self, id: RuleId) -> RuleEditor<'_> {
        RuleEditor { rules: self, id }
    }

    /// Run every rule in declaration order and merge the results.
    ///
    /// Packages matched by no rule are reported as undefined. Edges that one
    /// rule allows are removed from the denials of every other rule.
    pub fn analyze(&self, graph: &PackageGraph) -> RuleResult {
        let mut result = RuleResult::new();
        for rule in &self.rules {
            result.merge(rule.analyze(graph));
        }

        result.undefined.extend(
            graph
                .package_names()
                .filter(|name| !self.rules.iter().any(|r| r.pattern().matches(name)))
                .map(str::to_string),
        );
        result.normalize();

        debug!(
            rules = self.rules.len(),
            missing = result.missing.edge_count(),
            denied = result.denied.edge_count(),
            not_existing = result.not_existing.len(),
            undefined = result.undefined.len(),
            "rules analyzed"
        );
        result
    }

    fn patterns(&self, ids: &[RuleId]) -> Vec<Pattern> {
        ids.iter()
            .filter_map(|id| self.rules.get(id.0))
            .map(|rule| rule.pattern().clone())
            .collect()
    }
}

/// Chainable target editor returned by [`DependencyRules::rule`].
pub struct RuleEditor<'r> {
    rules: &'r mut DependencyRules,
    id: RuleId,
}

impl RuleEditor<'_> {
    pub fn must_depend_upon(self, targets: &[RuleId]) -> Self {
        let patterns = self.rules.patterns(targets);
        if let Some(rule) = self.rules.rules.get_mut(self.id.0) {
            rule.must_depend_upon(&patterns);
        }
        self
    }

    pub fn may_depend_upon(self, targets: &[RuleId]) -> Self {
        let patterns = self.rules.patterns(targets);
        if let Some(rule) = self.rules.rules.get_mut(self.id.0) {
            rule.may_depend_upon(&patterns);
        }
        self
    }

    pub fn must_not_depend_upon(self, targets: &[RuleId]) -> Self {
        let patterns = self.rules.patterns(targets);
        if let Some(rule) = self.rules.rules.get_mut(self.id.0) {
            rule.must_not_depend_upon(&patterns);
        }
        self
    }
}
