//! Declarative rule tables.
//!
//! ```toml
//! base = "com.acme"
//! mode = "deny-all"
//!
//! [[rule]]
//! name = "ui"
//! pattern = "ui.*"
//! must = ["core"]
//! may = ["util"]
//!
//! [[rule]]
//! name = "core"
//!
//! [[rule]]
//! name = "util"
//! pattern = "util.*"
//! ```
//!
//! `pattern` defaults to `name` and is relative to `base`. Targets refer to
//! other rules by name and may point at rules declared later in the file.

use crate::rules::{DependencyRules, PackageRule, PatternError, RuleId, RuleMode};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("Failed to parse rule table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid pattern in rule '{rule}': {source}")]
    Pattern {
        rule: String,
        #[source]
        source: PatternError,
    },
    #[error("Rule '{0}' is declared more than once")]
    DuplicateRule(String),
    #[error("Rule '{rule}' refers to unknown rule '{target}'")]
    UnknownRule { rule: String, target: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    #[serde(default)]
    base: String,
    #[serde(default)]
    mode: RuleMode,
    #[serde(default, rename = "rule")]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    name: String,
    pattern: Option<String>,
    mode: Option<RuleMode>,
    #[serde(default)]
    must: Vec<String>,
    #[serde(default)]
    may: Vec<String>,
    #[serde(default)]
    must_not: Vec<String>,
}

/// Parse a TOML rule table into a rule set, keeping declaration order.
pub fn parse_rules(content: &str) -> Result<DependencyRules, RuleTableError> {
    let raw: RawTable = toml::from_str(content)?;
    let mut rules = DependencyRules::new(raw.mode);
    let mut ids: HashMap<String, RuleId> = HashMap::new();
    let mut order = Vec::with_capacity(raw.rules.len());

    for raw_rule in &raw.rules {
        if ids.contains_key(&raw_rule.name) {
            return Err(RuleTableError::DuplicateRule(raw_rule.name.clone()));
        }
        let relative = raw_rule.pattern.as_deref().unwrap_or(&raw_rule.name);
        let pattern = qualify(&raw.base, relative);
        let mode = raw_rule.mode.unwrap_or(raw.mode);
        let rule = PackageRule::new(&pattern, mode).map_err(|source| RuleTableError::Pattern {
            rule: raw_rule.name.clone(),
            source,
        })?;
        let id = rules.add_package_rule(rule);
        ids.insert(raw_rule.name.clone(), id);
        order.push(id);
    }

    for (raw_rule, id) in raw.rules.iter().zip(order) {
        let must = resolve(&ids, &raw_rule.name, &raw_rule.must)?;
        let may = resolve(&ids, &raw_rule.name, &raw_rule.may)?;
        let must_not = resolve(&ids, &raw_rule.name, &raw_rule.must_not)?;
        rules
            .rule(id)
            .must_depend_upon(&must)
            .may_depend_upon(&may)
            .must_not_depend_upon(&must_not);
    }

    Ok(rules)
}

fn qualify(base: &str, pattern: &str) -> String {
    let base = base.trim_end_matches('.');
    if base.is_empty() {
        pattern.to_string()
    } else {
        format!("{}.{}", base, pattern)
    }
}

fn resolve(
    ids: &HashMap<String, RuleId>,
    rule: &str,
    targets: &[String],
) -> Result<Vec<RuleId>, RuleTableError> {
    targets
        .iter()
        .map(|target| {
            ids.get(target)
                .copied()
                .ok_or_else(|| RuleTableError::UnknownRule {
                    rule: rule.to_string(),
                    target: target.clone(),
                })
        })
        .collect()
}
