//! Plain-text diagnostics for failed checks.
//!
//! Violations are grouped by source package; targets and contributing classes
//! are sorted, classes comma-joined. Constraint mismatches list package names
//! in descending order.

use crate::analysis::{MatchResult, PackageMetrics};
use crate::model::DependencyMap;
use crate::rules::{RuleResult, Strictness};

pub fn rule_violations(result: &RuleResult, strictness: Strictness) -> String {
    let mut out = String::new();

    if strictness.checks_not_existing() && !result.not_existing.is_empty() {
        out.push_str("\nDefined, but not existing packages:\n");
        for name in &result.not_existing {
            out.push_str(name);
            out.push('\n');
        }
    }
    if strictness.checks_undefined() && !result.undefined.is_empty() {
        out.push_str("\nFound packages which are not defined:\n");
        out.push_str(&join(&result.undefined));
        out.push('\n');
    }
    if !result.missing.is_empty() {
        out.push_str("\nFound missing dependencies:\n");
        write_edges(&mut out, &result.missing, "", false);
    }
    if !result.denied.is_empty() {
        out.push_str("\nFound forbidden dependencies:\n");
        write_edges(&mut out, &result.denied, "", true);
    }

    out
}

pub fn cyclic_groups(groups: &[&DependencyMap]) -> String {
    let mut out = String::from("Found these cyclic groups:\n");
    for group in groups {
        let members: Vec<&str> = group.packages().collect();
        out.push_str(&format!(
            "\n- Group of {}: {}\n",
            members.len(),
            members.join(", ")
        ));
        write_edges(&mut out, group, "  ", true);
    }
    out
}

pub fn constraint_mismatch(result: &MatchResult) -> String {
    let mut out = String::new();

    if !result.undefined.is_empty() {
        out.push_str(&format!(
            "Found undefined packages: {}\n",
            join_descending(&result.undefined)
        ));
    }
    if !result.non_matching.is_empty() {
        out.push_str("Non matching packages:");
        for mismatch in &result.non_matching {
            out.push_str(&format!("\n{}\n", mismatch.name));
            if mismatch.afferents_differ() {
                out.push_str(&format!(
                    "Expected afferents: {}\n",
                    join_descending(&mismatch.expected_afferents)
                ));
                out.push_str(&format!(
                    "Found    afferents: {}\n",
                    join_descending(&mismatch.actual_afferents)
                ));
            }
            if mismatch.efferents_differ() {
                out.push_str(&format!(
                    "Expected efferents: {}\n",
                    join_descending(&mismatch.expected_efferents)
                ));
                out.push_str(&format!(
                    "Found    efferents: {}\n",
                    join_descending(&mismatch.actual_efferents)
                ));
            }
        }
    }

    out
}

/// Fixed-width abstractness / instability / distance table.
pub fn distances(metrics: &[PackageMetrics], prefix: &str) -> String {
    let mut out = String::new();
    out.push_str("Name                                      abst  inst  dist\n");
    out.push_str("----------------------------------------------------------\n");
    for m in metrics.iter().filter(|m| m.name.starts_with(prefix)) {
        out.push_str(&format!(
            "{:<40}: {:<4.2}  {:<4.2}  {:<4.2}\n",
            m.name, m.abstractness, m.instability, m.distance
        ));
    }
    out
}

fn write_edges(out: &mut String, edges: &DependencyMap, indent: &str, with_classes: bool) {
    for package in edges.packages() {
        out.push_str(&format!("{}{} ->\n", indent, package));
        let Some(targets) = edges.dependencies(package) else {
            continue;
        };
        for (target, classes) in targets {
            if with_classes {
                out.push_str(&format!("{}  {} (by {})\n", indent, target, join(classes)));
            } else {
                out.push_str(&format!("{}  {}\n", indent, target));
            }
        }
    }
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_descending<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    names.sort_unstable_by(|a, b| b.cmp(a));
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_table_rows() {
        let metrics = vec![PackageMetrics {
            name: "com.xyz".to_string(),
            concrete_classes: 2,
            abstract_classes: 1,
            afferent_coupling: 1,
            efferent_coupling: 1,
            abstractness: 1.0 / 3.0,
            instability: 0.5,
            distance: 1.0 / 6.0,
            volatility: 1,
        }];

        let table = distances(&metrics, "com");
        let row = table.lines().nth(2).unwrap();
        assert_eq!(row, format!("{:<40}: 0.33  0.50  0.17", "com.xyz"));
        assert_eq!(distances(&metrics, "org").lines().count(), 2);
    }

    #[test]
    fn test_forbidden_edges_list_classes() {
        let result = RuleResult {
            denied: DependencyMap::new()
                .with("c", ["c.C2", "c.C1"], "b")
                .with("c", ["c.C1"], "a"),
            ..Default::default()
        };

        assert_eq!(
            rule_violations(&result, Strictness::Rules),
            "\nFound forbidden dependencies:\nc ->\n  a (by c.C1)\n  b (by c.C1, c.C2)\n"
        );
    }

    #[test]
    fn test_undefined_constraint_packages_descending() {
        let result = MatchResult {
            undefined: vec!["a".to_string(), "c".to_string(), "b".to_string()],
            non_matching: Vec::new(),
        };
        assert_eq!(constraint_mismatch(&result), "Found undefined packages: c, b, a\n");
    }
}
