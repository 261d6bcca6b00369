use crate::model::{DependencyMap, PackageGraph};
use crate::output::text;
use petgraph::algo::tarjan_scc;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Every maximal cyclic group of a package graph.
///
/// Each group holds only the edges between its own members, attributed with
/// the classes that cause them. Groups are ordered by descending size, then by
/// member names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleResult {
    groups: Vec<DependencyMap>,
}

impl CycleResult {
    pub fn new(mut groups: Vec<DependencyMap>) -> Self {
        groups.sort_by(|a, b| {
            let a_members: Vec<&str> = a.packages().collect();
            let b_members: Vec<&str> = b.packages().collect();
            b_members
                .len()
                .cmp(&a_members.len())
                .then_with(|| a_members.cmp(&b_members))
        });
        Self { groups }
    }

    pub fn groups(&self) -> &[DependencyMap] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups not covered by any exception. An exception covers a group when
    /// it contains every member of the group.
    pub fn cycles_except(&self, exceptions: &[BTreeSet<String>]) -> Vec<&DependencyMap> {
        self.groups
            .iter()
            .filter(|group| {
                !exceptions
                    .iter()
                    .any(|exception| group.packages().all(|p| exception.contains(p)))
            })
            .collect()
    }

    pub fn is_empty_except(&self, exceptions: &[BTreeSet<String>]) -> bool {
        self.cycles_except(exceptions).is_empty()
    }

    /// `Ok` when no group remains after the exceptions, otherwise the rendered groups.
    pub fn check_except(&self, exceptions: &[BTreeSet<String>]) -> Result<(), String> {
        let remaining = self.cycles_except(exceptions);
        if remaining.is_empty() {
            Ok(())
        } else {
            Err(text::cyclic_groups(&remaining))
        }
    }

    pub fn check(&self) -> Result<(), String> {
        self.check_except(&[])
    }
}

/// Build an exception set from package names.
pub fn packages<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Find all strongly connected components with at least two packages.
pub fn find_cyclic_groups(graph: &PackageGraph) -> CycleResult {
    let (digraph, _) = graph.to_digraph();
    let mut groups = Vec::new();

    for scc in tarjan_scc(&digraph) {
        if scc.len() < 2 {
            continue;
        }

        let members: BTreeSet<&str> = scc.iter().map(|idx| digraph[*idx].as_str()).collect();
        let mut group = DependencyMap::new();

        for member in &members {
            let Some(package) = graph.package(member) else {
                continue;
            };
            for target in package.efferents() {
                if members.contains(target.as_str()) {
                    group.insert(member, package.classes_importing(target), target);
                }
            }
        }

        debug!(size = members.len(), "cyclic group found");
        groups.push(group);
    }

    CycleResult::new(groups)
}
