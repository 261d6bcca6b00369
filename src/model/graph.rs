use crate::model::{Class, Package};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// All packages of one analysis session, keyed by name in creation order.
///
/// Every edge is stored on both endpoints: `b` is an efferent of `a`
/// exactly when `a` is an afferent of `b`.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    packages: IndexMap<String, Package>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the package named `name`.
    pub fn add_package(&mut self, name: &str) -> &mut Package {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| Package::new(name))
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn package_mut(&mut self, name: &str) -> Option<&mut Package> {
        self.packages.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn add_class(&mut self, package: &str, class: Class) {
        self.add_package(package).add_class(class);
    }

    /// Record that `from` depends upon `to`, creating either package if needed.
    ///
    /// Idempotent. Self-dependencies are ignored.
    pub fn depends_upon(&mut self, from: &str, to: &str) {
        if from == to {
            self.add_package(from);
            return;
        }
        self.add_package(from).insert_efferent(to);
        self.add_package(to).insert_afferent(from);
    }

    /// Efferent names of `name`, in insertion order. Empty for unknown packages.
    pub fn efferents<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.packages
            .get(name)
            .into_iter()
            .flat_map(|p| p.efferents().iter().map(String::as_str))
    }

    pub fn fan_in(&self, name: &str) -> usize {
        self.packages
            .get(name)
            .map_or(0, Package::afferent_coupling)
    }

    pub fn fan_out(&self, name: &str) -> usize {
        self.packages
            .get(name)
            .map_or(0, Package::efferent_coupling)
    }

    /// Build a petgraph view of the package graph for whole-graph algorithms.
    pub fn to_digraph(&self) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for name in self.packages.keys() {
            let idx = graph.add_node(name.clone());
            node_indices.insert(name.clone(), idx);
        }

        for package in self.packages.values() {
            let from_idx = node_indices[package.name()];
            for target in package.efferents() {
                if let Some(to_idx) = node_indices.get(target) {
                    graph.add_edge(from_idx, *to_idx, ());
                }
            }
        }

        (graph, node_indices)
    }

    /// Check the efferent/afferent symmetry invariant over the whole graph.
    pub fn is_consistent(&self) -> bool {
        self.packages.values().all(|p| {
            p.efferents().iter().all(|e| {
                self.packages
                    .get(e)
                    .is_some_and(|q| q.afferents().contains(p.name()))
            }) && p.afferents().iter().all(|a| {
                self.packages
                    .get(a)
                    .is_some_and(|q| q.efferents().contains(p.name()))
            })
        })
    }
}
