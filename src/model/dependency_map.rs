use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Edge store: source package -> target package -> contributing classes.
///
/// Equality is structural. An edge may carry an empty class set when the
/// absence of a dependency is being reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap {
    map: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge, unioning `classes` into any classes already recorded for it.
    pub fn with<I, S>(mut self, from: &str, classes: I, to: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(from, classes, to);
        self
    }

    pub fn insert<I, S>(&mut self, from: &str, classes: I, to: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_default()
            .extend(classes.into_iter().map(Into::into));
    }

    /// Remove a single edge; drops the source entry once it has no targets.
    pub fn remove(&mut self, from: &str, to: &str) {
        if let Some(targets) = self.map.get_mut(from) {
            targets.remove(to);
            if targets.is_empty() {
                self.map.remove(from);
            }
        }
    }

    /// Remove every edge that is present in `other`.
    pub fn without(&mut self, other: &DependencyMap) {
        for (from, targets) in &other.map {
            for to in targets.keys() {
                self.remove(from, to);
            }
        }
    }

    /// Union with `other`. When both sides hold the same edge, `other`'s
    /// class set replaces ours.
    pub fn merge(&mut self, other: DependencyMap) {
        for (from, targets) in other.map {
            self.map.entry(from).or_default().extend(targets);
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Source packages, sorted.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Targets of `from` with their contributing classes, sorted by target.
    pub fn dependencies(&self, from: &str) -> Option<&BTreeMap<String, BTreeSet<String>>> {
        self.map.get(from)
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.map.get(from).is_some_and(|t| t.contains_key(to))
    }

    pub fn classes(&self, from: &str, to: &str) -> Option<&BTreeSet<String>> {
        self.map.get(from).and_then(|t| t.get(to))
    }

    /// Every (source, target, classes) triple, sorted by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<String>)> {
        self.map.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, classes)| (from.as_str(), to.as_str(), classes))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }
}

impl fmt::Display for DependencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<String> = self
            .edges()
            .map(|(from, to, classes)| {
                let classes: Vec<&str> = classes.iter().map(String::as_str).collect();
                format!("{} -> {} [{}]", from, to, classes.join(", "))
            })
            .collect();
        write!(f, "{{{}}}", edges.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_with_unions_classes() {
        let map = DependencyMap::new()
            .with("a", ["a.A1"], "b")
            .with("a", ["a.A2"], "b");

        let classes: Vec<_> = map.classes("a", "b").unwrap().iter().collect();
        assert_eq!(classes, vec!["a.A1", "a.A2"]);
    }

    #[test]
    fn test_empty_class_set_is_an_edge() {
        let map = DependencyMap::new().with("a", NONE, "b");
        assert!(map.contains("a", "b"));
        assert!(map.classes("a", "b").unwrap().is_empty());
        assert!(!map.is_empty());
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let left = DependencyMap::new()
            .with("a", ["x"], "b")
            .with("c", ["y"], "d");
        let right = DependencyMap::new()
            .with("c", ["y"], "d")
            .with("a", ["x"], "b");
        assert_eq!(left, right);
    }

    #[test]
    fn test_without_removes_edges_and_empty_sources() {
        let mut map = DependencyMap::new()
            .with("a", ["a.A"], "b")
            .with("a", ["a.A"], "c")
            .with("d", ["d.D"], "e");
        let other = DependencyMap::new()
            .with("a", NONE, "b")
            .with("d", NONE, "e")
            .with("x", NONE, "y");

        map.without(&other);

        assert_eq!(map, DependencyMap::new().with("a", ["a.A"], "c"));
        assert_eq!(map.packages().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_merge_is_union_right_biased() {
        let mut map = DependencyMap::new()
            .with("a", ["a.Old"], "b")
            .with("a", ["a.A"], "c");
        map.merge(
            DependencyMap::new()
                .with("a", ["a.New"], "b")
                .with("e", ["e.E"], "f"),
        );

        assert_eq!(
            map,
            DependencyMap::new()
                .with("a", ["a.New"], "b")
                .with("a", ["a.A"], "c")
                .with("e", ["e.E"], "f")
        );
        assert_eq!(map.edge_count(), 3);
    }

    #[test]
    fn test_display_is_sorted() {
        let map = DependencyMap::new()
            .with("b", ["b.B"], "a")
            .with("a", ["a.A2", "a.A1"], "c");
        assert_eq!(
            map.to_string(),
            "{a -> c [a.A1, a.A2]; b -> a [b.B]}"
        );
    }
}
