use crate::model::PackageGraph;
use std::collections::HashSet;

/// Depth-first search for the first cycle reachable from `start`.
///
/// Efferents are followed in edge-insertion order. The visited set is shared
/// by the whole search, so the first efferent that was already seen anywhere
/// closes the path. Returns `true` when a cycle was found; `path` then ends
/// with the repeated package. Nothing is removed from `path` when a branch
/// fails.
pub fn collect_cycle<'g>(graph: &'g PackageGraph, start: &'g str, path: &mut Vec<String>) -> bool {
    let mut visited = HashSet::new();
    search(graph, start, path, &mut visited)
}

pub fn contains_cycle<'g>(graph: &'g PackageGraph, start: &'g str) -> bool {
    collect_cycle(graph, start, &mut Vec::new())
}

fn search<'g>(
    graph: &'g PackageGraph,
    start: &'g str,
    path: &mut Vec<String>,
    visited: &mut HashSet<&'g str>,
) -> bool {
    visited.insert(start);
    path.push(start.to_string());

    // One pending-efferents iterator per package on the current branch.
    let mut stack = vec![graph.efferents(start)];
    while let Some(frame) = stack.last_mut() {
        let Some(efferent) = frame.next() else {
            stack.pop();
            continue;
        };
        path.push(efferent.to_string());
        if !visited.insert(efferent) {
            return true;
        }
        stack.push(graph.efferents(efferent));
    }

    false
}

impl PackageGraph {
    pub fn contains_cycle(&self, package: &str) -> bool {
        contains_cycle(self, package)
    }

    pub fn collect_cycle(&self, package: &str, path: &mut Vec<String>) -> bool {
        collect_cycle(self, package, path)
    }

    /// True if the search from any package finds a cycle.
    pub fn contains_cycles(&self) -> bool {
        self.package_names().any(|name| contains_cycle(self, name))
    }

    /// The reported cycle path of every package that has one, keyed by start package.
    pub fn collect_all_cycles(&self) -> Vec<(String, Vec<String>)> {
        self.package_names()
            .filter_map(|name| {
                let mut path = Vec::new();
                collect_cycle(self, name, &mut path).then(|| (name.to_string(), path))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> PackageGraph {
        let mut graph = PackageGraph::new();
        for (from, to) in edges {
            graph.depends_upon(from, to);
        }
        graph
    }

    fn cycle(graph: &PackageGraph, start: &str) -> Vec<String> {
        let mut path = Vec::new();
        assert!(collect_cycle(graph, start, &mut path), "no cycle from {}", start);
        path
    }

    #[test]
    fn test_long_chain_does_not_exhaust_stack() {
        let mut g = PackageGraph::new();
        for i in 0..25_000 {
            g.depends_upon(&format!("p{}", i), &format!("p{}", i + 1));
        }

        let mut path = Vec::new();
        assert!(!collect_cycle(&g, "p0", &mut path));
        assert_eq!(path.len(), 25_001);
        assert_eq!(path.last().map(String::as_str), Some("p25000"));

        g.depends_upon("p25000", "p0");
        let mut path = Vec::new();
        assert!(collect_cycle(&g, "p0", &mut path));
        assert_eq!(path.len(), 25_002);
        assert_eq!(path.last().map(String::as_str), Some("p0"));
    }

    #[test]
    fn test_no_cycles() {
        let g = graph(&[("A", "B")]);
        assert!(!contains_cycle(&g, "A"));
        assert!(!contains_cycle(&g, "B"));
        assert!(!g.contains_cycles());
        assert!(g.collect_all_cycles().is_empty());
    }

    #[test]
    fn test_two_node_cycle() {
        let g = graph(&[("A", "B"), ("B", "A")]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "A"]);
        assert_eq!(cycle(&g, "B"), vec!["B", "A", "B"]);
    }

    #[test]
    fn test_three_node_cycle() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "C", "A"]);
        assert_eq!(cycle(&g, "B"), vec!["B", "C", "A", "B"]);
        assert_eq!(cycle(&g, "C"), vec!["C", "A", "B", "C"]);
    }

    #[test]
    fn test_sub_cycle_keeps_tail() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "B")]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "C", "B"]);
        assert_eq!(cycle(&g, "B"), vec!["B", "C", "B"]);
        assert_eq!(cycle(&g, "C"), vec!["C", "B", "C"]);
    }

    #[test]
    fn test_first_declared_branch_wins() {
        let g = graph(&[("A", "B"), ("B", "A"), ("A", "C"), ("C", "A")]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "A"]);
        assert_eq!(cycle(&g, "B"), vec!["B", "A", "B"]);
        assert_eq!(cycle(&g, "C"), vec!["C", "A", "B", "A"]);
    }

    #[test]
    fn test_two_five_node_branches() {
        let g = graph(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("A", "D"),
            ("D", "E"),
            ("E", "A"),
        ]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "C", "A"]);
        assert_eq!(cycle(&g, "D"), vec!["D", "E", "A", "B", "C", "A"]);
        assert_eq!(cycle(&g, "E"), vec!["E", "A", "B", "C", "A"]);
    }

    #[test]
    fn test_failed_branch_is_not_removed() {
        let g = graph(&[("A", "B")]);
        let mut path = Vec::new();
        assert!(!collect_cycle(&g, "A", &mut path));
        assert_eq!(path, vec!["A", "B"]);
    }

    #[test]
    fn test_dead_branch_precedes_cycle() {
        let g = graph(&[("A", "B"), ("A", "C"), ("C", "A")]);
        assert_eq!(cycle(&g, "A"), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_unknown_start_has_no_cycle() {
        let g = graph(&[("A", "B"), ("B", "A")]);
        let mut path = Vec::new();
        assert!(!collect_cycle(&g, "Z", &mut path));
        assert_eq!(path, vec!["Z"]);
    }

    #[test]
    fn test_collect_all_cycles() {
        let g = graph(&[("A", "B"), ("B", "A"), ("C", "D")]);
        let all = g.collect_all_cycles();
        let starts: Vec<_> = all.iter().map(|(start, _)| start.as_str()).collect();
        assert_eq!(starts, vec!["A", "B"]);
        assert!(g.contains_cycles());
        assert!(g.contains_cycle("A"));
        assert!(!g.contains_cycle("C"));
    }
}
