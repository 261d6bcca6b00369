//! Package design-quality metrics.
//!
//! - **Ca**: afferent coupling, packages depending on this one
//! - **Ce**: efferent coupling, packages this one depends on
//! - **A**: abstractness, abstract classes / all classes
//! - **I**: instability, Ce / (Ca + Ce)
//! - **D**: distance from the main sequence, |A + I - 1| scaled by volatility

use crate::model::{Package, PackageGraph};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageMetrics {
    pub name: String,
    pub concrete_classes: usize,
    pub abstract_classes: usize,
    pub afferent_coupling: usize,
    pub efferent_coupling: usize,
    pub abstractness: f64,
    pub instability: f64,
    pub distance: f64,
    pub volatility: u8,
}

impl PackageMetrics {
    pub fn of(package: &Package) -> Self {
        Self {
            name: package.name().to_string(),
            concrete_classes: package.concrete_class_count(),
            abstract_classes: package.abstract_class_count(),
            afferent_coupling: package.afferent_coupling(),
            efferent_coupling: package.efferent_coupling(),
            abstractness: abstractness(package),
            instability: instability(package),
            distance: distance(package),
            volatility: package.volatility(),
        }
    }

    pub fn class_count(&self) -> usize {
        self.concrete_classes + self.abstract_classes
    }
}

/// 0 for a package without classes.
pub fn abstractness(package: &Package) -> f64 {
    let total = package.class_count();
    if total == 0 {
        return 0.0;
    }
    package.abstract_class_count() as f64 / total as f64
}

/// 0 for a package without any coupling.
pub fn instability(package: &Package) -> f64 {
    let ca = package.afferent_coupling();
    let ce = package.efferent_coupling();
    if ca + ce == 0 {
        return 0.0;
    }
    ce as f64 / (ca + ce) as f64
}

pub fn distance(package: &Package) -> f64 {
    let d = (abstractness(package) + instability(package) - 1.0).abs();
    d * f64::from(package.volatility())
}

/// Metrics for every package, sorted by package name.
pub fn compute_metrics(graph: &PackageGraph) -> Vec<PackageMetrics> {
    let mut metrics: Vec<_> = graph.packages().map(PackageMetrics::of).collect();
    metrics.sort_by(|a, b| a.name.cmp(&b.name));
    metrics
}

/// Packages under `prefix` whose distance exceeds `max_distance`.
pub fn distance_violations<'a>(
    metrics: &'a [PackageMetrics],
    prefix: &str,
    max_distance: f64,
) -> Vec<&'a PackageMetrics> {
    metrics
        .iter()
        .filter(|m| m.name.starts_with(prefix) && m.distance > max_distance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassRecord, GraphBuilder};

    fn round(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn sample_graph() -> PackageGraph {
        let mut builder = GraphBuilder::default();
        builder
            .add_record(ClassRecord::new("core.Api", "core").abstract_class())
            .add_record(ClassRecord::new("core.Impl", "core").importing(["util"]))
            .add_record(ClassRecord::new("core.Helper", "core"))
            .add_record(ClassRecord::new("ui.View", "ui").importing(["core"]))
            .add_record(ClassRecord::new("cli.Main", "cli").importing(["core", "util"]));
        builder.build()
    }

    #[test]
    fn test_core_metrics() {
        let graph = sample_graph();
        let core = PackageMetrics::of(graph.package("core").unwrap());

        assert_eq!(core.concrete_classes, 2);
        assert_eq!(core.abstract_classes, 1);
        assert_eq!(core.afferent_coupling, 2);
        assert_eq!(core.efferent_coupling, 1);
        assert_eq!(round(core.abstractness), 0.33);
        assert_eq!(round(core.instability), 0.33);
        assert_eq!(round(core.distance), 0.33);
    }

    #[test]
    fn test_leaf_without_classes() {
        let graph = sample_graph();
        let util = PackageMetrics::of(graph.package("util").unwrap());

        assert_eq!(util.class_count(), 0);
        assert_eq!(util.abstractness, 0.0);
        assert_eq!(util.instability, 0.0);
        assert_eq!(util.distance, 1.0);
    }

    #[test]
    fn test_isolated_package_has_zero_instability() {
        let mut graph = PackageGraph::new();
        graph.add_package("lonely");

        let m = PackageMetrics::of(graph.package("lonely").unwrap());
        assert_eq!(m.instability, 0.0);
        assert_eq!(m.abstractness, 0.0);
        assert_eq!(m.distance, 1.0);
    }

    #[test]
    fn test_zero_volatility_zeroes_distance() {
        let mut graph = sample_graph();
        graph.package_mut("util").unwrap().set_volatility(0);

        let util = PackageMetrics::of(graph.package("util").unwrap());
        assert_eq!(util.distance, 0.0);
        assert_eq!(util.volatility, 0);
    }

    #[test]
    fn test_metrics_are_bounded() {
        let graph = sample_graph();
        for m in compute_metrics(&graph) {
            assert!((0.0..=1.0).contains(&m.abstractness), "{}", m.name);
            assert!((0.0..=1.0).contains(&m.instability), "{}", m.name);
            assert!((0.0..=1.0).contains(&m.distance), "{}", m.name);
        }
    }

    #[test]
    fn test_compute_metrics_sorted_by_name() {
        let graph = sample_graph();
        let names: Vec<_> = compute_metrics(&graph)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["cli", "core", "ui", "util"]);
    }

    #[test]
    fn test_distance_violations_respect_prefix() {
        let metrics = compute_metrics(&sample_graph());

        let all: Vec<_> = distance_violations(&metrics, "", 0.5)
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(all, vec!["util"]);

        assert!(distance_violations(&metrics, "c", 0.5).is_empty());
        assert!(distance_violations(&metrics, "", 1.0).is_empty());
    }
}
