mod constraint;
mod cycle_path;
mod cyclic_groups;
mod metrics;

pub use constraint::{DependencyConstraint, MatchResult, PackageMismatch};
pub use cycle_path::{collect_cycle, contains_cycle};
pub use cyclic_groups::{CycleResult, find_cyclic_groups, packages};
pub use metrics::{
    PackageMetrics, abstractness, compute_metrics, distance, distance_violations, instability,
};

use crate::model::PackageGraph;
use serde::Serialize;
use tracing::debug;

/// Everything the graph-wide analyses report about one session.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub project_name: String,
    pub metrics: Vec<PackageMetrics>,
    pub cyclic_groups: CycleResult,
    /// Start package and reported path for every package whose search finds a cycle.
    pub cycle_paths: Vec<(String, Vec<String>)>,
}

impl AnalysisResult {
    pub fn package_count(&self) -> usize {
        self.metrics.len()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cyclic_groups.is_empty()
    }
}

pub fn analyze(project_name: &str, graph: &PackageGraph) -> AnalysisResult {
    let metrics = compute_metrics(graph);
    let cyclic_groups = find_cyclic_groups(graph);
    let cycle_paths = graph.collect_all_cycles();

    debug!(
        packages = metrics.len(),
        groups = cyclic_groups.len(),
        "analysis complete"
    );

    AnalysisResult {
        project_name: project_name.to_string(),
        metrics,
        cyclic_groups,
        cycle_paths,
    }
}
