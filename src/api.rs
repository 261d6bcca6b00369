//! Library entry points.
//!
//! These functions load class records and rule tables from disk, build the
//! package graph and run the analyses, returning `Result`s instead of exit
//! codes.
//!
//! # Example
//!
//! ```no_run
//! use depcheck::{AnalysisOptions, analyze};
//! use std::path::Path;
//!
//! let result = analyze(Path::new("classes.json"), &AnalysisOptions::default())?;
//! for m in &result.metrics {
//!     println!("{}: D = {:.2}", m.name, m.distance);
//! }
//! # Ok::<(), depcheck::DepcheckError>(())
//! ```

use crate::analysis::{self, AnalysisResult, CycleResult, find_cyclic_groups};
use crate::config::{Config, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::model::{ClassRecord, GraphBuilder, PackageGraph};
use crate::rules::{DependencyRules, RuleResult, RuleTableError, parse_rules};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DepcheckError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule table error in {path}: {source}")]
    Rules {
        path: PathBuf,
        #[source]
        source: RuleTableError,
    },

    #[error("Invalid class records in {path}: {source}")]
    Records {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options layered on top of the project configuration.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Directory holding `.depcheck.toml`.
    pub project: PathBuf,

    /// Package prefixes to exclude in addition to the configured ones.
    pub exclude: Vec<String>,

    /// Components in addition to the configured ones.
    pub components: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            project: PathBuf::from("."),
            exclude: Vec::new(),
            components: Vec::new(),
        }
    }
}

/// Read a JSON array of class records.
pub fn load_records(path: &Path) -> Result<Vec<ClassRecord>, DepcheckError> {
    load_records_with_fs(path, default_fs())
}

pub fn load_records_with_fs(
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<Vec<ClassRecord>, DepcheckError> {
    if !fs.exists(path) {
        return Err(DepcheckError::PathNotFound(path.to_path_buf()));
    }
    let content = fs.read_to_string(path)?;
    let records: Vec<ClassRecord> =
        serde_json::from_str(&content).map_err(|source| DepcheckError::Records {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), records = records.len(), "class records loaded");
    Ok(records)
}

/// Read a TOML rule table.
pub fn load_rules(path: &Path) -> Result<DependencyRules, DepcheckError> {
    load_rules_with_fs(path, default_fs())
}

pub fn load_rules_with_fs(
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<DependencyRules, DepcheckError> {
    if !fs.exists(path) {
        return Err(DepcheckError::PathNotFound(path.to_path_buf()));
    }
    let content = fs.read_to_string(path)?;
    parse_rules(&content).map_err(|source| DepcheckError::Rules {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the package graph from records, applying configuration and options.
pub fn build_graph<I>(records: I, config: &Config, options: &AnalysisOptions) -> PackageGraph
where
    I: IntoIterator<Item = ClassRecord>,
{
    let filter = config.package_filter(&options.exclude);
    let mut builder = GraphBuilder::new(filter)
        .with_components(config.components.iter().chain(&options.components).cloned())
        .with_volatility(&config.volatility)
        .with_inner_classes(config.analyze_inner_classes);
    builder.add_records(records);
    builder.build()
}

/// Load configuration and records, and build the graph.
pub fn load_graph(records: &Path, options: &AnalysisOptions) -> Result<PackageGraph, DepcheckError> {
    load_graph_with_fs(records, options, default_fs())
}

pub fn load_graph_with_fs(
    records: &Path,
    options: &AnalysisOptions,
    fs: &dyn FileSystem,
) -> Result<PackageGraph, DepcheckError> {
    let config = Config::load_with_fs(&options.project, fs)?;
    let records = load_records_with_fs(records, fs)?;
    Ok(build_graph(records, &config, options))
}

/// Metrics, cyclic groups and cycle paths for a record file.
pub fn analyze(records: &Path, options: &AnalysisOptions) -> Result<AnalysisResult, DepcheckError> {
    let graph = load_graph(records, options)?;
    Ok(analysis::analyze(&project_name(records), &graph))
}

pub fn find_cycles(records: &Path, options: &AnalysisOptions) -> Result<CycleResult, DepcheckError> {
    let graph = load_graph(records, options)?;
    Ok(find_cyclic_groups(&graph))
}

pub fn check_rules(
    records: &Path,
    rules: &Path,
    options: &AnalysisOptions,
) -> Result<RuleResult, DepcheckError> {
    let rules = load_rules(rules)?;
    let graph = load_graph(records, options)?;
    Ok(rules.analyze(&graph))
}

/// Report title derived from the record file name.
pub fn project_name(records: &Path) -> String {
    records
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("project")
        .to_string()
}
