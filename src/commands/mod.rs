mod cycles;
mod init;
mod metrics;
mod rules;

pub use cycles::{cmd_cycles, cmd_cycles_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};
pub use metrics::{cmd_metrics, cmd_metrics_with_fs};
pub use rules::{cmd_rules, cmd_rules_with_fs};

use crate::api::{AnalysisOptions, build_graph, load_records_with_fs};
use crate::cli::{GraphArgs, OutputFormat};
use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::PackageGraph;
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Shared setup for the analysis commands: the graph built under the project configuration.
pub struct CommandContext {
    pub graph: PackageGraph,
    pub project_name: String,
}

impl CommandContext {
    /// Load configuration and records and build the graph.
    /// Returns Err(exit_code) after reporting the problem.
    pub fn new(args: &GraphArgs, fs: &dyn FileSystem) -> Result<Self, i32> {
        let config = Config::load_with_fs(&args.project, fs).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        let records = match load_records_with_fs(&args.records, fs) {
            Ok(records) => records,
            Err(e) => {
                style::error(&e.to_string());
                style::hint("records are a JSON array of {\"name\", \"package\", \"imports\"} objects");
                return Err(2);
            }
        };

        let options = AnalysisOptions {
            project: args.project.clone(),
            exclude: args.exclude.clone(),
            components: args.components.clone(),
        };
        let graph = build_graph(records, &config, &options);

        Ok(Self {
            graph,
            project_name: crate::api::project_name(&args.records),
        })
    }
}

/// Format `report` and send it to `output`, or stdout when none is given.
pub(crate) fn write_report<R>(
    report: &R,
    format: OutputFormat,
    output: Option<&Path>,
    fs: &dyn FileSystem,
) -> Result<(), i32>
where
    R: Serialize,
    MarkdownOutput: OutputFormatter<R>,
{
    let mut buffer = Vec::new();
    let formatted = match format {
        OutputFormat::Markdown => MarkdownOutput::new().format(report, &mut buffer),
        OutputFormat::Json => JsonOutput::new().format(report, &mut buffer),
    };
    if let Err(e) = formatted {
        style::error(&format!("Failed to format output: {}", e));
        return Err(2);
    }
    let text = String::from_utf8_lossy(&buffer);

    let written = match output {
        Some(path) => fs.write(path, &text),
        None if format == OutputFormat::Markdown => {
            style::render_markdown(&text, &mut io::stdout())
        }
        None => write!(io::stdout(), "{}", text),
    };
    if let Err(e) = written {
        style::error(&format!("Failed to write output: {}", e));
        return Err(2);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use std::path::PathBuf;

    const RECORDS: &str = r#"[
        {"name": "app.ui.View", "package": "app.ui", "imports": ["app.core", "vendor.log"]},
        {"name": "app.core.Service", "package": "app.core"},
        {"name": "app.core.Service$Inner", "package": "app.core", "imports": ["app.ui"]}
    ]"#;

    fn args(exclude: &[&str]) -> GraphArgs {
        GraphArgs {
            records: PathBuf::from("/p/classes.json"),
            project: PathBuf::from("/p"),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            components: Vec::new(),
        }
    }

    #[test]
    fn test_context_applies_project_config() {
        let fs = MockFs::new()
            .with_file("/p/classes.json", RECORDS)
            .with_file(
                "/p/.depcheck.toml",
                "analyze_inner_classes = false\n[filter]\nexclude = [\"vendor\"]\n",
            );

        let ctx = CommandContext::new(&args(&[]), &fs).unwrap();

        assert_eq!(ctx.project_name, "classes");
        assert!(!ctx.graph.contains("vendor.log"));
        assert!(!ctx.graph.package("app.core").unwrap().depends_on("app.ui"));
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let fs = MockFs::new()
            .with_file("/p/classes.json", RECORDS)
            .with_file("/p/.depcheck.toml", "[filter\n");

        let ctx = CommandContext::new(&args(&["app.ui"]), &fs).unwrap();

        assert!(!ctx.graph.contains("app.ui"));
        assert_eq!(ctx.graph.package("app.core").unwrap().class_count(), 2);
    }
}
