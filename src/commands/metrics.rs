use crate::analysis::{analyze, distance_violations};
use crate::cli::MetricsArgs;
use crate::fs::{FileSystem, default_fs};
use crate::output::text;
use crate::style;

use super::{CommandContext, write_report};

pub fn cmd_metrics(args: MetricsArgs) -> i32 {
    cmd_metrics_with_fs(args, default_fs())
}

pub fn cmd_metrics_with_fs(args: MetricsArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.graph, fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let result = analyze(&ctx.project_name, &ctx.graph);

    if args.table {
        let table = text::distances(&result.metrics, &args.prefix);
        let written = match &args.output {
            Some(path) => fs.write(path, &table),
            None => {
                print!("{}", table);
                Ok(())
            }
        };
        if let Err(e) = written {
            style::error(&format!("Failed to write output: {}", e));
            return 2;
        }
    } else if let Err(code) = write_report(&result, args.format, args.output.as_deref(), fs) {
        return code;
    }

    let Some(max) = args.max_distance else {
        return 0;
    };
    let violations = distance_violations(&result.metrics, &args.prefix, max);
    if violations.is_empty() {
        return 0;
    }
    for m in violations {
        style::violation(
            &format!("{} exceeds the maximum distance", m.name),
            &format!("{} has distance of {:.2} (max {:.2})", m.name, m.distance, max),
        );
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GraphArgs, OutputFormat};
    use crate::fs::mock::MockFs;
    use std::path::{Path, PathBuf};

    const RECORDS: &str = r#"[
        {"name": "core.Api", "package": "core", "abstract": true},
        {"name": "core.Impl", "package": "core", "imports": ["util"]},
        {"name": "ui.View", "package": "ui", "imports": ["core"]}
    ]"#;

    fn args(max_distance: Option<f64>) -> MetricsArgs {
        MetricsArgs {
            graph: GraphArgs {
                records: PathBuf::from("/p/classes.json"),
                project: PathBuf::from("/p"),
                exclude: Vec::new(),
                components: Vec::new(),
            },
            format: OutputFormat::Json,
            output: Some(PathBuf::from("/p/out.json")),
            max_distance,
            prefix: String::new(),
            table: false,
        }
    }

    #[test]
    fn test_writes_report_to_output_file() {
        let fs = MockFs::new().with_file("/p/classes.json", RECORDS);
        assert_eq!(cmd_metrics_with_fs(args(None), &fs), 0);

        let out = fs.content(Path::new("/p/out.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["project_name"], "classes");
        assert_eq!(value["metrics"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_distance_threshold_fails() {
        let fs = MockFs::new().with_file("/p/classes.json", RECORDS);
        // util has no classes and no efferents, so its distance is 1.
        assert_eq!(cmd_metrics_with_fs(args(Some(0.9)), &fs), 1);
        assert_eq!(cmd_metrics_with_fs(args(Some(1.0)), &fs), 0);
    }

    #[test]
    fn test_table_output() {
        let fs = MockFs::new().with_file("/p/classes.json", RECORDS);
        let mut table_args = args(None);
        table_args.table = true;
        table_args.output = Some(PathBuf::from("/p/table.txt"));

        assert_eq!(cmd_metrics_with_fs(table_args, &fs), 0);
        let table = fs.content(Path::new("/p/table.txt")).unwrap();
        assert!(table.starts_with("Name"));
        assert_eq!(table.lines().count(), 5);
    }

    #[test]
    fn test_missing_records() {
        let fs = MockFs::new();
        assert_eq!(cmd_metrics_with_fs(args(None), &fs), 2);
    }
}
