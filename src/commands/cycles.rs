use crate::analysis::{find_cyclic_groups, packages};
use crate::cli::CyclesArgs;
use crate::fs::{FileSystem, default_fs};
use crate::output::CycleReport;
use crate::style;
use std::collections::BTreeSet;

use super::{CommandContext, write_report};

pub fn cmd_cycles(args: CyclesArgs) -> i32 {
    cmd_cycles_with_fs(args, default_fs())
}

pub fn cmd_cycles_with_fs(args: CyclesArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.graph, fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let exceptions = parse_exceptions(&args.except);
    let result = find_cyclic_groups(&ctx.graph);
    let groups = result.cycles_except(&exceptions);
    let report = CycleReport {
        waived: result.len() - groups.len(),
        groups,
    };

    if let Err(code) = write_report(&report, args.format, args.output.as_deref(), fs) {
        return code;
    }

    match result.check_except(&exceptions) {
        Ok(()) => {
            style::success(&format!(
                "No cyclic groups in {} packages",
                ctx.graph.len()
            ));
            0
        }
        Err(details) => {
            style::violation(
                &format!("{} cyclic group(s) found", report.groups.len()),
                &details,
            );
            1
        }
    }
}

/// Each `--except` value is one comma-separated set of packages.
fn parse_exceptions(values: &[String]) -> Vec<BTreeSet<String>> {
    values
        .iter()
        .map(|value| {
            packages(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty()),
            )
        })
        .filter(|set| !set.is_empty())
        .collect()
}
