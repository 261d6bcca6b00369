use crate::api::load_rules_with_fs;
use crate::cli::RulesArgs;
use crate::fs::{FileSystem, default_fs};
use crate::output::RuleReport;
use crate::style;

use super::{CommandContext, write_report};

pub fn cmd_rules(args: RulesArgs) -> i32 {
    cmd_rules_with_fs(args, default_fs())
}

pub fn cmd_rules_with_fs(args: RulesArgs, fs: &dyn FileSystem) -> i32 {
    let rules = match load_rules_with_fs(&args.rules, fs) {
        Ok(rules) => rules,
        Err(e) => {
            style::error(&e.to_string());
            return 2;
        }
    };

    let ctx = match CommandContext::new(&args.graph, fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let result = rules.analyze(&ctx.graph);
    let report = RuleReport::new(&result, args.strictness);

    if let Err(code) = write_report(&report, args.format, args.output.as_deref(), fs) {
        return code;
    }

    match result.check(args.strictness) {
        Ok(()) => {
            style::success(&format!(
                "{} rules satisfied by {} packages",
                rules.len(),
                ctx.graph.len()
            ));
            0
        }
        Err(details) => {
            style::violation(
                &format!("Dependency rules violated ({})", args.strictness),
                &details,
            );
            1
        }
    }
}
