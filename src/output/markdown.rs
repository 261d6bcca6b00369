use crate::analysis::AnalysisResult;
use crate::model::DependencyMap;
use crate::output::{CycleReport, OutputFormatter, RuleReport, sorted_list};
use std::io::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownOutput;

impl MarkdownOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter<AnalysisResult> for MarkdownOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Package Analysis: {}\n", result.project_name)?;

        writeln!(writer, "## Metrics\n")?;
        if result.metrics.is_empty() {
            writeln!(writer, "No packages analyzed.\n")?;
        } else {
            writeln!(writer, "| Package | CC | AC | Ca | Ce | A | I | D | V |")?;
            writeln!(writer, "|---|---|---|---|---|---|---|---|---|")?;
            for m in &result.metrics {
                writeln!(
                    writer,
                    "| `{}` | {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {} |",
                    m.name,
                    m.concrete_classes,
                    m.abstract_classes,
                    m.afferent_coupling,
                    m.efferent_coupling,
                    m.abstractness,
                    m.instability,
                    m.distance,
                    m.volatility
                )?;
            }
            writeln!(writer)?;
        }

        if !result.has_cycles() {
            writeln!(writer, "## No Cycles Found\n")?;
            writeln!(writer, "The package graph is acyclic.")?;
            return Ok(());
        }

        writeln!(writer, "## Cyclic Groups\n")?;
        for group in result.cyclic_groups.groups() {
            write_group(writer, group)?;
        }

        writeln!(writer, "## Cycle Paths\n")?;
        for (_, path) in &result.cycle_paths {
            writeln!(writer, "- {}", path.join(" → "))?;
        }

        Ok(())
    }
}

impl OutputFormatter<RuleReport<'_>> for MarkdownOutput {
    fn format<W: Write>(&self, report: &RuleReport<'_>, writer: &mut W) -> std::io::Result<()> {
        let result = report.result;
        writeln!(writer, "# Dependency Rules\n")?;
        writeln!(writer, "Strictness: `{}`\n", report.strictness)?;

        if report.compliant {
            writeln!(writer, "All dependencies comply with the rules.")?;
            return Ok(());
        }

        if report.strictness.checks_not_existing() && !result.not_existing.is_empty() {
            writeln!(writer, "## Defined, but not existing packages\n")?;
            for name in &result.not_existing {
                writeln!(writer, "- `{}`", name)?;
            }
            writeln!(writer)?;
        }

        if report.strictness.checks_undefined() && !result.undefined.is_empty() {
            writeln!(writer, "## Packages without a rule\n")?;
            writeln!(writer, "{}\n", sorted_list(&result.undefined))?;
        }

        if !result.missing.is_empty() {
            writeln!(writer, "## Missing dependencies\n")?;
            for (from, to, _) in result.missing.edges() {
                writeln!(writer, "- `{}` → `{}`", from, to)?;
            }
            writeln!(writer)?;
        }

        if !result.denied.is_empty() {
            writeln!(writer, "## Forbidden dependencies\n")?;
            for (from, to, classes) in result.denied.edges() {
                writeln!(
                    writer,
                    "- `{}` → `{}` (by {})",
                    from,
                    to,
                    sorted_list(classes)
                )?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

impl OutputFormatter<CycleReport<'_>> for MarkdownOutput {
    fn format<W: Write>(&self, report: &CycleReport<'_>, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Cyclic Groups\n")?;
        if report.waived > 0 {
            writeln!(writer, "{} group(s) waived by exceptions.\n", report.waived)?;
        }
        if report.groups.is_empty() {
            writeln!(writer, "No cyclic groups remain.")?;
            return Ok(());
        }
        for group in &report.groups {
            write_group(writer, group)?;
        }
        Ok(())
    }
}

fn write_group<W: Write>(writer: &mut W, group: &DependencyMap) -> std::io::Result<()> {
    let members: Vec<&str> = group.packages().collect();
    writeln!(
        writer,
        "### Group of {}: {}\n",
        members.len(),
        members.join(", ")
    )?;
    for (from, to, classes) in group.edges() {
        writeln!(
            writer,
            "- `{}` → `{}` (by {})",
            from,
            to,
            sorted_list(classes)
        )?;
    }
    writeln!(writer)
}
