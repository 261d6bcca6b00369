use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// Pretty-printed JSON of any serializable report.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl<R: Serialize + ?Sized> OutputFormatter<R> for JsonOutput {
    fn format<W: Write>(&self, report: &R, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
