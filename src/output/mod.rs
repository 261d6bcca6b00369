mod json;
mod markdown;
pub mod text;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::model::DependencyMap;
use crate::rules::{RuleResult, Strictness};
use serde::Serialize;
use std::io::Write;

pub trait OutputFormatter<R: ?Sized> {
    fn format<W: Write>(&self, report: &R, writer: &mut W) -> std::io::Result<()>;
}

/// A rule result together with the strictness it is judged under.
#[derive(Debug, Serialize)]
pub struct RuleReport<'a> {
    pub strictness: Strictness,
    pub compliant: bool,
    pub result: &'a RuleResult,
}

impl<'a> RuleReport<'a> {
    pub fn new(result: &'a RuleResult, strictness: Strictness) -> Self {
        Self {
            strictness,
            compliant: result.is_compliant(strictness),
            result,
        }
    }
}

/// Cyclic groups left after exceptions, and how many were waived.
#[derive(Debug, Serialize)]
pub struct CycleReport<'a> {
    pub groups: Vec<&'a DependencyMap>,
    pub waived: usize,
}

fn sorted_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut items: Vec<&str> = items.into_iter().map(String::as_str).collect();
    items.sort_unstable();
    items.join(", ")
}
