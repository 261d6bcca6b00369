//! Dependency rules: which packages must, may, or must not depend upon which.

mod pattern;
mod result;
mod rule;
mod set;
mod table;

pub use pattern::{Pattern, PatternError};
pub use result::{RuleResult, Strictness};
pub use rule::{PackageRule, RuleMode};
pub use set::{DependencyRules, RuleEditor, RuleId};
pub use table::{RuleTableError, parse_rules};
