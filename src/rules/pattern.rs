use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Package pattern must not be empty")]
    Empty,
    #[error("Wildcard * is only allowed at the end (e.g. java.*): {0}")]
    MisplacedWildcard(String),
    #[error("Parent rule of '{0}' is not part of this rule set")]
    UnknownParent(String),
}

/// A package name, or a name prefix ending in `.*`.
///
/// `com.acme` matches exactly `com.acme`. `com.acme.*` matches every package
/// whose name starts with `com.acme.`, but not `com.acme` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Pattern(String);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        if let Some(star) = pattern.find('*') {
            if star != pattern.len() - 1 || !pattern.ends_with(".*") {
                return Err(PatternError::MisplacedWildcard(pattern.to_string()));
            }
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.ends_with(".*")
    }

    /// The pattern without its trailing `.*`.
    pub fn base(&self) -> &str {
        self.0.strip_suffix(".*").unwrap_or(&self.0)
    }

    pub fn matches(&self, package: &str) -> bool {
        match self.0.strip_suffix('*') {
            Some(prefix) => package.starts_with(prefix),
            None => package == self.0,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
