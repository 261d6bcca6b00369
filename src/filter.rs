//! Ordered include/exclude filter deciding which package names are analyzed.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    /// Prefix matched against package names. A trailing `*` is already stripped.
    pub prefix: String,
    pub include: bool,
}

/// First-match package filter.
///
/// Entries are evaluated in declaration order and the first entry whose prefix
/// starts the package name decides. Names matched by no entry are accepted.
/// Prefixes are plain string prefixes, so `com.acme` also matches `com.acmex`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageFilter {
    entries: Vec<FilterEntry>,
}

impl PackageFilter {
    /// A filter accepting every package.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn excluding<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(names, false)
    }

    pub fn including<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(names, true)
    }

    /// Reject everything not decided by an earlier entry.
    pub fn excluding_rest(self) -> Self {
        self.excluding([""])
    }

    pub fn accept(&self, package: &str) -> bool {
        self.entries
            .iter()
            .find(|entry| package.starts_with(&entry.prefix))
            .is_none_or(|entry| entry.include)
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add<I, S>(mut self, names: I, include: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            let prefix = name.strip_suffix('*').unwrap_or(name);
            self.entries.push(FilterEntry {
                prefix: prefix.to_string(),
                include,
            });
        }
        self
    }
}
