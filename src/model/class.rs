use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A compiled class as delivered by a parser, before filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    /// Fully-qualified class name, e.g. `com.acme.core.Service`.
    pub name: String,
    /// Owning package, e.g. `com.acme.core`.
    pub package: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub source_file: Option<String>,
    /// Every package referenced by the class.
    #[serde(default)]
    pub imports: Vec<String>,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            is_abstract: false,
            source_file: None,
            imports: Vec::new(),
        }
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn importing<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(packages.into_iter().map(Into::into));
        self
    }

    /// Nested classes carry a `$` in their name.
    pub fn is_inner(&self) -> bool {
        self.name.contains('$')
    }
}

/// A class owned by exactly one package. Immutable after construction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Class {
    name: String,
    is_abstract: bool,
    source_file: Option<String>,
    imports: BTreeSet<String>,
}

impl Class {
    pub fn new(
        name: impl Into<String>,
        is_abstract: bool,
        source_file: Option<String>,
        imports: BTreeSet<String>,
    ) -> Self {
        Self {
            name: name.into(),
            is_abstract,
            source_file,
            imports,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn imports_package(&self, package: &str) -> bool {
        self.imports.contains(package)
    }
}
