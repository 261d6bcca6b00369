use crate::model::Class;
use indexmap::IndexSet;
use serde::Serialize;

/// Volatility of a package that takes part in distance scoring.
pub const DEFAULT_VOLATILITY: u8 = 1;

/// A package node. Edges are held by name; [`crate::model::PackageGraph`]
/// keeps the efferent and afferent sides in sync.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    name: String,
    classes: Vec<Class>,
    efferents: IndexSet<String>,
    afferents: IndexSet<String>,
    volatility: u8,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            efferents: IndexSet::new(),
            afferents: IndexSet::new(),
            volatility: DEFAULT_VOLATILITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Packages this package depends upon, in edge-insertion order.
    pub fn efferents(&self) -> &IndexSet<String> {
        &self.efferents
    }

    /// Packages depending upon this package, in edge-insertion order.
    pub fn afferents(&self) -> &IndexSet<String> {
        &self.afferents
    }

    pub fn depends_on(&self, package: &str) -> bool {
        self.efferents.contains(package)
    }

    pub fn volatility(&self) -> u8 {
        self.volatility
    }

    pub fn set_volatility(&mut self, volatility: u8) {
        self.volatility = volatility;
    }

    pub fn add_class(&mut self, class: Class) {
        // Re-parsing the same unit replaces rather than duplicates.
        if let Some(existing) = self.classes.iter_mut().find(|c| c.name() == class.name()) {
            *existing = class;
        } else {
            self.classes.push(class);
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn abstract_class_count(&self) -> usize {
        self.classes.iter().filter(|c| c.is_abstract()).count()
    }

    pub fn concrete_class_count(&self) -> usize {
        self.classes.iter().filter(|c| !c.is_abstract()).count()
    }

    /// Ca: number of distinct packages depending upon this one.
    pub fn afferent_coupling(&self) -> usize {
        self.afferents.len()
    }

    /// Ce: number of distinct packages this one depends upon.
    pub fn efferent_coupling(&self) -> usize {
        self.efferents.len()
    }

    /// Classes of this package whose imports reference `target`, sorted by name.
    pub fn classes_importing(&self, target: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .classes
            .iter()
            .filter(|c| c.imports_package(target))
            .map(|c| c.name())
            .collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn insert_efferent(&mut self, target: &str) -> bool {
        self.efferents.insert(target.to_string())
    }

    pub(crate) fn insert_afferent(&mut self, source: &str) -> bool {
        self.afferents.insert(source.to_string())
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Package {}
