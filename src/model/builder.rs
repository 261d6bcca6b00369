use crate::filter::PackageFilter;
use crate::model::{Class, ClassRecord, PackageGraph};
use std::collections::BTreeSet;
use tracing::debug;

/// Populates a [`PackageGraph`] from parser records.
///
/// Class packages and imports rejected by the filter are dropped, names are
/// collapsed to their component when components are configured, and imported
/// packages are created on first reference.
pub struct GraphBuilder {
    filter: PackageFilter,
    components: Vec<String>,
    inner_classes: bool,
    graph: PackageGraph,
    skipped: usize,
}

impl GraphBuilder {
    pub fn new(filter: PackageFilter) -> Self {
        Self {
            filter,
            components: Vec::new(),
            inner_classes: true,
            graph: PackageGraph::new(),
            skipped: 0,
        }
    }

    /// Collapse every package starting with `component.` into `component`.
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components
            .extend(components.into_iter().map(Into::into).filter(|c| !c.is_empty()));
        self
    }

    /// Pre-create packages with a configured volatility.
    pub fn with_volatility<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a u8)>,
    {
        for (name, volatility) in entries {
            self.graph.add_package(name).set_volatility(*volatility);
        }
        self
    }

    /// Whether nested classes (`Outer$Inner`) are analyzed. On by default.
    pub fn with_inner_classes(mut self, analyze: bool) -> Self {
        self.inner_classes = analyze;
        self
    }

    pub fn filter(&self) -> &PackageFilter {
        &self.filter
    }

    pub fn add_record(&mut self, record: ClassRecord) -> &mut Self {
        if !self.filter.accept(&record.package) || (!self.inner_classes && record.is_inner()) {
            self.skipped += 1;
            return self;
        }
        let package = self.to_component(&record.package);

        let imports: BTreeSet<String> = record
            .imports
            .iter()
            .filter(|import| self.filter.accept(import))
            .map(|import| self.to_component(import))
            .filter(|import| *import != package)
            .collect();

        for import in &imports {
            self.graph.depends_upon(&package, import);
        }

        let class = Class::new(record.name, record.is_abstract, record.source_file, imports);
        self.graph.add_class(&package, class);
        self
    }

    pub fn add_records<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = ClassRecord>,
    {
        for record in records {
            self.add_record(record);
        }
        self
    }

    pub fn build(self) -> PackageGraph {
        debug!(
            packages = self.graph.len(),
            skipped_classes = self.skipped,
            "package graph built"
        );
        self.graph
    }

    fn to_component(&self, package: &str) -> String {
        self.components
            .iter()
            .find(|component| {
                package == component.as_str()
                    || package
                        .strip_prefix(component.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .cloned()
            .unwrap_or_else(|| package.to_string())
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(PackageFilter::all())
    }
}
