mod builder;
mod class;
mod dependency_map;
mod graph;
mod package;

pub use builder::GraphBuilder;
pub use class::{Class, ClassRecord};
pub use dependency_map::DependencyMap;
pub use graph::PackageGraph;
pub use package::{DEFAULT_VOLATILITY, Package};
