use crate::filter::PackageFilter;
use crate::fs::{FileSystem, default_fs};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = ".depcheck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Volatility of '{package}' must be 0 or 1, got {value}")]
    Volatility { package: String, value: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Package prefixes left out of the graph, applied before command-line excludes.
    pub exclude: Vec<String>,
    /// Packages created up front with the given volatility.
    pub volatility: BTreeMap<String, u8>,
    pub components: Vec<String>,
    pub analyze_inner_classes: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    filter: Option<RawFilter>,
    volatility: Option<BTreeMap<String, u8>>,
    components: Option<Vec<String>>,
    analyze_inner_classes: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilter {
    #[serde(default)]
    exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            volatility: BTreeMap::new(),
            components: Vec::new(),
            analyze_inner_classes: true,
        }
    }
}

impl Config {
    /// Load `.depcheck.toml` from `project_path`, or defaults when it is absent.
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(project_path, default_fs())
    }

    pub fn load_with_fs(project_path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE);
        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let volatility = raw.volatility.unwrap_or_default();
        if let Some((package, value)) = volatility.iter().find(|(_, v)| **v > 1) {
            return Err(ConfigError::Volatility {
                package: package.clone(),
                value: *value,
            });
        }

        Ok(Self {
            exclude: raw.filter.map(|f| f.exclude).unwrap_or_default(),
            volatility,
            components: raw.components.unwrap_or_default(),
            analyze_inner_classes: raw.analyze_inner_classes.unwrap_or(true),
        })
    }

    /// The configured exclusions followed by `extra`.
    pub fn package_filter<S: AsRef<str>>(&self, extra: &[S]) -> PackageFilter {
        PackageFilter::all()
            .excluding(&self.exclude)
            .excluding(extra)
    }
}

/// Commented starter configuration written by `depcheck init`.
pub fn generate_config_template() -> String {
    r#"# depcheck configuration

[filter]
# Package prefixes left out of the analysis. A trailing * is ignored.
exclude = [
    "java.*",
    "javax.*",
    "sun.*",
    "com.sun.*",
]

# Packages that never change. Volatility 0 removes them from distance scoring.
[volatility]
# "com.xyz.a.neverchanges" = 0

# Collapse every package below a prefix into one node.
# components = ["com.xyz.core", "com.xyz.web"]

# Set to false to skip nested classes (names containing '$').
# analyze_inner_classes = true
"#
    .to_string()
}
