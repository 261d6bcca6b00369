use crate::rules::Strictness;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depcheck")]
#[command(about = "Package dependency metrics, cycle detection and dependency rule checks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more detail to stderr (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report coupling, abstractness, instability and distance per package
    Metrics(MetricsArgs),

    /// Report cyclic package groups, failing when any remain
    Cycles(CyclesArgs),

    /// Check dependencies against a rule table
    Rules(RulesArgs),

    /// Generate a starter .depcheck.toml configuration file
    Init(InitArgs),
}

/// Inputs shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// JSON file with the class records to analyze
    pub records: PathBuf,

    /// Directory holding .depcheck.toml (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Package prefixes to exclude (comma-separated, added to the configured ones)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Component prefixes collapsing sub-packages (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub components: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when a package under --prefix exceeds this distance
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Package prefix for --max-distance and --table
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Print a plain abstractness / instability / distance table instead of a report
    #[arg(long)]
    pub table: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CyclesArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Packages whose mutual cycles are accepted, comma-separated. Repeatable
    #[arg(long)]
    pub except: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// TOML rule table
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Which findings fail the check (rules, exactly, ignoring-non-existing, ignoring-undefined)
    #[arg(long, default_value = "rules")]
    pub strictness: Strictness,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .depcheck.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}
