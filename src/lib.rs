pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod fs;
pub mod model;
pub mod output;
pub mod rules;
pub mod style;

pub use analysis::AnalysisResult;
pub use api::{
    AnalysisOptions, DepcheckError, analyze, build_graph, check_rules, find_cycles, load_graph,
    load_records, load_rules,
};
pub use cli::Cli;
pub use commands::{cmd_cycles, cmd_init, cmd_metrics, cmd_rules};
pub use config::Config;
