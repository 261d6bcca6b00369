use clap::Parser;
use depcheck::cli::{Cli, Command};
use depcheck::{cmd_cycles, cmd_init, cmd_metrics, cmd_rules};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Command::Metrics(args) => cmd_metrics(args),
        Command::Cycles(args) => cmd_cycles(args),
        Command::Rules(args) => cmd_rules(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "depcheck=debug",
        _ => "depcheck=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
