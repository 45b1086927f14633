mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{evaluate, export, inspect, replay};

/// Route `tracing` output to stderr at a level picked by `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Inspect(args) => inspect::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
        Commands::Evaluate(args) => evaluate::run(&cli, args),
        Commands::Replay(args) => replay::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
