mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::RunCommand;

/// Tabrun CLI - drives the clean/analyze/summarize sales pipeline
#[derive(Debug, Parser)]
#[command(
    name = "tabrun",
    version,
    about = "Clean, analyze, and summarize tabular sales data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute the pipeline against a CSV file or generated sample data
    Run(RunCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabrun_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Run(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
