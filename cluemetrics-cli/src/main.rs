use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::command::Command;

mod command;
mod config;
mod eval;
mod fetch;
mod gen_completions;
mod gen_schema;
mod reduce;
mod report;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Silence all output
    #[arg(long, default_value = "false")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the paginated clue dataset to disk
    Fetch(fetch::FetchArgs),
    /// Score predictions against targets with word exact match
    Eval(eval::EvalArgs),
    /// Combine metric state files written by several workers
    Reduce(reduce::ReduceArgs),
    /// Check or generate a fetch config
    Config(config::ConfigArgs),
    /// Generate shell completions
    GenCompletions(gen_completions::GenCompletionsArgs),
    /// Generate JSON schema for the fetch config
    GenSchema(gen_schema::GenSchemaArgs),
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    match &cli.command {
        Commands::Fetch(args) => fetch::FetchCommand::execute(args, cli.quiet),
        Commands::Eval(args) => eval::EvalCommand::execute(args, cli.quiet),
        Commands::Reduce(args) => reduce::ReduceCommand::execute(args, cli.quiet),
        Commands::Config(args) => config::ConfigCommand::execute(args, cli.quiet),
        Commands::GenCompletions(args) => {
            gen_completions::GenCompletionsCommand::execute(args, cli.quiet)
        }
        Commands::GenSchema(args) => gen_schema::GenSchemaCommand::execute(args, cli.quiet),
    }
}
