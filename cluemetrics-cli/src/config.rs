use std::path::Path;

use clap::{Args, Subcommand, ValueEnum};
use cluemetrics_core::fetch::FetchConfig;

use crate::command::Command;

use anyhow::{Context, Result};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub(crate) struct ConfigCheckArgs {
    config: String,
}

#[derive(Args)]
pub(crate) struct ConfigNewArgs {
    #[arg(long)]
    #[arg(default_value = "json")]
    format: ConfigFormat,
}

#[derive(Subcommand)]
enum ConfigSubCommand {
    /// Check a fetch configuration for validity.
    Check(ConfigCheckArgs),
    /// Emit a full fetch configuration with all defaults.
    New(ConfigNewArgs),
}

#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubCommand,
}

pub(crate) struct ConfigCommand;

impl Command for ConfigCommand {
    type Args = ConfigArgs;
    fn execute(args: &ConfigArgs, _quiet: bool) -> Result<()> {
        match &args.subcommand {
            ConfigSubCommand::Check(args) => {
                FetchConfig::from_file(Path::new(&args.config)).with_context(|| {
                    format!("Failed to load configuration file {}", args.config)
                })?;
                println!("ok");
                Ok(())
            }
            ConfigSubCommand::New(args) => {
                let config = FetchConfig::default();
                let text = match args.format {
                    ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
                    ConfigFormat::Yaml => serde_yaml::to_string(&config)?,
                };
                println!("{}", text.trim_end());
                Ok(())
            }
        }
    }
}
