use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use cluemetrics_core::{reduce, WordExactMetric, WordExactState};

use crate::{command::Command, report::print_result};

#[derive(Args)]
pub(crate) struct ReduceArgs {
    /// State files written by `eval --state-out`
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    states: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) struct ReduceCommand;

impl Command for ReduceCommand {
    type Args = ReduceArgs;
    fn execute(args: &ReduceArgs, _quiet: bool) -> Result<()> {
        let states = args
            .states
            .iter()
            .map(|path| {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read state file {}", path))?;
                serde_json::from_str::<WordExactState>(&json)
                    .with_context(|| format!("Failed to parse state file {}", path))
            })
            .collect::<Result<Vec<_>>>()?;

        let combined = reduce(&states).context("Failed to combine metric states")?;
        tracing::info!(
            shards = states.len(),
            correct = combined.correct(),
            total = combined.total(),
            "reduced metric state"
        );
        print_result(&WordExactMetric::new().get_name(), &combined, args.json)
    }
}
