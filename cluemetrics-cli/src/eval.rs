use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use cluemetrics_core::WordExactMetric;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::{command::Command, report::print_result};

#[derive(Args)]
pub(crate) struct EvalArgs {
    /// File with one prediction per line
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    predictions: String,

    /// File with one target per line, paired with predictions by line number
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    targets: String,

    /// Number of lines handed to the metric per update
    #[arg(long)]
    #[arg(default_value = "1024")]
    batch_size: usize,

    /// Write the accumulated metric state to this file for a later `reduce`
    #[arg(long, value_hint = ValueHint::FilePath)]
    state_out: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn open_lines(path: &str) -> Result<Lines<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    Ok(BufReader::new(file).lines())
}

fn read_batch(lines: &mut Lines<BufReader<File>>, size: usize, path: &str) -> Result<Vec<String>> {
    let mut batch = Vec::with_capacity(size);
    for line in lines.by_ref().take(size) {
        batch.push(line.with_context(|| format!("Failed to read {}", path))?);
    }
    Ok(batch)
}

pub(crate) struct EvalCommand;

impl Command for EvalCommand {
    type Args = EvalArgs;
    fn execute(args: &EvalArgs, quiet: bool) -> Result<()> {
        anyhow::ensure!(args.batch_size > 0, "batch size must be greater than zero");

        let mut predictions = open_lines(&args.predictions)?;
        let mut targets = open_lines(&args.targets)?;
        let mut metric = WordExactMetric::new();

        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template(
                "Elapsed time: {elapsed}\nExamples processed: {pos}\n",
            )?);
            spinner.enable_steady_tick(Duration::from_millis(250));
            spinner
        };

        let mut batch_number = 0;
        loop {
            let preds = read_batch(&mut predictions, args.batch_size, &args.predictions)?;
            let labels = read_batch(&mut targets, args.batch_size, &args.targets)?;
            if preds.is_empty() && labels.is_empty() {
                break;
            }

            metric.update(&preds, &labels).with_context(|| {
                format!(
                    "Failed to score batch {} of {} against {}",
                    batch_number, args.predictions, args.targets
                )
            })?;
            spinner.inc(preds.len() as u64);
            batch_number += 1;
        }
        spinner.finish_and_clear();

        let state = metric.state();
        if let Some(path) = &args.state_out {
            let json = serde_json::to_string_pretty(&state)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write metric state to {}", path))?;
            if !quiet {
                eprintln!("{} Wrote metric state to {}", "Saved:".green(), path);
            }
        }

        print_result(&metric.get_name(), &state, args.json)
    }
}
