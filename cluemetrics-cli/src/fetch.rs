use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use cluemetrics_core::fetch::{FetchConfig, Fetcher};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::command::Command;

#[derive(Args)]
pub(crate) struct FetchArgs {
    /// JSON or YAML fetch config. Flags below override its values.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<String>,

    /// Page URL, with `{offset}` where the row offset goes
    #[arg(long)]
    url_template: Option<String>,

    #[arg(long)]
    start: Option<u64>,

    /// Exclusive upper bound on offsets
    #[arg(long)]
    end: Option<u64>,

    /// Rows per page
    #[arg(long)]
    step: Option<u64>,

    #[arg(short, long, value_hint = ValueHint::DirPath)]
    output_dir: Option<String>,

    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl FetchArgs {
    fn resolve_config(&self) -> Result<FetchConfig> {
        let base = match &self.config {
            Some(path) => FetchConfig::from_file(Path::new(path))
                .with_context(|| format!("Failed to load configuration file {}", path))?,
            None => FetchConfig::default(),
        };

        let mut builder = base.to_builder();
        if let Some(url_template) = &self.url_template {
            builder.url_template(url_template.as_str());
        }
        if let Some(start) = self.start {
            builder.start(start);
        }
        if let Some(end) = self.end {
            builder.end(end);
        }
        if let Some(step) = self.step {
            builder.step(step);
        }
        if let Some(output_dir) = &self.output_dir {
            builder.output_dir(Path::new(output_dir));
        }
        if let Some(timeout_secs) = self.timeout_secs {
            builder.timeout_secs(timeout_secs);
        }
        Ok(builder.build()?)
    }
}

pub(crate) struct FetchCommand;

impl Command for FetchCommand {
    type Args = FetchArgs;
    fn execute(args: &FetchArgs, quiet: bool) -> Result<()> {
        let config = args.resolve_config()?;
        let output_dir = config.output_dir().display().to_string();
        let fetcher = Fetcher::from_config(config)?;

        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(fetcher.page_count());
            pb.set_style(
                ProgressStyle::with_template(
                    "Pages: {bar:40.cyan/blue} {pos}/{len} ({per_sec}) {msg}",
                )?
                .progress_chars("##-"),
            );
            pb
        };

        let report = fetcher
            .run(|page| {
                pb.set_message(format!("offset {}", page.offset));
                pb.inc(1);
            })
            .with_context(|| format!("Failed to fetch dataset into {}", output_dir))?;
        pb.finish_and_clear();

        if !quiet {
            eprintln!(
                "{} Wrote {} pages ({} bytes) to {}",
                "Done:".green(),
                report.pages,
                report.bytes,
                output_dir
            );
        }
        Ok(())
    }
}
