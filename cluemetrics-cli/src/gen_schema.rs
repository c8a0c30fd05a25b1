use clap::Args;
use cluemetrics_core::fetch::FetchConfig;

use crate::command::Command;

use anyhow::Result;

#[derive(Args)]
pub(crate) struct GenSchemaArgs {}

pub(crate) struct GenSchemaCommand;

impl Command for GenSchemaCommand {
    type Args = GenSchemaArgs;
    fn execute(_args: &GenSchemaArgs, _quiet: bool) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(&FetchConfig::schema())?);
        Ok(())
    }
}
