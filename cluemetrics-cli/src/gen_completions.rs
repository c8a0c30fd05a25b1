use crate::{command::Command, Cli};
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use owo_colors::OwoColorize;

use anyhow::Result;

const BIN_NAME: &str = "clm";

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ShellWrapper {
    Bash,
    Fish,
    Zsh,
}

impl ShellWrapper {
    fn install_hint(self) -> String {
        match self {
            ShellWrapper::Bash => format!(
                "{bin} gen-completions bash > /usr/share/bash-completion/completions/{bin}",
                bin = BIN_NAME
            ),
            ShellWrapper::Fish => format!(
                "{bin} gen-completions fish > ~/.config/fish/completions/{bin}.fish",
                bin = BIN_NAME
            ),
            ShellWrapper::Zsh => format!(
                "{bin} gen-completions zsh > ~/.zfunc/_{bin}",
                bin = BIN_NAME
            ),
        }
    }
}

impl From<ShellWrapper> for Shell {
    fn from(s: ShellWrapper) -> Self {
        match s {
            ShellWrapper::Bash => Shell::Bash,
            ShellWrapper::Fish => Shell::Fish,
            ShellWrapper::Zsh => Shell::Zsh,
        }
    }
}

#[derive(Args)]
pub(crate) struct GenCompletionsArgs {
    shell: Option<ShellWrapper>,
}

pub(crate) struct GenCompletionsCommand;

impl Command for GenCompletionsCommand {
    type Args = GenCompletionsArgs;
    fn execute(args: &GenCompletionsArgs, quiet: bool) -> Result<()> {
        match args.shell {
            Some(shell) => {
                generate(
                    Shell::from(shell),
                    &mut Cli::command(),
                    BIN_NAME,
                    &mut std::io::stdout(),
                );
                if !quiet {
                    eprintln!();
                    eprintln!(
                        "{}: To install these completions, run: {}",
                        "Hint".blue(),
                        shell.install_hint()
                    );
                }
            }
            None => {
                eprintln!("Generate shell completions. To install them for your shell, run:");
                for shell in [ShellWrapper::Bash, ShellWrapper::Fish, ShellWrapper::Zsh] {
                    let name = match shell {
                        ShellWrapper::Bash => "Bash:",
                        ShellWrapper::Fish => "Fish:",
                        ShellWrapper::Zsh => "Zsh:",
                    };
                    eprintln!();
                    eprintln!("{}", name.blue());
                    eprintln!("  {}", shell.install_hint());
                }
                eprintln!();
            }
        }
        Ok(())
    }
}
