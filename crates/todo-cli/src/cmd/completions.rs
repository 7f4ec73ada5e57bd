use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for (bash, zsh, fish, elvish, powershell).
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the `todo` completion script for `shell`; redirect it into the
/// shell's completion directory to install.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    generate(shell, command, "todo", &mut std::io::stdout());
    Ok(())
}
