//! Shell completions command

use std::io::Write;

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Write completions for `args.shell` to stdout
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_completions(&args, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn write_completions(args: &CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin_name, out);
    Ok(())
}
