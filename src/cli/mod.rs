//! CLI definitions using clap derive API
//!
//! One submodule per command's argument types:
//! - run: Run command arguments
//! - list: List command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod list;
pub mod run;

pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use run::RunArgs;

/// fwgather - firmware gatherer
///
/// Collect device firmware from a Windows installation and public mirrors
/// into a Linux firmware tree.
#[derive(Parser, Debug)]
#[command(
    name = "fwgather",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Gather and patch device firmware for Linux",
    long_about = "fwgather copies firmware files out of a mounted Windows installation's \
                  driver store, downloads the rest from public mirrors, and patches the result \
                  into the layout the Linux drivers expect.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  fwgather run -w /mnt/windows                \x1b[90m# Gather into ./out\x1b[0m\n   \
                  fwgather run -w /mnt/windows -o fw          \x1b[90m# Gather into ./fw\x1b[0m\n   \
                  fwgather list                               \x1b[90m# Show sources and patches\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Suppress progress output (warnings and errors are still printed)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gather and patch firmware into an output directory
    Run(RunArgs),

    /// List firmware sources and patches
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
