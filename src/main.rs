//! fwgather - firmware gatherer
//!
//! Collects the firmware a Linux kernel needs for a Windows-on-ARM device:
//! vendor files are copied out of the Windows driver store, the rest is
//! downloaded from public mirrors, and the gathered tree is then patched
//! into the layout the Linux drivers expect.

use clap::Parser;
use std::error::Error;

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod hash;
mod logger;
mod orchestrator;
mod patch;
mod platform;
mod source;
mod tool;

use cli::{Cli, Commands};
use logger::Logger;

/// Top-level error message followed by one line per underlying cause
fn error_report(err: &dyn Error) -> String {
    let mut report = format!("Error: {err}");
    let mut cause = err.source();
    while let Some(e) = cause {
        report.push_str(&format!("\n  caused by: {e}"));
        cause = e.source();
    }
    report
}

fn main() {
    let cli = Cli::parse();
    let log = Logger::new(cli.quiet);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &log),
        Commands::List(args) => commands::list::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{}", error_report(&e));
        std::process::exit(1);
    }
}
