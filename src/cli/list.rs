use clap::Parser;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the built-in sources and patches:\n    fwgather list\n\n\
                  List the sources of a custom manifest:\n    fwgather list --manifest my-device.yaml")]
pub struct ListArgs {
    /// Source manifest to use instead of the built-in one (the patches stay
    /// the built-in ones)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}
