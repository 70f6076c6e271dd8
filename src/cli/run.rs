use clap::Parser;
use std::path::PathBuf;

use crate::tool::DEFAULT_TOOLS_DIR;

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Gather from a mounted Windows partition:\n    fwgather run -w /mnt/windows\n\n\
                  Use another output directory and tools checkout:\n    fwgather run -w /mnt/windows -o fw --tools ~/src/fw-tools\n\n\
                  Do not run two gathers into the same output directory at once.")]
pub struct RunArgs {
    /// Root of the Windows installation (the directory containing `Windows/`)
    #[arg(long, short = 'w', value_name = "WINDOWS_ROOT")]
    pub windows_root: PathBuf,

    /// Output directory, created if missing
    #[arg(long, short = 'o', default_value = "out")]
    pub output: PathBuf,

    /// Directory containing the external firmware tools
    #[arg(long, env = "FWGATHER_TOOLS", default_value = DEFAULT_TOOLS_DIR)]
    pub tools: PathBuf,

    /// Source manifest to use instead of the built-in one
    ///
    /// Only the sources are replaced. The patches stay those of the Surface
    /// Pro X (SQ2), so the manifest must still gather the files they read.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}
