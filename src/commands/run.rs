//! Run command implementation

use crate::cli::RunArgs;
use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;
use crate::orchestrator::Orchestrator;
use crate::platform;
use crate::source::http_client;
use crate::tool::ToolPaths;

/// Gather and patch into `args.output`
pub fn run(args: RunArgs, log: &Logger) -> Result<()> {
    ensure_not_root()?;

    if !args.windows_root.is_dir() {
        return Err(FwError::ConfigInvalid {
            message: format!(
                "Windows root '{}' is not a directory",
                args.windows_root.display()
            ),
        });
    }

    let manifest = super::load_manifest(args.manifest.as_deref())?;
    let ctx = ExecutionContext::for_windows_root(&args.windows_root, &args.output);
    ctx.prepare()?;

    let client = http_client()?;
    let tools = ToolPaths::from_root(&args.tools);
    let orchestrator = Orchestrator::new(manifest.catalog(&client), platform::patch_pipeline(&tools));

    orchestrator.run(&ctx, log)
}

#[cfg(unix)]
fn ensure_not_root() -> Result<()> {
    if nix::unistd::Uid::effective().is_root() {
        return Err(FwError::RunningAsRoot);
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_not_root() -> Result<()> {
    Ok(())
}
