//! Post-processing patches applied to the gathered firmware tree
//!
//! Patches run after the gather phase, strictly in pipeline order. Several
//! depend on files copied by specific sources; each patch lists those files
//! as prerequisites, which are checked before the patch runs.

pub mod board;
pub mod features;
pub mod pipeline;
pub mod symlinks;
pub mod venus;

pub use board::BoardRepack;
pub use features::FeatureFlags;
pub use pipeline::PatchPipeline;
pub use symlinks::CompatSymlinks;
pub use venus::VenusExtract;

use std::path::PathBuf;

use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;

/// A named transformation over the output tree
pub trait Patch {
    fn name(&self) -> &str;

    /// Files (relative to the output root) that must exist before applying
    fn prerequisites(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()>;
}

/// Fail with [`FwError::MissingPrerequisite`] for the first absent file
pub fn check_prerequisites(patch: &dyn Patch, ctx: &ExecutionContext) -> Result<()> {
    for relative in patch.prerequisites() {
        if !ctx.output_path(&relative).exists() {
            return Err(FwError::MissingPrerequisite {
                patch: patch.name().to_string(),
                path: relative.display().to_string(),
            });
        }
    }
    Ok(())
}
