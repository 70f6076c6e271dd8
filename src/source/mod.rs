//! Artifact sources and the gather phase
//!
//! An artifact source names a group of files, where they come from and where
//! they land in the output tree:
//! - [`LocalRepositorySource`]: a versioned package directory in the Windows
//!   Driver Store, located by name prefix
//! - [`RemoteDownloadSource`]: a static HTTP(S) file server
//!
//! [`SourceCatalog`] runs all sources in declaration order and stops at the
//! first failure.

pub mod catalog;
pub mod local;
pub mod remote;

#[cfg(test)]
mod tests;

pub use catalog::SourceCatalog;
pub use local::LocalRepositorySource;
pub use remote::{RemoteDownloadSource, http_client};

use std::path::Path;

use crate::config::FileMap;
use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;

/// A declared origin of firmware files
pub trait ArtifactSource {
    /// Name used in progress output and error reports
    fn name(&self) -> &str;

    /// Short kind label (`local`, `remote`)
    fn kind(&self) -> &'static str;

    /// Human readable origin (directory prefix or base URL)
    fn origin(&self) -> String;

    /// Destination directory, relative to the output root
    fn target_directory(&self) -> &Path;

    fn files(&self) -> &FileMap;

    /// Copy or download every listed file into the output tree,
    /// overwriting existing files
    fn materialize(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()>;
}

/// Ensure parent directory exists for a path
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FwError::IoError {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }
    Ok(())
}
