//! Shared execution context for the gather and patch phases

use std::path::{Path, PathBuf};

use crate::error::{FwError, Result};

/// Location of the Driver Store file repository inside a Windows root
pub const DRIVER_STORE_PATH: &str = "Windows/System32/DriverStore/FileRepository";

/// Read-only paths passed to every source and patch
///
/// Concurrent runs against the same `output_root` are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub output_root: PathBuf,
    pub vendor_repository_root: PathBuf,
}

impl ExecutionContext {
    pub fn new(output_root: impl Into<PathBuf>, vendor_repository_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            vendor_repository_root: vendor_repository_root.into(),
        }
    }

    /// Context for a mounted Windows installation
    pub fn for_windows_root(windows_root: &Path, output_root: impl Into<PathBuf>) -> Self {
        Self::new(output_root, windows_root.join(DRIVER_STORE_PATH))
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_root).map_err(|e| FwError::IoError {
            message: format!(
                "Failed to create output directory '{}': {}",
                self.output_root.display(),
                e
            ),
        })
    }

    /// Path of `relative` inside the output tree
    pub fn output_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.output_root.join(relative)
    }
}
