//! File system error constructors

use std::path::Path;

use super::FwError;

/// Error for a failed copy involving `path`
pub fn copy_failed(path: &Path, err: &std::io::Error) -> FwError {
    FwError::CopyFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Error for a failed file system step inside a patch
pub fn step_failed(action: &str, path: &Path, err: &std::io::Error) -> FwError {
    FwError::PatchStepFailed {
        message: format!("Failed to {} '{}': {}", action, path.display(), err),
    }
}
