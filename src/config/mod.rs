//! Configuration handling for fwgather
//!
//! - [`manifest`]: platform manifests listing the artifact sources
//! - [`file_map`]: normalization of per-source file listings

pub mod file_map;
pub mod manifest;

pub use file_map::FileMap;
pub use manifest::Manifest;

use std::path::{Component, Path};

use crate::error::{FwError, Result};

/// Reject empty, absolute and `..`-escaping paths
pub(crate) fn check_relative(path: &str, what: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FwError::ConfigInvalid {
            message: format!("{what} must not be empty"),
        });
    }

    let escapes = Path::new(path).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(FwError::ConfigInvalid {
            message: format!("{what} '{path}' must be a relative path inside the tree"),
        });
    }

    Ok(())
}
