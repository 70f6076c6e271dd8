//! Error types and handling for fwgather
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes.
//!
//! Every error aborts the run. Failures inside a single source or patch are
//! wrapped in [`FwError::GatherFailed`] / [`FwError::PatchFailed`] so the
//! report names the step that broke.
//!
//! - [`fs`]: constructors for file system failures

pub mod fs;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fwgather operations
#[derive(Error, Diagnostic, Debug)]
pub enum FwError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fwgather::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(
        code(fwgather::config::parse_failed),
        help("Manifests are YAML documents with a top-level 'sources' list")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read manifest: {path}: {reason}")]
    #[diagnostic(code(fwgather::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Gather errors
    #[error("No directory starting with '{prefix}' in {root}")]
    #[diagnostic(
        code(fwgather::source::not_found),
        help("Check that the Windows root points at an installation with the vendor drivers")
    )]
    SourceNotFound { prefix: String, root: String },

    #[error("Failed to copy '{path}': {reason}")]
    #[diagnostic(code(fwgather::source::copy_failed))]
    CopyFailed { path: String, reason: String },

    #[error("Failed to download '{url}': {reason}")]
    #[diagnostic(code(fwgather::source::download_failed))]
    DownloadFailed { url: String, reason: String },

    #[error("Checksum mismatch for '{url}': expected {expected}, got {actual}")]
    #[diagnostic(code(fwgather::source::checksum_mismatch))]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Source '{name}' failed")]
    #[diagnostic(code(fwgather::gather::failed))]
    GatherFailed {
        name: String,
        #[source]
        cause: Box<FwError>,
    },

    // Patch errors
    #[error("'{tool}' failed: {reason}")]
    #[diagnostic(
        code(fwgather::tool::failed),
        help("Make sure the third-party tools are checked out under the tools directory")
    )]
    ExternalToolFailed { tool: String, reason: String },

    #[error("Missing prerequisite for patch '{patch}': {path}")]
    #[diagnostic(
        code(fwgather::patch::missing_prerequisite),
        help("The file should have been produced by the gather phase")
    )]
    MissingPrerequisite { patch: String, path: String },

    #[error("{message}")]
    #[diagnostic(code(fwgather::patch::step_failed))]
    PatchStepFailed { message: String },

    #[error("Patch '{name}' failed")]
    #[diagnostic(code(fwgather::patch::failed))]
    PatchFailed {
        name: String,
        #[source]
        cause: Box<FwError>,
    },

    // Environment errors
    #[error("Refusing to run as root")]
    #[diagnostic(
        code(fwgather::env::root),
        help("Run fwgather as a regular user; the output is copied into place separately")
    )]
    RunningAsRoot,

    #[error("IO error: {message}")]
    #[diagnostic(code(fwgather::fs::io_error))]
    IoError { message: String },
}

impl FwError {
    /// Wrap an error raised while materializing the named source
    pub fn in_source(name: &str, cause: FwError) -> Self {
        FwError::GatherFailed {
            name: name.to_string(),
            cause: Box::new(cause),
        }
    }

    /// Wrap an error raised while applying the named patch
    pub fn in_patch(name: &str, cause: FwError) -> Self {
        FwError::PatchFailed {
            name: name.to_string(),
            cause: Box::new(cause),
        }
    }
}

impl From<std::io::Error> for FwError {
    fn from(err: std::io::Error) -> Self {
        FwError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FwError {
    fn from(err: serde_json::Error) -> Self {
        FwError::PatchStepFailed {
            message: format!("JSON encoding failed: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FwError>;
