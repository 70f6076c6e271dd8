//! Invocation of third-party firmware tools

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{FwError, Result};
use crate::logger::Logger;

/// Default directory holding the third-party tool checkouts
pub const DEFAULT_TOOLS_DIR: &str = "third-party";

/// An external program run as a black box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    path: PathBuf,
}

impl ExternalTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        )
    }

    /// Run the tool to completion. A spawn failure or non-zero exit status
    /// is an [`FwError::ExternalToolFailed`].
    pub fn run<I, S>(&self, args: I, log: &Logger) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let fail = |reason: String| FwError::ExternalToolFailed {
            tool: self.display_name(),
            reason,
        };

        log.info(format!(
            "running {} {}",
            self.display_name(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        ));

        let status = Command::new(&self.path)
            .args(&args)
            .status()
            .map_err(|e| fail(format!("could not start '{}': {}", self.path.display(), e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(fail(match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            }))
        }
    }
}

/// Locations of the tools used by the built-in patches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub pil_splitter: ExternalTool,
    pub board_encoder: ExternalTool,
    pub firmware_encoder: ExternalTool,
}

impl ToolPaths {
    /// Tool layout under a third-party checkout directory
    pub fn from_root(root: &Path) -> Self {
        let ath10k = root
            .join("qca-swiss-army-knife")
            .join("tools")
            .join("scripts")
            .join("ath10k");

        Self {
            pil_splitter: ExternalTool::new(root.join("qcom-mbn-tools").join("pil-splitter.py")),
            board_encoder: ExternalTool::new(ath10k.join("ath10k-bdencoder")),
            firmware_encoder: ExternalTool::new(ath10k.join("ath10k-fwencoder")),
        }
    }
}

/// Write an executable shell script, for tests standing in for real tools
#[cfg(all(test, unix))]
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
