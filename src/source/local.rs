//! Files copied out of the Windows Driver Store file repository
//!
//! Driver packages live in directories named after their INF file plus a
//! version hash (e.g. `qcwlan8180.inf_arm64_5d5b6a0e3c7d4d8f`), so the
//! package is located by name prefix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::FileMap;
use crate::context::ExecutionContext;
use crate::error::{FwError, Result, fs::copy_failed};
use crate::logger::Logger;

use super::ArtifactSource;

/// Locate the package directory under `root` whose name starts with `prefix`.
///
/// When several directories match, the lexicographically first one is used
/// and the others are reported as a warning. A missing `root` counts as no
/// match; any other failure to list it is reported with its cause.
pub fn resolve_source_directory(root: &Path, prefix: &str, log: &Logger) -> Result<PathBuf> {
    let not_found = || FwError::SourceNotFound {
        prefix: prefix.to_string(),
        root: root.display().to_string(),
    };

    let entries = std::fs::read_dir(root).map_err(|e| match e.kind() {
        ErrorKind::NotFound => not_found(),
        _ => copy_failed(root, &e),
    })?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    matches.sort();

    if matches.len() > 1 {
        let names: Vec<String> = matches
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        log.warn(format!(
            "multiple directories match '{}': {}; using '{}'",
            prefix,
            names.join(", "),
            names[0]
        ));
    }

    matches.into_iter().next().ok_or_else(not_found)
}

/// Firmware extracted from a vendor driver package
#[derive(Debug, Clone)]
pub struct LocalRepositorySource {
    name: String,
    target: PathBuf,
    prefix: String,
    files: FileMap,
}

impl LocalRepositorySource {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<PathBuf>,
        prefix: impl Into<String>,
        files: FileMap,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            prefix: prefix.into(),
            files,
        }
    }
}

impl ArtifactSource for LocalRepositorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "local"
    }

    fn origin(&self) -> String {
        format!("{}*", self.prefix)
    }

    fn target_directory(&self) -> &Path {
        &self.target
    }

    fn files(&self) -> &FileMap {
        &self.files
    }

    fn materialize(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        let base = resolve_source_directory(&ctx.vendor_repository_root, &self.prefix, log)?;

        for (src, dst) in self.files.iter() {
            let from = base.join(src);
            let to = ctx.output_path(&self.target).join(dst);

            if !from.is_file() {
                return Err(FwError::CopyFailed {
                    path: from.display().to_string(),
                    reason: "source file not found".to_string(),
                });
            }

            if let Some(parent) = to.parent() {
                std::fs::create_dir_all(parent).map_err(|e| copy_failed(parent, &e))?;
            }

            log.info(format!(
                "copying '{}' to '{}'",
                from.display(),
                self.target.join(dst).display()
            ));
            std::fs::copy(&from, &to).map_err(|e| copy_failed(&to, &e))?;
        }

        Ok(())
    }
}
