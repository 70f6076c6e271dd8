//! Compatibility symlinks for mismatched file names
//!
//! The QCA Bluetooth chip on the SQ2 reports ROM version 0x01 while the
//! Windows driver only ships files for 0x21. Linking the 0x01 names to the
//! 0x21 files works.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::context::ExecutionContext;
use crate::error::{FwError, Result, fs::step_failed};
use crate::logger::Logger;

use super::Patch;

/// Creates `<alias> -> <file>` links inside one directory, where the alias
/// is the file name with `from` replaced by `to`. Safe to re-run.
#[derive(Debug, Clone)]
pub struct CompatSymlinks {
    directory: PathBuf,
    files: Vec<String>,
    from: String,
    to: String,
}

impl CompatSymlinks {
    pub fn new<I, S>(
        directory: impl Into<PathBuf>,
        files: I,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            directory: directory.into(),
            files: files.into_iter().map(Into::into).collect(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Alternate name for `file`
    pub fn alias(&self, file: &str) -> String {
        file.replace(&self.from, &self.to)
    }
}

/// Remove whatever sits at `path` unless it is a real directory
fn remove_existing(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(FwError::PatchStepFailed {
            message: format!("'{}' is a directory", path.display()),
        }),
        Ok(_) => std::fs::remove_file(path).map_err(|e| step_failed("remove", path, &e)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(step_failed("inspect", path, &e)),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

impl Patch for CompatSymlinks {
    fn name(&self) -> &str {
        "qca/bt"
    }

    fn prerequisites(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| self.directory.join(f)).collect()
    }

    fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        let dir = ctx.output_path(&self.directory);

        for file in &self.files {
            let alias = self.alias(file);
            if alias == *file {
                return Err(FwError::PatchStepFailed {
                    message: format!("'{}' does not contain '{}'", file, self.from),
                });
            }

            let link = dir.join(&alias);
            remove_existing(&link)?;

            log.info(format!("linking '{alias}' to '{file}'"));
            symlink(Path::new(file), &link).map_err(|e| step_failed("create link", &link, &e))?;
        }

        Ok(())
    }
}
