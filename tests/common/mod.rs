//! Common test utilities for fwgather integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Driver store location below a Windows root
pub const DRIVER_STORE: &str = "Windows/System32/DriverStore/FileRepository";

/// A scratch area holding a fake Windows root, an output directory and a
/// tools directory
#[allow(dead_code)]
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub windows_root: PathBuf,
    pub output: PathBuf,
    pub tools: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let windows_root = temp.path().join("windows");
        let output = temp.path().join("out");
        let tools = temp.path().join("tools");
        std::fs::create_dir_all(windows_root.join(DRIVER_STORE))
            .expect("Failed to create driver store");
        std::fs::create_dir_all(&tools).expect("Failed to create tools directory");
        Self {
            temp,
            windows_root,
            output,
            tools,
        }
    }

    /// Create a driver package directory containing `files` (content = file name)
    pub fn driver_package(&self, dir_name: &str, files: &[&str]) -> PathBuf {
        let pkg = self.windows_root.join(DRIVER_STORE).join(dir_name);
        for file in files {
            let path = pkg.join(file);
            std::fs::create_dir_all(path.parent().expect("file has a parent"))
                .expect("Failed to create package directory");
            std::fs::write(&path, file.as_bytes()).expect("Failed to write package file");
        }
        pkg
    }

    /// Write a manifest next to the other directories
    pub fn write_manifest(&self, yaml: &str) -> PathBuf {
        let path = self.temp.path().join("manifest.yaml");
        std::fs::write(&path, yaml).expect("Failed to write manifest");
        path
    }

    /// Path inside the output directory
    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.output.join(relative)
    }

    /// Install shell stand-ins for the three external tools:
    /// - the splitter touches `<prefix>.mdt`
    /// - the board encoder copies its JSON spec to the output
    /// - the firmware encoder appends `+features` to the image
    #[cfg(unix)]
    pub fn install_fake_tools(&self) {
        write_script(
            &self.tools.join("qcom-mbn-tools/pil-splitter.py"),
            "touch \"$2.mdt\"",
        );
        let ath10k = self
            .tools
            .join("qca-swiss-army-knife/tools/scripts/ath10k");
        write_script(&ath10k.join("ath10k-bdencoder"), "cp \"$2\" \"$4\"");
        write_script(&ath10k.join("ath10k-fwencoder"), "printf '+features' >> \"$3\"");
    }

    /// Replace one fake tool with a script that fails
    #[cfg(unix)]
    pub fn break_tool(&self, relative: &str) {
        write_script(&self.tools.join(relative), "echo broken >&2\nexit 3");
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(path.parent().expect("script has a parent"))
        .expect("Failed to create tool directory");
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

/// Every non-directory entry below `root`, relative and sorted
#[allow(dead_code)]
pub fn files_under(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .expect("entry below root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// Whether the tests run with uid 0, where `fwgather run` refuses to start
#[allow(dead_code)]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::Uid::effective().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_layout() {
        let workspace = TestWorkspace::new();
        assert!(workspace.windows_root.join(DRIVER_STORE).is_dir());
        assert!(workspace.tools.is_dir());
        assert!(!workspace.output.exists());
    }

    #[test]
    fn test_driver_package_files() {
        let workspace = TestWorkspace::new();
        let pkg = workspace.driver_package("qcdx8180.inf_arm64_1", &["a.mbn", "MCFG/MCFG.1"]);
        assert_eq!(files_under(&pkg), vec!["MCFG/MCFG.1", "a.mbn"]);
    }
}
