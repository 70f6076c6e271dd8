//! Files downloaded from static HTTP(S) file servers

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::config::FileMap;
use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::hash;
use crate::logger::Logger;

use super::{ArtifactSource, ensure_parent_dir};

/// Build the HTTP client shared by all remote sources
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("fwgather/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FwError::IoError {
            message: format!("Failed to initialize HTTP client: {e}"),
        })
}

/// Firmware downloaded from the internet
#[derive(Debug, Clone)]
pub struct RemoteDownloadSource {
    name: String,
    target: PathBuf,
    base_url: String,
    files: FileMap,
    checksums: BTreeMap<String, String>,
    client: Client,
}

impl RemoteDownloadSource {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<PathBuf>,
        base_url: impl Into<String>,
        files: FileMap,
        client: Client,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            base_url: base_url.into(),
            files,
            checksums: BTreeMap::new(),
            client,
        }
    }

    /// Expected `blake3:` digests, keyed by remote file name
    #[must_use]
    pub fn with_checksums(mut self, checksums: BTreeMap<String, String>) -> Self {
        self.checksums = checksums;
        self
    }

    pub fn url_for(&self, remote_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), remote_name)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let download_error = |reason: String| FwError::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_error(format!("HTTP status {status}")));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| download_error(e.to_string()))
    }
}

impl ArtifactSource for RemoteDownloadSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "remote"
    }

    fn origin(&self) -> String {
        self.base_url.clone()
    }

    fn target_directory(&self) -> &Path {
        &self.target
    }

    fn files(&self) -> &FileMap {
        &self.files
    }

    fn materialize(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        for (remote_name, dst) in self.files.iter() {
            let url = self.url_for(remote_name);
            let to = ctx.output_path(&self.target).join(dst);

            ensure_parent_dir(&to)?;

            log.info(format!(
                "downloading '{}' to '{}'",
                url,
                self.target.join(dst).display()
            ));
            let body = self.fetch(&url)?;

            if let Some(expected) = self.checksums.get(remote_name) {
                hash::verify(&body, expected).map_err(|actual| FwError::ChecksumMismatch {
                    url: url.clone(),
                    expected: expected.clone(),
                    actual,
                })?;
            }

            std::fs::write(&to, &body).map_err(|e| FwError::DownloadFailed {
                url: url.clone(),
                reason: format!("failed to write '{}': {}", to.display(), e),
            })?;
        }

        Ok(())
    }
}
