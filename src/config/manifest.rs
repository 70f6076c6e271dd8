//! Platform manifest: the declared list of artifact sources
//!
//! ```yaml
//! name: surface-pro-x-sq2
//! sources:
//!   - name: bluetooth
//!     type: local
//!     target: qca
//!     prefix: qcbtfmuart8180
//!     files: [crbtfw21.tlv, crnv21.bin]
//!   - name: gpu/base
//!     type: remote
//!     target: qcom
//!     url: https://example.com/firmware/qcom
//!     files: [a680_gmu.bin]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FwError, Result};
use crate::hash;
use crate::source::{LocalRepositorySource, RemoteDownloadSource, SourceCatalog};

use super::check_relative;
use super::file_map::FileMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestData {
    name: String,
    #[serde(default)]
    description: Option<String>,
    sources: Vec<SourceData>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum SourceData {
    Local {
        name: String,
        target: String,
        prefix: String,
        files: serde_yaml::Value,
    },
    Remote {
        name: String,
        target: String,
        url: String,
        files: serde_yaml::Value,
        #[serde(default)]
        checksums: BTreeMap<String, String>,
    },
}

/// Where a declared source comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Directory under the vendor repository whose name starts with `prefix`
    Local { prefix: String },
    /// Static file server
    Remote {
        url: String,
        checksums: BTreeMap<String, String>,
    },
}

/// A validated source declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub target: PathBuf,
    pub files: FileMap,
    pub origin: Origin,
}

/// A validated platform manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub description: Option<String>,
    pub sources: Vec<SourceSpec>,
}

impl Manifest {
    /// Parse and validate a manifest. `origin` names the document in errors.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        let data: ManifestData =
            serde_yaml::from_str(yaml).map_err(|e| FwError::ConfigParseFailed {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        let mut sources = Vec::with_capacity(data.sources.len());
        for source in data.sources {
            let spec = SourceSpec::from_data(source)?;
            if sources.iter().any(|s: &SourceSpec| s.name == spec.name) {
                return Err(FwError::ConfigInvalid {
                    message: format!("duplicate source name '{}'", spec.name),
                });
            }
            sources.push(spec);
        }

        Ok(Self {
            name: data.name,
            description: data.description,
            sources,
        })
    }

    /// Load a manifest from a file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| FwError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&yaml, &path.display().to_string())
    }

    /// Build the source catalog, in declaration order
    pub fn catalog(&self, client: &reqwest::blocking::Client) -> SourceCatalog {
        let mut catalog = SourceCatalog::new();
        for spec in &self.sources {
            match &spec.origin {
                Origin::Local { prefix } => catalog.push(LocalRepositorySource::new(
                    &spec.name,
                    &spec.target,
                    prefix,
                    spec.files.clone(),
                )),
                Origin::Remote { url, checksums } => catalog.push(
                    RemoteDownloadSource::new(
                        &spec.name,
                        &spec.target,
                        url,
                        spec.files.clone(),
                        client.clone(),
                    )
                    .with_checksums(checksums.clone()),
                ),
            }
        }
        catalog
    }
}

impl SourceSpec {
    fn from_data(data: SourceData) -> Result<Self> {
        let (name, target, files, origin) = match data {
            SourceData::Local {
                name,
                target,
                prefix,
                files,
            } => {
                if prefix.trim().is_empty() {
                    return Err(invalid(&name, "'prefix' must not be empty"));
                }
                (name, target, files, Origin::Local { prefix })
            }
            SourceData::Remote {
                name,
                target,
                url,
                files,
                checksums,
            } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(invalid(&name, &format!("'url' must be http(s), got '{url}'")));
                }
                (name, target, files, Origin::Remote { url, checksums })
            }
        };

        if name.trim().is_empty() {
            return Err(FwError::ConfigInvalid {
                message: "source name must not be empty".to_string(),
            });
        }
        check_relative(&target, "target directory").map_err(|e| within(&name, e))?;
        let files = FileMap::from_value(&files).map_err(|e| within(&name, e))?;

        if let Origin::Remote { checksums, .. } = &origin {
            for (file, digest) in checksums {
                if !files.contains_key(file) {
                    return Err(invalid(
                        &name,
                        &format!("checksum given for unlisted file '{file}'"),
                    ));
                }
                if !hash::is_valid_digest(digest) {
                    return Err(invalid(
                        &name,
                        &format!("malformed checksum for '{file}': expected blake3:<64 hex digits>"),
                    ));
                }
            }
        }

        Ok(Self {
            name,
            target: PathBuf::from(target),
            files,
            origin,
        })
    }
}

fn invalid(source: &str, message: &str) -> FwError {
    FwError::ConfigInvalid {
        message: format!("source '{source}': {message}"),
    }
}

/// Attach the source name to a validation error
fn within(source: &str, err: FwError) -> FwError {
    match err {
        FwError::ConfigInvalid { message } => invalid(source, &message),
        other => other,
    }
}
