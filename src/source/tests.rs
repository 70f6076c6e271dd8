//! Gather phase tests across source kinds

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use super::*;
use crate::config::FileMap;

/// Source that records materialize calls and optionally fails
struct RecordingSource {
    name: String,
    fail: bool,
    calls: Rc<RefCell<Vec<String>>>,
    files: FileMap,
    target: PathBuf,
}

impl RecordingSource {
    fn new(name: &str, fail: bool, calls: &Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            fail,
            calls: Rc::clone(calls),
            files: FileMap::default(),
            target: PathBuf::from("stub"),
        }
    }
}

impl ArtifactSource for RecordingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "stub"
    }

    fn origin(&self) -> String {
        "memory".to_string()
    }

    fn target_directory(&self) -> &Path {
        &self.target
    }

    fn files(&self) -> &FileMap {
        &self.files
    }

    fn materialize(&self, _ctx: &ExecutionContext, _log: &Logger) -> Result<()> {
        self.calls.borrow_mut().push(self.name.clone());
        if self.fail {
            return Err(FwError::CopyFailed {
                path: self.name.clone(),
                reason: "stub failure".to_string(),
            });
        }
        Ok(())
    }
}

fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn test_gather_runs_sources_in_order() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut catalog = SourceCatalog::new();
    catalog.push(RecordingSource::new("one", false, &calls));
    catalog.push(RecordingSource::new("two", false, &calls));
    catalog.push(RecordingSource::new("three", false, &calls));

    let ctx = ExecutionContext::new("/unused/out", "/unused/repo");
    catalog.gather(&ctx, &Logger::new(true)).unwrap();

    assert_eq!(*calls.borrow(), vec!["one", "two", "three"]);
}

#[test]
fn test_gather_stops_at_first_failure() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut catalog = SourceCatalog::new();
    catalog.push(RecordingSource::new("one", false, &calls));
    catalog.push(RecordingSource::new("two", true, &calls));
    catalog.push(RecordingSource::new("three", false, &calls));

    let ctx = ExecutionContext::new("/unused/out", "/unused/repo");
    let err = catalog.gather(&ctx, &Logger::new(true)).unwrap_err();

    assert_eq!(*calls.borrow(), vec!["one", "two"]);
    match err {
        FwError::GatherFailed { name, cause } => {
            assert_eq!(name, "two");
            assert!(matches!(*cause, FwError::CopyFailed { .. }));
        }
        other => panic!("Expected GatherFailed, got {other:?}"),
    }
}

#[test]
fn test_empty_catalog_gathers_nothing() {
    let catalog = SourceCatalog::new();
    assert_eq!(catalog.len(), 0);
    let ctx = ExecutionContext::new("/unused/out", "/unused/repo");
    assert!(catalog.gather(&ctx, &Logger::new(true)).is_ok());
}

#[test]
fn test_local_and_remote_end_to_end() {
    let repo = TempDir::new().unwrap();
    fs::create_dir_all(repo.path().join("pkg-v1")).unwrap();
    fs::write(repo.path().join("pkg-v1/a.bin"), b"local bytes \x00\xff").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/b.bin")
        .with_status(200)
        .with_body(b"remote bytes \x01\x02")
        .create();

    let out = TempDir::new().unwrap();
    let ctx = ExecutionContext::new(out.path(), repo.path());

    let mut catalog = SourceCatalog::new();
    catalog.push(LocalRepositorySource::new(
        "local",
        "target",
        "pkg",
        FileMap::from_pairs([("a.bin", "a.bin")]).unwrap(),
    ));
    catalog.push(RemoteDownloadSource::new(
        "remote",
        "target",
        server.url(),
        FileMap::from_pairs([("b.bin", "sub/b.bin")]).unwrap(),
        reqwest::blocking::Client::new(),
    ));

    catalog.gather(&ctx, &Logger::new(true)).unwrap();
    mock.assert();

    assert_eq!(
        fs::read(out.path().join("target/a.bin")).unwrap(),
        fs::read(repo.path().join("pkg-v1/a.bin")).unwrap()
    );
    assert_eq!(
        fs::read(out.path().join("target/sub/b.bin")).unwrap(),
        b"remote bytes \x01\x02"
    );
    assert_eq!(
        files_under(out.path()),
        vec![PathBuf::from("target/a.bin"), PathBuf::from("target/sub/b.bin")]
    );
}

#[test]
fn test_missing_package_fails_gather_with_source_name() {
    let repo = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let ctx = ExecutionContext::new(out.path(), repo.path());

    let mut catalog = SourceCatalog::new();
    catalog.push(LocalRepositorySource::new(
        "bluetooth",
        "qca",
        "qcbtfmuart8180",
        FileMap::from_names(["crbtfw21.tlv"]).unwrap(),
    ));

    let err = catalog.gather(&ctx, &Logger::new(true)).unwrap_err();
    assert_eq!(err.to_string(), "Source 'bluetooth' failed");
    assert!(files_under(out.path()).is_empty());
}
