//! Command implementations for the fwgather CLI

pub mod completions;
pub mod list;
pub mod run;

use std::path::Path;

use crate::config::Manifest;
use crate::error::Result;
use crate::platform;

/// The manifest at `path`, or the built-in one
fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => Manifest::load(path),
        None => platform::builtin_manifest(),
    }
}
