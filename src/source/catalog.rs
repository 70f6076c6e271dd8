//! Ordered list of artifact sources (the gather phase)

use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;

use super::ArtifactSource;

/// Artifact sources in declaration order
#[derive(Default)]
pub struct SourceCatalog {
    sources: Vec<Box<dyn ArtifactSource>>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: ArtifactSource + 'static>(&mut self, source: S) {
        self.sources.push(Box::new(source));
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ArtifactSource> {
        self.sources.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Materialize every source, one after another.
    ///
    /// Stops at the first failing source; files written by earlier sources
    /// are left in place.
    pub fn gather(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        for source in &self.sources {
            log.info(source.name());

            let sub = log.sub();
            if let Err(e) = source.materialize(ctx, &sub) {
                sub.error(&e);
                return Err(FwError::in_source(source.name(), e));
            }
        }
        Ok(())
    }
}
