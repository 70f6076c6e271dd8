//! One full run: gather every source, then patch the gathered tree

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::logger::Logger;
use crate::patch::PatchPipeline;
use crate::source::SourceCatalog;

/// A source catalog paired with the patches that post-process its output
pub struct Orchestrator {
    catalog: SourceCatalog,
    pipeline: PatchPipeline,
}

impl Orchestrator {
    pub fn new(catalog: SourceCatalog, pipeline: PatchPipeline) -> Self {
        Self { catalog, pipeline }
    }

    /// Gather, then patch. The patch phase never starts after a failed gather.
    pub fn run(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        log.info("retrieving base firmware files");
        self.catalog.gather(ctx, &log.sub())?;

        log.info("patching firmware files");
        self.pipeline.apply(ctx, &log.sub())?;

        log.info("done!");
        Ok(())
    }
}
