//! Split the Venus video firmware image into its PIL segments

use std::path::PathBuf;

use crate::context::ExecutionContext;
use crate::error::{Result, fs::step_failed};
use crate::logger::Logger;
use crate::tool::ExternalTool;

use super::Patch;

/// Runs the PIL splitter on a gathered `.mbn` image and places the split
/// segments (`venus.mdt`, `venus.b00`, ...) plus a copy of the image named
/// `venus.mbn` into the output directory.
#[derive(Debug, Clone)]
pub struct VenusExtract {
    image: PathBuf,
    output_dir: PathBuf,
    splitter: ExternalTool,
}

impl VenusExtract {
    /// `image` and `output_dir` are relative to the output root
    pub fn new(image: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, splitter: ExternalTool) -> Self {
        Self {
            image: image.into(),
            output_dir: output_dir.into(),
            splitter,
        }
    }
}

impl Patch for VenusExtract {
    fn name(&self) -> &str {
        "venus"
    }

    fn prerequisites(&self) -> Vec<PathBuf> {
        vec![self.image.clone()]
    }

    fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        let image = ctx.output_path(&self.image);
        let dir = ctx.output_path(&self.output_dir);

        std::fs::create_dir_all(&dir).map_err(|e| step_failed("create", &dir, &e))?;

        self.splitter
            .run([image.as_os_str(), dir.join("venus").as_os_str()], log)?;

        let renamed = dir.join("venus.mbn");
        log.info(format!("copying '{}' to '{}'", image.display(), renamed.display()));
        std::fs::copy(&image, &renamed).map_err(|e| step_failed("copy to", &renamed, &e))?;

        Ok(())
    }
}
