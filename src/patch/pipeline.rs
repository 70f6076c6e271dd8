//! Ordered list of patches (the patch phase)

use crate::context::ExecutionContext;
use crate::error::{FwError, Result};
use crate::logger::Logger;

use super::{Patch, check_prerequisites};

/// Patches in application order
#[derive(Default)]
pub struct PatchPipeline {
    patches: Vec<Box<dyn Patch>>,
}

impl PatchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P: Patch + 'static>(&mut self, patch: P) {
        self.patches.push(Box::new(patch));
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Patch> {
        self.patches.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Apply every patch once, in order, stopping at the first failure
    pub fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        for patch in &self.patches {
            log.info(patch.name());

            let sub = log.sub();
            let result = check_prerequisites(patch.as_ref(), ctx).and_then(|()| patch.apply(ctx, &sub));
            if let Err(e) = result {
                sub.error(&e);
                return Err(FwError::in_patch(patch.name(), e));
            }
        }
        Ok(())
    }
}
