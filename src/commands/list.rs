//! List command implementation
//!
//! Prints every source of the manifest (kind, origin, target, file count)
//! followed by the patches in the order they run. Touches neither the
//! network nor the output directory.

use std::path::Path;

use console::Style;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::platform;
use crate::source::{ArtifactSource, SourceCatalog, http_client};
use crate::tool::{DEFAULT_TOOLS_DIR, ToolPaths};

/// Shown when a custom manifest is listed
const BUILTIN_PATCHES_NOTE: &str = "Note: the patches are built in for the Surface Pro X (SQ2) \
     and need the files its manifest gathers; `run` fails at the first patch whose \
     input is missing.";

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let manifest = super::load_manifest(args.manifest.as_deref())?;
    let catalog = manifest.catalog(&http_client()?);
    let pipeline = platform::patch_pipeline(&ToolPaths::from_root(Path::new(DEFAULT_TOOLS_DIR)));

    match manifest.description {
        Some(ref description) => println!(
            "{} ({})",
            Style::new().bold().apply_to(&manifest.name),
            description
        ),
        None => println!("{}", Style::new().bold().apply_to(&manifest.name)),
    }
    println!();

    println!("Sources ({}):", catalog.len());
    for line in source_lines(&catalog) {
        println!("{line}");
    }
    println!();

    println!("Patches ({}):", pipeline.len());
    for patch in pipeline.iter() {
        println!("  {}", Style::new().bold().yellow().apply_to(patch.name()));
    }
    if args.manifest.is_some() {
        println!();
        println!("{BUILTIN_PATCHES_NOTE}");
    }

    Ok(())
}

fn source_line(source: &dyn ArtifactSource) -> String {
    let count = source.files().len();
    format!(
        "  {} [{}] {} -> {} ({} file{})",
        Style::new().bold().yellow().apply_to(source.name()),
        source.kind(),
        source.origin(),
        source.target_directory().display(),
        count,
        if count == 1 { "" } else { "s" }
    )
}

fn source_lines(catalog: &SourceCatalog) -> Vec<String> {
    catalog.iter().map(source_line).collect()
}
