//! Export command handler: write the store as a directory tree.

use anyhow::{Context, Result};

use krawl_core::ProjectStateStore;
use krawl_core::fetcher::canonical_platform;

use crate::cli::ExportArgs;

pub async fn run_export_command(args: &ExportArgs, store: &ProjectStateStore, quiet: bool) -> Result<()> {
    let platform = args
        .platform
        .as_deref()
        .map(|name| canonical_platform(name).unwrap_or(name));
    let summary = store
        .export_layout(&args.dir, platform)
        .await
        .with_context(|| format!("Failed to export to '{}'", args.dir.display()))?;
    if !quiet {
        println!(
            "Exported {} projects ({} files) to {}",
            summary.projects,
            summary.files,
            args.dir.display()
        );
    }
    Ok(())
}
