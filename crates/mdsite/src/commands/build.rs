//! Static site build command.

use anyhow::{Context, Result};
use mdsite_static::{SiteBuilder, SitePaths};

/// Run the build command.
pub fn run(site: SitePaths) -> Result<()> {
    tracing::info!("Building site from {}...", site.content_dir().display());

    let output_dir = site.output_dir();
    let report = SiteBuilder::new(site).build().context("Build failed")?;

    tracing::info!(
        "Built {} pages, removed {} stale files in {}ms",
        report.pages.len(),
        report.removed.len(),
        report.duration_ms
    );
    tracing::info!("Output: {}", output_dir.display());

    Ok(())
}
