//! In-process rebuild shared by the dev server and the upload API.

use mdsite_static::{BuildError, BuildReport, SitePaths, SiteBuilder};

/// Errors from a triggered rebuild.
#[derive(Debug, thiserror::Error)]
pub enum RebuildError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Rebuild task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Run a full site build on the blocking pool and wait for it to finish.
///
/// No lock is taken: concurrent rebuilds race on the output directory.
pub async fn rebuild(site: &SitePaths) -> Result<BuildReport, RebuildError> {
    let builder = SiteBuilder::new(site.clone());
    let report = tokio::task::spawn_blocking(move || builder.build()).await??;

    tracing::info!(
        "Rebuilt {} pages in {}ms",
        report.pages.len(),
        report.duration_ms
    );

    Ok(report)
}
