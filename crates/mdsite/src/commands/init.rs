//! Initialize a new site folder.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Placeholder page written into a new site folder.
const PLACEHOLDER_INDEX: &str = "<h1>Welcome to your site</h1>";

/// Run the init command.
pub fn run(name: &str) -> Result<()> {
    create_site(Path::new(name))?;
    Ok(())
}

/// Create `dir` with a placeholder `index.html`.
///
/// Returns `false` without touching anything if `dir` already exists.
fn create_site(dir: &Path) -> Result<bool> {
    if dir.exists() {
        tracing::warn!("Folder '{}' already exists.", dir.display());
        return Ok(false);
    }

    fs::create_dir(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(dir.join("index.html"), PLACEHOLDER_INDEX)
        .context("Failed to write index.html")?;

    tracing::info!("Project '{}' initialized.", dir.display());
    Ok(true)
}
