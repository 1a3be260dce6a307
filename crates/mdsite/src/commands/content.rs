//! Add sample content.

use std::fs;

use anyhow::{Context, Result};
use mdsite_static::SitePaths;

const SAMPLE_INDEX: &str = "# Welcome to My Site

This is a static site generated from markdown using custom SSG.

- Easy to use
- Super fast
- Markdown powered!";

/// Run the `content add` command. An existing `index.md` is overwritten.
pub fn run(site: &SitePaths) -> Result<()> {
    let content_dir = site.content_dir();
    fs::create_dir_all(&content_dir)
        .with_context(|| format!("Failed to create {}", content_dir.display()))?;

    let index_path = site.content_file("index");
    fs::write(&index_path, SAMPLE_INDEX)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    tracing::info!("Markdown content created at {}", index_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_sample_index() {
        let temp = tempdir().unwrap();
        let site = SitePaths::new(temp.path().join("site"), "my-theme");

        run(&site).unwrap();
        fs::write(site.content_file("index"), "changed").unwrap();
        run(&site).unwrap();

        let index = fs::read_to_string(site.content_file("index")).unwrap();
        assert!(index.starts_with("# Welcome to My Site"));
        assert!(index.ends_with("- Markdown powered!"));
    }
}
