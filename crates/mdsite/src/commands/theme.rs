//! Add a theme with the default layout.

use std::fs;

use anyhow::{Context, Result};
use mdsite_static::{SitePaths, DEFAULT_LAYOUT};

/// Run the `theme add` command. An existing layout is overwritten.
pub fn run(site: &SitePaths, name: &str) -> Result<()> {
    let theme_dir = site.theme_dir(name);
    fs::create_dir_all(&theme_dir)
        .with_context(|| format!("Failed to create {}", theme_dir.display()))?;

    let layout_path = theme_dir.join("layout.html");
    fs::write(&layout_path, DEFAULT_LAYOUT)
        .with_context(|| format!("Failed to write {}", layout_path.display()))?;

    tracing::info!("Theme '{}' created at {}", name, layout_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_default_layout() {
        let temp = tempdir().unwrap();
        let site = SitePaths::new(temp.path(), "my-theme");

        run(&site, "my-theme").unwrap();

        let layout = fs::read_to_string(site.layout_file()).unwrap();
        assert!(layout.contains("{{ Title }}"));
        assert!(layout.contains("{{ Content }}"));
        assert!(layout.contains("styles.css"));
    }

    #[test]
    fn overwrites_existing_layout() {
        let temp = tempdir().unwrap();
        let site = SitePaths::new(temp.path(), "dark");
        fs::create_dir_all(site.theme_dir("dark")).unwrap();
        fs::write(site.layout_file(), "custom").unwrap();

        run(&site, "dark").unwrap();

        assert_eq!(fs::read_to_string(site.layout_file()).unwrap(), DEFAULT_LAYOUT);
    }
}
