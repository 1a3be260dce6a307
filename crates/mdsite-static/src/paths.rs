//! Filesystem layout of a site.

use std::path::PathBuf;

/// Default site root directory.
pub const DEFAULT_ROOT: &str = "my-site";

/// Default active theme.
pub const DEFAULT_THEME: &str = "my-theme";

/// Locations of a site's content, theme and build output.
///
/// Everything is derived from the site root and the active theme name:
///
/// ```text
/// <root>/content/*.md
/// <root>/themes/<theme>/layout.html
/// <root>/themes/<theme>/styles.css
/// <root>/dist/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// Site root directory
    pub root: PathBuf,

    /// Name of the active theme
    pub theme: String,
}

impl Default for SitePaths {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_THEME)
    }
}

impl SitePaths {
    /// Create paths for a site root and theme name.
    pub fn new(root: impl Into<PathBuf>, theme: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            theme: theme.into(),
        }
    }

    /// Directory holding Markdown sources.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    /// Directory holding all themes.
    pub fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }

    /// Directory of the named theme.
    pub fn theme_dir(&self, name: &str) -> PathBuf {
        self.themes_dir().join(name)
    }

    /// Layout template of the active theme.
    pub fn layout_file(&self) -> PathBuf {
        self.theme_dir(&self.theme).join("layout.html")
    }

    /// Stylesheet of the active theme.
    pub fn stylesheet(&self) -> PathBuf {
        self.theme_dir(&self.theme).join("styles.css")
    }

    /// Build output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("dist")
    }

    /// Source path for a content stem.
    pub fn content_file(&self, stem: &str) -> PathBuf {
        self.content_dir().join(format!("{stem}.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_fixed_paths() {
        let paths = SitePaths::default();

        assert_eq!(paths.content_dir(), PathBuf::from("my-site/content"));
        assert_eq!(
            paths.layout_file(),
            PathBuf::from("my-site/themes/my-theme/layout.html")
        );
        assert_eq!(
            paths.stylesheet(),
            PathBuf::from("my-site/themes/my-theme/styles.css")
        );
        assert_eq!(paths.output_dir(), PathBuf::from("my-site/dist"));
    }

    #[test]
    fn content_file_appends_extension() {
        let paths = SitePaths::new("site", "dark");

        assert_eq!(paths.content_file("about"), PathBuf::from("site/content/about.md"));
        assert_eq!(paths.theme_dir("dark"), PathBuf::from("site/themes/dark"));
    }
}
