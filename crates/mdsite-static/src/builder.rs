//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use mdsite_markdown::render_markdown;

use crate::paths::SitePaths;
use crate::templates::Layout;

/// Result of a build operation.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output file names written, in build order
    pub pages: Vec<String>,

    /// Stale output file names deleted
    pub removed: Vec<String>,

    /// Whether the theme stylesheet was copied
    pub stylesheet_copied: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Layout file not found: {0}")]
    LayoutNotFound(PathBuf),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

impl BuildError {
    fn read(path: &Path, err: impl ToString) -> Self {
        Self::ReadError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn write(path: &Path, err: impl ToString) -> Self {
        Self::WriteError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// A content document discovered in the content directory.
#[derive(Debug)]
struct ContentFile {
    /// Source file path
    source_path: PathBuf,

    /// Output file name (`<stem>.html`)
    output_name: String,
}

/// Full-site builder. Every run re-reads content and layout from disk.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    paths: SitePaths,
}

impl SiteBuilder {
    /// Create a builder for the given site.
    pub fn new(paths: SitePaths) -> Self {
        Self { paths }
    }

    /// Regenerate the output directory from the content directory.
    ///
    /// Stale outputs are removed before any page is rendered. Pages and the
    /// stylesheet are overwritten unconditionally. The first failing file
    /// aborts the build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let output_dir = self.paths.output_dir();

        fs::create_dir_all(&output_dir).map_err(|e| BuildError::write(&output_dir, e))?;

        let layout_path = self.paths.layout_file();
        if !layout_path.is_file() {
            return Err(BuildError::LayoutNotFound(layout_path));
        }
        let layout = Layout::load(&layout_path).map_err(|e| BuildError::read(&layout_path, e))?;

        let content = self.discover_content()?;

        let mut report = BuildReport {
            removed: self.remove_stale_outputs(&content)?,
            ..Default::default()
        };

        for file in &content {
            self.build_page(file, &layout)?;
            report.pages.push(file.output_name.clone());
        }

        report.stylesheet_copied = self.copy_stylesheet()?;
        report.duration_ms = start.elapsed().as_millis() as u64;

        Ok(report)
    }

    /// Find all `.md` files directly inside the content directory.
    fn discover_content(&self) -> Result<Vec<ContentFile>, BuildError> {
        let content_dir = self.paths.content_dir();
        let mut files = Vec::new();

        for entry in WalkDir::new(&content_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BuildError::read(&content_dir, e))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".md") else {
                continue;
            };

            files.push(ContentFile {
                source_path: entry.path().to_path_buf(),
                output_name: format!("{stem}.html"),
            });
        }

        Ok(files)
    }

    /// Delete `.html` outputs that have no matching content file.
    fn remove_stale_outputs(&self, content: &[ContentFile]) -> Result<Vec<String>, BuildError> {
        let output_dir = self.paths.output_dir();
        let valid: HashSet<&str> = content.iter().map(|f| f.output_name.as_str()).collect();
        let mut removed = Vec::new();

        for name in list_html_files(&output_dir).map_err(|e| BuildError::read(&output_dir, e))? {
            if valid.contains(name.as_str()) {
                continue;
            }

            let path = output_dir.join(&name);
            fs::remove_file(&path).map_err(|e| BuildError::write(&path, e))?;
            tracing::info!("Removed stale file: {}", name);
            removed.push(name);
        }

        Ok(removed)
    }

    /// Render one content file through the layout.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the build.
    fn build_page(&self, file: &ContentFile, layout: &Layout) -> Result<(), BuildError> {
        let bytes =
            fs::read(&file.source_path).map_err(|e| BuildError::read(&file.source_path, e))?;
        let markdown = String::from_utf8_lossy(&bytes);

        let doc = render_markdown(&markdown);
        let html = layout.render(&doc.title, &doc.html);

        let output_path = self.paths.output_dir().join(&file.output_name);
        fs::write(&output_path, html).map_err(|e| BuildError::write(&output_path, e))?;

        tracing::info!("Built: {}", file.output_name);
        Ok(())
    }

    /// Copy the theme stylesheet into the output directory if it exists.
    fn copy_stylesheet(&self) -> Result<bool, BuildError> {
        let source = self.paths.stylesheet();
        if !source.is_file() {
            return Ok(false);
        }

        let dest = self.paths.output_dir().join("styles.css");
        fs::copy(&source, &dest).map_err(|e| BuildError::write(&dest, e))?;

        tracing::info!("Copied styles.css to {}", self.paths.output_dir().display());
        Ok(true)
    }
}

/// Names of entries in `dir` ending with `.html`, in directory order.
pub fn list_html_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".html") {
                names.push(name.to_string());
            }
        }
    }

    Ok(names)
}
