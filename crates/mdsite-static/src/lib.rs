//! Static site builder for mdsite.
//!
//! Renders every Markdown file in a content directory through the active
//! theme's layout and keeps the output directory in sync with the content.

pub mod builder;
pub mod paths;
pub mod templates;

pub use builder::{list_html_files, BuildError, BuildReport, SiteBuilder};
pub use paths::SitePaths;
pub use templates::{Layout, DEFAULT_LAYOUT};
