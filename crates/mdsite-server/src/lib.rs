//! Development server and upload API for mdsite.
//!
//! The dev server serves the build output and rebuilds the site whenever
//! content or the layout changes. The upload API accepts new Markdown files,
//! lists generated pages and deletes content, rebuilding in-process after
//! each change.

pub mod api;
pub mod rebuild;
pub mod server;
pub mod watcher;

pub use api::{ApiServer, ApiServerConfig};
pub use rebuild::{rebuild, RebuildError};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
