//! Development server: serves build output and rebuilds on content changes.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

use mdsite_static::SitePaths;

use crate::rebuild::rebuild;
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site whose output is served and whose sources are watched
    pub site: SitePaths,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            site: SitePaths::default(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the servers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Parse `host:port` into a socket address.
pub(crate) fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", host, port);
    addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Router serving the output directory.
    pub fn router(&self) -> Router {
        let output_dir = Arc::new(self.config.site.output_dir());
        Router::new().fallback(serve_output).with_state(output_dir)
    }

    /// Start watching and serving. Runs until the server stops.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = socket_addr(&self.config.host, self.config.port)?;

        let site = &self.config.site;
        let targets = [site.content_dir(), site.layout_file()];

        let (watcher, mut rx) = FileWatcher::new(&site.root, &targets)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Events are handled one at a time, each waiting for its rebuild
        let site = self.config.site.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&site, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        let url = format!("http://{}", addr);
        tracing::info!("Dev server running at {}", url);

        if self.config.open {
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Rebuild the whole site for a single change.
async fn handle_watch_event(site: &SitePaths, event: WatchEvent) {
    tracing::info!("Change detected in {}. Rebuilding...", event.path().display());

    match rebuild(site).await {
        Ok(_) => tracing::info!("Site rebuilt."),
        Err(e) => tracing::error!("Rebuild failed: {}", e),
    }
}

/// Serve a file from the output directory.
async fn serve_output(State(output_dir): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(path) = resolve_request_path(&output_dir, uri.path()) else {
        return not_found();
    };

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return not_found(),
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            not_found()
        }
    }
}

/// Map a request path onto the output directory.
///
/// `/` maps to `index.html`. Paths with `..` or other non-plain components are
/// rejected.
fn resolve_request_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = match request_path {
        "/" => "index.html",
        path => path.trim_start_matches('/'),
    };

    let relative = Path::new(relative);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        _ => "text/plain",
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 NOT FOUND").into_response()
}
