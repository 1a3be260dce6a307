//! Upload API: accepts Markdown uploads, lists pages and deletes content.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tower_http::services::ServeDir;

use mdsite_static::{list_html_files, SitePaths};

use crate::rebuild::rebuild;
use crate::server::{socket_addr, ServerError};

/// Multipart field carrying the uploaded Markdown file.
pub const UPLOAD_FIELD: &str = "markdown";

/// Configuration for the upload API server.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Site that uploads are added to
    pub site: SitePaths,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Staging directory for incoming uploads
    pub uploads_dir: PathBuf,

    /// Dashboard UI assets, served at `/dashboard`
    pub dashboard_dir: PathBuf,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            site: SitePaths::default(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            dashboard_dir: PathBuf::from("dashboard"),
        }
    }
}

/// Body for upload responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Body for delete responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body for listing failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Upload API server.
pub struct ApiServer {
    config: Arc<ApiServerConfig>,
}

impl ApiServer {
    /// Create a new API server.
    pub fn new(config: ApiServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Build the API router.
    ///
    /// Uploads have no body size limit.
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/upload",
                post(upload_handler).layer(DefaultBodyLimit::disable()),
            )
            .route("/pages", get(pages_handler))
            .route("/delete/{name}", delete(delete_handler))
            .nest_service("/dashboard", ServeDir::new(&self.config.dashboard_dir))
            .nest_service("/dist", ServeDir::new(self.config.site.output_dir()))
            .with_state(Arc::clone(&self.config))
    }

    /// Start serving. Runs until the server stops.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = socket_addr(&self.config.host, self.config.port)?;
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Server running at http://{}/dashboard", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// An uploaded file read from the multipart body.
struct Upload {
    file_name: String,
    bytes: Bytes,
}

fn message(status: StatusCode, text: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        status,
        Json(MessageResponse {
            message: text.to_string(),
        }),
    )
}

fn delete_failure(status: StatusCode, text: &str) -> (StatusCode, Json<DeleteResponse>) {
    (
        status,
        Json(DeleteResponse {
            success: false,
            message: Some(text.to_string()),
        }),
    )
}

/// Save an uploaded file into the content directory and rebuild.
///
/// The original file name is used verbatim for the content file.
async fn upload_handler(
    State(config): State<Arc<ApiServerConfig>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<MessageResponse>) {
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return message(StatusCode::BAD_REQUEST, "No file uploaded"),
        Err(e) => {
            tracing::error!("Failed to read upload: {}", e);
            return message(StatusCode::INTERNAL_SERVER_ERROR, "File upload error");
        }
    };

    let uploads_dir = config.uploads_dir.clone();
    let staged = match blocking(move || stage_upload(&uploads_dir, &upload.bytes)).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to stage upload: {}", e);
            return message(StatusCode::INTERNAL_SERVER_ERROR, "File upload error");
        }
    };

    let target = config.site.content_dir().join(&upload.file_name);
    let dest = target.clone();
    if let Err(e) = blocking(move || staged.persist(&dest).map(drop).map_err(Into::into)).await {
        tracing::error!("Failed to move upload to {}: {}", target.display(), e);
        return message(StatusCode::INTERNAL_SERVER_ERROR, "File move error");
    }
    tracing::info!("Uploaded: {}", upload.file_name);

    match rebuild(&config.site).await {
        Ok(_) => message(
            StatusCode::OK,
            "File uploaded and site generated successfully!",
        ),
        Err(e) => {
            tracing::error!("Generation error: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Generation failed")
        }
    }
}

/// Find the first file field named [`UPLOAD_FIELD`].
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        let bytes = field.bytes().await?;
        return Ok(Some(Upload { file_name, bytes }));
    }

    Ok(None)
}

/// Run filesystem work on the blocking pool.
async fn blocking<T, F>(work: F) -> std::io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(std::io::Error::other)?
}

/// Write upload bytes to a uniquely named file in the staging directory.
fn stage_upload(dir: &Path, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    fs::create_dir_all(dir)?;

    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;

    Ok(file)
}

/// List generated `.html` pages in directory order.
async fn pages_handler(State(config): State<Arc<ApiServerConfig>>) -> Response {
    let output_dir = config.site.output_dir();
    match blocking(move || list_html_files(&output_dir)).await {
        Ok(pages) => Json(pages).into_response(),
        Err(e) => {
            tracing::error!("Failed to list pages: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to read dist folder".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Delete `<name>.md` from the content directory and rebuild.
async fn delete_handler(
    State(config): State<Arc<ApiServerConfig>>,
    UrlPath(name): UrlPath<String>,
) -> (StatusCode, Json<DeleteResponse>) {
    let path = config.site.content_file(&name);

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return delete_failure(StatusCode::NOT_FOUND, "File not found");
    }

    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::error!("Failed to delete {}: {}", path.display(), e);
        return delete_failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete file");
    }
    tracing::info!("Deleted: {}.md", name);

    match rebuild(&config.site).await {
        Ok(_) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                message: None,
            }),
        ),
        Err(e) => {
            tracing::error!("Generation error: {}", e);
            delete_failure(StatusCode::INTERNAL_SERVER_ERROR, "Generation failed")
        }
    }
}
