//! Configuration file (mdsite.toml).
//!
//! Every key is optional. Without a file the fixed default layout is used:
//! `my-site/` with theme `my-theme`, both servers on port 3000.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use mdsite_server::{ApiServerConfig, DevServerConfig};
use mdsite_static::SitePaths;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ServeConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Staging directory for uploads
    #[serde(default = "default_uploads")]
    pub uploads: PathBuf,
    /// Dashboard UI assets
    #[serde(default = "default_dashboard")]
    pub dashboard: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(mdsite_static::paths::DEFAULT_ROOT)
}
fn default_theme() -> String {
    mdsite_static::paths::DEFAULT_THEME.to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_uploads() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_dashboard() -> PathBuf {
    PathBuf::from("dashboard")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            theme: default_theme(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            uploads: default_uploads(),
            dashboard: default_dashboard(),
        }
    }
}

impl ConfigFile {
    /// Site paths for the configured root and theme.
    pub fn site_paths(&self) -> SitePaths {
        SitePaths::new(&self.site.root, &self.site.theme)
    }

    /// Dev server settings, with an optional port override.
    pub fn dev_server(&self, port: Option<u16>, open: bool) -> DevServerConfig {
        DevServerConfig {
            site: self.site_paths(),
            port: port.unwrap_or(self.serve.port),
            host: self.serve.host.clone(),
            open,
        }
    }

    /// Upload API settings, with an optional port override.
    pub fn api_server(&self, port: Option<u16>) -> ApiServerConfig {
        ApiServerConfig {
            site: self.site_paths(),
            port: port.unwrap_or(self.api.port),
            host: self.api.host.clone(),
            uploads_dir: self.api.uploads.clone(),
            dashboard_dir: self.api.dashboard.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
