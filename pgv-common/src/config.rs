//! Configuration resolution for the PGV client
//!
//! Resolves the photo service base URL and the default gallery path with a
//! 4-tier priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the photo service base URL
pub const BASE_URL_ENV: &str = "PGV_BASE_URL";
/// Environment variable naming the default gallery collection path
pub const GALLERY_PATH_ENV: &str = "PGV_GALLERY_PATH";

/// Compiled default photo service base URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
/// Compiled default gallery collection path
pub const DEFAULT_GALLERY_PATH: &str = "/photos";

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the photo service, without trailing slash
    pub base_url: String,
    /// Collection path of the initial gallery filter
    pub gallery_path: String,
}

impl ClientConfig {
    /// Resolve the full configuration from CLI arguments and a loaded
    /// config file
    pub fn resolve(
        cli_base_url: Option<&str>,
        cli_gallery_path: Option<&str>,
        file: &TomlConfig,
    ) -> Self {
        let base_url = resolve_value(
            "base_url",
            cli_base_url,
            BASE_URL_ENV,
            file.base_url.as_deref(),
            DEFAULT_BASE_URL,
        );
        let gallery_path = resolve_value(
            "gallery_path",
            cli_gallery_path,
            GALLERY_PATH_ENV,
            file.gallery_path.as_deref(),
            DEFAULT_GALLERY_PATH,
        );

        Self {
            // Image and cursor hrefs are path fragments appended to the base
            base_url: base_url.trim_end_matches('/').to_string(),
            gallery_path,
        }
    }
}

/// On-disk TOML config file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Photo service base URL
    pub base_url: Option<String>,
    /// Default gallery collection path
    pub gallery_path: Option<String>,
}

impl TomlConfig {
    /// Load the config file from the platform config directory
    ///
    /// A missing file resolves to an empty config; a present but invalid
    /// file is reported.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load a config file from an explicit path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))
    }
}

/// Default configuration file path for the platform
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pgv").join("config.toml"))
}

/// Resolve one value through the 4-tier priority order
fn resolve_value(
    key: &str,
    cli_arg: Option<&str>,
    env_var_name: &str,
    file_value: Option<&str>,
    default: &str,
) -> String {
    let env_value = std::env::var(env_var_name).ok();

    let mut sources = Vec::new();
    if cli_arg.is_some() {
        sources.push("command line");
    }
    if env_value.is_some() {
        sources.push("environment");
    }
    if file_value.is_some() {
        sources.push("config file");
    }
    if sources.len() > 1 {
        warn!(
            "{} set in multiple sources: {}. Using {} (highest priority).",
            key,
            sources.join(", "),
            sources[0]
        );
    }

    // Priority 1: Command-line argument
    if let Some(value) = cli_arg {
        return value.to_string();
    }

    // Priority 2: Environment variable
    if let Some(value) = env_value {
        return value;
    }

    // Priority 3: TOML config file
    if let Some(value) = file_value {
        return value.to_string();
    }

    // Priority 4: Compiled default
    default.to_string()
}
