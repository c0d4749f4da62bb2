//! Application configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file at all) is a valid configuration. CLI flags are applied on
//! top by the binary.

use crate::assets::{BUILD_CACHE_VERSION, CacheManifest, DEFAULT_ASSET_PATHS, DEFAULT_EXCLUDED_ORIGIN};
use crate::definitions::DEFAULT_LOOKUP_BASE_URL;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "honeycomb.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `"embedded"`, a file path, or an `http(s)://` URL
    pub wordlist: String,
    pub lookup_base_url: String,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub cache_version: String,
    /// Base URL of the application's own origin
    pub origin: String,
    pub excluded_origins: Vec<String>,
    pub paths: Vec<String>,
    pub cache_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wordlist: "embedded".to_string(),
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            assets: AssetsConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            cache_version: BUILD_CACHE_VERSION.to_string(),
            origin: "http://localhost:8080/".to_string(),
            excluded_origins: vec![DEFAULT_EXCLUDED_ORIGIN.to_string()],
            paths: DEFAULT_ASSET_PATHS.iter().map(ToString::to_string).collect(),
            cache_dir: PathBuf::from(".honeycomb-cache"),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `Parse` when it is not valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    /// `Parse` when the content is not valid TOML for this shape.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the given file, or the default file if present, or defaults
    ///
    /// # Errors
    /// Errors from [`from_file`](Self::from_file); a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Check values that would only fail later, deep inside an operation
    ///
    /// # Errors
    /// `Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wordlist.trim().is_empty() {
            return Err(invalid("wordlist", "must not be empty"));
        }
        if self.assets.cache_version.trim().is_empty() {
            return Err(invalid("assets.cache_version", "must not be empty"));
        }
        if self.assets.paths.is_empty() {
            return Err(invalid("assets.paths", "must list at least one asset"));
        }
        self.lookup_url()?;
        self.origin_url()?;
        for origin in &self.assets.excluded_origins {
            parse_url("assets.excluded_origins", origin)?;
        }
        Ok(())
    }

    /// # Errors
    /// `Invalid` when `lookup_base_url` is not an absolute URL.
    pub fn lookup_url(&self) -> Result<Url, ConfigError> {
        parse_url("lookup_base_url", &self.lookup_base_url)
    }

    /// # Errors
    /// `Invalid` when `assets.origin` is not an absolute URL.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        parse_url("assets.origin", &self.assets.origin)
    }

    #[must_use]
    pub fn manifest(&self) -> CacheManifest {
        CacheManifest::new(self.assets.cache_version.clone(), self.assets.paths.clone())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| invalid(field, format!("{value:?}: {e}")))
}
