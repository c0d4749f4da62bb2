//! Versioned asset manifest

use super::request::AssetRequest;
use crate::error::AssetError;
use url::Url;

/// Cache version baked in at build time (`HONEYCOMB_CACHE_VERSION`)
pub const BUILD_CACHE_VERSION: &str = env!("HONEYCOMB_CACHE_VERSION");

/// Application shell assets pre-cached on install
pub const DEFAULT_ASSET_PATHS: &[&str] = &[
    "./",
    "./index.html",
    "./app.js",
    "./pwa.js",
    "./styles.css",
    "./milligram.min.css",
    "./wordlist.txt",
    "./manifest.webmanifest",
    "./README.md",
    "./favico.ico",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
    "./roboto/Roboto-Light.ttf",
    "./roboto/Roboto-LightItalic.ttf",
    "./roboto/Roboto-Bold.ttf",
    "./roboto/Roboto-BoldItalic.ttf",
];

/// The complete asset set of one cache version
///
/// There is no partial update: a new asset set means a new version name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheManifest {
    version: String,
    asset_paths: Vec<String>,
}

impl CacheManifest {
    #[must_use]
    pub fn new(version: impl Into<String>, asset_paths: Vec<String>) -> Self {
        Self {
            version: version.into(),
            asset_paths,
        }
    }

    /// Build-time version with the default shell assets
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            BUILD_CACHE_VERSION,
            DEFAULT_ASSET_PATHS.iter().map(ToString::to_string).collect(),
        )
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn asset_paths(&self) -> &[String] {
        &self.asset_paths
    }

    /// Resolve every asset path against the application origin
    ///
    /// # Errors
    /// Returns `InvalidUrl` for the first path that does not resolve.
    pub fn requests(&self, base: &Url) -> Result<Vec<AssetRequest>, AssetError> {
        self.asset_paths
            .iter()
            .map(|path| {
                base.join(path)
                    .map(AssetRequest::get)
                    .map_err(|e| AssetError::InvalidUrl {
                        url: path.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}
