//! Request and response values seen by the asset cache

use crate::error::AssetError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

/// An outgoing request the cache manager may intercept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    method: Method,
    url: Url,
}

impl AssetRequest {
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }

    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parse an absolute URL into a GET request
    ///
    /// # Errors
    /// Returns `InvalidUrl` when the string is not an absolute URL.
    pub fn parse_get(url: &str) -> Result<Self, AssetError> {
        Url::parse(url)
            .map(Self::get)
            .map_err(|e| AssetError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Cache key: method plus full URL
    #[must_use]
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// Serialized origin, e.g. `https://api.dictionaryapi.dev`
    #[must_use]
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Only plain GETs are safe to replay from the cache
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.method == Method::GET
    }
}

/// A complete response as stored in a cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub status: u16,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default, with = "body_base64")]
    pub body: Vec<u8>,
}

/// Bodies are stored as one base64 string rather than a JSON number array
mod body_base64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(body))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

impl AssetResponse {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
