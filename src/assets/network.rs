//! Network access for the asset cache

use super::request::{AssetRequest, AssetResponse};
use crate::error::AssetError;
use async_trait::async_trait;

/// Performs a real fetch when the cache cannot answer
#[async_trait]
pub trait Network: Send + Sync {
    /// Any HTTP status is a successful fetch; only transport failures are errors
    async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse, AssetError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpNetwork {
    client: reqwest::Client,
}

impl HttpNetwork {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse, AssetError> {
        let failed = |e: reqwest::Error| AssetError::Network {
            url: request.url().to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .request(request.method().clone(), request.url().clone())
            .send()
            .await
            .map_err(failed)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(failed)?.to_vec();

        Ok(AssetResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetch_captures_status_headers_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/styles.css");
            then.status(200)
                .header("Content-Type", "text/css")
                .body("body{}");
        });

        let request = AssetRequest::parse_get(&server.url("/styles.css")).unwrap();
        let response = HttpNetwork::default().fetch(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("text/css"));
        assert_eq!(response.body, b"body{}");
    }

    #[tokio::test]
    async fn fetch_returns_error_statuses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let request = AssetRequest::parse_get(&server.url("/missing")).unwrap();
        let response = HttpNetwork::default().fetch(&request).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn fetch_unreachable_host_is_network_error() {
        let request = AssetRequest::parse_get("http://127.0.0.1:1/app.js").unwrap();
        let err = HttpNetwork::default().fetch(&request).await.unwrap_err();

        assert!(matches!(err, AssetError::Network { .. }));
    }
}
