use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::CatalogClient;
use async_trait::async_trait;
use popcorn_config::CatalogConfig;
use popcorn_models::{MovieDetails, SearchResultItem};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Create a reqwest Client with the configured request timeout. Fails rather
/// than fall back to a client without one.
pub fn create_omdb_client(timeout: Duration) -> Result<Client, CatalogError> {
    Client::builder()
        .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {}", e)))
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self {
            client: Arc::new(create_omdb_client(timeout)?),
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogClient for OmdbClient {
    fn source_name(&self) -> &str {
        "OMDb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        api::search_by_title(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        api::fetch_details(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = CatalogConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:1234".to_string(),
            timeout_seconds: 3,
        };
        let client = OmdbClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.source_name(), "OMDb");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_transport_error() {
        // Nothing listens on the discard port locally
        let client = OmdbClient::new(
            "k".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.search_by_title("inception").await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_configured_timeout_is_applied() {
        // Accepts the connection but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let client = OmdbClient::new("k".to_string(), base_url, Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();
        let err = client.search_by_title("inception").await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
        server.abort();
    }
}
