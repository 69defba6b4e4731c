use async_trait::async_trait;
use popcorn_models::{MovieDetails, SearchResultItem};
use crate::error::CatalogError;

/// Read-only access to a movie catalog.
///
/// Each call is exactly one round trip: no retries, no caching. Query
/// length gating is the caller's job.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError>;

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError>;
}
