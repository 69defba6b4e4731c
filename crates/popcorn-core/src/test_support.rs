use async_trait::async_trait;
use chrono::Utc;
use popcorn_models::{MovieDetails, SearchResultItem, UserRating, WatchedEntry};
use popcorn_sources::{CatalogClient, CatalogError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn watched_entry(
    imdb_id: &str,
    imdb_rating: Option<f64>,
    user_rating: u8,
    runtime_minutes: Option<u32>,
) -> WatchedEntry {
    WatchedEntry {
        imdb_id: imdb_id.to_string(),
        title: format!("Movie {}", imdb_id),
        year: "2020".to_string(),
        poster_url: String::new(),
        imdb_rating,
        runtime_minutes,
        user_rating: UserRating::new(user_rating).unwrap(),
        rated_at: Utc::now(),
    }
}

pub fn search_item(imdb_id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster_url: format!("https://img.example/{}.jpg", imdb_id),
    }
}

pub fn details(imdb_id: &str, title: &str) -> MovieDetails {
    MovieDetails {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster_url: format!("https://img.example/{}.jpg", imdb_id),
        runtime_minutes: Some(148),
        imdb_rating: Some(8.8),
        plot: "A plot.".to_string(),
        release_date: "16 Jul 2010".to_string(),
        actors: "Someone".to_string(),
        director: "Someone Else".to_string(),
        genre: "Drama".to_string(),
    }
}

/// In-process catalog. Unknown queries answer `NotFound`; requests for a
/// held key wait until `release` is called for it.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<String, Vec<SearchResultItem>>,
    details: HashMap<String, MovieDetails>,
    failing: Vec<String>,
    panicking: Vec<String>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
    pub search_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, items: Vec<SearchResultItem>) -> Self {
        self.searches.insert(query.to_string(), items);
        self
    }

    pub fn with_details(mut self, details: MovieDetails) -> Self {
        self.details.insert(details.imdb_id.clone(), details);
        self
    }

    /// Requests for `key` fail with a transport error
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.push(key.to_string());
        self
    }

    /// Requests for `key` panic inside the task
    pub fn panicking(mut self, key: &str) -> Self {
        self.panicking.push(key.to_string());
        self
    }

    pub fn hold(&self, key: &str) {
        self.holds
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, key: &str) {
        if let Some(notify) = self.holds.lock().unwrap().get(key) {
            notify.notify_one();
        }
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn details_count(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    async fn wait_if_held(&self, key: &str) {
        let hold = self.holds.lock().unwrap().get(key).cloned();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held(query).await;
        if self.panicking.iter().any(|k| k == query) {
            panic!("search for {} crashed", query);
        }
        if self.failing.iter().any(|k| k == query) {
            return Err(CatalogError::Transport("503 Service Unavailable".to_string()));
        }
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Movie not found!".to_string()))
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held(imdb_id).await;
        if self.panicking.iter().any(|k| k == imdb_id) {
            panic!("details for {} crashed", imdb_id);
        }
        if self.failing.iter().any(|k| k == imdb_id) {
            return Err(CatalogError::Transport("503 Service Unavailable".to_string()));
        }
        self.details
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}
