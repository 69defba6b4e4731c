use popcorn_models::SearchResultItem;
use popcorn_sources::CatalogError;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Query too short to search; nothing shown
    Idle,
    Loading,
    Success,
    Error,
}

/// A search the coordinator wants executed.
///
/// The generation tags the request; a completion whose generation is no
/// longer current belongs to a superseded query and is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the query text and the result list derived from it
#[derive(Debug)]
pub struct SearchCoordinator {
    min_query_length: usize,
    query: String,
    results: Vec<SearchResultItem>,
    status: SearchStatus,
    error_message: Option<String>,
    generation: u64,
}

impl SearchCoordinator {
    pub fn new(min_query_length: usize) -> Self {
        Self {
            min_query_length,
            query: String::new(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            error_message: None,
            generation: 0,
        }
    }

    /// Record a new query.
    ///
    /// Returns the request to run, or `None` when no network call is needed:
    /// the query is unchanged or shorter than the minimum length.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchTicket> {
        let text = text.into();
        if text == self.query {
            return None;
        }

        self.query = text;
        // Any in-flight search is stale from here on, even if no new one starts
        self.generation += 1;

        if self.query.chars().count() < self.min_query_length {
            debug!(query = %self.query, "Query below minimum length, clearing results");
            self.results.clear();
            self.error_message = None;
            self.status = SearchStatus::Idle;
            return None;
        }

        self.status = SearchStatus::Loading;
        self.error_message = None;
        debug!(query = %self.query, generation = self.generation, "Issuing search");
        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a search. Returns false when the ticket was stale
    /// and the state was left alone.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<SearchResultItem>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                query = %ticket.query,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale search result"
            );
            return false;
        }

        match result {
            Ok(items) => {
                info!(query = %ticket.query, count = items.len(), "Search finished");
                self.results = items;
                self.error_message = None;
                self.status = SearchStatus::Success;
            }
            Err(e) => {
                info!(query = %ticket.query, error = %e, "Search failed");
                self.results.clear();
                self.error_message = Some(e.user_message().to_string());
                self.status = SearchStatus::Error;
            }
        }
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }
}
