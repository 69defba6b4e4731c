use crate::search::SearchTicket;
use crate::selection::{DetailsTicket, SelectionError};
use crate::state::AppState;
use popcorn_models::{MovieDetails, SearchResultItem, WatchedEntry};
use popcorn_sources::{CatalogClient, CatalogError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn};

/// A finished catalog call, tagged with the ticket it was issued for
#[derive(Debug)]
pub enum CatalogEvent {
    Search {
        ticket: SearchTicket,
        result: Result<Vec<SearchResultItem>, CatalogError>,
    },
    Details {
        ticket: DetailsTicket,
        result: Result<MovieDetails, CatalogError>,
    },
}

/// Ticket of a spawned call, kept until its task is joined
#[derive(Debug, Clone)]
enum InFlight {
    Search(SearchTicket),
    Details(DetailsTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    SearchSettled,
    DetailsSettled,
    /// The call finished after its input was superseded
    Discarded,
}

/// Drives an `AppState` against a catalog.
///
/// Catalog calls run as Tokio tasks, so the session keeps taking input while
/// they are pending. Their results are applied one at a time through
/// `next_update`, where stale ones are dropped. A task that dies settles its
/// ticket as a transport error. Must be used inside a Tokio runtime.
pub struct Session {
    state: AppState,
    client: Arc<dyn CatalogClient>,
    pending: JoinSet<CatalogEvent>,
    in_flight: HashMap<Id, InFlight>,
}

impl Session {
    pub fn new(client: Arc<dyn CatalogClient>, state: AppState) -> Self {
        Self {
            state,
            client,
            pending: JoinSet::new(),
            in_flight: HashMap::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns true when a catalog search was started
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        match self.state.search.set_query(query) {
            Some(ticket) => {
                self.spawn_search(ticket);
                true
            }
            None => false,
        }
    }

    /// Returns true when a details fetch was started
    pub fn select_movie(&mut self, imdb_id: &str) -> bool {
        match self.state.selection.select_movie(imdb_id) {
            Some(ticket) => {
                self.spawn_details(ticket);
                true
            }
            None => false,
        }
    }

    pub fn close_details(&mut self) {
        self.state.selection.close_details();
    }

    pub fn confirm_rating(&mut self, rating: u8) -> Result<WatchedEntry, SelectionError> {
        self.state
            .selection
            .confirm_rating(rating, &mut self.state.watched)
    }

    pub fn remove_watched(&mut self, imdb_id: &str) -> usize {
        self.state.watched.remove(imdb_id)
    }

    /// Number of catalog calls not yet applied
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Wait for the next catalog call to finish and apply it. Returns `None`
    /// when nothing is pending.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        loop {
            match self.pending.join_next_with_id().await? {
                Ok((id, event)) => {
                    self.in_flight.remove(&id);
                    return Some(self.apply(event));
                }
                Err(e) => {
                    warn!(error = %e, "Catalog task did not finish");
                    if let Some(event) = self.failed_event(&e) {
                        return Some(self.apply(event));
                    }
                }
            }
        }
    }

    /// Apply every pending catalog call
    pub async fn settle(&mut self) {
        while self.next_update().await.is_some() {}
    }

    pub fn apply(&mut self, event: CatalogEvent) -> SessionUpdate {
        let applied = match event {
            CatalogEvent::Search { ticket, result } => {
                self.state.search.complete(&ticket, result).then_some(SessionUpdate::SearchSettled)
            }
            CatalogEvent::Details { ticket, result } => self
                .state
                .selection
                .complete_details(&ticket, result)
                .then_some(SessionUpdate::DetailsSettled),
        };
        applied.unwrap_or(SessionUpdate::Discarded)
    }

    /// Turn a dead task back into a failed completion for its ticket
    fn failed_event(&mut self, error: &JoinError) -> Option<CatalogEvent> {
        let failure = CatalogError::Transport(format!("catalog task failed: {}", error));
        match self.in_flight.remove(&error.id())? {
            InFlight::Search(ticket) => Some(CatalogEvent::Search {
                ticket,
                result: Err(failure),
            }),
            InFlight::Details(ticket) => Some(CatalogEvent::Details {
                ticket,
                result: Err(failure),
            }),
        }
    }

    fn spawn_search(&mut self, ticket: SearchTicket) {
        let client = Arc::clone(&self.client);
        debug!(query = %ticket.query(), source = client.source_name(), "Spawning search");
        let tracked = InFlight::Search(ticket.clone());
        let handle = self.pending.spawn(async move {
            let result = client.search_by_title(ticket.query()).await;
            CatalogEvent::Search { ticket, result }
        });
        self.in_flight.insert(handle.id(), tracked);
    }

    fn spawn_details(&mut self, ticket: DetailsTicket) {
        let client = Arc::clone(&self.client);
        debug!(imdb_id = %ticket.imdb_id(), source = client.source_name(), "Spawning details fetch");
        let tracked = InFlight::Details(ticket.clone());
        let handle = self.pending.spawn(async move {
            let result = client.fetch_details(ticket.imdb_id()).await;
            CatalogEvent::Details { ticket, result }
        });
        self.in_flight.insert(handle.id(), tracked);
    }
}
