use crate::title::{PageTitle, TitleScope};
use crate::watched::WatchedStore;
use popcorn_models::{MovieDetails, RatingError, UserRating, WatchedEntry};
use popcorn_sources::CatalogError;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no movie is selected")]
    NoSelection,
    #[error("details for {0} have not loaded yet")]
    DetailsNotLoaded(String),
    #[error("{imdb_id} is already rated {rating}")]
    AlreadyRated { imdb_id: String, rating: UserRating },
    #[error(transparent)]
    InvalidRating(#[from] RatingError),
}

/// A details fetch the coordinator wants executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsTicket {
    generation: u64,
    imdb_id: String,
}

impl DetailsTicket {
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the selected search result and the details panel behind it
#[derive(Debug)]
pub struct SelectionCoordinator {
    selected_id: Option<String>,
    details: Option<MovieDetails>,
    is_loading: bool,
    error_message: Option<String>,
    generation: u64,
    page_title: PageTitle,
    title_scope: Option<TitleScope>,
}

impl SelectionCoordinator {
    pub fn new(page_title: PageTitle) -> Self {
        Self {
            selected_id: None,
            details: None,
            is_loading: false,
            error_message: None,
            generation: 0,
            page_title,
            title_scope: None,
        }
    }

    /// Select a movie, or deselect it when it is already selected.
    ///
    /// Returns the details fetch to run for a new selection.
    pub fn select_movie(&mut self, imdb_id: &str) -> Option<DetailsTicket> {
        if self.selected_id.as_deref() == Some(imdb_id) {
            debug!(imdb_id = %imdb_id, "Same movie selected again, closing details");
            self.close_details();
            return None;
        }

        self.title_scope = None;
        self.details = None;
        self.error_message = None;
        self.generation += 1;
        self.selected_id = Some(imdb_id.to_string());
        self.is_loading = true;

        debug!(imdb_id = %imdb_id, generation = self.generation, "Selected movie");
        Some(DetailsTicket {
            generation: self.generation,
            imdb_id: imdb_id.to_string(),
        })
    }

    pub fn close_details(&mut self) {
        if let Some(id) = self.selected_id.take() {
            debug!(imdb_id = %id, "Closing details");
        }
        self.generation += 1;
        self.details = None;
        self.is_loading = false;
        self.error_message = None;
        self.title_scope = None;
    }

    /// Apply a finished details fetch. Returns false for a fetch that no
    /// longer matches the current selection.
    pub fn complete_details(
        &mut self,
        ticket: &DetailsTicket,
        result: Result<MovieDetails, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation
            || self.selected_id.as_deref() != Some(ticket.imdb_id.as_str())
        {
            debug!(imdb_id = %ticket.imdb_id, "Discarding stale details result");
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(details) => {
                info!(imdb_id = %ticket.imdb_id, title = %details.title, "Details loaded");
                // Revert the old title before the new one applies
                self.title_scope = None;
                self.title_scope = Some(self.page_title.enter(details.page_title()));
                self.details = Some(details);
                self.error_message = None;
            }
            Err(e) => {
                warn!(imdb_id = %ticket.imdb_id, error = %e, "Details fetch failed");
                self.title_scope = None;
                self.details = None;
                self.error_message = Some(e.user_message().to_string());
            }
        }
        true
    }

    /// Whether the rating control is offered for the current selection
    pub fn can_rate(&self, watched: &WatchedStore) -> bool {
        match (&self.selected_id, &self.details) {
            (Some(id), Some(_)) => !watched.contains(id),
            _ => false,
        }
    }

    /// The rating already given to the selected movie, if any
    pub fn rated_value(&self, watched: &WatchedStore) -> Option<UserRating> {
        self.selected_id
            .as_deref()
            .and_then(|id| watched.user_rating(id))
    }

    /// Rate the selected movie, add it to the watched list and close the
    /// details panel.
    ///
    /// A rating of 0 (nothing picked yet) or above 10 is rejected with the
    /// state untouched.
    pub fn confirm_rating(
        &mut self,
        rating: u8,
        watched: &mut WatchedStore,
    ) -> Result<WatchedEntry, SelectionError> {
        let rating = UserRating::new(rating)?;
        let imdb_id = self.selected_id.clone().ok_or(SelectionError::NoSelection)?;
        let details = self
            .details
            .as_ref()
            .ok_or_else(|| SelectionError::DetailsNotLoaded(imdb_id.clone()))?;

        if let Some(existing) = watched.user_rating(&imdb_id) {
            return Err(SelectionError::AlreadyRated { imdb_id, rating: existing });
        }

        let mut entry = WatchedEntry::from_details(details, rating);
        entry.imdb_id = imdb_id;
        watched.add(entry.clone());
        info!(imdb_id = %entry.imdb_id, rating = %rating, "Movie rated");

        self.close_details();
        Ok(entry)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn details(&self) -> Option<&MovieDetails> {
        self.details.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn page_title(&self) -> &PageTitle {
        &self.page_title
    }
}
