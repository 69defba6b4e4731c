use serde::{Deserialize, Serialize};

/// One hit from a catalog title search.
///
/// `year` stays textual because the catalog reports ranges for series
/// (e.g. "2011–2019").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Full catalog record for a single title.
///
/// Numeric fields are `None` when the catalog reports them as missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_minutes: Option<u32>,
    pub imdb_rating: Option<f64>,
    pub plot: String,
    pub release_date: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetails {
    /// Window title shown while these details are on screen
    pub fn page_title(&self) -> String {
        format!("Movie | {}", self.title)
    }
}
