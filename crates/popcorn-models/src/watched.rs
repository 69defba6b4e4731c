use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::MovieDetails;
use crate::rating::UserRating;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub imdb_rating: Option<f64>,
    pub runtime_minutes: Option<u32>,
    pub user_rating: UserRating,
    pub rated_at: DateTime<Utc>,
}

impl WatchedEntry {
    pub fn from_details(details: &MovieDetails, user_rating: UserRating) -> Self {
        Self {
            imdb_id: details.imdb_id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster_url: details.poster_url.clone(),
            imdb_rating: details.imdb_rating,
            runtime_minutes: details.runtime_minutes,
            user_rating,
            rated_at: Utc::now(),
        }
    }
}

/// Averages over the watched list, recomputed on every read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}
