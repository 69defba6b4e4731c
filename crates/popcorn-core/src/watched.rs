use popcorn_models::{UserRating, WatchedEntry, WatchedSummary};
use tracing::debug;

/// Session-lifetime list of rated movies, in insertion order.
///
/// The store does not enforce one entry per identifier; callers decide
/// whether re-adding is allowed.
#[derive(Debug, Clone, Default)]
pub struct WatchedStore {
    entries: Vec<WatchedEntry>,
}

impl WatchedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: WatchedEntry) {
        debug!(imdb_id = %entry.imdb_id, rating = %entry.user_rating, "Adding watched entry");
        self.entries.push(entry);
    }

    /// Remove every entry with this identifier. Returns how many were removed;
    /// an unknown identifier removes nothing.
    pub fn remove(&mut self, imdb_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.imdb_id != imdb_id);
        let removed = before - self.entries.len();
        debug!(imdb_id = %imdb_id, removed, "Removed watched entries");
        removed
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.imdb_id == imdb_id)
    }

    pub fn user_rating(&self, imdb_id: &str) -> Option<UserRating> {
        self.get(imdb_id).map(|entry| entry.user_rating)
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> WatchedSummary {
        summarize(&self.entries)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Averages over the given entries.
///
/// Each average only counts entries that carry the value (the catalog may
/// not know a runtime or rating); with nothing to average it is 0.
pub fn summarize(entries: &[WatchedEntry]) -> WatchedSummary {
    WatchedSummary {
        count: entries.len(),
        avg_imdb_rating: mean(entries.iter().filter_map(|e| e.imdb_rating)),
        avg_user_rating: mean(entries.iter().map(|e| f64::from(e.user_rating.value()))),
        avg_runtime_minutes: mean(entries.iter().filter_map(|e| e.runtime_minutes.map(f64::from))),
    }
}
