pub mod media;
pub mod rating;
pub mod watched;

pub use media::{MovieDetails, SearchResultItem};
pub use rating::{RatingError, UserRating};
pub use watched::{WatchedEntry, WatchedSummary};
