use thiserror::Error;

/// Failure of a single catalog round trip.
///
/// Callers only keep the user-facing text; the variant decides which text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Network failure, timeout or non-success HTTP status
    #[error("catalog request failed: {0}")]
    Transport(String),
    /// The catalog answered `Response: "False"`
    #[error("catalog found no match: {0}")]
    NotFound(String),
    /// The body did not have the expected shape
    #[error("unexpected catalog response: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Transport(_) | CatalogError::Malformed(_) => {
                "Something went wrong while fetching movies"
            }
            CatalogError::NotFound(_) => "Movie not found",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Transport(format!("request timed out: {}", err))
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}
