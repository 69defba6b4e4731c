use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_USER_RATING: u8 = 1;
pub const MAX_USER_RATING: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating {0} is out of range (expected 1-10)")]
    OutOfRange(u8),
}

/// A personal star rating, always within 1-10.
///
/// Zero means "not rated yet" in the rating widget and cannot be turned
/// into a `UserRating`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

impl UserRating {
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (MIN_USER_RATING..=MAX_USER_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserRating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
