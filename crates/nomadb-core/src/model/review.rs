// crates/nomadb-core/src/model/review.rs
use crate::error::{NomadError, Result};
use serde::{Deserialize, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A published city review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub city_id: String,
    pub author_id: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
}

/// Input for creating a review. One review per (author, city).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub city_id: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
}

impl NewReview {
    /// Validate before any backend write is attempted.
    pub fn validate(&self) -> Result<()> {
        validate_rating(self.rating)
    }
}

/// Partial update for an existing review; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ReviewUpdate {
    pub fn validate(&self) -> Result<()> {
        match self.rating {
            Some(r) => validate_rating(r),
            None => Ok(()),
        }
    }
}

/// One page of reviews plus the total row count for pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: usize,
}

/// Ratings are whole stars in `[RATING_MIN, RATING_MAX]`.
pub fn validate_rating(rating: u8) -> Result<()> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(NomadError::Validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn new_review_rejects_out_of_range_rating() {
        let review = NewReview {
            city_id: "c1".into(),
            rating: 6,
            title: "Great".into(),
            content: "...".into(),
        };
        assert!(review.validate().is_err());
    }

    #[test]
    fn update_without_rating_is_valid() {
        assert!(ReviewUpdate::default().validate().is_ok());
    }
}
