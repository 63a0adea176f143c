// crates/nomadb-core/src/service/mod.rs

//! # Directory service contracts
//!
//! The engine consumes a hosted city-listing backend through these traits.
//! Everything behind them (persistence, sessions, storage) is an opaque
//! collaborator; the engine only sees the request/response shapes below,
//! always as `Result` so callers pattern-match instead of null-checking.

use crate::common::DirectoryStats;
use crate::error::Result;
use crate::filter::FilterState;
use crate::model::{
    CityDraft, CityRecord, CityStats, CityWithDetails, NewReview, ProfileUpdate, Review,
    ReviewPage, ReviewUpdate, UserProfile,
};
use serde::{Deserialize, Serialize};

mod memory;

pub use memory::MemoryDirectory;

/// Identity of the caller as established by the (opaque) auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User(String),
}

impl Caller {
    pub fn user(id: impl Into<String>) -> Self {
        Caller::User(id.into())
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Caller::Anonymous => None,
            Caller::User(id) => Some(id),
        }
    }

    /// The user id, or [`NomadError::LoginRequired`](crate::NomadError::LoginRequired).
    pub fn require_user(&self) -> Result<&str> {
        self.user_id().ok_or(crate::NomadError::LoginRequired)
    }
}

/// What a toggle mutation did server-side.
///
/// Toggling the same preference twice removes it (tri-state none/like/
/// dislike); toggling the opposite preference switches it atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    Created,
    Updated,
    Removed,
}

/// Public read/mutation surface of the city directory.
pub trait CityDirectory {
    /// All listing rows, in backend rank order.
    ///
    /// A backend may honor `filter` as an optimization; frontends re-apply
    /// [`FilterState::apply`] regardless, so partial server-side filtering
    /// never changes what the user sees.
    fn list_cities(&self, filter: Option<&FilterState>) -> Result<Vec<CityRecord>>;

    /// Full payload for one city; unknown slugs are `NotFound`.
    fn city_by_slug(&self, slug: &str) -> Result<CityWithDetails>;

    /// Fresh counters for one city. `Ok(None)` means "not yet computed";
    /// the backend's no-rows case is normalized here, never an error.
    fn city_stats(&self, city_id: &str) -> Result<Option<CityStats>>;

    /// Name search across both locales, rank order, truncated to `limit`.
    fn search_cities(&self, query: &str, limit: usize) -> Result<Vec<CityRecord>>;

    /// Aggregates for the hero section.
    fn total_stats(&self) -> Result<DirectoryStats>;

    /// Toggle the caller's like/dislike preference for a city.
    fn toggle_like(&self, caller: &Caller, city_id: &str, want_like: bool) -> Result<ToggleAction>;

    /// The caller's persisted preference: `Some(true)` liked, `Some(false)`
    /// disliked, `None` neither (always `None` for anonymous callers).
    fn like_status(&self, caller: &Caller, city_id: &str) -> Result<Option<bool>>;

    fn toggle_bookmark(&self, caller: &Caller, city_id: &str) -> Result<ToggleAction>;

    fn bookmark_status(&self, caller: &Caller, city_id: &str) -> Result<bool>;

    /// The caller's bookmarked cities, most recent first.
    fn bookmarked_cities(&self, caller: &Caller) -> Result<Vec<CityRecord>>;

    /// Cities the caller currently likes, most recent first.
    fn liked_cities(&self, caller: &Caller) -> Result<Vec<CityRecord>>;

    /// One page of a city's reviews, newest first.
    fn reviews_by_city(&self, city_id: &str, limit: usize, offset: usize) -> Result<ReviewPage>;

    /// Create a review; rejects bad ratings and a second review by the same
    /// caller for the same city before anything is written.
    fn create_review(&self, caller: &Caller, review: NewReview) -> Result<Review>;

    fn update_review(
        &self,
        caller: &Caller,
        review_id: &str,
        update: ReviewUpdate,
    ) -> Result<Review>;

    fn delete_review(&self, caller: &Caller, review_id: &str) -> Result<()>;

    /// The caller's own reviews, newest first.
    fn reviews_by_author(&self, caller: &Caller) -> Result<Vec<Review>>;

    fn profile(&self, user_id: &str) -> Result<UserProfile>;

    /// Update the caller's profile; username format/length/uniqueness are
    /// validated before the write.
    fn update_profile(&self, caller: &Caller, update: ProfileUpdate) -> Result<UserProfile>;
}

/// Admin CRUD surface, kept separate from the public trait.
pub trait AdminDirectory {
    fn cities_for_admin(&self) -> Result<Vec<CityWithDetails>>;

    /// Create a city record; the backend assigns id and rank.
    fn create_city(&self, draft: CityDraft) -> Result<CityWithDetails>;

    /// Delete a city and everything attached to it (stats, details,
    /// reviews, likes, bookmarks).
    fn delete_city(&self, city_id: &str) -> Result<()>;
}
