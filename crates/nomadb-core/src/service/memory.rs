// crates/nomadb-core/src/service/memory.rs

//! In-memory implementation of the directory traits.
//!
//! Stands in for the hosted table API: the CLI, demos, wasm bindings and
//! tests all run against it without a network. Rows live behind a single
//! `RwLock`, so a shared reference is enough for every operation, the same
//! call shape frontends get from a remote client.

use super::{AdminDirectory, Caller, CityDirectory, ToggleAction};
use crate::common::DirectoryStats;
use crate::error::{NomadError, Result};
use crate::filter::FilterState;
use crate::model::{
    validate_slug, validate_username, City, CityDetails, CityDraft, CityRecord, CityStats,
    CityWithDetails, CostBreakdown, NewReview, ProfileUpdate, Review, ReviewPage, ReviewUpdate,
    UserProfile,
};
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;

/// One city row with everything attached to it. Stats stay absent until
/// first computed, exactly as the hosted backend reports them.
#[derive(Debug, Clone)]
struct StoredCity {
    city: City,
    stats: Option<CityStats>,
    details: Option<CityDetails>,
    costs: Option<CostBreakdown>,
}

/// A like/dislike row: (user, city, preference). Insertion order doubles as
/// creation order for the "most recent first" listings.
#[derive(Debug, Clone)]
struct LikeRow {
    user_id: String,
    city_id: String,
    is_like: bool,
}

#[derive(Debug, Clone)]
struct BookmarkRow {
    user_id: String,
    city_id: String,
}

#[derive(Debug, Default)]
struct Inner {
    cities: Vec<StoredCity>,
    likes: Vec<LikeRow>,
    bookmarks: Vec<BookmarkRow>,
    reviews: Vec<Review>,
    profiles: HashMap<String, UserProfile>,
    next_city_id: u64,
    next_review_id: u64,
}

impl Inner {
    fn city_index(&self, city_id: &str) -> Result<usize> {
        self.cities
            .iter()
            .position(|s| s.city.id == city_id)
            .ok_or_else(|| NomadError::NotFound(format!("city {city_id}")))
    }

    fn record_for(&self, city_id: &str) -> Option<CityRecord> {
        self.cities
            .iter()
            .find(|s| s.city.id == city_id)
            .map(|s| CityRecord {
                city: s.city.clone(),
                stats: s.stats.clone(),
            })
    }
}

/// Seedable in-memory directory backend.
pub struct MemoryDirectory {
    inner: RwLock<Inner>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        MemoryDirectory {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Seed from a dataset, e.g. the bundled one via
    /// [`loader::load_default`](crate::loader::load_default).
    pub fn from_dataset(dataset: Vec<CityWithDetails>) -> Self {
        let dir = Self::new();
        {
            let mut inner = dir.write();
            for (i, entry) in dataset.into_iter().enumerate() {
                inner.cities.push(StoredCity {
                    city: entry.city,
                    stats: entry.stats,
                    details: entry.details,
                    costs: entry.costs,
                });
                inner.next_city_id = (i as u64) + 1;
            }
            inner.cities.sort_by_key(|s| s.city.rank);
            debug!("seeded directory with {} cities", inner.cities.len());
        }
        dir
    }

    /// Seed from the bundled dataset shipped with the crate.
    #[cfg(feature = "json")]
    pub fn load() -> Result<Self> {
        Ok(Self::from_dataset(crate::loader::load_default()?))
    }

    /// Register a user profile, as the (opaque) signup flow would.
    pub fn register_profile(&self, profile: UserProfile) {
        self.write().profiles.insert(profile.id.clone(), profile);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl CityDirectory for MemoryDirectory {
    fn list_cities(&self, filter: Option<&FilterState>) -> Result<Vec<CityRecord>> {
        let inner = self.read();
        // Rank order; the client-side evaluator owns the final ordering.
        let rows = inner
            .cities
            .iter()
            .map(|s| CityRecord {
                city: s.city.clone(),
                stats: s.stats.clone(),
            })
            .filter(|rec| filter.map_or(true, |f| f.matches(rec)))
            .collect();
        Ok(rows)
    }

    fn city_by_slug(&self, slug: &str) -> Result<CityWithDetails> {
        let inner = self.read();
        inner
            .cities
            .iter()
            .find(|s| s.city.slug == slug)
            .map(|s| CityWithDetails {
                city: s.city.clone(),
                details: s.details.clone(),
                costs: s.costs,
                stats: s.stats.clone(),
            })
            .ok_or_else(|| NomadError::NotFound(format!("city {slug}")))
    }

    fn city_stats(&self, city_id: &str) -> Result<Option<CityStats>> {
        // No row is "not yet computed", not an error.
        let inner = self.read();
        Ok(inner
            .cities
            .iter()
            .find(|s| s.city.id == city_id)
            .and_then(|s| s.stats.clone()))
    }

    fn search_cities(&self, query: &str, limit: usize) -> Result<Vec<CityRecord>> {
        let q = query.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.read();
        Ok(inner
            .cities
            .iter()
            .filter(|s| s.city.name_contains(q))
            .take(limit)
            .map(|s| CityRecord {
                city: s.city.clone(),
                stats: s.stats.clone(),
            })
            .collect())
    }

    fn total_stats(&self) -> Result<DirectoryStats> {
        let inner = self.read();
        Ok(DirectoryStats {
            cities: inner.cities.len(),
            reviews: inner
                .cities
                .iter()
                .filter_map(|s| s.stats.as_ref())
                .map(|s| u64::from(s.reviews_count))
                .sum(),
            nomads: inner
                .cities
                .iter()
                .filter_map(|s| s.stats.as_ref())
                .map(|s| u64::from(s.nomads_now))
                .sum(),
        })
    }

    fn toggle_like(&self, caller: &Caller, city_id: &str, want_like: bool) -> Result<ToggleAction> {
        let user_id = caller.require_user()?.to_owned();
        let mut inner = self.write();
        let city_idx = inner.city_index(city_id)?;

        let existing = inner
            .likes
            .iter()
            .position(|row| row.user_id == user_id && row.city_id == city_id);

        let action = match existing {
            // Same preference again: remove it (toggle off).
            Some(idx) if inner.likes[idx].is_like == want_like => {
                inner.likes.remove(idx);
                let stats = inner.cities[city_idx].stats.get_or_insert_with(CityStats::default);
                if want_like {
                    stats.likes = stats.likes.saturating_sub(1);
                } else {
                    stats.dislikes = stats.dislikes.saturating_sub(1);
                }
                ToggleAction::Removed
            }
            // Opposite preference: switch it, moving both counters at once.
            Some(idx) => {
                inner.likes[idx].is_like = want_like;
                let stats = inner.cities[city_idx].stats.get_or_insert_with(CityStats::default);
                if want_like {
                    stats.likes += 1;
                    stats.dislikes = stats.dislikes.saturating_sub(1);
                } else {
                    stats.dislikes += 1;
                    stats.likes = stats.likes.saturating_sub(1);
                }
                ToggleAction::Updated
            }
            None => {
                inner.likes.push(LikeRow {
                    user_id,
                    city_id: city_id.to_owned(),
                    is_like: want_like,
                });
                let stats = inner.cities[city_idx].stats.get_or_insert_with(CityStats::default);
                if want_like {
                    stats.likes += 1;
                } else {
                    stats.dislikes += 1;
                }
                ToggleAction::Created
            }
        };
        Ok(action)
    }

    fn like_status(&self, caller: &Caller, city_id: &str) -> Result<Option<bool>> {
        let Some(user_id) = caller.user_id() else {
            return Ok(None);
        };
        let inner = self.read();
        Ok(inner
            .likes
            .iter()
            .find(|row| row.user_id == user_id && row.city_id == city_id)
            .map(|row| row.is_like))
    }

    fn toggle_bookmark(&self, caller: &Caller, city_id: &str) -> Result<ToggleAction> {
        let user_id = caller.require_user()?.to_owned();
        let mut inner = self.write();
        inner.city_index(city_id)?;

        let existing = inner
            .bookmarks
            .iter()
            .position(|row| row.user_id == user_id && row.city_id == city_id);
        match existing {
            Some(idx) => {
                inner.bookmarks.remove(idx);
                Ok(ToggleAction::Removed)
            }
            None => {
                inner.bookmarks.push(BookmarkRow {
                    user_id,
                    city_id: city_id.to_owned(),
                });
                Ok(ToggleAction::Created)
            }
        }
    }

    fn bookmark_status(&self, caller: &Caller, city_id: &str) -> Result<bool> {
        let Some(user_id) = caller.user_id() else {
            return Ok(false);
        };
        let inner = self.read();
        Ok(inner
            .bookmarks
            .iter()
            .any(|row| row.user_id == user_id && row.city_id == city_id))
    }

    fn bookmarked_cities(&self, caller: &Caller) -> Result<Vec<CityRecord>> {
        let user_id = caller.require_user()?;
        let inner = self.read();
        Ok(inner
            .bookmarks
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .filter_map(|row| inner.record_for(&row.city_id))
            .collect())
    }

    fn liked_cities(&self, caller: &Caller) -> Result<Vec<CityRecord>> {
        let user_id = caller.require_user()?;
        let inner = self.read();
        Ok(inner
            .likes
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id && row.is_like)
            .filter_map(|row| inner.record_for(&row.city_id))
            .collect())
    }

    fn reviews_by_city(&self, city_id: &str, limit: usize, offset: usize) -> Result<ReviewPage> {
        let inner = self.read();
        let all: Vec<&Review> = inner
            .reviews
            .iter()
            .rev()
            .filter(|r| r.city_id == city_id)
            .collect();
        let total = all.len();
        let reviews = all
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(ReviewPage { reviews, total })
    }

    fn create_review(&self, caller: &Caller, review: NewReview) -> Result<Review> {
        let user_id = caller.require_user()?.to_owned();
        review.validate()?;

        let mut inner = self.write();
        let city_idx = inner.city_index(&review.city_id)?;

        let already = inner
            .reviews
            .iter()
            .any(|r| r.city_id == review.city_id && r.author_id == user_id);
        if already {
            return Err(NomadError::Conflict(
                "you have already reviewed this city".into(),
            ));
        }

        inner.next_review_id += 1;
        let stored = Review {
            id: format!("review-{}", inner.next_review_id),
            city_id: review.city_id,
            author_id: user_id,
            rating: review.rating,
            title: review.title,
            content: review.content,
        };
        inner.reviews.push(stored.clone());
        inner.cities[city_idx]
            .stats
            .get_or_insert_with(CityStats::default)
            .reviews_count += 1;
        Ok(stored)
    }

    fn update_review(
        &self,
        caller: &Caller,
        review_id: &str,
        update: ReviewUpdate,
    ) -> Result<Review> {
        let user_id = caller.require_user()?.to_owned();
        update.validate()?;

        let mut inner = self.write();
        let review = inner
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id && r.author_id == user_id)
            .ok_or_else(|| NomadError::NotFound(format!("review {review_id}")))?;

        if let Some(rating) = update.rating {
            review.rating = rating;
        }
        if let Some(title) = update.title {
            review.title = title;
        }
        if let Some(content) = update.content {
            review.content = content;
        }
        Ok(review.clone())
    }

    fn delete_review(&self, caller: &Caller, review_id: &str) -> Result<()> {
        let user_id = caller.require_user()?.to_owned();
        let mut inner = self.write();
        let idx = inner
            .reviews
            .iter()
            .position(|r| r.id == review_id && r.author_id == user_id)
            .ok_or_else(|| NomadError::NotFound(format!("review {review_id}")))?;
        let removed = inner.reviews.remove(idx);
        if let Ok(city_idx) = inner.city_index(&removed.city_id) {
            if let Some(stats) = inner.cities[city_idx].stats.as_mut() {
                stats.reviews_count = stats.reviews_count.saturating_sub(1);
            }
        }
        Ok(())
    }

    fn reviews_by_author(&self, caller: &Caller) -> Result<Vec<Review>> {
        let user_id = caller.require_user()?;
        let inner = self.read();
        Ok(inner
            .reviews
            .iter()
            .rev()
            .filter(|r| r.author_id == user_id)
            .cloned()
            .collect())
    }

    fn profile(&self, user_id: &str) -> Result<UserProfile> {
        let inner = self.read();
        inner
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| NomadError::NotFound(format!("profile {user_id}")))
    }

    fn update_profile(&self, caller: &Caller, update: ProfileUpdate) -> Result<UserProfile> {
        let user_id = caller.require_user()?.to_owned();
        let mut inner = self.write();

        if let Some(username) = &update.username {
            validate_username(username)?;
            let taken = inner
                .profiles
                .values()
                .any(|p| p.username == *username && p.id != user_id);
            if taken {
                return Err(NomadError::Conflict("username is already taken".into()));
            }
        }

        let profile = inner
            .profiles
            .get_mut(&user_id)
            .ok_or_else(|| NomadError::NotFound(format!("profile {user_id}")))?;
        if let Some(username) = update.username {
            profile.username = username;
        }
        if let Some(bio) = update.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar_url) = update.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        Ok(profile.clone())
    }
}

impl AdminDirectory for MemoryDirectory {
    fn cities_for_admin(&self) -> Result<Vec<CityWithDetails>> {
        let inner = self.read();
        Ok(inner
            .cities
            .iter()
            .map(|s| CityWithDetails {
                city: s.city.clone(),
                details: s.details.clone(),
                costs: s.costs,
                stats: s.stats.clone(),
            })
            .collect())
    }

    fn create_city(&self, draft: CityDraft) -> Result<CityWithDetails> {
        validate_slug(&draft.slug)?;
        let mut inner = self.write();

        if inner.cities.iter().any(|s| s.city.slug == draft.slug) {
            return Err(NomadError::Conflict(format!(
                "slug {} is already taken",
                draft.slug
            )));
        }

        inner.next_city_id += 1;
        let rank = inner
            .cities
            .iter()
            .map(|s| s.city.rank)
            .max()
            .unwrap_or(0)
            + 1;
        let city = City {
            id: format!("city-{}", inner.next_city_id),
            slug: draft.slug,
            name_ko: draft.name_ko,
            name_en: draft.name_en,
            region: draft.region,
            image_url: draft.image_url,
            rank,
            badge: None,
            budget: draft.budget,
            korean_region: draft.korean_region,
            environment: draft.environment,
            best_season: draft.best_season,
            cost_per_month: draft.cost_per_month,
            overall_score: draft.overall_score,
            internet_speed: draft.internet_speed,
            like_percentage: 0.0,
            safety_score: draft.safety_score,
        };
        debug!("created city {} ({})", city.id, city.slug);
        let stored = StoredCity {
            city,
            stats: Some(CityStats::default()),
            details: draft.details,
            costs: draft.costs,
        };
        let out = CityWithDetails {
            city: stored.city.clone(),
            details: stored.details.clone(),
            costs: stored.costs,
            stats: stored.stats.clone(),
        };
        inner.cities.push(stored);
        Ok(out)
    }

    fn delete_city(&self, city_id: &str) -> Result<()> {
        let mut inner = self.write();
        let idx = inner.city_index(city_id)?;
        inner.cities.remove(idx);
        // Cascade everything attached to the row.
        inner.likes.retain(|row| row.city_id != city_id);
        inner.bookmarks.retain(|row| row.city_id != city_id);
        inner.reviews.retain(|r| r.city_id != city_id);
        debug!("deleted city {city_id}");
        Ok(())
    }
}
