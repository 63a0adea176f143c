// crates/nomadb-core/src/interact.rs

//! # Optimistic like/dislike controller
//!
//! One [`CardInteraction`] per displayed city card. A press applies the
//! local flip immediately and hands back a [`ToggleIntent`] for the caller
//! to send to the remote service; the eventual outcome is fed to
//! [`CardInteraction::resolve`], which either keeps the optimistic state or
//! restores the saved pre-image.
//!
//! The state here is ephemeral UI state, never the source of truth. It is
//! seeded from the card's stats on mount and discarded when the card goes
//! away. A card dropped while a mutation is in flight simply never resolves;
//! nothing else observes it.

use crate::error::Result;
use crate::model::CityStats;
use crate::service::ToggleAction;

/// Which button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Like,
    Dislike,
}

/// The mutation the caller should issue after a press was applied locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleIntent {
    pub city_id: String,
    pub want_like: bool,
}

/// Pre-transition values, restored verbatim on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    liked: bool,
    disliked: bool,
    like_count: u32,
    dislike_count: u32,
}

/// Per-card interaction state machine: Idle ⇄ Pending.
///
/// The saved snapshot doubles as the Pending guard: while it is present,
/// further presses are ignored, so at most one mutation per card is ever in
/// flight and rapid double-clicks cannot race each other.
#[derive(Debug, Clone)]
pub struct CardInteraction {
    city_id: String,
    liked: bool,
    disliked: bool,
    like_count: u32,
    dislike_count: u32,
    pending: Option<Snapshot>,
}

impl CardInteraction {
    /// Seed a card from the city's current stats (counts default to zero
    /// when stats are absent).
    pub fn mount(city_id: impl Into<String>, stats: Option<&CityStats>) -> Self {
        CardInteraction {
            city_id: city_id.into(),
            liked: false,
            disliked: false,
            like_count: stats.map_or(0, |s| s.likes),
            dislike_count: stats.map_or(0, |s| s.dislikes),
            pending: None,
        }
    }

    /// Apply the caller's persisted preference, as reported by
    /// [`CityDirectory::like_status`](crate::service::CityDirectory::like_status).
    pub fn with_preference(mut self, preference: Option<bool>) -> Self {
        self.liked = preference == Some(true);
        self.disliked = preference == Some(false);
        self
    }

    pub fn city_id(&self) -> &str {
        &self.city_id
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn disliked(&self) -> bool {
        self.disliked
    }

    pub fn like_count(&self) -> u32 {
        self.like_count
    }

    pub fn dislike_count(&self) -> u32 {
        self.dislike_count
    }

    /// True while a mutation for this card is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            liked: self.liked,
            disliked: self.disliked,
            like_count: self.like_count,
            dislike_count: self.dislike_count,
        }
    }

    /// Handle a button press.
    ///
    /// While Idle: saves the pre-image, applies the optimistic flip and
    /// returns the intent to send. While Pending: no-op, returns `None`.
    ///
    /// Activating one side clears the other; pressing the active side
    /// toggles it off. Count decrements saturate so a card mounted with a
    /// persisted preference but stale zero counts cannot underflow.
    pub fn press(&mut self, press: Press) -> Option<ToggleIntent> {
        if self.pending.is_some() {
            return None;
        }
        self.pending = Some(self.snapshot());

        match press {
            Press::Like => {
                if self.liked {
                    self.liked = false;
                    self.like_count = self.like_count.saturating_sub(1);
                } else {
                    self.liked = true;
                    self.like_count += 1;
                    if self.disliked {
                        self.disliked = false;
                        self.dislike_count = self.dislike_count.saturating_sub(1);
                    }
                }
            }
            Press::Dislike => {
                if self.disliked {
                    self.disliked = false;
                    self.dislike_count = self.dislike_count.saturating_sub(1);
                } else {
                    self.disliked = true;
                    self.dislike_count += 1;
                    if self.liked {
                        self.liked = false;
                        self.like_count = self.like_count.saturating_sub(1);
                    }
                }
            }
        }

        Some(ToggleIntent {
            city_id: self.city_id.clone(),
            want_like: matches!(press, Press::Like),
        })
    }

    /// Feed the remote outcome back into the card.
    ///
    /// On success the optimistic state is confirmed as-is; on failure every
    /// field is restored to the pre-press snapshot and the error is passed
    /// through for display (e.g. "login required"). Either way the card
    /// returns to Idle, and a later press is the retry.
    pub fn resolve(&mut self, outcome: Result<ToggleAction>) -> Result<ToggleAction> {
        match outcome {
            Ok(action) => {
                self.pending = None;
                Ok(action)
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn rollback(&mut self) {
        if let Some(snap) = self.pending.take() {
            self.liked = snap.liked;
            self.disliked = snap.disliked;
            self.like_count = snap.like_count;
            self.dislike_count = snap.dislike_count;
        }
    }
}
