// crates/nomadb-core/src/lib.rs

//! # nomadb-core
//!
//! Engine behind the Nomadb city directory: the domain model, the listing
//! filter evaluator, the optimistic like/dislike controller, the directory
//! service contracts with an in-memory backend, and the dataset loader.
//!
//! Quick start:
//!
//! ```no_run
//! use nomadb_core::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let dir = MemoryDirectory::load()?;
//!     let mut view = ListingView::from_directory(&dir)?;
//!
//!     view.set_filters(FilterState {
//!         regions: RegionFilter::any_of([Region::Jeju]),
//!         ..FilterState::default()
//!     });
//!     for record in view.visible() {
//!         println!("{} — {} likes", record.city.name(), record.likes());
//!     }
//!     Ok(())
//! }
//! ```

pub mod common;
pub mod error;
pub mod filter;
pub mod interact;
pub mod listing;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod service;
pub mod text;

// Re-exports
pub use crate::common::DirectoryStats;
pub use crate::error::{NomadError, Result};
pub use crate::filter::{FilterState, RegionFilter};
pub use crate::interact::{CardInteraction, Press, ToggleIntent};
pub use crate::listing::{ListingEvent, ListingView};
pub use crate::model::{
    Badge, BudgetTier, City, CityDetails, CityDraft, CityRecord, CityStats, CityWithDetails,
    CostBreakdown, Environment, NewReview, ProfileUpdate, Region, Review, ReviewPage,
    ReviewUpdate, Season, UserProfile,
};
pub use crate::service::{AdminDirectory, Caller, CityDirectory, MemoryDirectory, ToggleAction};
