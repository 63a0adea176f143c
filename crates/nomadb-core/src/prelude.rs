//! nomadb-core prelude: bring common types and traits into scope for
//! frontends, demos and tests.

#![allow(unused_imports)]

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
pub use crate::text::{equals_folded, fold_key};
