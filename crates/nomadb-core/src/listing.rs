// crates/nomadb-core/src/listing.rs

//! # Parent listing view
//!
//! Single-writer store for the fetched city rows. Cards and other children
//! read the rows but never mutate them; a child that changed something
//! remotely signals [`ListingEvent::Changed`] and the owner re-fetches
//! through the directory service.
//!
//! The filter evaluator is re-applied here on every read of
//! [`ListingView::visible`], so the displayed order is always the
//! evaluator's, whatever the backend did or did not pre-filter.

use crate::error::Result;
use crate::filter::FilterState;
use crate::interact::CardInteraction;
use crate::model::CityRecord;
use crate::service::{Caller, CityDirectory};

/// Message from a child to the owning view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingEvent {
    /// Server-held state changed (like, bookmark, review); a re-fetch is
    /// needed before the cached rows are trustworthy again.
    Changed,
}

/// The owning store for one listing screen.
#[derive(Debug, Default)]
pub struct ListingView {
    records: Vec<CityRecord>,
    filters: FilterState,
    stale: bool,
}

impl ListingView {
    /// Wrap an already-fetched row set.
    pub fn new(initial: Vec<CityRecord>) -> Self {
        ListingView {
            records: initial,
            filters: FilterState::default(),
            stale: false,
        }
    }

    /// Fetch the initial row set from the directory.
    pub fn from_directory(dir: &impl CityDirectory) -> Result<Self> {
        Ok(Self::new(dir.list_cities(None)?))
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the active filter selection. Purely local: the cached rows
    /// are kept and re-evaluated.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// The raw cached rows, in backend rank order.
    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    /// The rows the user currently sees: evaluator-filtered and -ordered.
    pub fn visible(&self) -> Vec<&CityRecord> {
        self.filters.apply(&self.records)
    }

    /// Receive a child event.
    pub fn notify(&mut self, event: ListingEvent) {
        match event {
            ListingEvent::Changed => self.stale = true,
        }
    }

    /// True when a child has signalled a change not yet re-fetched.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Re-fetch the row set and clear staleness.
    pub fn refresh(&mut self, dir: &impl CityDirectory) -> Result<()> {
        self.records = dir.list_cities(None)?;
        self.stale = false;
        Ok(())
    }

    /// Mount an interaction card for one visible row, seeded from the
    /// cached stats and the caller's persisted preference.
    pub fn mount_card(
        &self,
        dir: &impl CityDirectory,
        caller: &Caller,
        slug: &str,
    ) -> Result<Option<CardInteraction>> {
        let Some(record) = self.records.iter().find(|r| r.city.slug == slug) else {
            return Ok(None);
        };
        let preference = dir.like_status(caller, &record.city.id)?;
        Ok(Some(
            CardInteraction::mount(record.city.id.clone(), record.stats.as_ref())
                .with_preference(preference),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BudgetTier, City, CityStats, Environment, Region, Season};

    fn record(id: &str, likes: u32) -> CityRecord {
        CityRecord {
            city: City {
                id: id.into(),
                slug: id.into(),
                name_ko: id.into(),
                name_en: id.into(),
                region: "Test".into(),
                image_url: String::new(),
                rank: 0,
                badge: None,
                budget: BudgetTier::Mid,
                korean_region: Region::Capital,
                environment: vec![Environment::Urban],
                best_season: Season::Spring,
                cost_per_month: 1,
                overall_score: 0.0,
                internet_speed: 0,
                like_percentage: 0.0,
                safety_score: 0.0,
            },
            stats: Some(CityStats {
                likes,
                ..CityStats::default()
            }),
        }
    }

    #[test]
    fn visible_applies_the_evaluator_order() {
        let view = ListingView::new(vec![record("a", 1), record("b", 8)]);
        let ids: Vec<&str> = view.visible().iter().map(|r| r.city.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn change_event_marks_the_view_stale() {
        let mut view = ListingView::new(vec![]);
        assert!(!view.is_stale());
        view.notify(ListingEvent::Changed);
        assert!(view.is_stale());
    }

    #[test]
    fn set_filters_is_local_and_keeps_rows() {
        let mut view = ListingView::new(vec![record("a", 1)]);
        view.set_filters(FilterState {
            query: Some("zzz".into()),
            ..FilterState::default()
        });
        assert!(view.visible().is_empty());
        assert_eq!(view.records().len(), 1);
    }
}
