// crates/nomadb-core/src/filter.rs

//! # Listing filter engine
//!
//! [`FilterState`] captures the user's current selection; [`FilterState::apply`]
//! evaluates it as a pure predicate over a slice of [`CityRecord`]s and
//! returns the visible rows sorted by popularity.
//!
//! The evaluator is the single authority for what the user sees: a backend
//! may pre-filter as an optimization, but frontends always re-apply the
//! evaluator to the rows they hold.

use crate::model::{BudgetTier, CityRecord, Environment, Region, Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Region dimension of a filter.
///
/// Never empty by construction: either the `All` wildcard or one-or-more
/// concrete regions. The UI's "all regions" choice and an empty selection
/// both normalize to `All`, so the two invalid shapes (empty set, wildcard
/// mixed with concrete values) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionFilter {
    All,
    AnyOf(BTreeSet<Region>),
}

impl Default for RegionFilter {
    fn default() -> Self {
        RegionFilter::All
    }
}

impl RegionFilter {
    /// Build from a concrete selection; an empty selection is the wildcard.
    pub fn any_of(regions: impl IntoIterator<Item = Region>) -> Self {
        let set: BTreeSet<Region> = regions.into_iter().collect();
        if set.is_empty() {
            RegionFilter::All
        } else {
            RegionFilter::AnyOf(set)
        }
    }

    /// Parse a UI selection of region identifiers.
    ///
    /// The `"all"` sentinel anywhere in the list wins over every concrete
    /// entry, so a mixed selection still behaves as a true wildcard.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> crate::Result<Self> {
        let mut set = BTreeSet::new();
        for id in ids {
            if id.trim().eq_ignore_ascii_case("all") {
                return Ok(RegionFilter::All);
            }
            match Region::parse(id) {
                Some(region) => {
                    set.insert(region);
                }
                None => {
                    return Err(crate::NomadError::Validation(format!(
                        "unknown region: {id}"
                    )))
                }
            }
        }
        Ok(Self::any_of(set))
    }

    /// True when `region` passes this dimension.
    pub fn admits(&self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::AnyOf(set) => set.contains(&region),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RegionFilter::All)
    }
}

/// The user's current search/filter selection.
///
/// Dimensions compose conjunctively (budget AND region AND environment AND
/// season AND text query); within the region and environment dimensions the
/// match is disjunctive (any selected value admits).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Single band, or no constraint.
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub regions: RegionFilter,
    /// Empty = unconstrained; non-empty = match-any (OR).
    #[serde(default)]
    pub environments: BTreeSet<Environment>,
    #[serde(default)]
    pub season: Option<Season>,
    /// Case-insensitive substring match against both display names.
    #[serde(default)]
    pub query: Option<String>,
}

impl FilterState {
    /// True when no dimension constrains the listing.
    pub fn is_unconstrained(&self) -> bool {
        self.budget.is_none()
            && self.regions.is_all()
            && self.environments.is_empty()
            && self.season.is_none()
            && self.trimmed_query().is_none()
    }

    fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Pure predicate: does `record` pass every active dimension?
    pub fn matches(&self, record: &CityRecord) -> bool {
        let city = &record.city;

        if let Some(q) = self.trimmed_query() {
            if !city.name_contains(q) {
                return false;
            }
        }

        if let Some(budget) = self.budget {
            if city.budget != budget {
                return false;
            }
        }

        if !self.regions.admits(city.korean_region) {
            return false;
        }

        // OR within the dimension: any overlap admits the city.
        if !self.environments.is_empty()
            && !city
                .environment
                .iter()
                .any(|tag| self.environments.contains(tag))
        {
            return false;
        }

        if let Some(season) = self.season {
            if city.best_season != season {
                return false;
            }
        }

        true
    }

    /// Evaluate the filter over `records`.
    ///
    /// Returns the passing subset by reference, sorted descending by like
    /// count (zero when stats are absent). The sort is stable, so rows with
    /// equal like counts keep their input order across re-renders: a fixed
    /// input always yields the identical ordered output.
    pub fn apply<'a>(&self, records: &'a [CityRecord]) -> Vec<&'a CityRecord> {
        let mut out: Vec<&CityRecord> = records.iter().filter(|r| self.matches(r)).collect();
        out.sort_by(|a, b| b.likes().cmp(&a.likes()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, CityStats};

    fn city(id: &str, region: Region, env: &[Environment]) -> City {
        City {
            id: id.into(),
            slug: id.into(),
            name_ko: format!("도시{id}"),
            name_en: format!("City {id}"),
            region: region.label().into(),
            image_url: String::new(),
            rank: 0,
            badge: None,
            budget: BudgetTier::Mid,
            korean_region: region,
            environment: env.to_vec(),
            best_season: Season::Spring,
            cost_per_month: 2_000_000,
            overall_score: 4.0,
            internet_speed: 500,
            like_percentage: 80.0,
            safety_score: 4.0,
        }
    }

    fn record(id: &str, region: Region, env: &[Environment], likes: u32) -> CityRecord {
        CityRecord {
            city: city(id, region, env),
            stats: Some(CityStats {
                likes,
                ..CityStats::default()
            }),
        }
    }

    #[test]
    fn all_regions_admits_every_city() {
        let records = vec![
            record("a", Region::Capital, &[], 0),
            record("b", Region::Jeju, &[], 0),
            record("c", Region::Gangwon, &[], 0),
        ];
        let filters = FilterState::default();
        assert!(filters.regions.is_all());
        assert_eq!(filters.apply(&records).len(), 3);
    }

    #[test]
    fn all_sentinel_wins_over_concrete_entries() {
        // A selection mixing the sentinel with concrete regions still
        // behaves as a wildcard.
        let filter = RegionFilter::from_ids(["jeju", "all", "capital"]).unwrap();
        assert!(filter.is_all());
        for region in Region::all() {
            assert!(filter.admits(region));
        }
    }

    #[test]
    fn empty_region_selection_normalizes_to_all() {
        assert!(RegionFilter::any_of(std::iter::empty()).is_all());
        assert!(RegionFilter::from_ids(std::iter::empty()).unwrap().is_all());
    }

    #[test]
    fn unknown_region_id_is_a_validation_error() {
        assert!(RegionFilter::from_ids(["atlantis"]).is_err());
    }

    #[test]
    fn concrete_regions_match_any_of_the_selection() {
        let records = vec![
            record("a", Region::Capital, &[], 0),
            record("b", Region::Jeju, &[], 0),
            record("c", Region::Gangwon, &[], 0),
        ];
        let filters = FilterState {
            regions: RegionFilter::any_of([Region::Jeju, Region::Gangwon]),
            ..FilterState::default()
        };
        let visible = filters.apply(&records);
        let ids: Vec<&str> = visible.iter().map(|r| r.city.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn environments_use_or_semantics_never_and() {
        let records = vec![
            record("nature-only", Region::Jeju, &[Environment::Nature], 0),
            record("cafe-only", Region::Jeju, &[Environment::CafeWork], 0),
            record("both", Region::Jeju, &[Environment::Nature, Environment::CafeWork], 0),
            record("urban", Region::Jeju, &[Environment::Urban], 0),
        ];
        let filters = FilterState {
            environments: [Environment::Nature, Environment::CafeWork].into(),
            ..FilterState::default()
        };
        let ids: Vec<&str> = filters
            .apply(&records)
            .iter()
            .map(|r| r.city.id.as_str())
            .collect();
        // Any overlap admits; a city is never required to carry all tags.
        assert_eq!(ids, ["nature-only", "cafe-only", "both"]);
    }

    #[test]
    fn empty_environments_is_unconstrained() {
        let records = vec![record("no-tags", Region::Jeju, &[], 0)];
        let filters = FilterState::default();
        assert_eq!(filters.apply(&records).len(), 1);
    }

    #[test]
    fn query_matches_either_locale_case_insensitively() {
        let mut rec = record("a", Region::Capital, &[], 0);
        rec.city.name_ko = "서울".into();
        rec.city.name_en = "Seoul".into();
        let records = vec![rec];

        for q in ["seoul", "SEO", "서울"] {
            let filters = FilterState {
                query: Some(q.into()),
                ..FilterState::default()
            };
            assert_eq!(filters.apply(&records).len(), 1, "query {q:?}");
        }

        let miss = FilterState {
            query: Some("busan".into()),
            ..FilterState::default()
        };
        assert!(miss.apply(&records).is_empty());
    }

    #[test]
    fn blank_query_is_vacuously_true() {
        let records = vec![record("a", Region::Capital, &[], 0)];
        let filters = FilterState {
            query: Some("   ".into()),
            ..FilterState::default()
        };
        assert_eq!(filters.apply(&records).len(), 1);
    }

    #[test]
    fn output_is_sorted_descending_by_likes() {
        let records = vec![
            record("1", Region::Capital, &[], 5),
            record("2", Region::Capital, &[], 9),
            record("3", Region::Capital, &[], 5),
        ];
        let visible = FilterState::default().apply(&records);
        let ids: Vec<&str> = visible.iter().map(|r| r.city.id.as_str()).collect();
        // Highest first; the two 5-like rows keep their input order.
        assert_eq!(ids, ["2", "1", "3"]);
        for pair in visible.windows(2) {
            assert!(pair[0].likes() >= pair[1].likes());
        }
    }

    #[test]
    fn absent_stats_sort_as_zero_likes() {
        let mut no_stats = record("none", Region::Capital, &[], 0);
        no_stats.stats = None;
        let records = vec![no_stats, record("liked", Region::Capital, &[], 3)];
        let visible = FilterState::default().apply(&records);
        assert_eq!(visible[0].city.id, "liked");
        assert_eq!(visible[1].city.id, "none");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let records = vec![
            record("1", Region::Capital, &[Environment::Urban], 5),
            record("2", Region::Jeju, &[Environment::Nature], 9),
            record("3", Region::Gangwon, &[Environment::Nature], 5),
        ];
        let filters = FilterState {
            environments: [Environment::Nature, Environment::Urban].into(),
            ..FilterState::default()
        };
        let first: Vec<&str> = filters
            .apply(&records)
            .iter()
            .map(|r| r.city.id.as_str())
            .collect();
        let second: Vec<&str> = filters
            .apply(&records)
            .iter()
            .map(|r| r.city.id.as_str())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn dimensions_compose_conjunctively() {
        let mut a = record("a", Region::Jeju, &[Environment::Nature], 0);
        a.city.budget = BudgetTier::Low;
        a.city.best_season = Season::Summer;
        let mut b = record("b", Region::Jeju, &[Environment::Nature], 0);
        b.city.budget = BudgetTier::High; // fails the budget dimension only
        b.city.best_season = Season::Summer;
        let records = vec![a, b];

        let filters = FilterState {
            budget: Some(BudgetTier::Low),
            regions: RegionFilter::any_of([Region::Jeju]),
            environments: [Environment::Nature].into(),
            season: Some(Season::Summer),
            query: None,
        };
        let ids: Vec<&str> = filters
            .apply(&records)
            .iter()
            .map(|r| r.city.id.as_str())
            .collect();
        assert_eq!(ids, ["a"]);
    }
}
