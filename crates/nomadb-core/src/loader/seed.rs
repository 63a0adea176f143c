// crates/nomadb-core/src/loader/seed.rs

// ---------------------------------------------------------------------------
// FILE GUARD: this entire file is skipped if the 'json' feature is missing.
// ---------------------------------------------------------------------------
#![cfg(feature = "json")]

use crate::error::Result;
use crate::model::{City, CityDetails, CityStats, CityWithDetails, CostBreakdown};
use serde::Deserialize;
use std::io::Read;

/// Raw seed record as it appears in the dataset file: the city fields are
/// flattened at the top level, with optional attached blocks.
///
/// Kept separate from the domain model because the snapshot cache
/// (bincode) cannot represent flattened maps.
#[derive(Debug, Deserialize)]
struct SeedCity {
    #[serde(flatten)]
    city: City,
    #[serde(default)]
    stats: Option<CityStats>,
    #[serde(default)]
    details: Option<CityDetails>,
    #[serde(default)]
    costs: Option<CostBreakdown>,
}

impl From<SeedCity> for CityWithDetails {
    fn from(seed: SeedCity) -> Self {
        CityWithDetails {
            city: seed.city,
            details: seed.details,
            costs: seed.costs,
            stats: seed.stats,
        }
    }
}

/// Parse a seed dataset from any reader.
pub fn parse_seed(reader: impl Read) -> Result<Vec<CityWithDetails>> {
    let raw: Vec<SeedCity> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().map(Into::into).collect())
}

/// Parse a seed dataset held in memory (used by the wasm bindings, which
/// embed the dataset in the module).
pub fn parse_seed_str(data: &str) -> Result<Vec<CityWithDetails>> {
    let raw: Vec<SeedCity> = serde_json::from_str(data)?;
    Ok(raw.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_record_without_attached_blocks() {
        let data = r#"[{
            "id": "nc-001",
            "slug": "seoul",
            "name_ko": "서울",
            "name_en": "Seoul",
            "region": "Seoul Capital Area",
            "image_url": "",
            "rank": 1,
            "budget": "high",
            "korean_region": "capital",
            "environment": ["urban", "coworking"],
            "best_season": "autumn",
            "cost_per_month": 2800000,
            "overall_score": 4.5,
            "internet_speed": 1024,
            "like_percentage": 88.0,
            "safety_score": 4.6
        }]"#;
        let dataset = parse_seed_str(data).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].city.slug, "seoul");
        assert!(dataset[0].stats.is_none());
        assert!(dataset[0].details.is_none());
    }

    #[test]
    fn bad_enum_value_is_a_parse_error() {
        let data = r#"[{
            "id": "x", "slug": "x", "name_ko": "x", "name_en": "x",
            "region": "x", "image_url": "", "rank": 1,
            "budget": "astronomical",
            "korean_region": "capital", "environment": [],
            "best_season": "autumn", "cost_per_month": 1,
            "overall_score": 0, "internet_speed": 0,
            "like_percentage": 0, "safety_score": 0
        }]"#;
        assert!(parse_seed_str(data).is_err());
    }
}
