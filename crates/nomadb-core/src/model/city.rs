// crates/nomadb-core/src/model/city.rs
use crate::error::{NomadError, Result};
use crate::text::fold_key;
use serde::{Deserialize, Serialize};

/// Upper bound on slug length accepted by [`validate_slug`].
pub const SLUG_MAX_LEN: usize = 64;

/// One of three monthly-cost bands used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Mid,
    High,
}

impl BudgetTier {
    /// Stable identifier for serialization and CLI flags.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }

    /// Human-readable band label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "under ₩1.5M",
            Self::Mid => "₩1.5M–2.5M",
            Self::High => "over ₩2.5M",
        }
    }

    /// Parse a stable identifier, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "mid" => Some(Self::Mid),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Regional category of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Capital,
    Gangwon,
    Chungcheong,
    Gyeongsang,
    Jeolla,
    Jeju,
}

impl Region {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Capital => "capital",
            Self::Gangwon => "gangwon",
            Self::Chungcheong => "chungcheong",
            Self::Gyeongsang => "gyeongsang",
            Self::Jeolla => "jeolla",
            Self::Jeju => "jeju",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Capital => "Seoul Capital Area",
            Self::Gangwon => "Gangwon",
            Self::Chungcheong => "Chungcheong",
            Self::Gyeongsang => "Gyeongsang",
            Self::Jeolla => "Jeolla",
            Self::Jeju => "Jeju Island",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "capital" => Some(Self::Capital),
            "gangwon" => Some(Self::Gangwon),
            "chungcheong" => Some(Self::Chungcheong),
            "gyeongsang" => Some(Self::Gyeongsang),
            "jeolla" => Some(Self::Jeolla),
            "jeju" => Some(Self::Jeju),
            _ => None,
        }
    }

    /// All regional categories, in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Capital,
            Self::Gangwon,
            Self::Chungcheong,
            Self::Gyeongsang,
            Self::Jeolla,
            Self::Jeju,
        ]
    }
}

/// Work/living environment tag from a fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Nature,
    Urban,
    CafeWork,
    Coworking,
}

impl Environment {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Nature => "nature",
            Self::Urban => "urban",
            Self::CafeWork => "cafe_work",
            Self::Coworking => "coworking",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nature => "nature-oriented",
            Self::Urban => "urban",
            Self::CafeWork => "cafe-friendly",
            Self::Coworking => "coworking required",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nature" => Some(Self::Nature),
            "urban" => Some(Self::Urban),
            "cafe_work" | "cafe-work" => Some(Self::CafeWork),
            "coworking" => Some(Self::Coworking),
            _ => None,
        }
    }
}

/// Best-visit season tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "autumn" | "fall" => Some(Self::Autumn),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }
}

/// Editorial badge shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Popular,
    Trending,
}

/// A listed city with its nomad-relevant attributes.
///
/// Read-only within the engine: records are produced by the directory
/// service and consumed by the filter evaluator and frontends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub slug: String,
    pub name_ko: String,
    pub name_en: String,
    /// Free-form display region, e.g. "Jeju Island".
    pub region: String,
    pub image_url: String,
    /// Backend listing order; ties in the like-sort fall back to this order.
    pub rank: u32,
    #[serde(default)]
    pub badge: Option<Badge>,

    // Filter dimensions
    pub budget: BudgetTier,
    pub korean_region: Region,
    #[serde(default)]
    pub environment: Vec<Environment>,
    pub best_season: Season,

    // Metrics
    /// Monthly cost of living in KRW.
    pub cost_per_month: u64,
    pub overall_score: f32,
    /// Median downstream speed in Mbps.
    pub internet_speed: u32,
    pub like_percentage: f32,
    pub safety_score: f32,
}

impl City {
    /// City display name in the primary locale.
    pub fn name(&self) -> &str {
        &self.name_ko
    }

    /// City display name in the secondary locale.
    pub fn name_en(&self) -> &str {
        &self.name_en
    }

    /// Case-insensitive, script-insensitive substring match against either
    /// display name.
    pub fn name_contains(&self, query: &str) -> bool {
        let q = fold_key(query);
        fold_key(&self.name_ko).contains(&q) || fold_key(&self.name_en).contains(&q)
    }
}

/// Per-city counters, maintained server-side.
///
/// May be absent on a [`CityRecord`]; absence means "not yet computed" and
/// every consumer treats the counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub reviews_count: u32,
    pub nomads_now: u32,
    pub likes: u32,
    pub dislikes: u32,
    // Realtime extras; unavailable between refresh cycles
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub aqi: Option<u16>,
    #[serde(default)]
    pub weather_condition: Option<String>,
}

/// A listing row: the city plus its (possibly absent) stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: City,
    #[serde(default)]
    pub stats: Option<CityStats>,
}

impl CityRecord {
    /// Like count, zero when stats are absent.
    pub fn likes(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.likes)
    }

    /// Dislike count, zero when stats are absent.
    pub fn dislikes(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.dislikes)
    }

    pub fn reviews_count(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.reviews_count)
    }

    pub fn nomads_now(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.nomads_now)
    }
}

/// Long-form editorial content for a city detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityDetails {
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// Monthly cost breakdown in KRW.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub accommodation: u64,
    pub food: u64,
    pub transportation: u64,
    pub utilities: u64,
}

impl CostBreakdown {
    pub fn total(&self) -> u64 {
        self.accommodation + self.food + self.transportation + self.utilities
    }
}

/// Full city payload returned by slug lookup and admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityWithDetails {
    pub city: City,
    #[serde(default)]
    pub details: Option<CityDetails>,
    #[serde(default)]
    pub costs: Option<CostBreakdown>,
    #[serde(default)]
    pub stats: Option<CityStats>,
}

impl CityWithDetails {
    /// The listing-row view of this payload.
    pub fn record(&self) -> CityRecord {
        CityRecord {
            city: self.city.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Admin input for creating a city. The backend assigns `id` and `rank`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDraft {
    pub slug: String,
    pub name_ko: String,
    pub name_en: String,
    pub region: String,
    #[serde(default)]
    pub image_url: String,
    pub budget: BudgetTier,
    pub korean_region: Region,
    #[serde(default)]
    pub environment: Vec<Environment>,
    pub best_season: Season,
    pub cost_per_month: u64,
    #[serde(default)]
    pub overall_score: f32,
    #[serde(default)]
    pub internet_speed: u32,
    #[serde(default)]
    pub safety_score: f32,
    #[serde(default)]
    pub details: Option<CityDetails>,
    #[serde(default)]
    pub costs: Option<CostBreakdown>,
}

/// Check a slug for URL-safety: non-empty, at most [`SLUG_MAX_LEN`] bytes,
/// lowercase ASCII alphanumerics and hyphens only, no leading/trailing or
/// doubled hyphen.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > SLUG_MAX_LEN {
        return Err(NomadError::Validation(format!(
            "slug must be 1-{SLUG_MAX_LEN} characters"
        )));
    }
    let ok_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !ok_chars || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(NomadError::Validation(
            "slug may contain only lowercase letters, digits and single hyphens".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name_ko: &str, name_en: &str) -> City {
        City {
            id: "c1".into(),
            slug: "test".into(),
            name_ko: name_ko.into(),
            name_en: name_en.into(),
            region: "Test".into(),
            image_url: String::new(),
            rank: 1,
            badge: None,
            budget: BudgetTier::Mid,
            korean_region: Region::Capital,
            environment: vec![Environment::Urban],
            best_season: Season::Spring,
            cost_per_month: 2_000_000,
            overall_score: 4.0,
            internet_speed: 500,
            like_percentage: 80.0,
            safety_score: 4.5,
        }
    }

    #[test]
    fn name_match_crosses_locales_and_scripts() {
        let c = city("서울", "Seoul");
        assert!(c.name_contains("seo"));
        assert!(c.name_contains("SEOUL"));
        assert!(c.name_contains("서울"));
        assert!(!c.name_contains("busan"));
    }

    #[test]
    fn record_counts_default_to_zero_without_stats() {
        let rec = CityRecord {
            city: city("서울", "Seoul"),
            stats: None,
        };
        assert_eq!(rec.likes(), 0);
        assert_eq!(rec.dislikes(), 0);
        assert_eq!(rec.reviews_count(), 0);
        assert_eq!(rec.nomads_now(), 0);
    }

    #[test]
    fn slug_validation_accepts_url_safe_forms() {
        assert!(validate_slug("seoul").is_ok());
        assert!(validate_slug("jeju-si").is_ok());
        assert!(validate_slug("busan-2").is_ok());
    }

    #[test]
    fn slug_validation_rejects_malformed_forms() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Seoul").is_err());
        assert!(validate_slug("seo ul").is_err());
        assert!(validate_slug("-seoul").is_err());
        assert!(validate_slug("seoul-").is_err());
        assert!(validate_slug("seo--ul").is_err());
    }

    #[test]
    fn enum_ids_round_trip_through_parse() {
        for r in Region::all() {
            assert_eq!(Region::parse(r.id()), Some(r));
        }
        assert_eq!(BudgetTier::parse("MID"), Some(BudgetTier::Mid));
        assert_eq!(Season::parse("fall"), Some(Season::Autumn));
        assert_eq!(Environment::parse("cafe-work"), Some(Environment::CafeWork));
        assert_eq!(Environment::parse("space"), None);
    }
}
