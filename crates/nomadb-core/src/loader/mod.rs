// crates/nomadb-core/src/loader/mod.rs

//! # Dataset loader
//!
//! Handles the physical layer (file I/O, decompression, snapshot cache) and
//! delegates payload parsing to the seed module. The first successful load
//! writes a binary snapshot next to the source so subsequent runs skip JSON
//! parsing entirely.

#[cfg(feature = "json")]
use crate::error::Result;
#[cfg(feature = "json")]
use crate::model::CityWithDetails;
#[cfg(feature = "json")]
use log::{debug, warn};
#[cfg(feature = "json")]
use once_cell::sync::OnceCell;
use std::path::PathBuf;

#[cfg(feature = "remote")]
mod fetch;
#[cfg(feature = "json")]
mod io;
#[cfg(feature = "json")]
mod seed;

#[cfg(feature = "remote")]
pub use fetch::fetch_dataset;
#[cfg(feature = "json")]
pub use seed::{parse_seed, parse_seed_str};

#[cfg(feature = "json")]
static DATASET_CACHE: OnceCell<Vec<CityWithDetails>> = OnceCell::new();

/// Where the published dataset lives.
pub const DATASET_URL: &str = "https://github.com/nomadb/nomadb-data/raw/main/cities.json.gz";

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "snap.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "comp.snap.bin";

/// Directory holding the bundled seed dataset.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_dataset_filename() -> &'static str {
    "cities.json"
}

/// Load the bundled dataset, memoized for the process lifetime.
#[cfg(feature = "json")]
pub fn load_default() -> Result<Vec<CityWithDetails>> {
    DATASET_CACHE
        .get_or_try_init(|| load_from_path(default_data_dir().join(default_dataset_filename())))
        .cloned()
}

/// Load a dataset from `path` (`.json` or, with the `compact` feature,
/// `.json.gz`), preferring a fresh binary snapshot when one exists.
#[cfg(feature = "json")]
pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Vec<CityWithDetails>> {
    let path = path.as_ref();
    let cache = io::cache_path(path, CACHE_SUFFIX);

    if io::is_cache_fresh(path, &cache) {
        if let Ok(dataset) = io::read_snapshot::<Vec<CityWithDetails>>(&cache) {
            debug!("loaded snapshot cache {}", cache.display());
            return Ok(dataset);
        }
    }

    let reader = io::open_stream(path)?;
    let dataset = seed::parse_seed(reader)?;
    debug!("parsed {} cities from {}", dataset.len(), path.display());

    if let Err(err) = io::write_snapshot(&cache, &dataset) {
        warn!("could not write snapshot cache {}: {err}", cache.display());
    }
    Ok(dataset)
}
