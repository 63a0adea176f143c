/// Simple aggregate statistics for the directory.
///
/// Returned by [`CityDirectory::total_stats`](crate::service::CityDirectory::total_stats)
/// and rendered in the hero section. Counts reflect the materialized
/// directory state at the time of the call.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub cities: usize,
    pub reviews: u64,
    pub nomads: u64,
}
