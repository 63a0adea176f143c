// crates/nomadb-core/src/loader/fetch.rs
#![cfg(feature = "remote")]

use crate::error::{NomadError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Download a dataset file into `dest_dir`, returning the written path.
///
/// Blocking on purpose: this runs from the CLI or a build step, never from
/// the interactive listing path.
pub fn fetch_dataset(url: &str, dest_dir: &Path) -> Result<PathBuf> {
    debug!("fetching dataset from {url}");
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(NomadError::Backend(format!(
            "dataset fetch failed: HTTP {}",
            response.status()
        )));
    }
    let bytes = response.bytes()?;

    let filename = url.rsplit('/').next().filter(|f| !f.is_empty()).ok_or_else(|| {
        NomadError::InvalidData(format!("cannot derive a filename from {url}"))
    })?;
    std::fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(filename);
    std::fs::write(&dest, &bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), dest.display());
    Ok(dest)
}
