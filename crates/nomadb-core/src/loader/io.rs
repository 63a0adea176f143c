// crates/nomadb-core/src/loader/io.rs
use crate::error::{NomadError, Result};
use bincode::Options;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

// Guards against corrupt or hostile snapshot files.
const SNAPSHOT_SIZE_LIMIT: u64 = 64 * 1024 * 1024;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_SIZE_LIMIT)
        .allow_trailing_bytes()
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the
/// extension asks for one. Returns a generic reader so callers don't care
/// about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        NomadError::NotFound(format!("dataset not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == "gz") {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(NomadError::InvalidData(format!(
                "{} is gzip-compressed but the 'compact' feature is disabled",
                path.display()
            )));
        }
    }
    Ok(Box::new(reader))
}

/// Snapshot cache location for a source file: `cities.json` →
/// `cities.json.<suffix>` next to it.
pub fn cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{filename}.{suffix}"))
}

/// A cache is fresh when it exists and is no older than its source.
pub fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match std::fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match std::fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        // Source missing entirely: the snapshot is all we have.
        Err(_) => true,
    }
}

pub fn read_snapshot<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    let mut stream: Box<dyn Read> = Box::new(GzDecoder::new(reader));
    #[cfg(not(feature = "compact"))]
    let mut stream: Box<dyn Read> = Box::new(reader);

    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    Ok(bincode_options().deserialize(&data)?)
}

pub fn write_snapshot<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    let mut stream: Box<dyn Write> = Box::new(GzEncoder::new(writer, Compression::default()));
    #[cfg(not(feature = "compact"))]
    let mut stream: Box<dyn Write> = Box::new(writer);

    bincode_options().serialize_into(&mut stream, value)?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_appends_the_suffix() {
        let p = cache_path(Path::new("/tmp/cities.json"), "snap.bin");
        assert_eq!(p, Path::new("/tmp/cities.json.snap.bin"));
    }

    #[test]
    fn missing_cache_is_never_fresh() {
        assert!(!is_cache_fresh(
            Path::new("/tmp/does-not-exist.json"),
            Path::new("/tmp/does-not-exist.json.snap.bin")
        ));
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("nomadb-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.bin");

        let value: Vec<String> = vec!["seoul".into(), "busan".into()];
        write_snapshot(&path, &value).unwrap();
        let back: Vec<String> = read_snapshot(&path).unwrap();
        assert_eq!(back, value);

        std::fs::remove_file(&path).ok();
    }
}
