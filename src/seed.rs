//! Locates seed data files in the local data directory.
//!
//! Club and financial tables are loaded from newline-delimited JSON files,
//! optionally gzip-compressed. Files are resolved lazily, the first time a
//! query needs the table they back.

use crate::config;
use crate::error::{ClubfinError, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Resolves seed files (`clubs.ndjson`, `club_financials.ndjson`, ...) under a
/// data directory.
pub struct SeedManager {
    /// Directory holding the seed files.
    pub data_dir: PathBuf,
}

impl SeedManager {
    /// Create a seed manager rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate data directory.
    /// Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    /// Return the path of the plain or `.gz` variant of `filename`, plain first.
    fn locate(&self, filename: &str) -> Option<PathBuf> {
        let plain = self.data_dir.join(filename);
        if plain.exists() {
            return Some(plain);
        }
        let gz = self.data_dir.join(format!("{}.gz", filename));
        gz.exists().then_some(gz)
    }

    /// Ensure the seed file backing `table` exists and return its path.
    pub fn ensure_seed(&self, table: &str) -> Result<PathBuf> {
        let seed_files = config::seed_files();
        let filename = seed_files
            .get(table)
            .ok_or_else(|| ClubfinError::NotFound(format!("Unknown table: {}", table)))?;

        let path = self.locate(filename).ok_or_else(|| {
            ClubfinError::NotFound(format!(
                "Seed file {} not found in {}",
                filename,
                self.data_dir.display()
            ))
        })?;
        tracing::debug!(table, path = %path.display(), "resolved seed file");
        Ok(path)
    }

    /// Load and parse an optional JSON file (handles `.gz` transparently).
    ///
    /// Returns `Ok(None)` when neither variant exists.
    pub fn load_json(&self, filename: &str) -> Result<Option<serde_json::Value>> {
        let Some(path) = self.locate(filename) else {
            return Ok(None);
        };
        let value = read_json(&path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable JSON file");
            e
        })?;
        Ok(Some(value))
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let file = fs::File::open(path)?;
        let mut decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
        let mut contents = String::new();
        decoder.read_to_string(&mut contents)?;
        contents
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&contents)?)
}
