use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

use crate::{Result, WhenToGoError};

/// When a cache artifact stops being served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Artifacts are read forever once written
    NeverRefresh,
    /// Artifacts older than the duration are ignored and re-scraped
    TimeToLive(Duration),
}

/// A CSV snapshot of one scraped dataset, with a header row
#[derive(Debug, Clone)]
pub struct CacheArtifact {
    path: PathBuf,
    staleness: Staleness,
}

impl CacheArtifact {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, staleness: Staleness) -> Self {
        Self {
            path: path.into(),
            staleness,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the file exists and the staleness policy still allows reading it
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return false;
        };

        match self.staleness {
            Staleness::NeverRefresh => true,
            Staleness::TimeToLive(ttl) => {
                let age = metadata
                    .modified()
                    .ok()
                    .and_then(|modified| SystemTime::now().duration_since(modified).ok())
                    .unwrap_or_default();
                if age > ttl {
                    debug!("Cache artifact {} expired", self.path.display());
                    false
                } else {
                    true
                }
            }
        }
    }

    /// Read every row. Any malformed row fails the whole read.
    pub fn read<R: DeserializeOwned>(&self) -> Result<Vec<R>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            WhenToGoError::cache(format!("Failed to open {}: {e}", self.path.display()))
        })?;

        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<R>, _>>()
            .map_err(|e| {
                WhenToGoError::cache(format!("Failed to parse {}: {e}", self.path.display()))
            })?;

        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    /// Replace the artifact with `rows`
    pub fn write<R: Serialize>(&self, rows: &[R]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| {
            WhenToGoError::cache(format!("Failed to create {}: {e}", self.path.display()))
        })?;
        for row in rows {
            writer.serialize(row).map_err(|e| {
                WhenToGoError::cache(format!("Failed to write {}: {e}", self.path.display()))
            })?;
        }
        writer.flush()?;

        info!("Cached {} rows at {}", rows.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        key: String,
        value: Option<String>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                key: "Texas".to_string(),
                value: Some("Alamo; Big Bend, \"the\" park".to_string()),
            },
            Row {
                key: "Ohio".to_string(),
                value: None,
            },
        ]
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let artifact =
            CacheArtifact::new(temp_dir.path().join("nested/rows.csv"), Staleness::NeverRefresh);

        assert!(!artifact.is_usable());
        artifact.write(&rows()).unwrap();
        assert!(artifact.is_usable());

        let read: Vec<Row> = artifact.read().unwrap();
        assert_eq!(read, rows());

        let text = fs::read_to_string(artifact.path()).unwrap();
        assert!(text.starts_with("key,value\n"));
    }

    #[test]
    fn test_ttl_expiry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");

        let fresh = CacheArtifact::new(&path, Staleness::TimeToLive(Duration::from_secs(3600)));
        fresh.write(&rows()).unwrap();
        assert!(fresh.is_usable());

        let expired = CacheArtifact::new(&path, Staleness::TimeToLive(Duration::ZERO));
        std::thread::sleep(Duration::from_millis(20));
        assert!(!expired.is_usable());
    }

    #[test]
    fn test_malformed_artifact_is_cache_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        fs::write(&path, "key,value\nOhio,a,b,c\n").unwrap();

        let artifact = CacheArtifact::new(&path, Staleness::NeverRefresh);
        let result: Result<Vec<Row>> = artifact.read();
        assert!(matches!(result, Err(WhenToGoError::Cache { .. })));
    }
}
