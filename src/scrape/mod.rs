//! Scraped travel guides
//!
//! Two web pages are scraped into small tables:
//! - State attractions (`attractions`)
//! - Month-by-month recommendations (`monthly`)
//!
//! Each table is scraped at most once, persisted as a CSV cache artifact and
//! read back from that artifact on later runs.

pub mod attractions;
pub mod cache;
pub mod monthly;

pub use attractions::{Attractions, AttractionEntry};
pub use cache::{CacheArtifact, Staleness};
pub use monthly::{MonthlyRecommendation, MonthlyRecommendations};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use crate::Result;
use crate::http::PageFetcher;

/// A scrapeable table: its cache file, its extraction rule and its key column
pub trait ScrapeDataset {
    type Row: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Short name used in logs
    const KIND: &'static str;
    /// Cache artifact file name
    const CACHE_FILE: &'static str;

    /// Turn a fetched page into rows
    fn extract(html: &str) -> Vec<Self::Row>;

    /// Key column matched by [`ScrapedDataset::find`]
    fn key(row: &Self::Row) -> &str;
}

/// Rows of one scraped table, in page order
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedDataset<R> {
    pub rows: Vec<R>,
}

impl<R> ScrapedDataset<R> {
    #[must_use]
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose key contains `needle`, ignoring case.
    ///
    /// This can match several rows ("Carolina"); the first in page order wins.
    pub fn find<'a>(&'a self, needle: &str, key: impl Fn(&R) -> &str) -> Option<&'a R> {
        let needle = needle.trim().to_lowercase();
        self.rows
            .iter()
            .find(|row| key(row).to_lowercase().contains(&needle))
    }
}

/// Cache-first loader for one scraped table
pub struct CachedScrapeSource<D: ScrapeDataset> {
    fetcher: Arc<dyn PageFetcher>,
    url: String,
    artifact: CacheArtifact,
    loaded: OnceLock<Arc<ScrapedDataset<D::Row>>>,
}

impl<D: ScrapeDataset> CachedScrapeSource<D> {
    /// Create a source scraping `url` and caching under `cache_dir`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        url: impl Into<String>,
        cache_dir: impl AsRef<Path>,
        staleness: Staleness,
    ) -> Self {
        Self {
            fetcher,
            url: url.into(),
            artifact: CacheArtifact::new(cache_dir.as_ref().join(D::CACHE_FILE), staleness),
            loaded: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn artifact(&self) -> &CacheArtifact {
        &self.artifact
    }

    /// Load the table.
    ///
    /// `Ok(None)` means the page was fetched but yielded no rows; `Err` means
    /// the page could not be fetched.
    pub fn load(&self) -> Result<Option<Arc<ScrapedDataset<D::Row>>>> {
        if let Some(dataset) = self.loaded.get() {
            debug!("Serving {} from memory", D::KIND);
            return Ok(Some(Arc::clone(dataset)));
        }

        if let Some(dataset) = self.load_from_cache() {
            return Ok(Some(self.remember(dataset)));
        }

        info!("Scraping {} from {}", D::KIND, self.url);
        let html = self.fetcher.fetch_text(&self.url)?;

        let rows = D::extract(&html);
        if rows.is_empty() {
            warn!("Scraping {} produced no rows, nothing cached", D::KIND);
            return Ok(None);
        }
        info!("Scraped {} {} rows", rows.len(), D::KIND);

        if let Err(e) = self.artifact.write(&rows) {
            warn!("Failed to cache {}: {}", D::KIND, e);
        }

        Ok(Some(self.remember(ScrapedDataset::new(rows))))
    }

    /// Cache lookup. A stale, missing or unreadable artifact is a miss.
    fn load_from_cache(&self) -> Option<ScrapedDataset<D::Row>> {
        if !self.artifact.is_usable() {
            debug!("No usable cache artifact for {}", D::KIND);
            return None;
        }

        match self.artifact.read::<D::Row>() {
            Ok(rows) => {
                info!("Loaded {} {} rows from cache", rows.len(), D::KIND);
                Some(ScrapedDataset::new(rows))
            }
            Err(e) => {
                warn!("Ignoring unreadable {} cache: {}", D::KIND, e);
                None
            }
        }
    }

    fn remember(&self, dataset: ScrapedDataset<D::Row>) -> Arc<ScrapedDataset<D::Row>> {
        Arc::clone(self.loaded.get_or_init(|| Arc::new(dataset)))
    }
}
