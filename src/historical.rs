//! Historical Weather Module
//!
//! Loads one month of the state-level historical weather feed (CSV) and
//! answers band and average-temperature queries over it.

use crate::config::SourcesConfig;
use crate::date::MonthToken;
use crate::http::PageFetcher;
use crate::models::{WeatherBand, resolve_state_code, state_name};
use crate::{Result, WhenToGoError};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// One feed row after state-code expansion
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    /// Two-letter postal code as published
    pub code: String,
    /// Expanded name; `None` when the code is outside the table
    pub name: Option<&'static str>,
    /// Average temperature in °C; `None` when the feed cell is blank or not a finite number
    pub tavg: Option<f64>,
}

/// Raw CSV row. Other columns in the feed are ignored.
#[derive(Debug, Deserialize)]
struct FeedRow {
    st_abb: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    tavg: Option<f64>,
}

/// All rows for one month
#[derive(Debug, Clone, Default)]
pub struct HistoricalDataset {
    pub records: Vec<HistoricalRecord>,
}

impl HistoricalDataset {
    /// Parse feed CSV text
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| WhenToGoError::parse(format!("Failed to read CSV headers: {e}")))?;
        for required in ["st_abb", "tavg"] {
            if !headers.iter().any(|h| h == required) {
                return Err(WhenToGoError::parse(format!(
                    "Historical feed is missing the '{required}' column"
                )));
            }
        }

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<FeedRow>().enumerate() {
            let row = row.map_err(|e| {
                WhenToGoError::parse(format!("Malformed historical row {}: {e}", idx + 2))
            })?;
            records.push(HistoricalRecord {
                name: state_name(&row.st_abb),
                code: row.st_abb,
                // NaN and inf parse as floats but carry no reading
                tavg: row.tavg.filter(|t| t.is_finite()),
            });
        }

        Ok(Self { records })
    }

    /// Codes of every state with a row inside the band, each once, in first-seen order
    #[must_use]
    pub fn matching_states(&self, band: WeatherBand) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| record.tavg.is_some_and(|t| band.contains(t)))
            .filter(|record| seen.insert(record.code.as_str()))
            .map(|record| record.code.clone())
            .collect()
    }

    /// Mean `tavg` for a state given by code or full name; `None` when no row matches
    #[must_use]
    pub fn average_temperature(&self, state: &str) -> Option<f64> {
        let code =
            resolve_state_code(state).map_or_else(|| state.trim().to_uppercase(), str::to_string);

        let temperatures: Vec<f64> = self
            .records
            .iter()
            .filter(|record| record.code.eq_ignore_ascii_case(&code))
            .filter_map(|record| record.tavg)
            .collect();

        if temperatures.is_empty() {
            return None;
        }
        Some(temperatures.iter().sum::<f64>() / temperatures.len() as f64)
    }
}

/// Source for the monthly historical feed
pub struct HistoricalWeatherSource {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
    year: u16,
}

impl HistoricalWeatherSource {
    /// Create a new source
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &SourcesConfig) -> Self {
        Self {
            fetcher,
            base_url: config.historical_base_url.trim_end_matches('/').to_string(),
            year: config.historical_year,
        }
    }

    /// Feed location for a month, e.g. `.../202207.csv`
    #[must_use]
    pub fn csv_url(&self, month: MonthToken) -> String {
        format!("{}/{}{}.csv", self.base_url, self.year, month.two_digit())
    }

    /// Fetch and parse one month of the feed. No retry.
    pub fn load(&self, month: MonthToken) -> Result<HistoricalDataset> {
        let url = self.csv_url(month);
        info!("Loading historical weather for month {}", month);
        debug!("Historical feed URL: {}", url);

        let text = self.fetcher.fetch_text(&url)?;
        let dataset = HistoricalDataset::from_csv(&text)?;

        info!("Loaded {} historical rows", dataset.records.len());
        Ok(dataset)
    }
}
