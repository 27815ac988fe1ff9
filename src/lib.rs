//! `whentogo` - Seasonal travel planning for the United States
//!
//! This library combines a monthly historical weather feed, a live
//! temperature lookup and two scraped travel guides to answer
//! "where should I go for this weather" and "what is this state like then".

pub mod config;
pub mod date;
pub mod error;
pub mod historical;
pub mod http;
pub mod live;
pub mod logging;
pub mod models;
pub mod planner;
pub mod scrape;

// Re-export core types for public API
pub use config::WhenToGoConfig;
pub use date::{DateToken, MonthToken};
pub use error::WhenToGoError;
pub use historical::{HistoricalDataset, HistoricalWeatherSource};
pub use http::{HttpClient, PageFetcher};
pub use live::{LiveTemperatureClient, TemperatureLookup};
pub use models::{Location, WeatherBand};
pub use planner::{TravelPlanner, TravelQuery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WhenToGoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
