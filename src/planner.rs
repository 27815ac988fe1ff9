//! Travel Planner Module
//!
//! Answers "when and where should I travel" by combining the historical
//! feed, the live temperature lookup and both scraped guides into one
//! plain-text report. Every failure ends up as a sentence inside the report.

use crate::config::WhenToGoConfig;
use crate::date::{DateToken, INVALID_DATE_MESSAGE, MonthToken};
use crate::historical::HistoricalWeatherSource;
use crate::http::{HttpClient, PageFetcher};
use crate::live::{LiveTemperatureClient, TemperatureLookup};
use crate::models::{WeatherBand, resolve_state_code, state_name};
use crate::scrape::{Attractions, CachedScrapeSource, MonthlyRecommendations, ScrapeDataset};
use crate::{Result, WhenToGoError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const BOTH_GIVEN_MESSAGE: &str = "Please provide either weather type OR state, not both.";
pub const NEITHER_GIVEN_MESSAGE: &str =
    "Please provide either weather type OR state along with the date.";

/// Raw form input
#[derive(Debug, Clone, Default)]
pub struct TravelQuery {
    pub date: String,
    pub weather_type: Option<String>,
    pub state: Option<String>,
}

impl TravelQuery {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_weather_type(mut self, weather_type: impl Into<String>) -> Self {
        self.weather_type = Some(weather_type.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// The two accepted request shapes
#[derive(Debug, Clone, PartialEq)]
enum QueryShape {
    ByWeather(WeatherBand),
    ByState(String),
}

fn given(field: Option<&String>) -> Option<&str> {
    field.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl QueryShape {
    fn classify(query: &TravelQuery) -> Result<Self> {
        match (given(query.weather_type.as_ref()), given(query.state.as_ref())) {
            (Some(weather_type), None) => Ok(Self::ByWeather(weather_type.parse()?)),
            (None, Some(state)) => Ok(Self::ByState(state.to_string())),
            (Some(_), Some(_)) => Err(WhenToGoError::validation(BOTH_GIVEN_MESSAGE)),
            (None, None) => Err(WhenToGoError::validation(NEITHER_GIVEN_MESSAGE)),
        }
    }
}

/// Composes every source into a report
pub struct TravelPlanner {
    historical: HistoricalWeatherSource,
    attractions: CachedScrapeSource<Attractions>,
    monthly: CachedScrapeSource<MonthlyRecommendations>,
    live: Arc<dyn TemperatureLookup>,
    sample_states: usize,
}

impl TravelPlanner {
    pub fn new(
        historical: HistoricalWeatherSource,
        attractions: CachedScrapeSource<Attractions>,
        monthly: CachedScrapeSource<MonthlyRecommendations>,
        live: Arc<dyn TemperatureLookup>,
        sample_states: usize,
    ) -> Self {
        Self {
            historical,
            attractions,
            monthly,
            live,
            sample_states,
        }
    }

    /// Wire every source to one shared HTTP client
    pub fn from_config(config: &WhenToGoConfig) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::new(&config.sources)?);
        let staleness = config.cache.staleness();

        let historical = HistoricalWeatherSource::new(Arc::clone(&fetcher), &config.sources);
        let attractions = CachedScrapeSource::new(
            Arc::clone(&fetcher),
            config.sources.attractions_url.clone(),
            &config.cache.location,
            staleness,
        );
        let monthly = CachedScrapeSource::new(
            Arc::clone(&fetcher),
            config.sources.monthly_guide_url.clone(),
            &config.cache.location,
            staleness,
        );
        let live = Arc::new(LiveTemperatureClient::new(fetcher, &config.live)?);

        Ok(Self::new(
            historical,
            attractions,
            monthly,
            live,
            config.defaults.sample_states as usize,
        ))
    }

    /// Answer one query. Never fails: problems are reported inline.
    #[instrument(skip(self))]
    pub fn plan(&self, query: &TravelQuery) -> String {
        let Ok(date) = DateToken::parse(&query.date) else {
            return INVALID_DATE_MESSAGE.to_string();
        };

        match QueryShape::classify(query) {
            Ok(QueryShape::ByWeather(band)) => self.weather_report(&date, band),
            Ok(QueryShape::ByState(state)) => self.state_report(&date, &state),
            Err(e) => {
                debug!("Rejected query: {}", e);
                e.user_message()
            }
        }
    }

    fn weather_report(&self, date: &DateToken, band: WeatherBand) -> String {
        info!("Planning {} trip for {}", band, date);

        let matching = self
            .historical
            .load(date.month())
            .map(|dataset| dataset.matching_states(band));

        let mut report = format!("Results for {date} with {band} weather:\n\n");

        let sample: Vec<String> = match &matching {
            Ok(states) if states.is_empty() => {
                report.push_str(&format!("All states with {band} weather: none\n\n"));
                Vec::new()
            }
            Ok(states) => {
                report.push_str(&format!(
                    "All states with {band} weather: {}\n\n",
                    states.join(", ")
                ));
                states.iter().take(self.sample_states).cloned().collect()
            }
            Err(e) => {
                warn!("Historical lookup failed: {}", e);
                report.push_str(&format!(
                    "All states with {band} weather: {}\n\n",
                    inline_error(e)
                ));
                Vec::new()
            }
        };

        report.push_str(&format!(
            "Travel recommendations for this month:\n{}\n\n",
            self.recommendation_for(date.month())
        ));

        report.push_str("Detailed information for selected states:\n\n");
        for code in &sample {
            let name = state_name(code).unwrap_or(code.as_str());
            report.push_str(&format!(
                "State: {name}\nCurrent temperature: {}\nMust-visit attractions: {}\n\n",
                self.live.describe(name),
                self.attractions_for(name)
            ));
        }

        report
    }

    fn state_report(&self, date: &DateToken, state: &str) -> String {
        let name = resolve_state_code(state)
            .and_then(state_name)
            .unwrap_or(state);
        info!("Planning trip to {} for {}", name, date);

        let average = match self.historical.load(date.month()) {
            Ok(dataset) => match dataset.average_temperature(name) {
                Some(average) => format!("{average:.1}°C"),
                None => format!("No historical temperature data for {name} this month."),
            },
            Err(e) => {
                warn!("Historical lookup failed: {}", e);
                inline_error(&e)
            }
        };

        format!(
            "Results for {name} on {date}:\n\n\
             Historical average temperature: {average}\n\n\
             Current temperature: {}\n\n\
             Must-visit attractions: {}\n\n\
             Travel recommendations for this month:\n{}",
            self.live.describe(name),
            self.attractions_for(name),
            self.recommendation_for(date.month())
        )
    }

    fn attractions_for(&self, state: &str) -> String {
        match self.attractions.load() {
            Ok(Some(dataset)) => dataset
                .find(state, Attractions::key)
                .map_or_else(
                    || "No attractions found for this state.".to_string(),
                    |entry| entry.attractions.clone(),
                ),
            Ok(None) => "Unable to retrieve attractions data.".to_string(),
            Err(e) => {
                warn!("Attractions unavailable: {}", e);
                format!("Unable to retrieve attractions data. ({e})")
            }
        }
    }

    fn recommendation_for(&self, month: MonthToken) -> String {
        match self.monthly.load() {
            Ok(Some(dataset)) => match dataset.find(month.name(), MonthlyRecommendations::key) {
                Some(row) => row
                    .recommendations
                    .clone()
                    .unwrap_or_else(|| "No recommendations found for this month.".to_string()),
                None => "No recommendations found for this month.".to_string(),
            },
            Ok(None) => "Unable to retrieve monthly recommendations.".to_string(),
            Err(e) => {
                warn!("Monthly recommendations unavailable: {}", e);
                format!("Unable to retrieve monthly recommendations. ({e})")
            }
        }
    }
}

fn inline_error(error: &WhenToGoError) -> String {
    format!("An error occurred: {error}")
}
