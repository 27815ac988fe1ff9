//! Live Temperature Module
//!
//! Resolves a place name to coordinates with a geocoding call, then scrapes
//! the forecast page for those coordinates for the displayed temperature.
//! Both calls are single-attempt and blocking.

use crate::config::LiveConfig;
use crate::http::PageFetcher;
use crate::models::Location;
use crate::{Result, WhenToGoError};
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

static CURRENT_TEMPERATURE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".myforecast-current-lrg").expect("valid selector"));

/// Current temperature for a place, as two lookups
pub trait TemperatureLookup: Send + Sync {
    /// Coordinates for a place; `None` when the geocoder knows nothing
    fn resolve_coordinates(&self, place: &str) -> Result<Option<Location>>;

    /// Displayed temperature text; `None` when the page has no marker element
    fn current_temperature(&self, location: &Location) -> Result<Option<String>>;

    /// Both lookups rendered as one line of report text
    fn describe(&self, place: &str) -> String {
        let location = match self.resolve_coordinates(place) {
            Ok(Some(location)) => location,
            Ok(None) => return "Unable to get location data for this state.".to_string(),
            Err(e) => {
                warn!("Geocoding failed for {}: {}", place, e);
                return format!("Unable to get location data for this state. ({e})");
            }
        };

        match self.current_temperature(&location) {
            Ok(Some(temperature)) => temperature,
            Ok(None) => "Temperature data not found.".to_string(),
            Err(e) => {
                warn!("Forecast lookup failed for {}: {}", place, e);
                "Error fetching weather data.".to_string()
            }
        }
    }
}

/// Geocoding + forecast page client
pub struct LiveTemperatureClient {
    fetcher: Arc<dyn PageFetcher>,
    api_key: String,
    geocoding_url: String,
    forecast_url: String,
}

impl LiveTemperatureClient {
    /// Create a new client. The API key must already be validated.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &LiveConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WhenToGoError::config("live.api_key is required"))?
            .to_string();

        Ok(Self {
            fetcher,
            api_key,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    fn geocoding_request(&self, place: &str) -> String {
        format!(
            "{}?q={},US&limit=1&appid={}",
            self.geocoding_url,
            urlencoding::encode(place.trim()),
            urlencoding::encode(&self.api_key)
        )
    }

    fn forecast_request(&self, location: &Location) -> String {
        format!(
            "{}?textField1={}&textField2={}",
            self.forecast_url, location.latitude, location.longitude
        )
    }
}

impl TemperatureLookup for LiveTemperatureClient {
    fn resolve_coordinates(&self, place: &str) -> Result<Option<Location>> {
        debug!("Geocoding place: {}", place);

        let body = self.fetcher.fetch_text(&self.geocoding_request(place))?;
        let results: Vec<Location> = serde_json::from_str(&body)
            .map_err(|e| WhenToGoError::parse(format!("Invalid geocoding response: {e}")))?;

        let location = results.into_iter().next();
        match &location {
            Some(found) => info!("Resolved {} to ({})", place, found.format_coordinates()),
            None => debug!("No geocoding results for {}", place),
        }
        Ok(location)
    }

    fn current_temperature(&self, location: &Location) -> Result<Option<String>> {
        let body = self.fetcher.fetch_text(&self.forecast_request(location))?;
        let document = Html::parse_document(&body);

        Ok(document
            .select(&CURRENT_TEMPERATURE)
            .next()
            .map(|element| element.text().collect::<String>()))
    }
}
