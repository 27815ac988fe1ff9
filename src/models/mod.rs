//! Data models for the `whentogo` planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates returned by geocoding
//! - States: US state code and name tables
//! - Weather bands: Named temperature categories

pub mod location;
pub mod states;
pub mod weather_band;

// Re-export all public types for convenient access
pub use location::Location;
pub use states::{STATE_NAMES, resolve_state_code, state_name};
pub use weather_band::WeatherBand;
