//! Named temperature categories

use crate::{Result, WhenToGoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of five temperature categories, each an inclusive °C range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherBand {
    VeryCold,
    Cold,
    Mild,
    Hot,
    VeryHot,
}

impl WeatherBand {
    /// Every band, coldest first
    pub const ALL: [WeatherBand; 5] = [
        WeatherBand::VeryCold,
        WeatherBand::Cold,
        WeatherBand::Mild,
        WeatherBand::Hot,
        WeatherBand::VeryHot,
    ];

    /// Inclusive `(min, max)` range in °C. Adjacent bands share their boundary value.
    #[must_use]
    pub fn range(self) -> (f64, f64) {
        match self {
            WeatherBand::VeryCold => (0.0, 8.0),
            WeatherBand::Cold => (8.0, 17.0),
            WeatherBand::Mild => (17.0, 24.0),
            WeatherBand::Hot => (24.0, 33.0),
            WeatherBand::VeryHot => (33.0, 50.0),
        }
    }

    #[must_use]
    pub fn contains(self, temperature: f64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&temperature)
    }

    /// Form label, e.g. `"very cold"`
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WeatherBand::VeryCold => "very cold",
            WeatherBand::Cold => "cold",
            WeatherBand::Mild => "mild",
            WeatherBand::Hot => "hot",
            WeatherBand::VeryHot => "very hot",
        }
    }
}

impl FromStr for WeatherBand {
    type Err = WhenToGoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        WeatherBand::ALL
            .into_iter()
            .find(|band| band.label() == wanted)
            .ok_or_else(|| {
                let labels: Vec<&str> = WeatherBand::ALL.iter().map(|b| b.label()).collect();
                WhenToGoError::not_found(format!(
                    "Unknown weather type '{}'. Choose one of: {}",
                    s.trim(),
                    labels.join(", ")
                ))
            })
    }
}

impl fmt::Display for WeatherBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
