//! Error types and handling for the `whentogo` planner

use thiserror::Error;

/// Main error type for the `whentogo` library
#[derive(Error, Debug)]
pub enum WhenToGoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network or HTTP status failure reaching a remote resource
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Lookup found nothing in otherwise healthy data
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Malformed tabular, JSON or cached data
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Cache artifact operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WhenToGoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error. Query strings are dropped from `url`
    /// because they may carry credentials.
    pub fn fetch<S: Into<String>>(url: &str, message: S) -> Self {
        Self::Fetch {
            url: strip_query(url).to_string(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WhenToGoError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WhenToGoError::Fetch { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            WhenToGoError::Validation { message } | WhenToGoError::NotFound { message } => {
                message.clone()
            }
            WhenToGoError::Parse { .. } => {
                "Received data in an unexpected format.".to_string()
            }
            WhenToGoError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            WhenToGoError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
