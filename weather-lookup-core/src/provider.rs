use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{Config, mapper::MappingError, model::WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Any failure of a single lookup. The controller treats every variant the
/// same way.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("weather provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to weather provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl LookupError {
    /// True when the provider answered 404, i.e. the city is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::Status { status: 404, .. })
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`; one outbound request per call.
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;

    OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.base_url.clone())
        .units(config.units.clone())
        .timeout(config.timeout())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            base_url: "http://127.0.0.1:9/weather".into(),
            api_key: Some("KEY".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).unwrap();
        assert_eq!(provider.base_url(), "http://127.0.0.1:9/weather");
    }

    #[test]
    fn only_404_counts_as_not_found() {
        let not_found = LookupError::Status { status: 404, body: String::new() };
        let server = LookupError::Status { status: 500, body: String::new() };

        assert!(not_found.is_not_found());
        assert!(!server.is_not_found());
    }
}
