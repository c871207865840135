use crate::{
    Settings,
    error::WeatherError,
    model::{ForecastResponse, LocationQuery, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &LocationQuery) -> Result<WeatherRecord, WeatherError>;

    async fn forecast(&self, location: &LocationQuery) -> Result<ForecastResponse, WeatherError>;
}

/// Construct the OpenWeatherMap provider from settings.
pub fn provider_from_settings(
    settings: &Settings,
) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    if !settings.has_api_key() {
        return Err(WeatherError::NotConfigured("API key"));
    }

    let provider = OpenWeatherProvider::new(settings.api_key.trim().to_owned(), settings.units)?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_settings_errors_when_missing_api_key() {
        let settings = Settings::default();
        let err = provider_from_settings(&settings).unwrap_err();
        assert!(matches!(err, WeatherError::NotConfigured("API key")));
    }

    #[test]
    fn provider_from_settings_works_when_configured() {
        let settings = Settings {
            api_key: "KEY".into(),
            ..Settings::default()
        };
        assert!(provider_from_settings(&settings).is_ok());
    }
}
