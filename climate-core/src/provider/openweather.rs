use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::Units,
    error::{WeatherError, interpret_status},
    model::{ForecastResponse, LocationQuery, WeatherRecord},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, units, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(
        api_key: String,
        units: Units,
        base_url: &str,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key,
            units,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let (param, value) = location.query_param();
        tracing::debug!(%url, param, %value, units = %self.units, "requesting OpenWeatherMap");

        let res = self
            .http
            .get(&url)
            .query(&[
                (param, value.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        if let Err(e) = interpret_status(status) {
            tracing::warn!(
                status,
                body = %truncate_body(&body),
                "OpenWeatherMap {endpoint} request failed"
            );
            return Err(e.into());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &LocationQuery) -> Result<WeatherRecord, WeatherError> {
        self.get_json("weather", location).await
    }

    async fn forecast(&self, location: &LocationQuery) -> Result<ForecastResponse, WeatherError> {
        self.get_json("forecast", location).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
