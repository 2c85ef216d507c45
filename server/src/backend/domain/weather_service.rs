//! Weather lookup for the dashboard header.
//!
//! The upstream service is an external collaborator: the dashboard only
//! consumes temperature, a short summary, a headline, and an icon id. Every
//! failure path (endpoint not configured, transport error, non-200 status,
//! missing `temp` field) degrades to a fixed fallback message.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use shared::WeatherReport;

/// Timeout for connection establishment
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeout for the whole request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Shown whenever the lookup cannot produce live conditions
pub const FALLBACK_MESSAGE: &str = "Weather is currently unavailable";

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    temp: Option<f64>,
    summary: Option<String>,
    headline: Option<String>,
    icon: Option<String>,
}

#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    endpoint: Option<String>,
    location: String,
}

impl WeatherService {
    pub fn new(endpoint: Option<String>, location: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            location,
        })
    }

    /// Read `WEATHER_ENDPOINT` and `WEATHER_LOCATION` from the environment.
    /// Without an endpoint the service stays up and always reports the
    /// fallback message.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("WEATHER_ENDPOINT").ok().filter(|s| !s.is_empty());
        let location =
            std::env::var("WEATHER_LOCATION").unwrap_or_else(|_| "Amsterdam".to_string());

        if endpoint.is_none() {
            debug!("WEATHER_ENDPOINT not set, weather lookups will report the fallback message");
        }

        Self::new(endpoint, location)
    }

    /// Current conditions for the configured location; never fails
    pub async fn current_weather(&self) -> WeatherReport {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => return Self::fallback(),
        };

        match self.fetch(endpoint).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Weather lookup failed: {:#}", e);
                Self::fallback()
            }
        }
    }

    async fn fetch(&self, endpoint: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(endpoint)
            .query(&[("location", self.location.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("weather endpoint returned {}", response.status());
        }

        let payload: WeatherPayload = response.json().await?;

        // A payload without a temperature is as useless as no payload
        let temp = payload
            .temp
            .ok_or_else(|| anyhow::anyhow!("weather payload has no temp field"))?;

        let summary = payload.summary.unwrap_or_else(|| "no summary".to_string());
        let message = format!("{}: {:.0}°C, {}", self.location, temp, summary);

        Ok(WeatherReport {
            message,
            temperature: Some(temp),
            summary: Some(summary),
            headline: payload.headline,
            icon: payload.icon,
        })
    }

    fn fallback() -> WeatherReport {
        WeatherReport {
            message: FALLBACK_MESSAGE.to_string(),
            temperature: None,
            summary: None,
            headline: None,
            icon: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_endpoint_reports_fallback() {
        let service = WeatherService::new(None, "Amsterdam".to_string()).unwrap();

        let report = service.current_weather().await;
        assert_eq!(report.message, FALLBACK_MESSAGE);
        assert_eq!(report.temperature, None);
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_fallback() {
        // Port 9 (discard) on loopback refuses the connection immediately
        let service = WeatherService::new(
            Some("http://127.0.0.1:9/weather".to_string()),
            "Amsterdam".to_string(),
        )
        .unwrap();

        let report = service.current_weather().await;
        assert_eq!(report.message, FALLBACK_MESSAGE);
    }
}
