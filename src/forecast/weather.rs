//! Weather forecast integration (Open-Meteo)
//!
//! Resolves hourly cloud cover for a location and date into the 5-point
//! attenuation profile used by the advanced weather mode.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{WeatherProfile, MAX_ATTENUATION, MIN_ATTENUATION, PROFILE_HOURS};

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather API returned status {0}")]
    Status(u16),
    #[error("invalid weather data: {0}")]
    InvalidFormat(String),
}

#[async_trait]
pub trait WeatherForecaster: Send + Sync {
    /// Attenuation profile for the local hours 06:00, 09:00, 12:00, 15:00 and 18:00 of `date`
    async fn fetch_profile(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<WeatherProfile, ForecastError>;
}

/// Maps cloud cover (0-100 %) onto an attenuation factor.
///
/// A clear sky keeps full output, a fully overcast sky keeps 20 %.
pub fn cloud_cover_to_factor(cloud_cover_percent: f64) -> f64 {
    (1.0 - cloud_cover_percent / 100.0 * 0.8).clamp(MIN_ATTENUATION, MAX_ATTENUATION)
}

/// Builds a profile from 24 hourly cloud cover values starting at local midnight.
pub fn profile_from_cloud_cover(hourly: &[Option<f64>]) -> Result<WeatherProfile, ForecastError> {
    let mut points = [0.0; 5];
    for (point, hour) in points.iter_mut().zip(PROFILE_HOURS) {
        let cover = hourly
            .get(hour as usize)
            .copied()
            .flatten()
            .ok_or_else(|| {
                ForecastError::InvalidFormat(format!("missing cloud cover for hour {hour}"))
            })?;
        *point = cloud_cover_to_factor(cover);
    }
    Ok(WeatherProfile::new(points))
}

/// Open-Meteo API client. No API key required.
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherForecaster for OpenMeteoClient {
    async fn fetch_profile(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<WeatherProfile, ForecastError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();

        debug!(%url, latitude, longitude, %day, "fetching cloud cover forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", format!("{latitude:.4}")),
                ("longitude", format!("{longitude:.4}")),
                ("start_date", day.clone()),
                ("end_date", day),
                ("hourly", "cloud_cover".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "weather API returned error status");
            return Err(ForecastError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: OpenMeteoResponse = serde_json::from_str(&body)
            .map_err(|e| ForecastError::InvalidFormat(e.to_string()))?;
        let cloud_cover = parsed
            .hourly
            .and_then(|h| h.cloud_cover)
            .ok_or_else(|| ForecastError::InvalidFormat("hourly.cloud_cover missing".into()))?;

        let profile = profile_from_cloud_cover(&cloud_cover)?;
        info!(latitude, longitude, %date, points = ?profile.points(), "weather profile resolved");
        Ok(profile)
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: Option<OpenMeteoHourly>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    cloud_cover: Option<Vec<Option<f64>>>,
}
