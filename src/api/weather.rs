//! Weather forecast endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{error::ApiError, AppState};
use crate::domain::{Weather, WeatherProfile, PROFILE_HOURS};

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub hours: [f64; 5],
    pub profile: WeatherProfile,
    /// Ready to drop into a simulation input
    pub weather: Weather,
}

/// GET /api/v1/weather/forecast?latitude=..&longitude=..&date=YYYY-MM-DD
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(q): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ApiError> {
    q.validate()?;

    let profile = state
        .forecaster
        .fetch_profile(q.latitude, q.longitude, q.date)
        .await?;

    Ok(Json(ForecastResponse {
        latitude: q.latitude,
        longitude: q.longitude,
        date: q.date,
        hours: PROFILE_HOURS,
        profile,
        weather: Weather::Advanced(profile),
    }))
}
