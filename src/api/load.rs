//! Appliance catalog and load profile endpoints

use axum::Json;
use serde::Serialize;
use validator::Validate;

use super::error::ApiError;
use crate::{
    domain::{HourlyLoadProfile, UserAppliance, APPLIANCE_CATALOG},
    simulation::house,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadProfileResponse {
    pub hourly_w: HourlyLoadProfile,
    pub daily_energy_kwh: f64,
    pub peak_w: f64,
}

/// GET /api/v1/appliances
///
/// Catalog entries already instantiated with their default schedule.
pub async fn list_appliances() -> Json<Vec<UserAppliance>> {
    Json(APPLIANCE_CATALOG.iter().map(UserAppliance::from_catalog).collect())
}

/// POST /api/v1/load/profile
pub async fn build_load_profile(
    Json(appliances): Json<Vec<UserAppliance>>,
) -> Result<Json<LoadProfileResponse>, ApiError> {
    for appliance in &appliances {
        appliance.validate()?;
    }

    let hourly_w = house::load_profile(&appliances);
    Ok(Json(LoadProfileResponse {
        peak_w: hourly_w.peak_w(),
        daily_energy_kwh: house::daily_energy_kwh(&appliances),
        hourly_w,
    }))
}
