//! Solar and battery simulation endpoints

use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::ApiError;
use crate::{
    domain::{
        BalanceOutcome, BatteryAnalysisResult, BatterySettings, HourlyLoadProfile,
        SimulationInput, SimulationResult, UserAppliance,
    },
    simulation::{battery, house, solar},
};

/// POST /api/v1/solar/simulate
pub async fn simulate_solar(
    Json(input): Json<SimulationInput>,
) -> Result<Json<SimulationResult>, ApiError> {
    input.validate()?;
    Ok(Json(solar::compute_power(&input)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatteryAnalysisRequest {
    #[validate(nested)]
    pub input: SimulationInput,
    #[serde(default)]
    pub appliances: Vec<UserAppliance>,
    #[validate(nested)]
    pub battery: BatterySettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryAnalysisResponse {
    pub solar: SimulationResult,
    pub load: HourlyLoadProfile,
    pub battery: BatteryAnalysisResult,
    pub outcome: BalanceOutcome,
}

/// POST /api/v1/battery/simulate
///
/// Runs the solar model, builds the load profile and simulates the bank in one call.
pub async fn simulate_battery(
    Json(req): Json<BatteryAnalysisRequest>,
) -> Result<Json<BatteryAnalysisResponse>, ApiError> {
    req.validate()?;
    for appliance in &req.appliances {
        appliance.validate()?;
    }

    let solar = solar::compute_power(&req.input);
    let load = house::load_profile(&req.appliances);
    let battery = battery::simulate(&solar, &load, &req.battery);
    let outcome = battery.outcome();

    Ok(Json(BatteryAnalysisResponse {
        solar,
        load,
        battery,
        outcome,
    }))
}
