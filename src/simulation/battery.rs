//! # Battery Energy Balance
//!
//! Runs a battery bank through one day in hourly steps. The day starts at
//! 06:00 and wraps through midnight to 05:00, so the bank meets the evening and
//! night load with whatever the daylight hours left in it.
//!
//! Each step charges with the solar surplus or discharges the deficit. Stored
//! energy saturates at empty and at full capacity; curtailed generation and
//! unmet load are not tracked.

use tracing::debug;

use super::round_to;
use crate::domain::{
    BatteryAnalysisResult, BatteryChartDataPoint, BatterySettings, HourlyLoadProfile,
    SimulationResult,
};

/// Hours of day in simulation order
pub const SIMULATION_HOURS: [u32; 24] = [
    6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 0, 1, 2, 3, 4, 5,
];

/// Mean solar output per hour of day, in W.
///
/// Samples are bucketed by the integer part of their hour; hours without
/// samples produce nothing.
pub fn hourly_generation(solar: &SimulationResult) -> [f64; 24] {
    let mut buckets = [(0.0_f64, 0_u32); 24];
    for point in solar.power_data() {
        let hour = point.hour.floor();
        if (0.0..24.0).contains(&hour) {
            let bucket = &mut buckets[hour as usize];
            bucket.0 += point.total_w();
            bucket.1 += 1;
        }
    }
    buckets.map(|(total, samples)| {
        if samples > 0 {
            total / samples as f64
        } else {
            0.0
        }
    })
}

/// Stored energy after applying `delta_wh`, saturated at empty and at `capacity_wh`.
pub fn step_energy(stored_wh: f64, delta_wh: f64, capacity_wh: f64) -> f64 {
    let candidate = stored_wh + delta_wh;
    if candidate < 0.0 {
        0.0
    } else if candidate > capacity_wh {
        capacity_wh
    } else {
        candidate
    }
}

/// Simulates the battery bank over one day of generation and load.
pub fn simulate(
    solar: &SimulationResult,
    load: &HourlyLoadProfile,
    battery: &BatterySettings,
) -> BatteryAnalysisResult {
    let generation = hourly_generation(solar);
    let capacity_wh = battery.total_capacity_wh();
    let initial_wh = battery.initial_energy_wh();

    let mut chart_data = Vec::with_capacity(SIMULATION_HOURS.len());
    let final_wh = SIMULATION_HOURS.iter().fold(initial_wh, |stored_wh, &hour| {
        let generation_w = generation[hour as usize];
        let load_w = load.at(hour);
        // One-hour step: net power in W is the energy delta in Wh
        let stored_wh = step_energy(stored_wh, generation_w - load_w, capacity_wh);

        chart_data.push(BatteryChartDataPoint {
            hour,
            time_label: format!("{hour:02}:00"),
            stored_energy_kwh: round_to(stored_wh / 1000.0, 3),
            solar_generation_w: round_to(generation_w, 2),
            load_consumption_w: round_to(load_w, 2),
        });
        stored_wh
    });

    let energy_balance_kwh = (final_wh - initial_wh) / 1000.0;
    debug!(
        capacity_wh,
        initial_wh,
        final_wh,
        energy_balance_kwh,
        chemistry = %battery.chemistry,
        "battery simulation complete"
    );

    BatteryAnalysisResult {
        chart_data,
        energy_balance_kwh,
    }
}
