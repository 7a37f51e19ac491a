//! # Household Load Profile
//!
//! Aggregates user appliance schedules into the mean load per hour of day that
//! the battery simulation consumes. An appliance contributes its duty-cycled
//! power in every hour its flag is set.

use crate::domain::{HourlyLoadProfile, UserAppliance};

pub fn load_profile(appliances: &[UserAppliance]) -> HourlyLoadProfile {
    let mut hourly_w = [0.0; 24];
    for appliance in appliances {
        let average_w = appliance.average_power_w();
        for (load, _) in hourly_w
            .iter_mut()
            .zip(appliance.usage.iter())
            .filter(|(_, on)| **on)
        {
            *load += average_w;
        }
    }
    HourlyLoadProfile::new(hourly_w)
}

/// Energy the appliances draw over a day, in kWh
pub fn daily_energy_kwh(appliances: &[UserAppliance]) -> f64 {
    appliances
        .iter()
        .map(UserAppliance::daily_energy_wh)
        .sum::<f64>()
        / 1000.0
}
