use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog entry with a typical rating and the range a user may pick from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub name: &'static str,
    pub power_w: f64,
    pub min_power_w: f64,
    pub max_power_w: f64,
    /// Appliances that run around the clock start with every hour enabled
    pub always_on: bool,
}

const fn appliance(name: &'static str, power_w: f64, min_power_w: f64, max_power_w: f64) -> Appliance {
    Appliance {
        name,
        power_w,
        min_power_w,
        max_power_w,
        always_on: false,
    }
}

pub const APPLIANCE_CATALOG: &[Appliance] = &[
    Appliance {
        always_on: true,
        ..appliance("Refrigerator", 150.0, 100.0, 250.0)
    },
    appliance("LED lights (x5)", 50.0, 10.0, 100.0),
    appliance("Television", 120.0, 50.0, 300.0),
    appliance("Laptop", 60.0, 20.0, 100.0),
    appliance("Microwave", 1100.0, 800.0, 1500.0),
    appliance("Washing machine", 500.0, 300.0, 2000.0),
    appliance("Air conditioner", 1500.0, 800.0, 3000.0),
    Appliance {
        always_on: true,
        ..appliance("Wi-Fi router", 10.0, 5.0, 20.0)
    },
    appliance("Phone charger", 5.0, 5.0, 25.0),
    appliance("Electric oven", 2000.0, 1200.0, 4000.0),
    appliance("Electric shower", 3500.0, 2500.0, 5500.0),
    appliance("Other", 100.0, 10.0, 10000.0),
];

pub fn find_appliance(name: &str) -> Option<&'static Appliance> {
    APPLIANCE_CATALOG
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name))
}

/// An appliance scheduled by the user over the 24 hours of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserAppliance {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub power_w: f64,
    /// On/off flag per hour of day, index 0 is 00:00-01:00
    pub usage: [bool; 24],
    /// Share of each enabled hour the appliance actually draws power
    #[validate(range(min = 1.0, max = 100.0))]
    pub duty_cycle_percent: f64,
}

impl UserAppliance {
    pub fn from_catalog(appliance: &Appliance) -> Self {
        Self {
            name: appliance.name.to_string(),
            power_w: appliance.power_w,
            usage: [appliance.always_on; 24],
            duty_cycle_percent: 100.0,
        }
    }

    /// Mean draw over an enabled hour, in W
    pub fn average_power_w(&self) -> f64 {
        self.power_w * self.duty_cycle_percent / 100.0
    }

    pub fn hours_on(&self) -> usize {
        self.usage.iter().filter(|on| **on).count()
    }

    pub fn daily_energy_wh(&self) -> f64 {
        self.average_power_w() * self.hours_on() as f64
    }
}

/// Mean household load per hour of day, in W
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyLoadProfile([f64; 24]);

impl HourlyLoadProfile {
    pub fn new(hourly_w: [f64; 24]) -> Self {
        Self(hourly_w)
    }

    pub fn hourly_w(&self) -> &[f64; 24] {
        &self.0
    }

    /// Load for `hour`, zero outside 0..24
    pub fn at(&self, hour: u32) -> f64 {
        self.0.get(hour as usize).copied().unwrap_or(0.0)
    }

    pub fn peak_w(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn daily_energy_kwh(&self) -> f64 {
        self.0.iter().sum::<f64>() / 1000.0
    }
}
