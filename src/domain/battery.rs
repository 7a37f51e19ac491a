use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Battery chemistry type. Informational only, it does not change the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum BatteryChemistry {
    #[default]
    LithiumIon,
    LeadAcid,
    NickelCadmium,
}

/// Capacity of a single battery unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum BatteryCapacity {
    AmpHours {
        #[serde(rename = "ampHours")]
        amp_hours: f64,
        volts: f64,
    },
    WattHours {
        #[serde(rename = "wattHours")]
        watt_hours: f64,
    },
}

impl BatteryCapacity {
    pub fn watt_hours(&self) -> f64 {
        match *self {
            BatteryCapacity::AmpHours { amp_hours, volts } => amp_hours * volts,
            BatteryCapacity::WattHours { watt_hours } => watt_hours,
        }
    }
}

/// Battery bank made of `count` identical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatterySettings {
    #[serde(default)]
    pub chemistry: BatteryChemistry,
    pub count: u32,
    pub capacity: BatteryCapacity,
    #[validate(range(min = 0.0, max = 100.0))]
    pub initial_charge_percent: f64,
}

impl BatterySettings {
    pub fn total_capacity_wh(&self) -> f64 {
        self.capacity.watt_hours() * self.count as f64
    }

    pub fn initial_energy_wh(&self) -> f64 {
        self.total_capacity_wh() * self.initial_charge_percent / 100.0
    }
}

impl Default for BatterySettings {
    fn default() -> Self {
        Self {
            chemistry: BatteryChemistry::LithiumIon,
            count: 1,
            capacity: BatteryCapacity::AmpHours {
                amp_hours: 100.0,
                volts: 48.0,
            },
            initial_charge_percent: 30.0,
        }
    }
}

/// Battery state at the end of one simulated hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryChartDataPoint {
    pub hour: u32,
    /// `HH:00`
    pub time_label: String,
    pub stored_energy_kwh: f64,
    pub solar_generation_w: f64,
    pub load_consumption_w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BalanceOutcome {
    Surplus,
    Deficit,
    Equilibrium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryAnalysisResult {
    /// One point per simulated hour, 06:00 through 05:00 of the next day
    pub chart_data: Vec<BatteryChartDataPoint>,
    /// Final minus initial stored energy, in kWh
    pub energy_balance_kwh: f64,
}

impl BatteryAnalysisResult {
    pub fn outcome(&self) -> BalanceOutcome {
        if self.energy_balance_kwh > 0.0 {
            BalanceOutcome::Surplus
        } else if self.energy_balance_kwh < 0.0 {
            BalanceOutcome::Deficit
        } else {
            BalanceOutcome::Equilibrium
        }
    }
}
