//! # Daily Energy Simulation
//!
//! Pure, synchronous models that size a stand-alone PV installation over one
//! day.
//!
//! ## Components
//!
//! - **Weather**: attenuation of clear-sky output, constant or interpolated from a 5-point profile
//! - **Solar**: sun position sweep from sunrise to sunset and panel power for two opposed groups
//! - **House**: hourly household load from appliance schedules
//! - **Battery**: hourly energy balance of a battery bank fed by the solar curve
//!
//! ## Usage
//!
//! ```rust
//! use pv_sizer::domain::{BatterySettings, SimulationInput, UserAppliance};
//! use pv_sizer::simulation::{battery, house, solar};
//!
//! let input = SimulationInput::default();
//! let solar = solar::compute_power(&input);
//!
//! let appliances: Vec<UserAppliance> = Vec::new();
//! let load = house::load_profile(&appliances);
//!
//! let analysis = battery::simulate(&solar, &load, &BatterySettings::default());
//! assert_eq!(analysis.chart_data.len(), 24);
//! ```

pub mod battery;
pub mod house;
pub mod solar;
pub mod weather;

pub use battery::simulate;
pub use house::load_profile;
pub use solar::compute_power;
pub use weather::{interpolate, Attenuation};

/// Rounds to a fixed number of decimals
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
