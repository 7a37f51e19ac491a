use serde::{Deserialize, Serialize};

/// Local hours at which an advanced weather profile is anchored.
pub const PROFILE_HOURS: [f64; 5] = [6.0, 9.0, 12.0, 15.0, 18.0];

/// Attenuation of a fully overcast sky.
pub const MIN_ATTENUATION: f64 = 0.2;
/// Attenuation of a clear sky.
pub const MAX_ATTENUATION: f64 = 1.0;

/// Five attenuation factors sampled at [`PROFILE_HOURS`].
///
/// Every factor lies in `[MIN_ATTENUATION, MAX_ATTENUATION]`; out-of-range
/// values are clamped on construction, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 5]", into = "[f64; 5]")]
pub struct WeatherProfile([f64; 5]);

impl WeatherProfile {
    pub fn new(points: [f64; 5]) -> Self {
        Self(points.map(|p| {
            if p.is_nan() {
                MIN_ATTENUATION
            } else {
                p.clamp(MIN_ATTENUATION, MAX_ATTENUATION)
            }
        }))
    }

    pub fn points(&self) -> &[f64; 5] {
        &self.0
    }
}

impl Default for WeatherProfile {
    fn default() -> Self {
        Self([0.8, 0.7, 0.9, 1.0, 0.6])
    }
}

impl From<[f64; 5]> for WeatherProfile {
    fn from(points: [f64; 5]) -> Self {
        Self::new(points)
    }
}

impl From<WeatherProfile> for [f64; 5] {
    fn from(profile: WeatherProfile) -> Self {
        profile.0
    }
}

/// Sky condition for the simulated day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", content = "profile", rename_all = "camelCase")]
pub enum Weather {
    /// Clear sky all day
    #[default]
    Clear,
    /// Broken clouds all day
    PartlyCloudy,
    /// Fully overcast all day
    Overcast,
    /// Hour-by-hour attenuation, typically resolved from a forecast
    Advanced(WeatherProfile),
}

impl Weather {
    /// Constant attenuation of the categorical conditions, `None` for `Advanced`.
    pub fn fixed_factor(&self) -> Option<f64> {
        match self {
            Weather::Clear => Some(1.0),
            Weather::PartlyCloudy => Some(0.6),
            Weather::Overcast => Some(0.2),
            Weather::Advanced(_) => None,
        }
    }
}
