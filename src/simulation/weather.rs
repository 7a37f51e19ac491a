//! # Weather Attenuation
//!
//! Turns the selected [`Weather`] into an attenuation factor for any instant of
//! the day. Categorical conditions are constant; an advanced profile is
//! linearly interpolated between its anchor hours and held flat outside them.

use crate::domain::{Weather, WeatherProfile, PROFILE_HOURS};

/// Attenuation resolved once per simulation, before the solar sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attenuation {
    Fixed(f64),
    Profile(WeatherProfile),
}

impl Attenuation {
    /// Attenuation factor at a (fractional) local hour
    pub fn factor_at(&self, hour: f64) -> f64 {
        match self {
            Attenuation::Fixed(factor) => *factor,
            Attenuation::Profile(profile) => interpolate(hour, profile.points()),
        }
    }
}

impl From<&Weather> for Attenuation {
    fn from(weather: &Weather) -> Self {
        match weather {
            Weather::Advanced(profile) => Attenuation::Profile(*profile),
            categorical => Attenuation::Fixed(categorical.fixed_factor().unwrap_or(1.0)),
        }
    }
}

/// Piecewise-linear interpolation of `points` anchored at [`PROFILE_HOURS`].
///
/// Hours before the first anchor or after the last one take the boundary value.
pub fn interpolate(hour: f64, points: &[f64; 5]) -> f64 {
    let last = PROFILE_HOURS.len() - 1;
    if hour <= PROFILE_HOURS[0] {
        return points[0];
    }
    if hour >= PROFILE_HOURS[last] {
        return points[last];
    }

    for i in 0..last {
        let (h1, h2) = (PROFILE_HOURS[i], PROFILE_HOURS[i + 1]);
        if hour >= h1 && hour <= h2 {
            let t = (hour - h1) / (h2 - h1);
            return points[i] + t * (points[i + 1] - points[i]);
        }
    }

    // Only reachable for NaN hours
    points[last]
}
