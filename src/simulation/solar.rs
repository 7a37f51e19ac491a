//! # Solar Position & Panel Power
//!
//! Sweeps a day from sunrise to sunset in 15-minute steps and estimates the
//! output of two opposed panel groups from sun altitude/azimuth, panel tilt
//! and azimuth, and weather attenuation.
//!
//! Time is local solar time: solar noon is 12:00 regardless of longitude.

use chrono::{Datelike, NaiveDate, NaiveTime};
use std::f64::consts::PI;
use tracing::debug;

use super::{round_to, weather::Attenuation};
use crate::domain::{PowerDataPoint, SimulationInput, SimulationResult};

/// Sampling interval of the sweep, in hours
pub const TIME_STEP_HOURS: f64 = 0.25;

/// Maximum solar declination in degrees
const AXIAL_TILT_DEG: f64 = 23.45;

/// Slack for the last sample landing on sunset
const SWEEP_EPSILON: f64 = 1e-9;

/// Sun position above the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Elevation above the horizon, radians
    pub altitude_rad: f64,
    /// Azimuth from north, clockwise, radians in `[0, 2π]`
    pub azimuth_rad: f64,
}

/// Orientation of one panel group, resolved to radians
#[derive(Debug, Clone, Copy)]
struct PanelOrientation {
    tilt_rad: f64,
    azimuth_rad: f64,
    count: u32,
}

impl PanelOrientation {
    fn power_w(&self, unit_power_w: f64, sun: &SunPosition, attenuation: f64) -> f64 {
        let incidence = cos_incidence(sun, self.tilt_rad, self.azimuth_rad);
        unit_power_w * incidence.max(0.0) * attenuation * self.count as f64
    }
}

pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Solar declination in radians
pub fn solar_declination_rad(day_of_year: u32) -> f64 {
    let angle = (360.0 / 365.0 * (day_of_year as f64 - 81.0)).to_radians();
    (AXIAL_TILT_DEG * angle.sin()).to_radians()
}

/// Sunrise and sunset as local hours.
///
/// Polar day and night saturate to a 24 h or 0 h day through the clamped
/// hour-angle cosine.
pub fn daylight_hours(latitude_rad: f64, declination_rad: f64) -> (f64, f64) {
    let cos_hour_angle = -latitude_rad.tan() * declination_rad.tan();
    let cos_hour_angle = if cos_hour_angle.is_finite() {
        cos_hour_angle.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let half_day_hours = cos_hour_angle.acos().to_degrees() / 15.0;
    (12.0 - half_day_hours, 12.0 + half_day_hours)
}

/// Sun position at a local hour, `None` while the sun is at or below the horizon
pub fn sun_position(latitude_rad: f64, declination_rad: f64, hour: f64) -> Option<SunPosition> {
    let hour_angle_rad = ((hour - 12.0) * 15.0).to_radians();

    let sin_altitude = latitude_rad.sin() * declination_rad.sin()
        + latitude_rad.cos() * declination_rad.cos() * hour_angle_rad.cos();
    let altitude_rad = sin_altitude.max(0.0).asin();
    if altitude_rad <= 0.0 {
        return None;
    }

    // Positive after solar noon, so the morning sun sits east of the meridian
    let sin_azimuth = hour_angle_rad.sin() * declination_rad.cos() / altitude_rad.cos();
    let cos_azimuth = (altitude_rad.sin() * latitude_rad.sin() - declination_rad.sin())
        / (altitude_rad.cos() * latitude_rad.cos());
    let azimuth_rad = sin_azimuth.atan2(cos_azimuth) + PI;

    Some(SunPosition {
        altitude_rad,
        azimuth_rad,
    })
}

/// Cosine of the angle between the sun's rays and a panel's normal.
///
/// Negative when the panel faces away from the sun.
pub fn cos_incidence(sun: &SunPosition, tilt_rad: f64, panel_azimuth_rad: f64) -> f64 {
    sun.altitude_rad.sin() * tilt_rad.cos()
        + sun.altitude_rad.cos() * tilt_rad.sin() * (sun.azimuth_rad - panel_azimuth_rad).cos()
}

/// 12-hour clock label for a fractional hour, e.g. `1:45 PM`
pub fn clock_label(hour: f64) -> String {
    let minutes = ((hour * 60.0).round() as i64).rem_euclid(24 * 60);
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// Power curve and daily energy of the panel array described by `input`.
pub fn compute_power(input: &SimulationInput) -> SimulationResult {
    let latitude_rad = input.latitude.to_radians();
    let declination_rad = solar_declination_rad(day_of_year(input.date));
    let (sunrise, sunset) = daylight_hours(latitude_rad, declination_rad);
    let attenuation = Attenuation::from(&input.weather);

    let panels = input.panel_groups().map(|(group, azimuth_deg)| PanelOrientation {
        tilt_rad: group.tilt_deg.to_radians(),
        azimuth_rad: azimuth_deg.to_radians(),
        count: group.count,
    });

    let steps = ((sunset - sunrise) / TIME_STEP_HOURS + SWEEP_EPSILON).floor().max(0.0) as usize;
    let mut power_data: Vec<PowerDataPoint> = (0..=steps)
        .map(|i| sunrise + i as f64 * TIME_STEP_HOURS)
        .take_while(|hour| *hour <= sunset + SWEEP_EPSILON)
        .map(|hour| {
            let [power_a, power_b] = match sun_position(latitude_rad, declination_rad, hour) {
                Some(sun) => {
                    let factor = attenuation.factor_at(hour);
                    panels.map(|p| p.power_w(input.panel_power_w, &sun, factor))
                }
                None => [0.0, 0.0],
            };
            PowerDataPoint {
                time: clock_label(hour),
                hour,
                power_a_w: round_to(power_a, 2),
                power_b_w: round_to(power_b, 2),
            }
        })
        .collect();

    if power_data.is_empty() {
        power_data = ["Sunrise", "Sunset"]
            .into_iter()
            .zip([sunrise, sunset])
            .map(|(label, hour)| PowerDataPoint {
                time: label.to_string(),
                hour,
                power_a_w: 0.0,
                power_b_w: 0.0,
            })
            .collect();
    }

    let result = SimulationResult::new(power_data, sunrise, sunset);
    debug!(
        date = %input.date,
        latitude = input.latitude,
        sunrise,
        sunset,
        samples = result.power_data().len(),
        total_energy_kwh = result.total_energy_kwh(),
        "solar simulation complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{integrate_energy_wh, PanelGroup, Weather, WeatherProfile};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flat_equator_panel() -> SimulationInput {
        SimulationInput {
            group_a: PanelGroup {
                tilt_deg: 0.0,
                count: 1,
            },
            group_b: PanelGroup {
                tilt_deg: 0.0,
                count: 0,
            },
            panel_power_w: 100.0,
            azimuth_deg: 180.0,
            latitude: 0.0,
            longitude: 0.0,
            date: date(2024, 3, 21),
            weather: Weather::Clear,
        }
    }

    fn noon(result: &SimulationResult) -> &PowerDataPoint {
        result
            .power_data()
            .iter()
            .min_by(|a, b| (a.hour - 12.0).abs().total_cmp(&(b.hour - 12.0).abs()))
            .unwrap()
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(date(2024, 1, 1)), 1);
        assert_eq!(day_of_year(date(2023, 3, 22)), 81);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
    }

    #[test]
    fn test_declination_extremes() {
        assert!(solar_declination_rad(81).abs() < 1e-12);
        // ~June 21 and ~December 21
        assert!((solar_declination_rad(172).to_degrees() - 23.45).abs() < 0.05);
        assert!((solar_declination_rad(355).to_degrees() + 23.45).abs() < 0.05);
    }

    #[test]
    fn test_equator_day_is_twelve_hours() {
        let (sunrise, sunset) = daylight_hours(0.0, solar_declination_rad(172));
        assert!((sunrise - 6.0).abs() < 1e-9);
        assert!((sunset - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_polar_day_and_night_saturate() {
        let lat = 80f64.to_radians();
        let summer = solar_declination_rad(172);
        let (sunrise, sunset) = daylight_hours(lat, summer);
        assert!(sunrise.abs() < 1e-9);
        assert!((sunset - 24.0).abs() < 1e-9);

        let (sunrise, sunset) = daylight_hours(lat, -summer);
        assert!((sunrise - 12.0).abs() < 1e-9);
        assert!((sunset - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_sun_below_horizon_has_no_position() {
        assert!(sun_position(0.0, 0.0, 3.0).is_none());
        assert!(sun_position(0.0, 0.0, 12.0).is_some());
    }

    #[test]
    fn test_morning_sun_in_the_east() {
        let sun = sun_position(40f64.to_radians(), 0.0, 9.0).unwrap();
        let azimuth = sun.azimuth_rad.to_degrees();
        assert!(azimuth > 90.0 && azimuth < 180.0, "azimuth {azimuth}");

        let sun = sun_position(40f64.to_radians(), 0.0, 15.0).unwrap();
        let azimuth = sun.azimuth_rad.to_degrees();
        assert!(azimuth > 180.0 && azimuth < 270.0, "azimuth {azimuth}");
    }

    #[rstest]
    #[case(0.0, "12:00 AM")]
    #[case(6.25, "6:15 AM")]
    #[case(12.0, "12:00 PM")]
    #[case(13.75, "1:45 PM")]
    #[case(17.999, "6:00 PM")]
    fn test_clock_label(#[case] hour: f64, #[case] expected: &str) {
        assert_eq!(clock_label(hour), expected);
    }

    #[test]
    fn test_flat_panel_at_equator_noon() {
        let result = compute_power(&flat_equator_panel());
        let noon = noon(&result);
        assert!((noon.hour - 12.0).abs() < 1e-9);
        assert!((noon.power_a_w - 100.0).abs() < 0.5, "noon power {}", noon.power_a_w);
        assert_eq!(noon.power_b_w, 0.0);
        assert_eq!(noon.time, "12:00 PM");
    }

    #[test]
    fn test_series_bounds_and_spacing() {
        let result = compute_power(&flat_equator_panel());
        let data = result.power_data();
        assert_eq!(data.len(), 49);
        assert_eq!(data[0].hour, result.sunrise_hour());
        assert!(data.last().unwrap().hour <= result.sunset_hour() + 1e-9);
        for pair in data.windows(2) {
            assert!((pair[1].hour - pair[0].hour - TIME_STEP_HOURS).abs() < 1e-9);
        }
    }

    #[test]
    fn test_total_energy_matches_series_integral() {
        let input = SimulationInput {
            latitude: 45.0,
            date: date(2024, 6, 21),
            weather: Weather::Advanced(WeatherProfile::default()),
            ..Default::default()
        };
        let result = compute_power(&input);
        let wh = integrate_energy_wh(result.power_data());
        assert!((wh / 1000.0 - result.total_energy_kwh()).abs() < 1e-12);
        assert!(result.total_energy_kwh() > 0.0);
    }

    #[test]
    fn test_weather_scales_output() {
        let clear = compute_power(&flat_equator_panel());
        let overcast = compute_power(&SimulationInput {
            weather: Weather::Overcast,
            ..flat_equator_panel()
        });
        let ratio = overcast.total_energy_kwh() / clear.total_energy_kwh();
        assert!((ratio - 0.2).abs() < 1e-3, "ratio {ratio}");
    }

    #[test]
    fn test_opposed_groups_share_the_day() {
        // East/west pair on the equator at equinox: mirror-image curves
        let input = SimulationInput {
            group_a: PanelGroup {
                tilt_deg: 30.0,
                count: 2,
            },
            group_b: PanelGroup {
                tilt_deg: 30.0,
                count: 2,
            },
            azimuth_deg: 90.0,
            ..flat_equator_panel()
        };
        let result = compute_power(&input);
        let energy_a: f64 = result.power_data().iter().map(|p| p.power_a_w).sum();
        let energy_b: f64 = result.power_data().iter().map(|p| p.power_b_w).sum();
        assert!((energy_a - energy_b).abs() / energy_a < 0.01);

        let morning = &result.power_data()[8];
        assert!(morning.hour < 12.0);
        assert!(morning.power_a_w > morning.power_b_w);
    }

    #[test]
    fn test_vertical_panel_facing_away_yields_zero() {
        // Northern mid-latitude winter: the sun stays in the southern sky
        let input = SimulationInput {
            group_a: PanelGroup {
                tilt_deg: 90.0,
                count: 1,
            },
            group_b: PanelGroup {
                tilt_deg: 90.0,
                count: 1,
            },
            azimuth_deg: 0.0,
            latitude: 50.0,
            date: date(2024, 12, 21),
            ..flat_equator_panel()
        };
        let result = compute_power(&input);
        assert!(result.power_data().iter().all(|p| p.power_a_w == 0.0));
        assert!(result.power_data().iter().any(|p| p.power_b_w > 0.0));
    }

    #[test]
    fn test_polar_night_produces_no_energy() {
        let input = SimulationInput {
            latitude: 85.0,
            date: date(2024, 12, 21),
            ..Default::default()
        };
        let result = compute_power(&input);
        assert!(!result.power_data().is_empty());
        assert_eq!(result.total_energy_kwh(), 0.0);
        assert!(result.power_data().iter().all(|p| p.total_w() == 0.0));
    }
}
