use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::weather::Weather;

/// One group of identical panels sharing a tilt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PanelGroup {
    /// Tilt from horizontal in degrees (0 = flat, 90 = vertical)
    #[validate(range(min = 0.0, max = 90.0))]
    pub tilt_deg: f64,
    /// Number of panels in the group
    pub count: u32,
}

impl Default for PanelGroup {
    fn default() -> Self {
        Self {
            tilt_deg: 30.0,
            count: 1,
        }
    }
}

/// Everything the solar model needs for one simulated day.
///
/// Group A faces `azimuth_deg`, group B faces the opposite direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    #[validate(nested)]
    pub group_a: PanelGroup,
    #[validate(nested)]
    pub group_b: PanelGroup,
    /// Rated power of a single panel in W
    #[validate(range(min = 0.0))]
    pub panel_power_w: f64,
    /// Azimuth of group A in degrees (0 = north, clockwise)
    #[validate(range(min = 0.0, max = 360.0))]
    pub azimuth_deg: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub weather: Weather,
}

impl SimulationInput {
    pub fn group_b_azimuth_deg(&self) -> f64 {
        (self.azimuth_deg + 180.0).rem_euclid(360.0)
    }

    /// Both panel groups with their azimuths, A first.
    pub fn panel_groups(&self) -> [(PanelGroup, f64); 2] {
        [
            (self.group_a, self.azimuth_deg),
            (self.group_b, self.group_b_azimuth_deg()),
        ]
    }

    pub fn total_panels(&self) -> u32 {
        self.group_a.count + self.group_b.count
    }
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            group_a: PanelGroup::default(),
            group_b: PanelGroup::default(),
            panel_power_w: 400.0,
            azimuth_deg: 180.0,
            latitude: -2.9, // Cuenca, Ecuador
            longitude: -79.0,
            date: Local::now().date_naive(),
            weather: Weather::Clear,
        }
    }
}

/// Instantaneous output of both panel groups at one instant of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerDataPoint {
    /// 12-hour clock label, e.g. `6:15 AM`
    pub time: String,
    /// Local hour of day, fractional
    pub hour: f64,
    pub power_a_w: f64,
    pub power_b_w: f64,
}

impl PowerDataPoint {
    pub fn total_w(&self) -> f64 {
        self.power_a_w + self.power_b_w
    }
}

/// Power curve of one simulated day.
///
/// The total energy is always the trapezoidal integral of `power_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    power_data: Vec<PowerDataPoint>,
    total_energy_kwh: f64,
    sunrise_hour: f64,
    sunset_hour: f64,
}

impl SimulationResult {
    pub fn new(power_data: Vec<PowerDataPoint>, sunrise_hour: f64, sunset_hour: f64) -> Self {
        let total_energy_kwh = integrate_energy_wh(&power_data) / 1000.0;
        Self {
            power_data,
            total_energy_kwh,
            sunrise_hour,
            sunset_hour,
        }
    }

    pub fn power_data(&self) -> &[PowerDataPoint] {
        &self.power_data
    }

    pub fn total_energy_kwh(&self) -> f64 {
        self.total_energy_kwh
    }

    pub fn sunrise_hour(&self) -> f64 {
        self.sunrise_hour
    }

    pub fn sunset_hour(&self) -> f64 {
        self.sunset_hour
    }

    /// Highest combined output of both groups, in W
    pub fn peak_power_w(&self) -> f64 {
        self.power_data
            .iter()
            .map(PowerDataPoint::total_w)
            .fold(0.0, f64::max)
    }
}

/// Trapezoidal integral of the combined power of a series, in Wh.
pub fn integrate_energy_wh(points: &[PowerDataPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[0].total_w() + pair[1].total_w()) / 2.0 * (pair[1].hour - pair[0].hour))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn point(hour: f64, a: f64, b: f64) -> PowerDataPoint {
        PowerDataPoint {
            time: String::new(),
            hour,
            power_a_w: a,
            power_b_w: b,
        }
    }

    #[test]
    fn test_group_b_faces_opposite_direction() {
        let mut input = SimulationInput {
            azimuth_deg: 180.0,
            ..Default::default()
        };
        assert_eq!(input.group_b_azimuth_deg(), 0.0);

        input.azimuth_deg = 90.0;
        assert_eq!(input.group_b_azimuth_deg(), 270.0);

        input.azimuth_deg = 270.0;
        assert_eq!(input.group_b_azimuth_deg(), 90.0);
    }

    #[test]
    fn test_integrate_energy_wh() {
        let points = vec![point(6.0, 0.0, 0.0), point(7.0, 100.0, 0.0), point(8.0, 50.0, 50.0)];
        // (0+100)/2*1 + (100+100)/2*1
        assert_eq!(integrate_energy_wh(&points), 150.0);
        assert_eq!(integrate_energy_wh(&points[..1]), 0.0);
        assert_eq!(integrate_energy_wh(&[]), 0.0);
    }

    #[test]
    fn test_result_total_matches_series() {
        let result = SimulationResult::new(
            vec![point(6.0, 0.0, 0.0), point(6.5, 400.0, 200.0), point(7.0, 0.0, 0.0)],
            6.0,
            7.0,
        );
        assert!((result.total_energy_kwh() - 0.3).abs() < 1e-12);
        assert_eq!(result.peak_power_w(), 600.0);
    }

    #[test]
    fn test_input_validation() {
        let valid = SimulationInput::default();
        assert!(valid.validate().is_ok());

        let steep = SimulationInput {
            group_a: PanelGroup {
                tilt_deg: 95.0,
                count: 2,
            },
            ..Default::default()
        };
        assert!(steep.validate().is_err());

        let off_planet = SimulationInput {
            latitude: 91.0,
            ..Default::default()
        };
        assert!(off_planet.validate().is_err());
    }
}
