//! Solar position from timestamp and geographic coordinates.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::f64::consts::PI;

/// Solar position angles, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Altitude above the horizon (0 = horizon, 90 = zenith, negative at night).
    pub elevation: f64,
    /// Azimuth from north, clockwise (0=N, 90=E, 180=S, 270=W).
    pub azimuth: f64,
    /// Complement of the elevation.
    pub zenith: f64,
}

impl SolarPosition {
    /// Calculates the solar position using the Spencer day-angle series for
    /// declination and the equation of time, with the hour angle taken from
    /// longitude-corrected solar time.
    ///
    /// - `datetime`: the UTC instant to evaluate
    /// - `latitude`: in degrees (positive north)
    /// - `longitude`: in degrees (positive east)
    pub fn calculate(datetime: DateTime<Utc>, latitude: f64, longitude: f64) -> Self {
        let hour = datetime.hour() as f64
            + datetime.minute() as f64 / 60.0
            + datetime.second() as f64 / 3600.0;

        // Day angle (Spencer)
        let gamma =
            2.0 * PI * (datetime.ordinal() as f64 - 1.0 + (hour - 12.0) / 24.0) / 365.0;

        // Solar declination (Spencer approximation), radians
        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        // Equation of time (Spencer), minutes
        let eot = 229.18
            * (0.000075 + 0.001868 * gamma.cos()
                - 0.032077 * gamma.sin()
                - 0.014615 * (2.0 * gamma).cos()
                - 0.040849 * (2.0 * gamma).sin());

        // Solar time from UTC: 4 minutes per degree of longitude plus the
        // equation of time.
        let solar_time = hour + longitude / 15.0 + eot / 60.0;
        let hour_angle = ((solar_time - 12.0) * 15.0).to_radians();

        let lat = latitude.to_radians();
        let sin_elevation = lat.sin() * declination.sin()
            + lat.cos() * declination.cos() * hour_angle.cos();
        let elevation = sin_elevation.clamp(-1.0, 1.0).asin().to_degrees();

        let cos_azimuth = (declination.sin() * lat.cos()
            - declination.cos() * lat.sin() * hour_angle.cos())
            / elevation.to_radians().cos().max(1e-10);
        let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        if hour_angle > 0.0 {
            azimuth = 360.0 - azimuth;
        }

        Self {
            elevation,
            azimuth,
            zenith: 90.0 - elevation,
        }
    }
}
