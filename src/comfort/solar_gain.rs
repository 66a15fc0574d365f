//! Shortwave solar gain on occupants (SolarCal, ASHRAE 55).
//!
//! Converts direct-beam radiation and body exposure geometry into an
//! effective radiant field and the equivalent mean-radiant-temperature delta.

/// Radiative heat transfer coefficient, W/(m² K).
const RADIATIVE_HEAT_TRANSFER: f64 = 6.0;
/// Longwave emissivity of the body surface.
const LONGWAVE_ABSORPTIVITY: f64 = 0.95;

const ALTITUDE_GRID: [f64; 7] = [0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0];
const SHARP_GRID: [f64; 13] = [
    0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0, 105.0, 120.0, 135.0, 150.0, 165.0, 180.0,
];

// Projected area factors over sharp (rows, 0..180°) × altitude (cols, 0..90°).
const FP_STANDING: [[f64; 7]; 13] = [
    [0.350, 0.350, 0.314, 0.258, 0.206, 0.144, 0.082],
    [0.342, 0.342, 0.310, 0.252, 0.200, 0.140, 0.082],
    [0.330, 0.330, 0.300, 0.244, 0.190, 0.132, 0.082],
    [0.310, 0.310, 0.275, 0.228, 0.175, 0.124, 0.082],
    [0.283, 0.283, 0.251, 0.208, 0.160, 0.114, 0.082],
    [0.252, 0.252, 0.228, 0.188, 0.150, 0.108, 0.082],
    [0.230, 0.230, 0.214, 0.180, 0.148, 0.108, 0.082],
    [0.242, 0.242, 0.222, 0.180, 0.153, 0.112, 0.082],
    [0.274, 0.274, 0.245, 0.203, 0.165, 0.116, 0.082],
    [0.304, 0.304, 0.270, 0.220, 0.174, 0.121, 0.082],
    [0.328, 0.328, 0.290, 0.234, 0.183, 0.125, 0.082],
    [0.344, 0.344, 0.304, 0.244, 0.190, 0.128, 0.082],
    [0.347, 0.347, 0.308, 0.246, 0.191, 0.128, 0.082],
];

const FP_SEATED: [[f64; 7]; 13] = [
    [0.290, 0.324, 0.305, 0.303, 0.262, 0.224, 0.177],
    [0.292, 0.328, 0.294, 0.288, 0.268, 0.227, 0.177],
    [0.288, 0.332, 0.298, 0.290, 0.264, 0.222, 0.177],
    [0.274, 0.326, 0.294, 0.289, 0.252, 0.214, 0.177],
    [0.254, 0.308, 0.280, 0.276, 0.241, 0.202, 0.177],
    [0.230, 0.282, 0.262, 0.260, 0.233, 0.193, 0.177],
    [0.216, 0.260, 0.248, 0.244, 0.220, 0.186, 0.177],
    [0.234, 0.258, 0.236, 0.227, 0.208, 0.180, 0.177],
    [0.262, 0.260, 0.224, 0.208, 0.196, 0.176, 0.177],
    [0.280, 0.260, 0.210, 0.192, 0.184, 0.170, 0.177],
    [0.298, 0.256, 0.194, 0.174, 0.168, 0.168, 0.177],
    [0.306, 0.250, 0.180, 0.156, 0.156, 0.166, 0.177],
    [0.300, 0.240, 0.168, 0.152, 0.152, 0.164, 0.177],
];

/// Body posture for the projected-area-factor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    Seated,
    Standing,
}

impl Posture {
    fn fraction_effective(self) -> f64 {
        match self {
            Posture::Seated => 0.696,
            Posture::Standing => 0.725,
        }
    }

    fn fp_table(self) -> &'static [[f64; 7]; 13] {
        match self {
            Posture::Seated => &FP_SEATED,
            Posture::Standing => &FP_STANDING,
        }
    }
}

/// Solar gain outcome for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGain {
    /// Effective radiant field, W/m².
    pub erf: f64,
    /// Equivalent mean-radiant-temperature increase, °C.
    pub delta_mrt: f64,
}

/// Computes the effective radiant field and MRT delta for a body exposed to
/// direct sun.
///
/// - `sol_altitude`: solar altitude above the horizon, degrees (>= 0)
/// - `sharp`: solar horizontal angle relative to the body azimuth, degrees
///   (0..180)
/// - `sol_radiation_dir`: direct-beam (normal) solar radiation, W/m²
/// - `sol_transmittance`: transmittance of any glazing between sun and body
///   (0..1)
/// - `f_svv`: fraction of sky vault visible from the body (0..1)
/// - `f_bes`: fraction of the body exposed to direct beam (0..1)
/// - `asw`: shortwave absorptivity of the body surface
/// - `posture`: seated or standing projected-area geometry
/// - `floor_reflectance`: shortwave reflectance of the floor/ground
pub fn solar_gain(
    sol_altitude: f64,
    sharp: f64,
    sol_radiation_dir: f64,
    sol_transmittance: f64,
    f_svv: f64,
    f_bes: f64,
    asw: f64,
    posture: Posture,
    floor_reflectance: f64,
) -> SolarGain {
    let fp = projected_area_factor(posture, sol_altitude, sharp);
    let f_eff = posture.fraction_effective();

    // SolarCal treats the diffuse component as a fixed fraction of the beam.
    let i_diff = 0.2 * sol_radiation_dir;

    let e_direct = fp * sol_transmittance * f_bes * sol_radiation_dir;
    let e_diff = f_eff * f_svv * 0.5 * sol_transmittance * i_diff;
    let e_reflected = f_eff
        * f_svv
        * 0.5
        * sol_transmittance
        * sol_radiation_dir
        * sol_altitude.to_radians().sin()
        * floor_reflectance;

    let erf = (e_direct + e_diff + e_reflected) * (asw / LONGWAVE_ABSORPTIVITY);
    let delta_mrt = erf / (RADIATIVE_HEAT_TRANSFER * f_eff);

    SolarGain { erf, delta_mrt }
}

/// Bilinear interpolation of the projected area factor over the
/// altitude × sharp grid.
fn projected_area_factor(posture: Posture, sol_altitude: f64, sharp: f64) -> f64 {
    let table = posture.fp_table();
    let altitude = sol_altitude.clamp(0.0, 90.0);
    let sharp = sharp.clamp(0.0, 180.0);

    let alt_idx = grid_span(&ALTITUDE_GRID, altitude);
    let sharp_idx = grid_span(&SHARP_GRID, sharp);

    let alt0 = ALTITUDE_GRID[alt_idx];
    let alt1 = ALTITUDE_GRID[alt_idx + 1];
    let sharp0 = SHARP_GRID[sharp_idx];
    let sharp1 = SHARP_GRID[sharp_idx + 1];

    let tx = (altitude - alt0) / (alt1 - alt0);
    let ty = (sharp - sharp0) / (sharp1 - sharp0);

    let f00 = table[sharp_idx][alt_idx];
    let f01 = table[sharp_idx][alt_idx + 1];
    let f10 = table[sharp_idx + 1][alt_idx];
    let f11 = table[sharp_idx + 1][alt_idx + 1];

    f00 * (1.0 - tx) * (1.0 - ty) + f01 * tx * (1.0 - ty) + f10 * (1.0 - tx) * ty
        + f11 * tx * ty
}

/// Index of the grid cell containing `x`; the last cell absorbs the upper
/// boundary.
fn grid_span(grid: &[f64], x: f64) -> usize {
    grid.windows(2)
        .position(|span| x >= span[0] && x <= span[1])
        .unwrap_or(grid.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gain_at(radiation: f64, altitude: f64) -> SolarGain {
        solar_gain(
            altitude,
            45.0,
            radiation,
            1.0,
            1.0,
            1.0,
            0.7,
            Posture::Standing,
            0.6,
        )
    }

    #[test]
    fn no_beam_radiation_means_no_gain() {
        let gain = gain_at(0.0, 45.0);
        assert_eq!(gain.erf, 0.0);
        assert_eq!(gain.delta_mrt, 0.0);
    }

    #[test]
    fn gain_grows_with_radiation() {
        let low = gain_at(200.0, 45.0);
        let high = gain_at(800.0, 45.0);
        assert!(high.erf > low.erf);
        assert!(high.delta_mrt > low.delta_mrt);
        assert!(low.delta_mrt > 0.0);
    }

    #[test]
    fn postures_project_differently() {
        let standing = gain_at(200.0, 45.0);
        let seated = solar_gain(45.0, 45.0, 200.0, 1.0, 1.0, 1.0, 0.7, Posture::Seated, 0.6);
        assert_ne!(standing.delta_mrt, seated.delta_mrt);
    }

    #[test]
    fn projected_area_factor_interpolates_between_grid_points() {
        let at_node = projected_area_factor(Posture::Standing, 45.0, 45.0);
        assert!((at_node - 0.228).abs() < 1e-9);

        let between = projected_area_factor(Posture::Standing, 52.5, 45.0);
        let upper = projected_area_factor(Posture::Standing, 60.0, 45.0);
        assert!(between < at_node && between > upper);
    }

    #[test]
    fn out_of_grid_angles_are_clamped() {
        let low = projected_area_factor(Posture::Standing, -10.0, 45.0);
        let at_zero = projected_area_factor(Posture::Standing, 0.0, 45.0);
        assert_eq!(low, at_zero);
    }
}
