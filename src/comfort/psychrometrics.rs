//! Moist-air properties from dry-bulb temperature and relative humidity.

/// Standard sea-level atmospheric pressure, Pa.
const STANDARD_PRESSURE: f64 = 101_325.0;

const CP_DRY_AIR: f64 = 1004.0; // J/(kg K)
const CP_WATER_VAPOUR: f64 = 1805.0; // J/(kg K)
const LATENT_HEAT_VAPOURISATION: f64 = 2_501_000.0; // J/kg

/// Psychrometric state derived from one (dry-bulb, relative-humidity) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Psychrometrics {
    /// Saturation vapour pressure, Pa.
    pub p_sat: f64,
    /// Partial pressure of water vapour, Pa.
    pub p_vap: f64,
    /// Humidity ratio, kg water / kg dry air.
    pub hr: f64,
    /// Wet-bulb temperature, °C.
    pub t_wb: f64,
    /// Dew-point temperature, °C.
    pub t_dp: f64,
    /// Specific enthalpy of the moist air, J/kg dry air.
    pub h: f64,
}

/// Derives the full psychrometric state at standard atmospheric pressure.
pub fn psy_ta_rh(tdb: f64, rh: f64) -> Psychrometrics {
    let p_sat = saturation_pressure(tdb);
    let p_vap = rh / 100.0 * p_sat;
    let hr = 0.62198 * p_vap / (STANDARD_PRESSURE - p_vap);
    Psychrometrics {
        p_sat,
        p_vap,
        hr,
        t_wb: wet_bulb(tdb, rh),
        t_dp: dew_point(tdb, rh),
        h: enthalpy(tdb, hr),
    }
}

/// Saturation vapour pressure over liquid water or ice, Pa
/// (Hyland–Wexler correlations, split at 0 °C).
pub fn saturation_pressure(tdb: f64) -> f64 {
    let t_k = tdb + 273.15;
    if t_k < 273.15 {
        let c1 = -5674.5359;
        let c2 = 6.3925247;
        let c3 = -0.009677843;
        let c4 = 0.00000062215701;
        let c5 = 2.0747825e-09;
        let c6 = -9.484024e-13;
        let c7 = 4.1635019;
        (c1 / t_k + c2 + t_k * (c3 + t_k * (c4 + t_k * (c5 + c6 * t_k))) + c7 * t_k.ln())
            .exp()
    } else {
        let c8 = -5800.2206;
        let c9 = 1.3914993;
        let c10 = -0.048640239;
        let c11 = 0.000041764768;
        let c12 = -0.000000014452093;
        let c13 = 6.5459673;
        (c8 / t_k + c9 + t_k * (c10 + t_k * (c11 + t_k * c12)) + c13 * t_k.ln()).exp()
    }
}

/// Wet-bulb temperature, °C (Stull 2011 empirical fit, valid for ordinary
/// surface conditions).
pub fn wet_bulb(tdb: f64, rh: f64) -> f64 {
    tdb * (0.151977 * (rh + 8.313659).sqrt()).atan() + (tdb + rh).atan()
        - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

/// Dew-point temperature, °C (Magnus-style fit with the Arden Buck
/// constants).
pub fn dew_point(tdb: f64, rh: f64) -> f64 {
    let b = 18.678;
    let c = 257.14;
    let d = 234.5;
    let gamma = ((rh / 100.0) * ((b - tdb / d) * (tdb / (c + tdb))).exp()).ln();
    c * gamma / (b - gamma)
}

/// Specific enthalpy of moist air, J/kg dry air.
pub fn enthalpy(tdb: f64, hr: f64) -> f64 {
    let h_dry_air = CP_DRY_AIR * tdb;
    let h_saturated_vapour = LATENT_HEAT_VAPOURISATION + CP_WATER_VAPOUR * tdb;
    h_dry_air + hr * h_saturated_vapour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_pressure_at_20c_matches_hyland_wexler() {
        let p = saturation_pressure(20.0);
        assert!((p - 2339.0).abs() < 5.0, "p_sat(20) = {p}");
    }

    #[test]
    fn saturation_pressure_is_continuous_across_freezing() {
        let below = saturation_pressure(-0.01);
        let above = saturation_pressure(0.01);
        assert!((below - above).abs() < 2.0);
    }

    #[test]
    fn dew_point_approaches_dry_bulb_at_saturation() {
        let t_dp = dew_point(20.0, 100.0);
        assert!((t_dp - 20.0).abs() < 0.5, "t_dp = {t_dp}");
    }

    #[test]
    fn wet_bulb_sits_between_dew_point_and_dry_bulb() {
        let state = psy_ta_rh(20.0, 50.0);
        assert!(state.t_dp < state.t_wb);
        assert!(state.t_wb < 20.0);
        // Stull's fit gives 13.7 °C at 20 °C / 50 %.
        assert!((state.t_wb - 13.7).abs() < 0.5, "t_wb = {}", state.t_wb);
    }

    #[test]
    fn enthalpy_grows_with_temperature_and_moisture() {
        let cool = psy_ta_rh(10.0, 50.0);
        let warm = psy_ta_rh(25.0, 50.0);
        let humid = psy_ta_rh(25.0, 90.0);
        assert!(warm.h > cool.h);
        assert!(humid.h > warm.h);
        // Around 38.5 kJ/kg at 20 °C / 50 %.
        let reference = psy_ta_rh(20.0, 50.0);
        assert!(
            reference.h > 36_000.0 && reference.h < 41_000.0,
            "h = {}",
            reference.h
        );
    }

    #[test]
    fn humidity_ratio_scales_with_relative_humidity() {
        let dry = psy_ta_rh(20.0, 20.0);
        let humid = psy_ta_rh(20.0, 80.0);
        assert!(humid.hr > 3.0 * dry.hr);
        assert!(dry.hr > 0.0);
    }
}
