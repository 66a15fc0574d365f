//! Universal Thermal Climate Index.
//!
//! `utci` evaluates the published 6th-order polynomial regression of the
//! UTCI-Fiala reference model (Bröde et al.) in air temperature, wind speed,
//! radiant-temperature offset and vapour pressure. `stress_category`
//! discretises the index into the nine ordinal thermal-stress classes the
//! dashboard charts.

/// Category bin edges, °C. Bins are right-closed: a value equal to an edge
/// falls in the colder class.
pub const STRESS_BIN_EDGES: [f64; 11] = [
    -999.0, -40.0, -27.0, -13.0, 0.0, 9.0, 26.0, 32.0, 38.0, 46.0, 999.0,
];

/// Ordinal labels for the bins, extreme cold stress (−5) through extreme
/// heat stress (4).
pub const STRESS_LABELS: [i32; 10] = [-5, -4, -3, -2, -1, 0, 1, 2, 3, 4];

/// Maps a UTCI value onto its thermal-stress class.
pub fn stress_category(utci_value: f64) -> i32 {
    for (idx, span) in STRESS_BIN_EDGES.windows(2).enumerate() {
        if utci_value > span[0] && utci_value <= span[1] {
            return STRESS_LABELS[idx];
        }
    }
    // Off-scale values saturate into the outermost classes.
    if utci_value <= STRESS_BIN_EDGES[0] {
        STRESS_LABELS[0]
    } else {
        STRESS_LABELS[STRESS_LABELS.len() - 1]
    }
}

/// UTCI in °C from air temperature (°C), mean radiant temperature (°C),
/// wind speed at 10 m (m/s) and relative humidity (%).
pub fn utci(tdb: f64, tr: f64, v: f64, rh: f64) -> f64 {
    let pa = saturation_vapour_pressure_hpa(tdb) * rh / 100.0 / 10.0; // kPa
    let d_tr = tr - tdb;
    utci_polynomial(tdb, v, d_tr, pa)
}

/// Saturation vapour pressure over water, hPa (Hardy ITS-90 formulation).
fn saturation_vapour_pressure_hpa(tdb: f64) -> f64 {
    let g = [
        -2836.5744,
        -6028.076559,
        19.54263612,
        -0.02737830188,
        0.000016261698,
        7.0229056e-10,
        -1.8680009e-13,
    ];
    let tk = tdb + 273.15;
    let mut es = 2.7150305 * tk.ln();
    for (count, coefficient) in g.iter().enumerate() {
        es += coefficient * tk.powi(count as i32 - 2);
    }
    es.exp() * 0.01
}

/// The 210-term regression polynomial. `ta` in °C, `va` in m/s, `d_tr` the
/// radiant offset (tr − ta) in K, `pa` the vapour pressure in kPa.
#[rustfmt::skip]
fn utci_polynomial(ta: f64, va: f64, d_tr: f64, pa: f64) -> f64 {
    ta
        + 0.607562052
        + (-0.0227712343) * ta
        + (8.06470249e-4) * ta * ta
        + (-1.54271372e-6) * ta * ta * ta
        + (-3.24651735e-6) * ta.powi(4)
        + (7.32602852e-8) * ta.powi(5)
        + (1.35959073e-9) * ta.powi(6)
        + (-2.25836520) * va
        + 0.0880326035 * ta * va
        + 0.00216844454 * ta * ta * va
        + (-1.53347087e-5) * ta.powi(3) * va
        + (-5.72983704e-7) * ta.powi(4) * va
        + (-2.55090145e-9) * ta.powi(5) * va
        + (-0.751269505) * va * va
        + (-0.00408350271) * ta * va * va
        + (-5.21670675e-5) * ta * ta * va * va
        + (1.94544667e-6) * ta.powi(3) * va * va
        + (1.14099531e-8) * ta.powi(4) * va * va
        + 0.158137256 * va.powi(3)
        + (-6.57263143e-5) * ta * va.powi(3)
        + (2.22697524e-7) * ta * ta * va.powi(3)
        + (-4.16117031e-8) * ta.powi(3) * va.powi(3)
        + (-0.0127762753) * va.powi(4)
        + (9.66891875e-6) * ta * va.powi(4)
        + (2.52785852e-9) * ta * ta * va.powi(4)
        + (4.56306672e-4) * va.powi(5)
        + (-1.74202546e-7) * ta * va.powi(5)
        + (-5.91491269e-6) * va.powi(6)
        + 0.398374029 * d_tr
        + (1.83945314e-4) * ta * d_tr
        + (-1.73754510e-4) * ta * ta * d_tr
        + (-7.60781159e-7) * ta.powi(3) * d_tr
        + (3.77830287e-8) * ta.powi(4) * d_tr
        + (5.43079673e-10) * ta.powi(5) * d_tr
        + (-0.0200518269) * va * d_tr
        + (8.92859837e-4) * ta * va * d_tr
        + (3.45433048e-6) * ta * ta * va * d_tr
        + (-3.77925774e-7) * ta.powi(3) * va * d_tr
        + (-1.69699377e-9) * ta.powi(4) * va * d_tr
        + (1.69992415e-4) * va * va * d_tr
        + (-4.99204314e-5) * ta * va * va * d_tr
        + (2.47417178e-7) * ta * ta * va * va * d_tr
        + (1.07596466e-8) * ta.powi(3) * va * va * d_tr
        + (8.49242932e-5) * va.powi(3) * d_tr
        + (1.35191328e-6) * ta * va.powi(3) * d_tr
        + (-6.21531254e-9) * ta * ta * va.powi(3) * d_tr
        + (-4.99410301e-6) * va.powi(4) * d_tr
        + (-1.89489258e-8) * ta * va.powi(4) * d_tr
        + (8.15300114e-8) * va.powi(5) * d_tr
        + (7.55043090e-4) * d_tr * d_tr
        + (-5.65095215e-5) * ta * d_tr * d_tr
        + (-4.52166564e-7) * ta * ta * d_tr * d_tr
        + (2.46688878e-8) * ta.powi(3) * d_tr * d_tr
        + (2.42674348e-10) * ta.powi(4) * d_tr * d_tr
        + (1.54547250e-4) * va * d_tr * d_tr
        + (5.24110970e-6) * ta * va * d_tr * d_tr
        + (-8.75874982e-8) * ta * ta * va * d_tr * d_tr
        + (-1.50743064e-9) * ta.powi(3) * va * d_tr * d_tr
        + (-1.56236307e-5) * va * va * d_tr * d_tr
        + (-1.33895614e-7) * ta * va * va * d_tr * d_tr
        + (2.49709824e-9) * ta * ta * va * va * d_tr * d_tr
        + (6.51711721e-7) * va.powi(3) * d_tr * d_tr
        + (1.94960053e-9) * ta * va.powi(3) * d_tr * d_tr
        + (-1.00361113e-8) * va.powi(4) * d_tr * d_tr
        + (-1.21206673e-5) * d_tr.powi(3)
        + (-2.18203660e-7) * ta * d_tr.powi(3)
        + (7.51269482e-9) * ta * ta * d_tr.powi(3)
        + (9.79063848e-11) * ta.powi(3) * d_tr.powi(3)
        + (1.25006734e-6) * va * d_tr.powi(3)
        + (-1.81584736e-9) * ta * va * d_tr.powi(3)
        + (-3.52197671e-10) * ta * ta * va * d_tr.powi(3)
        + (-3.36514630e-8) * va * va * d_tr.powi(3)
        + (1.35908359e-10) * ta * va * va * d_tr.powi(3)
        + (4.17032620e-10) * va.powi(3) * d_tr.powi(3)
        + (-1.30369025e-9) * d_tr.powi(4)
        + (4.13908461e-10) * ta * d_tr.powi(4)
        + (9.22652254e-12) * ta * ta * d_tr.powi(4)
        + (-5.08220384e-9) * va * d_tr.powi(4)
        + (-2.24730961e-11) * ta * va * d_tr.powi(4)
        + (1.17139133e-10) * va * va * d_tr.powi(4)
        + (6.62154879e-10) * d_tr.powi(5)
        + (4.03863260e-13) * ta * d_tr.powi(5)
        + (1.95087203e-12) * va * d_tr.powi(5)
        + (-4.73602469e-12) * d_tr.powi(6)
        + 5.12733497 * pa
        + (-0.312788561) * ta * pa
        + (-0.0196701861) * ta * ta * pa
        + (9.99690870e-4) * ta.powi(3) * pa
        + (9.51738512e-6) * ta.powi(4) * pa
        + (-4.66426341e-7) * ta.powi(5) * pa
        + 0.548050612 * va * pa
        + (-0.00330552823) * ta * va * pa
        + (-0.00164119440) * ta * ta * va * pa
        + (-5.16670694e-6) * ta.powi(3) * va * pa
        + (9.52692432e-7) * ta.powi(4) * va * pa
        + (-0.0429223622) * va * va * pa
        + 0.00500845667 * ta * va * va * pa
        + (1.00601257e-6) * ta * ta * va * va * pa
        + (-1.81748644e-6) * ta.powi(3) * va * va * pa
        + (-1.25813502e-3) * va.powi(3) * pa
        + (-1.79330391e-4) * ta * va.powi(3) * pa
        + (2.34994441e-6) * ta * ta * va.powi(3) * pa
        + (1.29735808e-4) * va.powi(4) * pa
        + (1.29064870e-6) * ta * va.powi(4) * pa
        + (-2.28558686e-6) * va.powi(5) * pa
        + (-0.0369476348) * d_tr * pa
        + 0.00162325322 * ta * d_tr * pa
        + (-3.14279680e-5) * ta * ta * d_tr * pa
        + (2.59835559e-6) * ta.powi(3) * d_tr * pa
        + (-4.77136523e-8) * ta.powi(4) * d_tr * pa
        + (8.64203390e-3) * va * d_tr * pa
        + (-6.87405181e-4) * ta * va * d_tr * pa
        + (-9.13863872e-6) * ta * ta * va * d_tr * pa
        + (5.15916806e-7) * ta.powi(3) * va * d_tr * pa
        + (-3.59217476e-5) * va * va * d_tr * pa
        + (3.28696511e-5) * ta * va * va * d_tr * pa
        + (-7.10542454e-7) * ta * ta * va * va * d_tr * pa
        + (-1.24382300e-5) * va.powi(3) * d_tr * pa
        + (-7.38584400e-9) * ta * va.powi(3) * d_tr * pa
        + (2.20609296e-7) * va.powi(4) * d_tr * pa
        + (-7.32469180e-4) * d_tr * d_tr * pa
        + (-1.87381964e-5) * ta * d_tr * d_tr * pa
        + (4.80925239e-6) * ta * ta * d_tr * d_tr * pa
        + (-8.75492040e-8) * ta.powi(3) * d_tr * d_tr * pa
        + (2.77862930e-5) * va * d_tr * d_tr * pa
        + (-5.06004592e-6) * ta * va * d_tr * d_tr * pa
        + (1.14325367e-7) * ta * ta * va * d_tr * d_tr * pa
        + (2.53016723e-6) * va * va * d_tr * d_tr * pa
        + (-1.72857035e-8) * ta * va * va * d_tr * d_tr * pa
        + (-3.95079398e-8) * va.powi(3) * d_tr * d_tr * pa
        + (-3.59413173e-7) * d_tr.powi(3) * pa
        + (7.04388046e-7) * ta * d_tr.powi(3) * pa
        + (-1.89309167e-8) * ta * ta * d_tr.powi(3) * pa
        + (-4.79768731e-7) * va * d_tr.powi(3) * pa
        + (7.96079978e-9) * ta * va * d_tr.powi(3) * pa
        + (1.62897058e-9) * va * va * d_tr.powi(3) * pa
        + (3.94367674e-8) * d_tr.powi(4) * pa
        + (-1.18566247e-9) * ta * d_tr.powi(4) * pa
        + (3.34678041e-10) * va * d_tr.powi(4) * pa
        + (-1.15606447e-10) * d_tr.powi(5) * pa
        + (-2.80626406) * pa * pa
        + 0.548712484 * ta * pa * pa
        + (-0.00399428410) * ta * ta * pa * pa
        + (-9.54009191e-4) * ta.powi(3) * pa * pa
        + (1.93090978e-5) * ta.powi(4) * pa * pa
        + (-0.308806365) * va * pa * pa
        + 0.0116952364 * ta * va * pa * pa
        + (4.95271903e-4) * ta * ta * va * pa * pa
        + (-1.90710882e-5) * ta.powi(3) * va * pa * pa
        + 0.00210787756 * va * va * pa * pa
        + (-6.98445738e-4) * ta * va * va * pa * pa
        + (2.30109073e-5) * ta * ta * va * va * pa * pa
        + (4.17856590e-4) * va.powi(3) * pa * pa
        + (-1.27043871e-5) * ta * va.powi(3) * pa * pa
        + (-3.04620472e-6) * va.powi(4) * pa * pa
        + 0.0514507424 * d_tr * pa * pa
        + (-0.00432510997) * ta * d_tr * pa * pa
        + (8.99281156e-5) * ta * ta * d_tr * pa * pa
        + (-7.14663943e-7) * ta.powi(3) * d_tr * pa * pa
        + (-2.66016305e-4) * va * d_tr * pa * pa
        + (2.63789586e-4) * ta * va * d_tr * pa * pa
        + (-7.01199003e-6) * ta * ta * va * d_tr * pa * pa
        + (-1.06823306e-4) * va * va * d_tr * pa * pa
        + (3.61341136e-6) * ta * va * va * d_tr * pa * pa
        + (2.29748967e-7) * va.powi(3) * d_tr * pa * pa
        + (3.04788893e-4) * d_tr * d_tr * pa * pa
        + (-6.42070836e-5) * ta * d_tr * d_tr * pa * pa
        + (1.16257971e-6) * ta * ta * d_tr * d_tr * pa * pa
        + (7.68023384e-6) * va * d_tr * d_tr * pa * pa
        + (-5.47446896e-7) * ta * va * d_tr * d_tr * pa * pa
        + (-3.59937910e-8) * va * va * d_tr * d_tr * pa * pa
        + (-4.36497725e-6) * d_tr.powi(3) * pa * pa
        + (1.68737969e-7) * ta * d_tr.powi(3) * pa * pa
        + (2.67489271e-8) * va * d_tr.powi(3) * pa * pa
        + (3.23926897e-9) * d_tr.powi(4) * pa * pa
        + (-0.0353874123) * pa.powi(3)
        + (-0.221201190) * ta * pa.powi(3)
        + 0.0155126038 * ta * ta * pa.powi(3)
        + (-2.63917279e-4) * ta.powi(3) * pa.powi(3)
        + 0.0453433455 * va * pa.powi(3)
        + (-0.00432943862) * ta * va * pa.powi(3)
        + (1.45389826e-4) * ta * ta * va * pa.powi(3)
        + (2.17508610e-4) * va * va * pa.powi(3)
        + (-6.66724702e-5) * ta * va * va * pa.powi(3)
        + (3.33217140e-5) * va.powi(3) * pa.powi(3)
        + (-0.00226921615) * d_tr * pa.powi(3)
        + (3.80261982e-4) * ta * d_tr * pa.powi(3)
        + (-5.45314314e-9) * ta * ta * d_tr * pa.powi(3)
        + (-7.96355448e-4) * va * d_tr * pa.powi(3)
        + (2.53458034e-5) * ta * va * d_tr * pa.powi(3)
        + (-6.31223658e-6) * va * va * d_tr * pa.powi(3)
        + (3.02122035e-4) * d_tr * d_tr * pa.powi(3)
        + (-4.77403547e-6) * ta * d_tr * d_tr * pa.powi(3)
        + (1.73825715e-6) * va * d_tr * d_tr * pa.powi(3)
        + (-4.09087898e-7) * d_tr.powi(3) * pa.powi(3)
        + 0.614155345 * pa.powi(4)
        + (-0.0616755931) * ta * pa.powi(4)
        + 0.00133374846 * ta * ta * pa.powi(4)
        + 0.00355375387 * va * pa.powi(4)
        + (-5.13027851e-4) * ta * va * pa.powi(4)
        + (1.02449757e-4) * va * va * pa.powi(4)
        + (-0.00148526421) * d_tr * pa.powi(4)
        + (-4.11469183e-5) * ta * d_tr * pa.powi(4)
        + (-6.80434415e-6) * va * d_tr * pa.powi(4)
        + (-9.77675906e-6) * d_tr * d_tr * pa.powi(4)
        + 0.0882773108 * pa.powi(5)
        + (-0.00301859306) * ta * pa.powi(5)
        + 0.00104452989 * va * pa.powi(5)
        + (2.47090539e-4) * d_tr * pa.powi(5)
        + 0.00148348065 * pa.powi(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_match_fixed_bin_edges() {
        // Right-closed bins: a value on an edge falls in the colder class.
        let expectations = [
            (-40.0, -5),
            (-27.0, -4),
            (-13.0, -3),
            (0.0, -2),
            (9.0, -1),
            (26.0, 0),
            (32.0, 1),
            (38.0, 2),
            (46.0, 3),
            (46.1, 4),
        ];
        for (value, label) in expectations {
            assert_eq!(stress_category(value), label, "at edge {value}");
        }
    }

    #[test]
    fn categories_cover_interior_points() {
        assert_eq!(stress_category(-60.0), -5);
        assert_eq!(stress_category(-30.0), -4);
        assert_eq!(stress_category(-20.0), -3);
        assert_eq!(stress_category(-5.0), -2);
        assert_eq!(stress_category(5.0), -1);
        assert_eq!(stress_category(20.0), 0);
        assert_eq!(stress_category(30.0), 1);
        assert_eq!(stress_category(35.0), 2);
        assert_eq!(stress_category(40.0), 3);
        assert_eq!(stress_category(60.0), 4);
    }

    #[test]
    fn index_tracks_air_temperature() {
        let cold = utci(0.0, 0.0, 1.0, 50.0);
        let mild = utci(15.0, 15.0, 1.0, 50.0);
        let hot = utci(30.0, 30.0, 1.0, 50.0);
        assert!(cold < mild && mild < hot);
    }

    #[test]
    fn neutral_conditions_stay_near_air_temperature() {
        // Light wind, no radiant offset: the index should stay within a few
        // degrees of the air temperature.
        let value = utci(20.0, 20.0, 1.0, 50.0);
        assert!((value - 20.0).abs() < 5.0, "utci = {value}");
    }

    #[test]
    fn wind_cools_and_sun_warms() {
        let calm = utci(20.0, 20.0, 0.6, 50.0);
        let windy = utci(20.0, 20.0, 10.0, 50.0);
        assert!(windy < calm, "windy {windy} vs calm {calm}");

        let shaded = utci(25.0, 25.0, 1.0, 50.0);
        let sunlit = utci(25.0, 55.0, 1.0, 50.0);
        assert!(sunlit > shaded, "sunlit {sunlit} vs shaded {shaded}");
    }

    #[test]
    fn index_is_finite_over_the_operating_envelope() {
        for &ta in &[-40.0, -10.0, 0.0, 15.0, 30.0, 45.0] {
            for &v in &[0.5, 2.0, 8.0, 16.9] {
                for &rh in &[5.0, 50.0, 100.0] {
                    for &offset in &[0.0, 30.0, 70.0] {
                        let value = utci(ta, ta + offset, v, rh);
                        assert!(value.is_finite(), "utci({ta}, {}, {v}, {rh})", ta + offset);
                    }
                }
            }
        }
    }
}
