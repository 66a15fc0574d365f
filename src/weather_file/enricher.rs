//! Assembly of the enriched hourly table.
//!
//! Takes the raw lines of a fetched EPW file and produces one polars
//! `DataFrame` of 8,760 hourly rows (the parsed weather columns plus the
//! derived calendar, solar-position, thermal-comfort and psychrometric
//! families) together with the `Location` metadata record.

use crate::comfort::psychrometrics::psy_ta_rh;
use crate::comfort::solar_gain::{solar_gain, Posture};
use crate::comfort::utci::{stress_category, utci};
use crate::solar::SolarPosition;
use crate::types::location::Location;
use crate::weather_file::error::WeatherFileError;
use crate::weather_file::parser::{
    infer_reference_period, parse_header, parse_hourly_block, reference_period_tag,
};
use crate::weather_file::schema::{HOURLY_BLOCK_START, HOURS_PER_YEAR, MONTH_NAMES};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use log::info;
use polars::prelude::*;

/// The canonical non-leap year every file is re-indexed onto.
const REFERENCE_YEAR: i32 = 2019;

/// Fixed body-exposure profile for the solar-gain model; these describe the
/// generic outdoor occupant the dashboard assumes, not anything read from
/// the file.
const SHARP_ANGLE: f64 = 45.0;
const SOL_TRANSMITTANCE: f64 = 1.0;
const SKY_VAULT_FRACTION: f64 = 1.0;
const BODY_EXPOSED_FRACTION: f64 = 1.0;
const SHORTWAVE_ABSORPTIVITY: f64 = 0.7;
const FLOOR_REFLECTANCE: f64 = 0.6;

/// Ceiling on the solar MRT delta, °C.
const MRT_DELTA_CAP: f64 = 70.0;

/// Wind-speed envelope accepted by the UTCI regression, m/s.
const UTCI_WIND_FLOOR: f64 = 0.6;
const UTCI_WIND_CEILING: f64 = 16.9;
/// Substitute speed for the "still air" UTCI variants, m/s.
const STILL_AIR_SPEED: f64 = 0.5;

/// Parses and enriches a fetched weather file.
///
/// Fails on empty or malformed input (short header, truncated hourly block,
/// unparseable numerics); the only tolerated irregularity is a variant format
/// supplying fewer columns than the canonical schema, which is
/// sentinel-backfilled by the parser.
pub fn enrich(
    lines: &[String],
    source_url: &str,
) -> Result<(DataFrame, Location), WeatherFileError> {
    let header_line = lines.first().ok_or(WeatherFileError::TooFewLines {
        expected: HOURLY_BLOCK_START + HOURS_PER_YEAR,
        found: 0,
    })?;
    let header = parse_header(header_line)?;
    let tagged_period = reference_period_tag(lines);
    let columns = parse_hourly_block(lines)?;

    let reference_period =
        tagged_period.unwrap_or_else(|| infer_reference_period(&columns.years));
    let location = Location {
        source_url: source_url.to_string(),
        latitude: header.latitude,
        longitude: header.longitude,
        utc_offset_hours: header.utc_offset_hours,
        elevation: header.elevation,
        city: header.city,
        state: header.state,
        country: header.country,
        reference_period,
    };

    let n = columns.years.len();

    // Calendar lookups; an impossible year/month/day combination is a
    // malformed file.
    let mut month_names = Vec::with_capacity(n);
    let mut day_of_year = Vec::with_capacity(n);
    for row in 0..n {
        let (year, month, day) = (columns.years[row], columns.months[row], columns.days[row]);
        let date = u32::try_from(month)
            .ok()
            .zip(u32::try_from(day).ok())
            .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .ok_or(WeatherFileError::InvalidDate {
                row,
                year,
                month,
                day,
            })?;
        month_names.push(MONTH_NAMES[(month - 1) as usize]);
        day_of_year.push(date.ordinal() as i32);
    }
    let fake_year = vec!["year"; n];

    // Canonical UTC hours of the reference year, and the local sequence the
    // table is effectively indexed by.
    let year_start = Utc
        .with_ymd_and_hms(REFERENCE_YEAR, 1, 1, 0, 0, 0)
        .unwrap();
    let utc_times: Vec<DateTime<Utc>> = (0..n as i64)
        .map(|hour| year_start + Duration::hours(hour))
        .collect();
    let shift = Duration::seconds(((header.utc_offset_hours - 1.0) * 3600.0).round() as i64);
    let local_times: Vec<DateTime<Utc>> = utc_times.iter().map(|t| *t - shift).collect();

    // Solar position and solar-gain MRT, evaluated at the shifted instants
    // the table is indexed by.
    let dbt = columns.physical("DBT");
    let dir_nor_rad = columns.physical("dir_nor_rad");
    let mut sol_elevation = Vec::with_capacity(n);
    let mut sol_azimuth = Vec::with_capacity(n);
    let mut sol_zenith = Vec::with_capacity(n);
    let mut erf = Vec::with_capacity(n);
    let mut delta_mrt = Vec::with_capacity(n);
    let mut mrt = Vec::with_capacity(n);
    for (idx, &instant) in local_times.iter().enumerate() {
        let position = SolarPosition::calculate(instant, location.latitude, location.longitude);
        sol_elevation.push(position.elevation);
        sol_azimuth.push(position.azimuth);
        sol_zenith.push(position.zenith);

        let gain = solar_gain(
            position.elevation.max(0.0),
            SHARP_ANGLE,
            dir_nor_rad[idx],
            SOL_TRANSMITTANCE,
            SKY_VAULT_FRACTION,
            BODY_EXPOSED_FRACTION,
            SHORTWAVE_ABSORPTIVITY,
            Posture::Standing,
            FLOOR_REFLECTANCE,
        );
        let delta = gain.delta_mrt.min(MRT_DELTA_CAP);
        erf.push(gain.erf);
        delta_mrt.push(delta);
        mrt.push(delta + dbt[idx]);
    }

    // Wind-speed envelope for the UTCI regression, plus the still-air
    // counterpart.
    let wind_speed = columns.physical("wind_speed");
    let wind_speed_utci: Vec<f64> = wind_speed
        .iter()
        .map(|&speed| {
            let speed = if speed >= 17.0 { UTCI_WIND_CEILING } else { speed };
            if speed <= 0.5 {
                UTCI_WIND_FLOOR
            } else {
                speed
            }
        })
        .collect();
    let wind_speed_utci_0 = vec![STILL_AIR_SPEED; n];

    // The four UTCI variants: {shade, sun} × {wind, still air}.
    let rh = columns.physical("RH");
    let mut utci_no_sun_wind = Vec::with_capacity(n);
    let mut utci_no_sun_no_wind = Vec::with_capacity(n);
    let mut utci_sun_wind = Vec::with_capacity(n);
    let mut utci_sun_no_wind = Vec::with_capacity(n);
    for idx in 0..n {
        utci_no_sun_wind.push(utci(dbt[idx], dbt[idx], wind_speed_utci[idx], rh[idx]));
        utci_no_sun_no_wind.push(utci(dbt[idx], dbt[idx], STILL_AIR_SPEED, rh[idx]));
        utci_sun_wind.push(utci(dbt[idx], mrt[idx], wind_speed_utci[idx], rh[idx]));
        utci_sun_no_wind.push(utci(dbt[idx], mrt[idx], STILL_AIR_SPEED, rh[idx]));
    }
    let categories =
        |values: &[f64]| -> Vec<i32> { values.iter().map(|&v| stress_category(v)).collect() };
    let cat_no_sun_wind = categories(&utci_no_sun_wind);
    let cat_no_sun_no_wind = categories(&utci_no_sun_no_wind);
    let cat_sun_wind = categories(&utci_sun_wind);
    let cat_sun_no_wind = categories(&utci_sun_no_wind);

    // Psychrometric family from (DBT, RH).
    let mut p_sat = Vec::with_capacity(n);
    let mut p_vap = Vec::with_capacity(n);
    let mut humidity_ratio = Vec::with_capacity(n);
    let mut t_wb = Vec::with_capacity(n);
    let mut t_dp = Vec::with_capacity(n);
    let mut enthalpy = Vec::with_capacity(n);
    for idx in 0..n {
        let state = psy_ta_rh(dbt[idx], rh[idx]);
        p_sat.push(state.p_sat);
        p_vap.push(state.p_vap);
        humidity_ratio.push(state.hr);
        t_wb.push(state.t_wb);
        t_dp.push(state.t_dp);
        enthalpy.push(state.h);
    }

    let mut table_columns: Vec<Column> = Vec::with_capacity(56);
    table_columns.push(Column::new("year".into(), columns.years.clone()));
    table_columns.push(Column::new("month".into(), columns.months.clone()));
    table_columns.push(Column::new("day".into(), columns.days.clone()));
    table_columns.push(Column::new("hour".into(), columns.hours.clone()));
    for (name, values) in columns.physicals() {
        table_columns.push(Column::new((*name).into(), values.clone()));
    }
    table_columns.push(Column::new("fake_year".into(), fake_year));
    table_columns.push(Column::new("month_names".into(), month_names));
    table_columns.push(Column::new("DOY".into(), day_of_year));
    table_columns.push(datetime_column("UTC_time", &utc_times));
    table_columns.push(datetime_column("times", &local_times));
    table_columns.push(Column::new("elevation".into(), sol_elevation));
    table_columns.push(Column::new("azimuth".into(), sol_azimuth));
    table_columns.push(Column::new("zenith".into(), sol_zenith));
    table_columns.push(Column::new("erf".into(), erf));
    table_columns.push(Column::new("delta_mrt".into(), delta_mrt));
    table_columns.push(Column::new("MRT".into(), mrt));
    table_columns.push(Column::new("wind_speed_utci".into(), wind_speed_utci));
    table_columns.push(Column::new("wind_speed_utci_0".into(), wind_speed_utci_0));
    table_columns.push(Column::new("utci_noSun_Wind".into(), utci_no_sun_wind));
    table_columns.push(Column::new("utci_noSun_noWind".into(), utci_no_sun_no_wind));
    table_columns.push(Column::new("utci_Sun_Wind".into(), utci_sun_wind));
    table_columns.push(Column::new("utci_Sun_noWind".into(), utci_sun_no_wind));
    table_columns.push(Column::new("utci_noSun_Wind_categories".into(), cat_no_sun_wind));
    table_columns.push(Column::new(
        "utci_noSun_noWind_categories".into(),
        cat_no_sun_no_wind,
    ));
    table_columns.push(Column::new("utci_Sun_Wind_categories".into(), cat_sun_wind));
    table_columns.push(Column::new(
        "utci_Sun_noWind_categories".into(),
        cat_sun_no_wind,
    ));
    table_columns.push(Column::new("p_sat".into(), p_sat));
    table_columns.push(Column::new("p_vap".into(), p_vap));
    table_columns.push(Column::new("hr".into(), humidity_ratio));
    table_columns.push(Column::new("t_wb".into(), t_wb));
    table_columns.push(Column::new("t_dp".into(), t_dp));
    table_columns.push(Column::new("h".into(), enthalpy));

    let table = DataFrame::new(table_columns)?;
    info!(
        "Enriched {} hourly rows from {source_url} ({} columns)",
        table.height(),
        table.width()
    );
    Ok((table, location))
}

fn datetime_column(name: &str, instants: &[DateTime<Utc>]) -> Column {
    let millis: Vec<i64> = instants.iter().map(|t| t.timestamp_millis()).collect();
    Column::from(
        Int64Chunked::from_vec(name.into(), millis)
            .into_datetime(TimeUnit::Milliseconds, None)
            .into_series(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_file::schema::SENTINEL_MISSING;
    use crate::weather_file::test_support::synthetic_epw_lines;

    fn enriched(raw_width: usize) -> (DataFrame, Location) {
        let lines = synthetic_epw_lines(2005, raw_width);
        enrich(&lines, "https://example.org/test.epw").unwrap()
    }

    fn float_column(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn full_year_produces_8760_rows() {
        let (df, _) = enriched(35);
        assert_eq!(df.height(), HOURS_PER_YEAR);
        assert_eq!(df.width(), 56);
    }

    #[test]
    fn location_metadata_is_extracted() {
        let (_, location) = enriched(35);
        assert_eq!(location.source_url, "https://example.org/test.epw");
        assert_eq!(location.latitude, 37.72);
        assert_eq!(location.longitude, -122.22);
        assert_eq!(location.utc_offset_hours, -8.0);
        assert_eq!(location.elevation, "3.0");
        assert_eq!(location.city, "Oakland Intl AP");
        assert_eq!(location.state, "CA");
        assert_eq!(location.country, "USA");
    }

    #[test]
    fn single_year_file_infers_decade_period() {
        let (_, location) = enriched(35);
        assert_eq!(location.reference_period, "2000-2010");
    }

    #[test]
    fn tagged_reference_period_wins_over_inference() {
        let mut lines = synthetic_epw_lines(2005, 35);
        lines[5] = "COMMENTS 1,station record cord='2007-2021;'".to_string();
        let (_, location) = enrich(&lines, "tagged.epw").unwrap();
        assert_eq!(location.reference_period, "2007-2021");
    }

    #[test]
    fn static_fields_round_trip() {
        let (df, _) = enriched(35);
        assert!(float_column(&df, "DBT").iter().all(|&t| t == 20.0));
        assert!(float_column(&df, "RH").iter().all(|&r| r == 50.0));
        assert!(float_column(&df, "wind_speed").iter().all(|&w| w == 3.5));
        let years: Vec<i32> = df
            .column("year")
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert!(years.iter().all(|&y| y == 2005));
    }

    #[test]
    fn utc_sequence_spans_the_reference_year() {
        let (df, _) = enriched(35);
        let utc = df.column("UTC_time").unwrap().datetime().unwrap();
        let first = utc.get(0).unwrap();
        let last = utc.get(HOURS_PER_YEAR - 1).unwrap();
        let expected_first = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let expected_last = Utc.with_ymd_and_hms(2019, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(first, expected_first.timestamp_millis());
        assert_eq!(last, expected_last.timestamp_millis());
    }

    #[test]
    fn local_index_is_shifted_by_offset_minus_one() {
        let (df, location) = enriched(35);
        let utc = df.column("UTC_time").unwrap().datetime().unwrap();
        let local = df.column("times").unwrap().datetime().unwrap();
        let shift_ms = ((location.utc_offset_hours - 1.0) * 3_600_000.0) as i64;
        for idx in [0, 1, 4_000, HOURS_PER_YEAR - 1] {
            assert_eq!(
                local.get(idx).unwrap(),
                utc.get(idx).unwrap() - shift_ms,
                "row {idx}"
            );
        }
    }

    #[test]
    fn calendar_columns_are_consistent() {
        let (df, _) = enriched(35);
        let names = df.column("month_names").unwrap();
        let names = names.str().unwrap();
        let doy = df.column("DOY").unwrap().i32().unwrap();
        assert_eq!(names.get(0), Some("Jan"));
        assert_eq!(doy.get(0), Some(1));
        assert_eq!(names.get(HOURS_PER_YEAR - 1), Some("Dec"));
        assert_eq!(doy.get(HOURS_PER_YEAR - 1), Some(365));
        let fake = df.column("fake_year").unwrap();
        assert!(fake.str().unwrap().into_iter().all(|v| v == Some("year")));
    }

    #[test]
    fn utci_wind_input_respects_the_envelope() {
        let (df, _) = enriched(35);
        assert!(float_column(&df, "wind_speed_utci")
            .iter()
            .all(|&w| w > 0.5 && w < 17.0));
        assert!(float_column(&df, "wind_speed_utci_0")
            .iter()
            .all(|&w| w == STILL_AIR_SPEED));
    }

    #[test]
    fn mrt_delta_is_capped_and_added_to_dry_bulb() {
        let (df, _) = enriched(35);
        let delta = float_column(&df, "delta_mrt");
        let mrt = float_column(&df, "MRT");
        let dbt = float_column(&df, "DBT");
        for idx in 0..HOURS_PER_YEAR {
            assert!(delta[idx] <= MRT_DELTA_CAP);
            assert!(delta[idx] >= 0.0);
            assert!((mrt[idx] - (dbt[idx] + delta[idx])).abs() < 1e-12);
        }
    }

    #[test]
    fn stress_categories_stay_in_label_range() {
        let (df, _) = enriched(35);
        for name in [
            "utci_noSun_Wind_categories",
            "utci_noSun_noWind_categories",
            "utci_Sun_Wind_categories",
            "utci_Sun_noWind_categories",
        ] {
            let column = df.column(name).unwrap();
            let values = column.i32().unwrap();
            assert!(
                values.into_no_null_iter().all(|c| (-5..=4).contains(&c)),
                "column {name}"
            );
        }
    }

    #[test]
    fn variant_file_gets_sentinel_columns_everywhere() {
        let (df, _) = enriched(30);
        for name in ["PWcodes", "Pwater", "AsolOptD", "SnowD", "DaySSnow"] {
            assert!(
                float_column(&df, name).iter().all(|&v| v == SENTINEL_MISSING),
                "column {name}"
            );
        }
        assert_eq!(df.height(), HOURS_PER_YEAR);
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = enrich(&[], "empty.epw");
        assert!(matches!(
            result,
            Err(WeatherFileError::TooFewLines { found: 0, .. })
        ));
    }
}
