//! Synthetic EPW fixtures shared by the parser and enricher tests.

use chrono::{Datelike, Duration, NaiveDate};

/// One raw EPW data line for the given calendar hour, truncated to
/// `raw_width` fields. The full 35-field layout mirrors an EnergyPlus TMY
/// line; values are fixed so tests can assert on them.
pub fn epw_data_row(year: i32, month: u32, day: u32, hour: u32, raw_width: usize) -> String {
    let fields: [String; 35] = [
        year.to_string(),
        month.to_string(),
        day.to_string(),
        hour.to_string(),
        "0".to_string(),
        "A7A7A7*0".to_string(),
        "20.0".to_string(),   // DBT
        "15.0".to_string(),   // DPT
        "50".to_string(),     // RH
        "101325".to_string(), // p_atm
        "0".to_string(),      // extr_hor_rad
        "0".to_string(),      // extraterrestrial direct normal (dropped)
        "330".to_string(),    // hor_ir_rad
        "150".to_string(),    // glob_hor_rad
        "300".to_string(),    // dir_nor_rad
        "60".to_string(),     // dif_hor_rad
        "16000".to_string(),  // glob_hor_ill
        "28000".to_string(),  // dir_nor_ill
        "6000".to_string(),   // dif_hor_ill
        "4000".to_string(),   // Zlumi
        "270".to_string(),    // wind_dir
        "3.5".to_string(),    // wind_speed
        "5".to_string(),      // tot_sky_cover
        "3".to_string(),      // Oskycover
        "20".to_string(),     // Vis
        "2000".to_string(),   // Cheight
        "9".to_string(),      // PWobs
        "999999999".to_string(), // PWcodes
        "15".to_string(),     // Pwater
        "0.1".to_string(),    // AsolOptD
        "0".to_string(),      // SnowD
        "88".to_string(),     // DaySSnow
        "0.2".to_string(),    // albedo (dropped)
        "0.0".to_string(),    // liquid precip depth (dropped)
        "0.0".to_string(),    // liquid precip quantity (dropped)
    ];
    fields[..raw_width].join(",")
}

/// A complete synthetic EPW file: 8 header lines plus a full non-leap year of
/// hourly rows, every data row `raw_width` fields wide.
pub fn synthetic_epw_lines(year: i32, raw_width: usize) -> Vec<String> {
    let mut lines = vec![
        "LOCATION,Oakland Intl AP,CA,USA,TMY3,724930,37.72,-122.22,-8.0,3.0".to_string(),
        "DESIGN CONDITIONS,0".to_string(),
        "TYPICAL/EXTREME PERIODS,0".to_string(),
        "GROUND TEMPERATURES,0".to_string(),
        "HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0".to_string(),
        "COMMENTS 1,synthetic test data".to_string(),
        "COMMENTS 2,".to_string(),
        "DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31".to_string(),
    ];

    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid synthetic year");
    for day_offset in 0..365 {
        let date = start + Duration::days(day_offset);
        for hour in 1..=24 {
            lines.push(epw_data_row(
                year,
                date.month(),
                date.day(),
                hour,
                raw_width,
            ));
        }
    }
    lines
}
