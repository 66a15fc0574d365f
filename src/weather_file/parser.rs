//! Header and hourly-block parsing for EPW weather files.
//!
//! The parser turns raw text lines into typed columns against the canonical
//! schema. It is deliberately not defensive: by the time a file reaches this
//! stage it came from a successful fetch of a known file family, so malformed
//! input is an error, not a degraded result. The one tolerated irregularity
//! is a variant format supplying fewer columns than the canonical schema,
//! which is backfilled with the sentinel for every row.

use crate::weather_file::error::WeatherFileError;
use crate::weather_file::schema::{
    reduce_row, EpwField, FieldKind, CANONICAL_FIELDS, HOURLY_BLOCK_START, HOURS_PER_YEAR,
    REFERENCE_PERIOD_LINE, SENTINEL_MISSING,
};
use regex::Regex;
use std::sync::OnceLock;

/// Location metadata parsed from header line 0.
///
/// The last four comma-separated fields are read from the end of the line:
/// elevation, UTC offset, longitude, latitude. Fields 1..4 are
/// city/state/country. The elevation is kept as the raw string; no consumer
/// interprets its unit.
#[derive(Debug, Clone, PartialEq)]
pub struct EpwHeader {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
    pub elevation: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Typed hourly columns in canonical schema order.
///
/// Calendar components are integers, physical measurements floats. Columns a
/// variant file did not supply hold [`SENTINEL_MISSING`] for every row.
#[derive(Debug, Clone)]
pub struct HourlyColumns {
    pub years: Vec<i32>,
    pub months: Vec<i32>,
    pub days: Vec<i32>,
    pub hours: Vec<i32>,
    floats: Vec<(&'static str, Vec<f64>)>,
}

impl HourlyColumns {
    /// Physical-measurement column by canonical name.
    ///
    /// Every float name in [`CANONICAL_FIELDS`] is present; the lookup is
    /// infallible for schema names.
    pub fn physical(&self, name: &str) -> &[f64] {
        self.floats
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, values)| values.as_slice())
            .expect("canonical schema column")
    }

    /// All float columns in canonical order, for table assembly.
    pub fn physicals(&self) -> &[(&'static str, Vec<f64>)] {
        &self.floats
    }
}

pub fn parse_header(line: &str) -> Result<EpwHeader, WeatherFileError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    // LOCATION tag, city/state/country, then at least the four trailing
    // numeric fields somewhere after.
    if fields.len() < 8 {
        return Err(WeatherFileError::HeaderTooShort {
            expected: 8,
            found: fields.len(),
        });
    }

    let tail = |offset_from_end: usize| fields[fields.len() - offset_from_end];
    let numeric = |field: &'static str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|source| WeatherFileError::HeaderFieldParse {
                field,
                value: value.to_string(),
                source,
            })
    };

    Ok(EpwHeader {
        latitude: numeric("latitude", tail(4))?,
        longitude: numeric("longitude", tail(3))?,
        utc_offset_hours: numeric("utc_offset", tail(2))?,
        elevation: tail(1).to_string(),
        city: fields[1].to_string(),
        state: fields[2].to_string(),
        country: fields[3].to_string(),
    })
}

/// Extracts the reference-period tag some file families embed on header
/// line 5, e.g. `cord='2007-2021;'`. Absence is not an error; the period is
/// inferred from the data's year span instead.
pub fn reference_period_tag(lines: &[String]) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r#"cord=['"]?([^'" >]+);"#).expect("reference-period pattern")
    });

    lines
        .get(REFERENCE_PERIOD_LINE)
        .and_then(|line| pattern.captures(line))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Derives a decade-window reference period from the parsed year column:
/// a single year rounds up to its decade, a multi-year span rounds outward
/// to whole decades.
pub fn infer_reference_period(years: &[i32]) -> String {
    let min = years.iter().copied().min().unwrap_or(0);
    let max = years.iter().copied().max().unwrap_or(0);

    let ceil_decade = |year: i32| (f64::from(year) / 10.0).ceil() as i32 * 10;
    let floor_decade = |year: i32| (f64::from(year) / 10.0).floor() as i32 * 10;

    if min == max {
        let upper = ceil_decade(min);
        format!("{}-{}", upper - 10, upper)
    } else {
        format!("{}-{}", floor_decade(min), ceil_decade(max))
    }
}

/// Parses the hourly block (lines 8..8768) into typed columns.
///
/// All rows must share one post-reduction width. A width below the canonical
/// 29 marks a variant file: the columns beyond that width are filled with the
/// sentinel for every row. A width above the schema, or differing between
/// rows, is an error.
pub fn parse_hourly_block(lines: &[String]) -> Result<HourlyColumns, WeatherFileError> {
    let available = lines.len().saturating_sub(HOURLY_BLOCK_START);
    if available < HOURS_PER_YEAR {
        return Err(WeatherFileError::HourlyBlockTooShort {
            expected: HOURS_PER_YEAR,
            found: available,
        });
    }
    let rows = &lines[HOURLY_BLOCK_START..HOURLY_BLOCK_START + HOURS_PER_YEAR];

    let mut width = 0;
    let mut ints: Vec<Vec<i32>> = vec![Vec::with_capacity(HOURS_PER_YEAR); 4];
    let mut floats: Vec<(&'static str, Vec<f64>)> = CANONICAL_FIELDS[4..]
        .iter()
        .map(|field| (field.name, Vec::with_capacity(HOURS_PER_YEAR)))
        .collect();

    for (row_idx, line) in rows.iter().enumerate() {
        let mut fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        reduce_row(&mut fields);

        if row_idx == 0 {
            width = fields.len();
            if width > CANONICAL_FIELDS.len() {
                return Err(WeatherFileError::RowWidthMismatch {
                    row: row_idx,
                    expected: CANONICAL_FIELDS.len(),
                    found: width,
                });
            }
        } else if fields.len() != width {
            return Err(WeatherFileError::RowWidthMismatch {
                row: row_idx,
                expected: width,
                found: fields.len(),
            });
        }

        for (col_idx, field) in CANONICAL_FIELDS.iter().enumerate() {
            let raw = fields.get(col_idx).copied();
            match field.kind {
                FieldKind::Int => {
                    ints[col_idx].push(parse_int(field, raw, row_idx)?);
                }
                FieldKind::Float => {
                    floats[col_idx - 4].1.push(parse_float(field, raw, row_idx)?);
                }
            }
        }
    }

    let mut columns = ints.into_iter();
    Ok(HourlyColumns {
        years: columns.next().unwrap_or_default(),
        months: columns.next().unwrap_or_default(),
        days: columns.next().unwrap_or_default(),
        hours: columns.next().unwrap_or_default(),
        floats,
    })
}

fn parse_int(
    field: &EpwField,
    raw: Option<&str>,
    row: usize,
) -> Result<i32, WeatherFileError> {
    match raw {
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| WeatherFileError::FieldParse {
                column: field.name,
                row,
                value: value.to_string(),
            }),
        None => Ok(SENTINEL_MISSING as i32),
    }
}

fn parse_float(
    field: &EpwField,
    raw: Option<&str>,
    row: usize,
) -> Result<f64, WeatherFileError> {
    match raw {
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| WeatherFileError::FieldParse {
                column: field.name,
                row,
                value: value.to_string(),
            }),
        None => Ok(SENTINEL_MISSING),
    }
}
