//! Canonical schema for EPW hourly records.
//!
//! EPW data lines carry up to 35 positional fields. The dashboard keeps 29 of
//! them; the reduction (which raw positions are discarded) and the canonical
//! names/types live here so the parser never does index arithmetic of its own.

/// Sentinel for columns a file variant does not supply.
///
/// EPW itself uses 9999-style markers for missing readings, so downstream
/// code can treat "column absent from this variant" and "reading missing"
/// uniformly.
pub const SENTINEL_MISSING: f64 = 9999.0;

/// Hourly rows in a canonical non-leap reference year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Line index of the first hourly record; lines 0..8 are header metadata.
pub const HOURLY_BLOCK_START: usize = 8;

/// Header line index that may carry a `cord='…;'` reference-period tag.
pub const REFERENCE_PERIOD_LINE: usize = 5;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Calendar component, coerced to integer.
    Int,
    /// Physical measurement, coerced to float.
    Float,
}

#[derive(Debug, Clone, Copy)]
pub struct EpwField {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn int(name: &'static str) -> EpwField {
    EpwField {
        name,
        kind: FieldKind::Int,
    }
}

const fn float(name: &'static str) -> EpwField {
    EpwField {
        name,
        kind: FieldKind::Float,
    }
}

/// The 29 canonical hourly columns, in table order.
pub const CANONICAL_FIELDS: [EpwField; 29] = [
    int("year"),
    int("month"),
    int("day"),
    int("hour"),
    float("DBT"),
    float("DPT"),
    float("RH"),
    float("p_atm"),
    float("extr_hor_rad"),
    float("hor_ir_rad"),
    float("glob_hor_rad"),
    float("dir_nor_rad"),
    float("dif_hor_rad"),
    float("glob_hor_ill"),
    float("dir_nor_ill"),
    float("dif_hor_ill"),
    float("Zlumi"),
    float("wind_dir"),
    float("wind_speed"),
    float("tot_sky_cover"),
    float("Oskycover"),
    float("Vis"),
    float("Cheight"),
    float("PWobs"),
    float("PWcodes"),
    float("Pwater"),
    float("AsolOptD"),
    float("SnowD"),
    float("DaySSnow"),
];

/// Discards the raw positions the canonical schema never keeps: the minute
/// and data-source flag fields (raw 4..6), the extraterrestrial direct normal
/// radiation channel (position 9 after the first shift), and the trailing
/// albedo / liquid-precipitation fields (last three).
pub fn reduce_row(fields: &mut Vec<&str>) {
    if fields.len() >= 6 {
        fields.drain(4..6);
    }
    if fields.len() > 9 {
        fields.remove(9);
    }
    fields.truncate(fields.len().saturating_sub(3));
}
