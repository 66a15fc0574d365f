use serde::Serialize;

/// Location and provenance metadata for one weather file.
///
/// Built once per fetch from the file's header (plus the reference-period
/// inference) and immutable afterwards. Serializable so the consuming
/// dashboard can keep it in its session store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// The URL the file was fetched from.
    pub source_url: String,
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    /// Offset of the file's local time from UTC, hours.
    pub utc_offset_hours: f64,
    /// Site elevation as written in the header; no consumer interprets the
    /// unit, so the raw string is kept.
    pub elevation: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Reference period of the record, e.g. "1990-2010"; taken from the
    /// embedded tag when present, otherwise inferred from the year span.
    pub reference_period: String,
}
