use crate::types::location::Location;
use polars::frame::DataFrame;

/// The result of one fetch-and-enrich pass: the 8,760-row hourly table and
/// the location record it belongs to.
#[derive(Debug, Clone)]
pub struct EpwData {
    pub table: DataFrame,
    pub location: Location,
}
