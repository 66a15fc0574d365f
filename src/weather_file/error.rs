use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherFileError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response body from {0}")]
    BodyDecode(String, #[source] reqwest::Error),

    #[error("Failed to open zip archive downloaded from {0}")]
    ZipArchive(String, #[source] zip::result::ZipError),

    #[error("Failed to read member '{member}' of zip archive from {url}")]
    ZipMemberRead {
        url: String,
        member: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip archive from {0} contains no EPW member")]
    NoEpwMember(String),

    #[error("Weather file has {found} lines, expected at least {expected}")]
    TooFewLines { expected: usize, found: usize },

    #[error("Location header has {found} fields, expected at least {expected}")]
    HeaderTooShort { expected: usize, found: usize },

    #[error("Failed to parse header field '{field}' from '{value}'")]
    HeaderFieldParse {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Hourly block has {found} rows, expected {expected}")]
    HourlyBlockTooShort { expected: usize, found: usize },

    #[error("Hourly row {row} has {found} fields after reduction, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse column '{column}' on hourly row {row} from '{value}'")]
    FieldParse {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("Hourly row {row} has an invalid calendar date {year}-{month}-{day}")]
    InvalidDate {
        row: usize,
        year: i32,
        month: i32,
        day: i32,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
