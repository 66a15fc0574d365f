mod clima;
mod comfort;
mod error;
mod metrics;
mod solar;
mod types;
mod weather_file;

pub use clima::Clima;
pub use error::ClimaError;

pub use metrics::{MetricDescriptor, MetricRegistry};
pub use solar::SolarPosition;

pub use comfort::psychrometrics::{psy_ta_rh, Psychrometrics};
pub use comfort::solar_gain::{solar_gain, Posture, SolarGain};
pub use comfort::utci::{stress_category, utci, STRESS_BIN_EDGES, STRESS_LABELS};

pub use types::epw_data::EpwData;
pub use types::location::Location;

pub use weather_file::enricher::enrich;
pub use weather_file::error::WeatherFileError;
pub use weather_file::fetcher::EpwFetcher;
pub use weather_file::parser::{EpwHeader, HourlyColumns};
pub use weather_file::schema::{
    EpwField, FieldKind, CANONICAL_FIELDS, HOURS_PER_YEAR, SENTINEL_MISSING,
};
