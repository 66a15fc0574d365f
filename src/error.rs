use crate::weather_file::error::WeatherFileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimaError {
    #[error(transparent)]
    WeatherFile(#[from] WeatherFileError),

    #[error("No weather data available at '{url}'")]
    NoData { url: String },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
