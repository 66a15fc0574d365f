//! The main entry point for fetching and enriching EPW weather files.

use crate::error::ClimaError;
use crate::types::epw_data::EpwData;
use crate::weather_file::enricher::enrich;
use crate::weather_file::fetcher::EpwFetcher;
use bon::bon;
use log::info;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;

/// Client for turning weather-file URLs into enriched hourly tables.
///
/// Holds one HTTP client and an in-memory cache of enriched results keyed by
/// URL, so repeated requests for the same file neither refetch nor recompute.
/// The underlying [`EpwFetcher::fetch`] and [`enrich`] functions stay
/// cache-free and can be called directly when recomputation is wanted.
///
/// # Examples
///
/// ```no_run
/// # use clima::{Clima, ClimaError};
/// # async fn run() -> Result<(), ClimaError> {
/// let client = Clima::new();
/// let data = client
///     .weather()
///     .url("https://energyplus.net/weather-download/.../USA_CA_Oakland.Intl.AP.724930_TMY.epw")
///     .call()
///     .await?;
/// println!("{} in {}", data.location.city, data.location.country);
/// println!("{}", data.table.head(Some(5)));
/// # Ok(())
/// # }
/// ```
pub struct Clima {
    fetcher: EpwFetcher,
    table_cache: Mutex<HashMap<String, Arc<EpwData>>>,
}

#[bon]
impl Clima {
    /// Creates a client with a default HTTP client.
    pub fn new() -> Self {
        Self {
            fetcher: EpwFetcher::new(),
            table_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a client around a caller-configured `reqwest::Client`
    /// (custom timeouts, proxies, …).
    pub fn with_http_client(client: reqwest::Client) -> Self {
        Self {
            fetcher: EpwFetcher::with_client(client),
            table_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches and enriches the weather file behind `url`.
    ///
    /// This method uses a builder pattern:
    ///
    /// * `.url(&str)`: **Required.** The EPW resource: a raw text file, or a
    ///   zip archive (URL ending in `zip` or `all`) containing one.
    ///
    /// # Returns
    ///
    /// A shared [`EpwData`] with the 8,760-row hourly table and the location
    /// record. Results are cached per URL for the lifetime of the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::NoData`] when the URL yields nothing (404, dead
    /// host, or an archive without an EPW member; the fetcher treats those
    /// as "no data"). Returns [`ClimaError::WeatherFile`] when the fetched
    /// file is malformed (short header, truncated hourly block, unparseable
    /// fields).
    #[builder]
    pub async fn weather(&self, url: &str) -> Result<Arc<EpwData>, ClimaError> {
        {
            let cache = self.table_cache.lock().await;
            if let Some(data) = cache.get(url) {
                info!("Cache hit for {url}");
                return Ok(data.clone());
            }
        }

        let lines = self
            .fetcher
            .fetch(url)
            .await
            .ok_or_else(|| ClimaError::NoData {
                url: url.to_string(),
            })?;

        // The enrichment is pure CPU over 8,760 rows; keep it off the
        // async executor.
        let url_owned = url.to_string();
        let (table, location) =
            task::spawn_blocking(move || enrich(&lines, &url_owned)).await??;
        let data = Arc::new(EpwData { table, location });

        let mut cache = self.table_cache.lock().await;
        match cache.entry(url.to_string()) {
            Entry::Occupied(entry) => {
                // A concurrent request finished first; keep its result.
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                entry.insert(data.clone());
                Ok(data)
            }
        }
    }
}

impl Default for Clima {
    fn default() -> Self {
        Self::new()
    }
}
