//! Retrieval of raw EPW text from user-supplied URLs.
//!
//! The fetcher is the defensive half of the pipeline: upstream URLs are
//! user-supplied and frequently stale, so every network or decoding fault is
//! logged and collapsed to `None` ("no data") instead of propagating. The
//! enricher downstream is the strict half.

use crate::weather_file::error::WeatherFileError;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0";
const EPW_SUFFIX: &str = "epw";

/// Downloads weather-file text, either directly or from a zip archive whose
/// first EPW-suffixed member is extracted.
pub struct EpwFetcher {
    client: Client,
}

impl EpwFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Uses a caller-provided HTTP client, e.g. one with custom timeouts.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Retrieves the weather file behind `source_url` as text lines.
    ///
    /// URLs ending in `zip` or `all` are treated as zip archives containing
    /// an EPW member; anything else is fetched and decoded directly. Returns
    /// `None` when there is no data to be had: a 404 on the archive path,
    /// or any network/decoding fault (logged, never propagated).
    pub async fn fetch(&self, source_url: &str) -> Option<Vec<String>> {
        match self.try_fetch(source_url).await {
            Ok(lines) => lines,
            Err(error) => {
                warn!("Fetch failed for {source_url}: {error}");
                None
            }
        }
    }

    async fn try_fetch(
        &self,
        source_url: &str,
    ) -> Result<Option<Vec<String>>, WeatherFileError> {
        if is_archive_url(source_url) {
            self.fetch_archive(source_url).await
        } else {
            self.fetch_direct(source_url).await.map(Some)
        }
    }

    async fn fetch_direct(&self, url: &str) -> Result<Vec<String>, WeatherFileError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| WeatherFileError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherFileError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherFileError::BodyDecode(url.to_string(), e))?;
        info!("Downloaded {} bytes from {url}", body.len());
        Ok(body.split('\n').map(str::to_string).collect())
    }

    async fn fetch_archive(
        &self,
        url: &str,
    ) -> Result<Option<Vec<String>>, WeatherFileError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherFileError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("No weather file at {url} (404)");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(WeatherFileError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherFileError::BodyDecode(url.to_string(), e))?;
        info!("Downloaded {} archive bytes from {url}", bytes.len());
        extract_epw_member(&bytes, url).map(Some)
    }
}

impl Default for EpwFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_archive_url(url: &str) -> bool {
    url.ends_with("zip") || url.ends_with("all")
}

/// Reads the first EPW-suffixed member out of an in-memory zip archive and
/// decodes it as UTF-8 text split on newlines.
fn extract_epw_member(bytes: &[u8], url: &str) -> Result<Vec<String>, WeatherFileError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| WeatherFileError::ZipArchive(url.to_string(), e))?;

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| WeatherFileError::ZipArchive(url.to_string(), e))?;
        if !file.name().ends_with(EPW_SUFFIX) {
            continue;
        }

        let member = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|source| WeatherFileError::ZipMemberRead {
                url: url.to_string(),
                member,
                source,
            })?;

        let text = String::from_utf8_lossy(&content);
        return Ok(text.split('\n').map(str::to_string).collect());
    }

    Err(WeatherFileError::NoEpwMember(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with_members(members: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in members {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn archive_urls_are_recognised() {
        assert!(is_archive_url("https://example.org/ITA_Bologna.zip"));
        assert!(is_archive_url("https://example.org/USA_CA_Oakland/all"));
        assert!(!is_archive_url("https://example.org/USA_CA_Oakland.epw"));
    }

    #[test]
    fn first_epw_member_is_extracted() {
        let bytes = zip_with_members(&[
            ("readme.txt", "not weather"),
            ("oakland.epw", "LOCATION,Oakland\n2005,1,1,1"),
            ("other.epw", "LOCATION,Other"),
        ]);
        let lines = extract_epw_member(&bytes, "test.zip").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "LOCATION,Oakland");
        assert_eq!(lines[1], "2005,1,1,1");
    }

    #[test]
    fn archive_without_epw_member_is_an_error() {
        let bytes = zip_with_members(&[("readme.txt", "not weather")]);
        let result = extract_epw_member(&bytes, "test.zip");
        assert!(matches!(result, Err(WeatherFileError::NoEpwMember(_))));
    }

    #[test]
    fn garbage_bytes_are_a_zip_error() {
        let result = extract_epw_member(b"definitely not a zip", "test.zip");
        assert!(matches!(result, Err(WeatherFileError::ZipArchive(_, _))));
    }

    #[tokio::test]
    async fn unreachable_host_yields_none() {
        let fetcher = EpwFetcher::new();
        // Reserved TLD, guaranteed not to resolve.
        let lines = fetcher.fetch("http://weather.invalid/file.epw").await;
        assert!(lines.is_none());
    }
}
