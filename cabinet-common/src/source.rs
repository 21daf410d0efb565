//! CSV acquisition
//!
//! One fetch per run: no retry, no backoff. A missing location is reported as
//! [`Error::SourceUnavailable`] and any unsuccessful fetch as
//! [`Error::FetchFailed`]; the caller shows either instead of a catalog.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::{Error, Result};

/// Where the lesson sheet comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    /// Published sheet URL (`http://` or `https://`)
    Url(String),
    /// Local CSV file, e.g. the bundled sample sheet
    File(PathBuf),
}

impl CsvSource {
    /// Reject empty locations up front
    pub fn validate(&self) -> Result<()> {
        let empty = match self {
            CsvSource::Url(url) => url.trim().is_empty(),
            CsvSource::File(path) => path.as_os_str().is_empty(),
        };
        if empty {
            Err(Error::SourceUnavailable)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Display for CsvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvSource::Url(url) => write!(f, "{}", url),
            CsvSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw sheet text
pub async fn fetch_csv(source: &CsvSource) -> Result<String> {
    source.validate()?;
    info!("Loading lessons from {}", source);

    let text = match source {
        CsvSource::Url(url) => fetch_url(url).await?,
        CsvSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::FetchFailed(format!("{}: {}", path.display(), e)))?,
    };

    debug!("Fetched {} bytes of CSV", text.len());
    Ok(text)
}

async fn fetch_url(url: &str) -> Result<String> {
    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| Error::FetchFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::FetchFailed(format!("HTTP {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| Error::FetchFailed(e.to_string()))
}
