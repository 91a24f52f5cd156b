//! Remote provider over the geo-dvf HTTP layout.

use std::time::Duration;

use dvf_model::DatasetKey;
use polars::prelude::DataFrame;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use super::{DatasetProvider, relative_stem};
use crate::error::{IngestError, Result};
use crate::payload::decode_table;

/// Public geo-dvf CSV export.
pub const DEFAULT_DATASET_BASE_URL: &str = "https://files.data.gouv.fr/geo-dvf/latest/csv";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            user_agent: format!("dvf-explorer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build a blocking client with the configured timeout.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| IngestError::HttpClient(e.to_string()))
}

/// GET `url`. A 404 is reported as `Ok(None)`; other failures are errors.
pub fn fetch_bytes(client: &Client, config: &HttpConfig, url: &str) -> Result<Option<Vec<u8>>> {
    debug!(url, "GET");
    let response = client
        .get(url)
        .header(USER_AGENT, &config.user_agent)
        .send()
        .map_err(|e| IngestError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!(url, "not found");
        return Ok(None);
    }
    if !status.is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(|e| IngestError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(body.to_vec()))
}

/// Fetches `<base>/<year>/departements/<department>.csv.gz`.
pub struct HttpProvider {
    base_url: String,
    config: HttpConfig,
    client: Client,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>, config: HttpConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dataset_url(&self, key: &DatasetKey) -> String {
        format!("{}/{}.csv.gz", self.base_url, relative_stem(key))
    }
}

impl DatasetProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, key: &DatasetKey) -> Result<Option<DataFrame>> {
        let url = self.dataset_url(key);
        match fetch_bytes(&self.client, &self.config, &url)? {
            Some(bytes) => decode_table(bytes, &url),
            None => Ok(None),
        }
    }
}
