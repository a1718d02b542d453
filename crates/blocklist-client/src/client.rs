//! Blocklist HTTP client.

use crate::error::BlocklistError;
use crate::types::*;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Registry API client.
///
/// Requests are awaited to completion. No retries are attempted and no
/// timeout is applied unless one is configured.
#[derive(Clone)]
pub struct BlocklistClient {
    client: Client,
    base_url: String,
}

impl BlocklistClient {
    /// Create a new client with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BlocklistError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a new client, optionally bounding every request by `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, BlocklistError> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| BlocklistError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the registry server is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Look up a phone number.
    ///
    /// Returns `Ok(None)` when the server answers 404.
    #[instrument(skip(self))]
    pub async fn search(&self, phone: &str) -> Result<Option<BlocklistEntry>, BlocklistError> {
        let response = self.client.get(self.entry_url(phone)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Number not in blocklist");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.bytes().await?;
        let entry: BlocklistEntry = serde_json::from_slice(&body)?;
        debug!(phone_number = %entry.phone_number, "Found blocklist entry");
        Ok(Some(entry))
    }

    /// Add or update a blocklist entry. The response body is ignored.
    #[instrument(skip(self, entry), fields(phone_number = %entry.phone_number))]
    pub async fn create(&self, entry: &NewEntry) -> Result<(), BlocklistError> {
        let response = self
            .client
            .post(format!("{}/api/blocklist", self.base_url))
            .json(entry)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("Create failed: {}", err);
            return Err(err);
        }

        debug!("Entry created");
        Ok(())
    }

    /// Remove a phone number from the blocklist.
    #[instrument(skip(self))]
    pub async fn delete(&self, phone: &str) -> Result<(), BlocklistError> {
        let response = self.client.delete(self.entry_url(phone)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Delete target not found");
            return Err(BlocklistError::NotFound(phone.to_string()));
        }

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("Delete failed: {}", err);
            return Err(err);
        }

        debug!("Entry deleted");
        Ok(())
    }

    /// List every blocked number, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<EntrySummary>, BlocklistError> {
        let response = self
            .client
            .get(format!("{}/api/blocklist/all", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let entries: Vec<EntrySummary> = response.json().await?;
        debug!("Listed {} entries", entries.len());
        Ok(entries)
    }

    fn entry_url(&self, phone: &str) -> String {
        format!("{}/api/blocklist?phone={}", self.base_url, encode(phone))
    }
}

async fn api_error(response: reqwest::Response) -> BlocklistError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    BlocklistError::Api { status, body }
}
