// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry backed by the add-on's HTTP API.

use super::{ScanRegistry, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use sw_core::Job;
use url::Url;

/// Polls `GET {list_url}` and decodes the job list.
#[derive(Clone)]
pub struct HttpScanRegistry {
    client: Client,
    list_url: Url,
}

impl HttpScanRegistry {
    /// `token` is sent as a bearer credential on every request.
    pub fn new(
        list_url: Url,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| TransportError::Client(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client, list_url })
    }

    pub fn list_url(&self) -> &Url {
        &self.list_url
    }
}

#[async_trait]
impl ScanRegistry for HttpScanRegistry {
    async fn fetch(&self) -> Result<Vec<Job>, TransportError> {
        let response = self.client.get(self.list_url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body });
        }
        let jobs = sw_wire::decode_scan_list(&body)?;
        tracing::debug!(url = %self.list_url, count = jobs.len(), "fetched scan list");
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
