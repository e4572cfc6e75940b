// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan registry: the sole polling source for the job list

mod http;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use http::HttpScanRegistry;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeScanRegistry;

use async_trait::async_trait;
use sw_core::Job;
use sw_wire::WireError;
use thiserror::Error;

/// A poll that could not complete. Callers log it and try again next tick.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] WireError),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connect(e.to_string())
        }
    }
}

/// Source of the full job list.
#[async_trait]
pub trait ScanRegistry: Clone + Send + Sync + 'static {
    /// Jobs in backend order, duplicates included.
    async fn fetch(&self) -> Result<Vec<Job>, TransportError>;
}
