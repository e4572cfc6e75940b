// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job list returned by `GET /api/scan/`.

use crate::error::WireError;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use sw_core::{Job, ScanId, ScanStatus};

/// Naive timestamps carry no offset and are UTC on the backend.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Primary keys are integers today; strings are accepted as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(u64),
    Str(String),
}

impl From<RawId> for ScanId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => ScanId::from(n),
            RawId::Str(s) => ScanId::from(s),
        }
    }
}

/// One element of the job list. Unknown fields (`suggestions`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanEntry {
    id: RawId,
    pub status: ScanStatus,
    pub started_at: String,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub file_count: Option<u64>,
}

impl ScanEntry {
    pub fn into_job(self) -> Result<Job, WireError> {
        let id = ScanId::from(self.id);
        let started_at_ms = parse_timestamp_ms(&self.started_at).ok_or_else(|| {
            WireError::Timestamp {
                id: id.clone(),
                field: "started_at",
                value: self.started_at.clone(),
            }
        })?;
        let ended_at_ms = match self.ended_at {
            Some(value) => Some(parse_timestamp_ms(&value).ok_or_else(|| WireError::Timestamp {
                id: id.clone(),
                field: "ended_at",
                value: value.clone(),
            })?),
            None => None,
        };
        Ok(Job { id, status: self.status, started_at_ms, ended_at_ms, file_count: self.file_count })
    }
}

/// Decode a job list body, keeping backend order and any duplicates.
///
/// An entry with an unreadable timestamp is skipped so the rest of the poll
/// still applies. A body that is not a list of entries fails as a whole.
pub fn decode_scan_list(body: &str) -> Result<Vec<Job>, WireError> {
    let entries: Vec<ScanEntry> = serde_json::from_str(body)?;
    let jobs = entries
        .into_iter()
        .filter_map(|entry| match entry.into_job() {
            Ok(job) => Some(job),
            Err(e) => {
                tracing::warn!(error = %e, "skipping scan entry");
                None
            }
        })
        .collect();
    Ok(jobs)
}

/// Parse an ISO 8601 timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 with an offset, or a naive value which is taken as UTC.
/// Instants before the epoch are rejected.
pub fn parse_timestamp_ms(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return u64::try_from(dt.timestamp_millis()).ok();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| u64::try_from(naive.and_utc().timestamp_millis()).ok())
}

#[cfg(test)]
#[path = "scan_list_tests.rs"]
mod tests;
