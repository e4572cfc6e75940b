// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events pushed over a scan's live channel.
//!
//! Frames look like `{"type": "progress", "progress": {...}, ...}`. Only
//! `progress` and `update` carry meaning here; every other type is passed
//! through as [`PushEvent::Other`] so the caller can ignore it.

use crate::error::DecodeError;
use serde::{Deserialize, Deserializer};
use sw_core::ProgressSnapshot;

/// File counts carried by a push event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgressPayload {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub completed_files: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_files: u64,
    #[serde(default)]
    pub current_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    Progress(ProgressPayload),
    /// Status change, optionally with fresh counts
    Update(Option<ProgressPayload>),
    /// Unrecognized type, kept for logging
    Other(String),
}

impl PushEvent {
    pub fn event_type(&self) -> &str {
        match self {
            PushEvent::Progress(_) => "progress",
            PushEvent::Update(_) => "update",
            PushEvent::Other(kind) => kind,
        }
    }

    /// Snapshot to store for this event, if it carries counts.
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        let payload = match self {
            PushEvent::Progress(p) | PushEvent::Update(Some(p)) => p,
            PushEvent::Update(None) | PushEvent::Other(_) => return None,
        };
        Some(ProgressSnapshot {
            completed_files: payload.completed_files,
            total_files: payload.total_files,
            current_file: payload.current_file.clone().filter(|name| !name.is_empty()),
            event_type: self.event_type().to_string(),
        })
    }
}

#[derive(Deserialize)]
struct RawPush {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    progress: Option<ProgressPayload>,
}

/// Decode one text frame.
pub fn decode_push(text: &str) -> Result<PushEvent, DecodeError> {
    let raw: RawPush = serde_json::from_str(text)?;
    match raw.kind.as_str() {
        "progress" => raw
            .progress
            .map(PushEvent::Progress)
            .ok_or(DecodeError::MissingProgress { kind: raw.kind }),
        "update" => Ok(PushEvent::Update(raw.progress)),
        _ => Ok(PushEvent::Other(raw.kind)),
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
