// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sw_core::ScanId;
use thiserror::Error;

/// A job list body that could not be turned into jobs.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed scan list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scan {id}: invalid {field} timestamp {value:?}")]
    Timestamp { id: ScanId, field: &'static str, value: String },
}

/// A push frame that could not be decoded. Only that one frame is dropped.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed push event: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} event without a progress payload")]
    MissingProgress { kind: String },
}
