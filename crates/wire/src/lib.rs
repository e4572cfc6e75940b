// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON payloads exchanged with the scan backend.
//!
//! Two shapes: the polled job list (`GET /api/scan/`) and the events pushed
//! over a scan's live channel (`/ws/scan/{id}`).

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod push;
mod scan_list;

pub use error::{DecodeError, WireError};
pub use push::{decode_push, ProgressPayload, PushEvent};
pub use scan_list::{decode_scan_list, parse_timestamp_ms, ScanEntry};
