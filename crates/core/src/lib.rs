// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-core: data model shared by the scan progress monitor crates

pub mod macros;

pub mod clock;
pub mod id;
pub mod scan;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use id::ScanId;
#[cfg(any(test, feature = "test-support"))]
pub use scan::JobBuilder;
pub use scan::{ActiveSet, Job, ProgressSnapshot, ScanStatus};
pub use time_fmt::{format_duration, format_duration_ms};
