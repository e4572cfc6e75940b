// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-adapters: I/O boundaries of the scan monitor
//!
//! - [`registry`]: polls the backend for the job list
//! - [`channel`]: opens one live push connection per scan

pub mod channel;
pub mod registry;

pub use channel::{
    ChannelConnector, ChannelError, ChannelEvent, ChannelLink, ChannelMessage, WsConnector,
};
pub use registry::{HttpScanRegistry, ScanRegistry, TransportError};

#[cfg(any(test, feature = "test-support"))]
pub use channel::FakeConnector;
#[cfg(any(test, feature = "test-support"))]
pub use registry::FakeScanRegistry;
