// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-engine: keeps a live view of scan progress
//!
//! Polling (via [`sw_adapters::ScanRegistry`]) decides which scans are active;
//! one push channel per active scan (via [`sw_adapters::ChannelConnector`])
//! fills in fine-grained progress. [`Monitor`] owns both and the store they
//! write to.

pub mod channels;
pub mod config;
pub mod controller;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod events;
pub mod presentation;
pub mod store;

pub use channels::{ChannelManager, ChannelState};
pub use config::MonitorConfig;
pub use controller::{Monitor, MonitorState, PollOutcome};
pub use endpoint::Endpoint;
pub use error::{ConfigError, EndpointError, MonitorError};
pub use events::MonitorEvent;
pub use presentation::{render_compact, render_list, ListLayout, ScanView};
pub use store::{ProgressStore, SharedStore};
