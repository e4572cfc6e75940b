// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the monitor.
//!
//! Unparseable values fall back to the default; range checks happen in
//! [`crate::MonitorConfig`].

use std::time::Duration;

pub const DEFAULT_SERVER: &str = "http://localhost:8099";
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(5000);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Backend origin (`SW_SERVER`)
pub fn server() -> String {
    std::env::var("SW_SERVER")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

/// Path the UI is served under, used for ingress detection (`SW_PAGE_PATH`)
pub fn page_path() -> String {
    std::env::var("SW_PAGE_PATH").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "/".to_string())
}

/// Supervisor bearer token, when running inside Home Assistant
pub fn supervisor_token() -> Option<String> {
    std::env::var("SUPERVISOR_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Poll cadence (`SW_REFRESH_MS`, default 5s)
pub fn refresh_interval() -> Duration {
    std::env::var("SW_REFRESH_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REFRESH)
}

/// Start polling on attach (`SW_AUTO_REFRESH`, default true)
pub fn auto_refresh() -> bool {
    std::env::var("SW_AUTO_REFRESH").ok().and_then(|s| parse_bool(&s)).unwrap_or(true)
}

/// Registry request timeout (`SW_HTTP_TIMEOUT_MS`, default 10s)
pub fn http_timeout() -> Duration {
    std::env::var("SW_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT)
}

/// Broadcast capacity for view notifications (`SW_EVENT_CAPACITY`)
pub fn event_capacity() -> usize {
    std::env::var("SW_EVENT_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_EVENT_CAPACITY)
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
