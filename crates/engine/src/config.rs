// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor tuning: poll cadence, auto-refresh, queue sizes

use crate::env;
use crate::error::ConfigError;
use std::time::Duration;

/// Buffered channel messages between channel tasks and the monitor.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    refresh_interval: Duration,
    auto_refresh: bool,
    event_capacity: usize,
    channel_buffer: usize,
}

impl MonitorConfig {
    pub fn new(refresh_interval: Duration, auto_refresh: bool) -> Result<Self, ConfigError> {
        Self { refresh_interval, auto_refresh, ..Self::default() }.validated()
    }

    /// Read every setting from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self {
            refresh_interval: env::refresh_interval(),
            auto_refresh: env::auto_refresh(),
            event_capacity: env::event_capacity(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
        .validated()
    }

    pub fn with_refresh_interval(self, refresh_interval: Duration) -> Result<Self, ConfigError> {
        Self { refresh_interval, ..self }.validated()
    }

    pub fn with_auto_refresh(self, auto_refresh: bool) -> Self {
        Self { auto_refresh, ..self }
    }

    pub fn with_event_capacity(self, event_capacity: usize) -> Result<Self, ConfigError> {
        Self { event_capacity, ..self }.validated()
    }

    pub fn with_channel_buffer(self, channel_buffer: usize) -> Result<Self, ConfigError> {
        Self { channel_buffer, ..self }.validated()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    pub fn channel_buffer(&self) -> usize {
        self.channel_buffer
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("event capacity"));
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::ZeroCapacity("channel buffer"));
        }
        Ok(self)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: env::DEFAULT_REFRESH,
            auto_refresh: true,
            event_capacity: env::DEFAULT_EVENT_CAPACITY,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
