// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for monitor setup and lifecycle calls

use crate::controller::MonitorState;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("refresh interval must be positive")]
    ZeroRefreshInterval,

    #[error("{0} must be positive")]
    ZeroCapacity(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("invalid server url {url:?}: {source}")]
    InvalidServer {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported server scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("server url {0} has no host")]
    NoHost(String),
}

/// A lifecycle call made in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("cannot {op} while {state}")]
    InvalidTransition { op: &'static str, state: MonitorState },
}
