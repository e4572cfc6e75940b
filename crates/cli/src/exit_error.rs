// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! `run` returns `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to detach the monitor before terminating.

use std::fmt;

/// The backend could not be reached or answered badly.
pub const EXIT_POLL_FAILED: i32 = 1;
/// Flags or environment did not make sense.
pub const EXIT_USAGE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn usage(message: impl fmt::Display) -> Self {
        Self::new(EXIT_USAGE, message.to_string())
    }

    pub fn poll_failed(message: impl fmt::Display) -> Self {
        Self::new(EXIT_POLL_FAILED, message.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
