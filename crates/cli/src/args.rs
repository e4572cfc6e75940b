// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line flags. Anything not given falls back to the environment.

use crate::output::OutputFormat;
use clap::Parser;

pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "scanwatch",
    version = VERSION,
    about = "Watch configuration scans and their live progress",
    after_help = "Interactive keys (type, then Enter): t toggle polling, r refresh now, q quit",
    styles = crate::color::styles()
)]
pub struct Cli {
    /// Backend origin [env: SW_SERVER] [default: http://localhost:8099]
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Path the UI is served under, for ingress detection [env: SW_PAGE_PATH]
    #[arg(long, value_name = "PATH")]
    pub page_path: Option<String>,

    /// Bearer token [env: SUPERVISOR_TOKEN]
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Poll cadence in milliseconds [env: SW_REFRESH_MS] [default: 5000]
    #[arg(long, value_name = "MS")]
    pub refresh_ms: Option<u64>,

    /// Do not poll on start; fetch once and wait for `t` [env: SW_AUTO_REFRESH=false]
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Show a single scan on one line
    #[arg(long, value_name = "ID")]
    pub scan: Option<String>,

    /// Poll once, print, and exit
    #[arg(long)]
    pub once: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
