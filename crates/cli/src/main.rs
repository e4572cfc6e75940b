// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scanwatch: terminal view of configuration scans and their live progress

mod args;
mod color;
mod exit_error;
mod output;
mod watch;

use args::Cli;
use clap::Parser;
use exit_error::ExitError;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with rendered frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = watch::run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("error: {}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
