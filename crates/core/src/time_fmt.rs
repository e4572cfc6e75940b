// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations: `45s`, `2m 5s`, `2h 3m`.

/// Format whole seconds. Under a minute shows seconds, under an hour shows
/// minutes and seconds, anything longer shows hours and minutes.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format milliseconds, truncating to whole seconds.
pub fn format_duration_ms(ms: u64) -> String {
    format_duration(ms / 1000)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
