// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived display fields, recomputed on every render.

use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;
use sw_core::{format_duration, format_duration_ms, Job, ProgressSnapshot, ScanId, ScanStatus};

/// Time a scan is assumed to take when no real progress has arrived.
pub const HEURISTIC_BASELINE_MS: u64 = 30_000;

/// The heuristic never claims more than this.
pub const HEURISTIC_CEILING: f64 = 95.0;

/// `end-or-now - start`, formatted.
pub fn duration_label(job: &Job, now_ms: u64) -> String {
    format_duration_ms(job.elapsed_ms(now_ms))
}

/// Completion in percent, `0.0..=100.0`.
///
/// Real counts win. A completed scan with no counts is 100. Anything else is
/// estimated from elapsed time against [`HEURISTIC_BASELINE_MS`], capped at
/// [`HEURISTIC_CEILING`].
pub fn completion_percent(job: &Job, snapshot: Option<&ProgressSnapshot>, now_ms: u64) -> f64 {
    if let Some(fraction) = snapshot.and_then(ProgressSnapshot::fraction) {
        return fraction * 100.0;
    }
    if job.status == ScanStatus::Completed {
        return 100.0;
    }
    let estimate = job.elapsed_ms(now_ms) as f64 / HEURISTIC_BASELINE_MS as f64 * 100.0;
    estimate.min(HEURISTIC_CEILING)
}

/// `Analyzing {file} ({done}/{total})` while a file is known, else `{n} files`.
///
/// Control characters in the file name are shown as `?` so a label is always
/// one line.
pub fn progress_label(job: &Job, snapshot: Option<&ProgressSnapshot>) -> String {
    match snapshot {
        Some(ProgressSnapshot { current_file: Some(file), completed_files, total_files, .. }) => {
            let file: String = file.chars().map(|c| if c.is_control() { '?' } else { c }).collect();
            format!("Analyzing {file} ({completed_files}/{total_files})")
        }
        _ => format!("{} files", job.file_count.unwrap_or(0)),
    }
}

/// Age of the last applied poll, or `never`.
pub fn last_update_label(since: Option<Duration>) -> String {
    match since {
        Some(age) => format_duration(age.as_secs()),
        None => "never".to_string(),
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanView {
    pub id: ScanId,
    pub status: ScanStatus,
    pub duration: String,
    pub percent: f64,
    pub label: String,
    pub live: bool,
}

impl ScanView {
    /// `live` marks scans with real pushed counts.
    pub fn derive(job: &Job, snapshot: Option<&ProgressSnapshot>, now_ms: u64) -> Self {
        Self {
            id: job.id.clone(),
            status: job.status,
            duration: duration_label(job, now_ms),
            percent: completion_percent(job, snapshot, now_ms),
            label: progress_label(job, snapshot),
            live: snapshot.is_some(),
        }
    }

    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.percent.floor())
    }
}

/// Column widths shared by the header and every row of one table.
#[derive(Debug, Clone, Copy)]
pub struct ListLayout {
    id_width: usize,
}

impl ListLayout {
    pub fn for_views(views: &[ScanView]) -> Self {
        let id_width = views.iter().map(|v| v.id.as_str().len()).max().unwrap_or(0).max(2);
        Self { id_width }
    }

    pub fn header(&self) -> String {
        let id_width = self.id_width;
        format!("{:<id_width$}  {:<9}  {:<8}  {:>4}  DETAIL", "ID", "STATUS", "DURATION", "DONE")
    }

    pub fn row(&self, view: &ScanView) -> String {
        let id_width = self.id_width;
        format!(
            "{:<id_width$}  {:<9}  {:<8}  {:>4}  {}",
            view.id.as_str(),
            view.status.to_string(),
            view.duration,
            view.percent_label(),
            view.label
        )
    }
}

/// Table of every scan, one per line, with a header.
pub fn render_list(views: &[ScanView]) -> String {
    if views.is_empty() {
        return "No scans\n".to_string();
    }
    let layout = ListLayout::for_views(views);
    let mut out = String::new();
    let _ = writeln!(out, "{}", layout.header());
    for view in views {
        let _ = writeln!(out, "{}", layout.row(view));
    }
    out
}

/// Single-line summary of one scan.
pub fn render_compact(view: &ScanView) -> String {
    format!(
        "scan {} {} {} ({}) {}",
        view.id,
        view.status,
        view.percent_label(),
        view.duration,
        view.label
    )
}

#[cfg(test)]
#[path = "presentation_tests.rs"]
mod tests;
