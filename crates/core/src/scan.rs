// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan jobs as reported by the backend, and the progress pushed for them.

use crate::id::ScanId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Status of a scan job.
///
/// Completed and failed are terminal: the backend never moves a job back to
/// pending or running under the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Active scans are the ones that get a live progress channel.
    pub fn is_active(self) -> bool {
        matches!(self, ScanStatus::Pending | ScanStatus::Running)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

crate::simple_display! {
    ScanStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
    }
}

/// One scan operation.
///
/// Owned by the external scan engine. The monitor only observes it: a `Job` is
/// replaced wholesale on every poll and never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: ScanId,
    pub status: ScanStatus,
    /// Epoch milliseconds
    pub started_at_ms: u64,
    /// Epoch milliseconds, set once the scan has finished
    pub ended_at_ms: Option<u64>,
    pub file_count: Option<u64>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Wall time spent so far, measured up to `now_ms` while the job has no end time.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.ended_at_ms.unwrap_or(now_ms).saturating_sub(self.started_at_ms)
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: ScanId = "1",
        }
        set {
            status: ScanStatus = ScanStatus::Running,
            started_at_ms: u64 = 1_000_000,
            ended_at_ms: Option<u64> = None,
            file_count: Option<u64> = None,
        }
    }
}

/// Latest fine-grained progress pushed over a job's live channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub completed_files: u64,
    pub total_files: u64,
    pub current_file: Option<String>,
    /// Push event type that produced this snapshot (`progress`, `update`, ...)
    pub event_type: String,
}

impl ProgressSnapshot {
    /// Completed fraction in `0.0..=1.0`, or `None` when the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        if self.total_files == 0 {
            return None;
        }
        Some((self.completed_files as f64 / self.total_files as f64).min(1.0))
    }
}

/// Ids of the pending and running jobs in a poll result, in poll order.
///
/// Always derived from a job list; never edited independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet(IndexSet<ScanId>);

impl ActiveSet {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        jobs.iter().filter(|job| job.is_active()).map(|job| job.id.clone()).collect()
    }

    pub fn contains(&self, id: &ScanId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanId> {
        self.0.iter()
    }
}

impl FromIterator<ScanId> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = ScanId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
