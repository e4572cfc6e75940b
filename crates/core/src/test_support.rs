// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, ProgressSnapshot, ScanStatus};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for scan jobs and poll results.
pub mod strategies {
    use crate::{Job, ScanId, ScanStatus};
    use proptest::prelude::*;

    pub fn arb_scan_status() -> impl Strategy<Value = ScanStatus> {
        prop_oneof![
            Just(ScanStatus::Pending),
            Just(ScanStatus::Running),
            Just(ScanStatus::Completed),
            Just(ScanStatus::Failed),
        ]
    }

    /// A job whose id is drawn from a small pool so successive poll results overlap.
    pub fn arb_job() -> impl Strategy<Value = Job> {
        (0u64..12, arb_scan_status(), 0u64..1_000_000, proptest::option::of(0u64..500)).prop_map(
            |(id, status, started_at_ms, file_count)| Job {
                id: ScanId::from(id),
                status,
                started_at_ms,
                ended_at_ms: status.is_terminal().then_some(started_at_ms + 1_000),
                file_count,
            },
        )
    }

    /// One poll result.
    pub fn arb_jobs() -> impl Strategy<Value = Vec<Job>> {
        proptest::collection::vec(arb_job(), 0..10)
    }

    /// A sequence of poll results.
    pub fn arb_poll_sequence() -> impl Strategy<Value = Vec<Vec<Job>>> {
        proptest::collection::vec(arb_jobs(), 1..8)
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn running_job(id: &str) -> Job {
    Job::builder().id(id).status(ScanStatus::Running).build()
}

pub fn pending_job(id: &str) -> Job {
    Job::builder().id(id).status(ScanStatus::Pending).build()
}

pub fn completed_job(id: &str) -> Job {
    Job::builder().id(id).status(ScanStatus::Completed).ended_at_ms(Some(1_060_000)).build()
}

pub fn snapshot(
    completed_files: u64,
    total_files: u64,
    current_file: Option<&str>,
) -> ProgressSnapshot {
    ProgressSnapshot {
        completed_files,
        total_files,
        current_file: current_file.map(str::to_string),
        event_type: "progress".to_string(),
    }
}
