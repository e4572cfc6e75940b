// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::controller::MonitorState;
use sw_core::{ActiveSet, Job, ScanId};

/// Notifications for views. Delivered over a broadcast channel; a lagging
/// subscriber only loses re-render hints, never state.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// A poll result was merged (`scans-updated`).
    ScansUpdated { jobs: Vec<Job>, active: ActiveSet },
    /// A push event changed one scan's progress.
    ProgressChanged { scan_id: ScanId },
    StateChanged(MonitorState),
}
