// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress state store: poll-derived jobs plus channel-derived snapshots

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use sw_core::{ActiveSet, Job, ProgressSnapshot, ScanId};

/// Store shared by the poller, the channel manager and renderers.
///
/// Never hold the lock across an await.
pub type SharedStore = Arc<Mutex<ProgressStore>>;

#[derive(Debug, Default)]
pub struct ProgressStore {
    jobs: Vec<Job>,
    active: ActiveSet,
    snapshots: HashMap<ScanId, ProgressSnapshot>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Replace the job list and recompute the active set.
    pub fn merge(&mut self, jobs: Vec<Job>) -> &ActiveSet {
        self.active = ActiveSet::from_jobs(&jobs);
        self.jobs = jobs;
        &self.active
    }

    /// Overwrite the snapshot for `id`; the job record is untouched.
    pub fn update(&mut self, id: &ScanId, snapshot: ProgressSnapshot) {
        self.snapshots.insert(id.clone(), snapshot);
    }

    /// Latest job record for `id` with its snapshot. The first listed record
    /// wins when the backend repeats an id.
    pub fn get(&self, id: &ScanId) -> Option<(&Job, Option<&ProgressSnapshot>)> {
        let job = self.jobs.iter().find(|job| &job.id == id)?;
        Some((job, self.snapshots.get(id)))
    }

    pub fn snapshot(&self, id: &ScanId) -> Option<&ProgressSnapshot> {
        self.snapshots.get(id)
    }

    /// Drop the snapshot for `id`.
    pub fn discard(&mut self, id: &ScanId) -> Option<ProgressSnapshot> {
        self.snapshots.remove(id)
    }

    /// Keep only the snapshots whose id passes `keep`.
    pub fn retain_snapshots(&mut self, mut keep: impl FnMut(&ScanId) -> bool) {
        self.snapshots.retain(|id, _| keep(id));
    }

    pub fn clear_snapshots(&mut self) {
        self.snapshots.clear();
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
        self.active = ActiveSet::default();
        self.snapshots.clear();
    }

    /// Jobs in poll order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    pub fn snapshot_ids(&self) -> Vec<ScanId> {
        let mut ids: Vec<ScanId> = self.snapshots.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.snapshots.is_empty()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
