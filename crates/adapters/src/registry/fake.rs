// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted registry for tests

use super::{ScanRegistry, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use sw_core::Job;

enum Scripted {
    Jobs(Vec<Job>),
    Fail(TransportError),
    Delayed(Duration, Vec<Job>),
}

#[derive(Default)]
struct FakeRegistryState {
    script: VecDeque<Scripted>,
    steady: Vec<Job>,
    fetches: usize,
}

/// Answers fetches from a script, then from a steady job list once the script
/// runs out. Clones share state.
#[derive(Clone, Default)]
pub struct FakeScanRegistry {
    inner: Arc<Mutex<FakeRegistryState>>,
}

impl FakeScanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let registry = Self::new();
        registry.set_jobs(jobs);
        registry
    }

    /// Result returned whenever the script is empty.
    pub fn set_jobs(&self, jobs: Vec<Job>) {
        self.inner.lock().steady = jobs;
    }

    pub fn push_jobs(&self, jobs: Vec<Job>) {
        self.inner.lock().script.push_back(Scripted::Jobs(jobs));
    }

    pub fn push_error(&self, error: TransportError) {
        self.inner.lock().script.push_back(Scripted::Fail(error));
    }

    /// Answer the next fetch only after `delay` has elapsed.
    pub fn push_delayed(&self, delay: Duration, jobs: Vec<Job>) {
        self.inner.lock().script.push_back(Scripted::Delayed(delay, jobs));
    }

    pub fn fetch_count(&self) -> usize {
        self.inner.lock().fetches
    }
}

#[async_trait]
impl ScanRegistry for FakeScanRegistry {
    async fn fetch(&self) -> Result<Vec<Job>, TransportError> {
        let next = {
            let mut state = self.inner.lock();
            state.fetches += 1;
            state.script.pop_front().unwrap_or_else(|| Scripted::Jobs(state.steady.clone()))
        };
        match next {
            Scripted::Jobs(jobs) => Ok(jobs),
            Scripted::Fail(error) => Err(error),
            Scripted::Delayed(delay, jobs) => {
                tokio::time::sleep(delay).await;
                Ok(jobs)
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
