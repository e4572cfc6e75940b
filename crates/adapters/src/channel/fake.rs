// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory connector for tests. No sockets; events are injected by hand.

use super::{ChannelConnector, ChannelError, ChannelEvent, ChannelLink};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use sw_core::ScanId;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use url::Url;

struct FakeChannel {
    target: Url,
    link: ChannelLink,
    shutdown_rx: oneshot::Receiver<()>,
}

impl FakeChannel {
    /// Fired or dropped shutdown both count as closed.
    fn is_live(&mut self) -> bool {
        matches!(self.shutdown_rx.try_recv(), Err(TryRecvError::Empty))
    }
}

#[derive(Default)]
struct FakeConnectorState {
    channels: Vec<FakeChannel>,
    refuse: HashSet<ScanId>,
    manual_open: bool,
}

/// Records every open. By default a channel reports `Opened` immediately.
#[derive(Clone, Default)]
pub struct FakeConnector {
    inner: Arc<Mutex<FakeConnectorState>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave new channels connecting until [`FakeConnector::complete_open`].
    pub fn manual_open(self) -> Self {
        self.inner.lock().manual_open = true;
        self
    }

    /// Fail connection attempts for `id` until [`FakeConnector::accept`].
    pub fn refuse(&self, id: impl Into<ScanId>) {
        self.inner.lock().refuse.insert(id.into());
    }

    pub fn accept(&self, id: impl Into<ScanId>) {
        self.inner.lock().refuse.remove(&id.into());
    }

    /// Every open so far, in order: `(scan_id, generation)`.
    pub fn opened(&self) -> Vec<(ScanId, u64)> {
        self.inner
            .lock()
            .channels
            .iter()
            .map(|c| (c.link.scan_id.clone(), c.link.generation))
            .collect()
    }

    pub fn open_count(&self, id: &str) -> usize {
        self.inner.lock().channels.iter().filter(|c| c.link.scan_id == id).count()
    }

    /// Scans whose latest channel has not been shut down, sorted.
    pub fn live_ids(&self) -> Vec<ScanId> {
        let mut state = self.inner.lock();
        let mut ids: Vec<ScanId> = state
            .channels
            .iter_mut()
            .filter_map(|c| c.is_live().then(|| c.link.scan_id.clone()))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn is_live(&self, id: &str) -> bool {
        let mut state = self.inner.lock();
        state.channels.iter_mut().rev().find(|c| c.link.scan_id == id).is_some_and(|c| c.is_live())
    }

    /// Target URL of the latest channel for `id`.
    pub fn target(&self, id: &str) -> Option<Url> {
        let state = self.inner.lock();
        state.channels.iter().rev().find(|c| c.link.scan_id == id).map(|c| c.target.clone())
    }

    /// Report `Opened` for a channel held back by [`FakeConnector::manual_open`].
    pub async fn complete_open(&self, id: &str) -> bool {
        self.emit(id, ChannelEvent::Opened).await
    }

    pub async fn push_frame(&self, id: &str, text: &str) -> bool {
        self.emit(id, ChannelEvent::Frame(text.to_string())).await
    }

    pub async fn fail(&self, id: &str, reason: &str) -> bool {
        self.emit(id, ChannelEvent::Failed(ChannelError::Dropped(reason.to_string()))).await
    }

    pub async fn close_from_server(&self, id: &str) -> bool {
        self.emit(id, ChannelEvent::Closed).await
    }

    /// Send through the latest channel for `id`, live or not.
    pub async fn emit(&self, id: &str, event: ChannelEvent) -> bool {
        let link = {
            let state = self.inner.lock();
            state.channels.iter().rev().find(|c| c.link.scan_id == id).map(|c| c.link.clone())
        };
        match link {
            Some(link) => link.send(event).await,
            None => false,
        }
    }

    /// Send through a specific generation, e.g. one already replaced.
    pub async fn emit_generation(&self, id: &str, generation: u64, event: ChannelEvent) -> bool {
        let link = {
            let state = self.inner.lock();
            state
                .channels
                .iter()
                .find(|c| c.link.scan_id == id && c.link.generation == generation)
                .map(|c| c.link.clone())
        };
        match link {
            Some(link) => link.send(event).await,
            None => false,
        }
    }
}

impl ChannelConnector for FakeConnector {
    fn open(&self, target: Url, link: ChannelLink, shutdown_rx: oneshot::Receiver<()>) {
        let mut state = self.inner.lock();
        if state.refuse.contains(&link.scan_id) {
            link.try_send(ChannelEvent::Failed(ChannelError::Connect("refused".to_string())));
        } else if !state.manual_open {
            link.try_send(ChannelEvent::Opened);
        }
        state.channels.push(FakeChannel { target, link, shutdown_rx });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
