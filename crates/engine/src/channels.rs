// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live progress channel manager.
//!
//! Keeps exactly one channel per active scan. Channel tasks report back over
//! a single inbox; every message carries the generation of the channel that
//! sent it, so anything from a closed or replaced channel is dropped.
//!
//! Lock order: channel map, then store.

use crate::endpoint::Endpoint;
use crate::events::MonitorEvent;
use crate::store::SharedStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use sw_adapters::{ChannelConnector, ChannelEvent, ChannelLink, ChannelMessage};
use sw_core::{ActiveSet, ScanId};
use sw_wire::PushEvent;
use tokio::sync::{broadcast, mpsc, oneshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
}

sw_core::simple_display! {
    ChannelState {
        Connecting => "connecting",
        Open => "open",
    }
}

struct ChannelHandle {
    generation: u64,
    state: ChannelState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ChannelHandle {
    fn close(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub struct ChannelManager<K: ChannelConnector> {
    connector: K,
    endpoint: Endpoint,
    store: SharedStore,
    events: broadcast::Sender<MonitorEvent>,
    inbox: mpsc::Sender<ChannelMessage>,
    channels: Mutex<HashMap<ScanId, ChannelHandle>>,
    next_generation: AtomicU64,
}

impl<K: ChannelConnector> ChannelManager<K> {
    /// Returns the manager and the inbox its channels report to. The caller
    /// drains the inbox into [`ChannelManager::deliver`].
    pub fn new(
        connector: K,
        endpoint: Endpoint,
        store: SharedStore,
        events: broadcast::Sender<MonitorEvent>,
        buffer: usize,
    ) -> (Self, mpsc::Receiver<ChannelMessage>) {
        let (inbox, inbox_rx) = mpsc::channel(buffer);
        let manager = Self {
            connector,
            endpoint,
            store,
            events,
            inbox,
            channels: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        };
        (manager, inbox_rx)
    }

    /// Open a channel for every active scan without one, close every channel
    /// whose scan is no longer active, and drop snapshots of inactive scans.
    pub fn reconcile(&self, active: &ActiveSet) {
        let mut channels = self.channels.lock();

        let stale: Vec<ScanId> =
            channels.keys().filter(|id| !active.contains(id)).cloned().collect();
        for scan_id in stale {
            if let Some(handle) = channels.remove(&scan_id) {
                tracing::info!(%scan_id, generation = handle.generation, "closing channel");
                handle.close();
            }
        }
        self.store.lock().retain_snapshots(|id| active.contains(id));

        for scan_id in active.iter() {
            if channels.contains_key(scan_id) {
                continue;
            }
            let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
            let target = self.endpoint.channel_url(scan_id);
            let (shutdown_tx, shutdown_rx) = oneshot::channel();
            tracing::info!(%scan_id, generation, url = %target, "opening channel");
            self.connector.open(
                target,
                ChannelLink::new(scan_id.clone(), generation, self.inbox.clone()),
                shutdown_rx,
            );
            channels.insert(
                scan_id.clone(),
                ChannelHandle {
                    generation,
                    state: ChannelState::Connecting,
                    shutdown_tx: Some(shutdown_tx),
                },
            );
        }
    }

    /// Apply one message from a channel task.
    pub fn deliver(&self, msg: ChannelMessage) {
        let ChannelMessage { scan_id, generation, event } = msg;
        let mut channels = self.channels.lock();
        let current = channels.get(&scan_id).map(|h| h.generation);
        if current != Some(generation) {
            tracing::debug!(%scan_id, generation, ?current, "dropping message from closed channel");
            return;
        }

        match event {
            ChannelEvent::Opened => {
                if let Some(handle) = channels.get_mut(&scan_id) {
                    handle.state = ChannelState::Open;
                }
                tracing::info!(%scan_id, generation, "channel open");
            }
            ChannelEvent::Frame(text) => match sw_wire::decode_push(&text) {
                Ok(event) => self.apply(&scan_id, event),
                Err(e) => tracing::warn!(%scan_id, error = %e, "discarding malformed push event"),
            },
            ChannelEvent::Failed(e) => {
                tracing::warn!(%scan_id, generation, error = %e, "channel failed");
                channels.remove(&scan_id);
            }
            ChannelEvent::Closed => {
                tracing::info!(%scan_id, generation, "channel closed by server");
                channels.remove(&scan_id);
            }
        }
    }

    /// Route a decoded push event into the store. Ignored unless the scan's
    /// channel is open.
    pub fn dispatch(&self, scan_id: &ScanId, event: PushEvent) {
        let channels = self.channels.lock();
        match channels.get(scan_id) {
            Some(handle) if handle.state == ChannelState::Open => self.apply(scan_id, event),
            _ => tracing::debug!(%scan_id, "dispatch without an open channel"),
        }
    }

    /// Caller holds the channel map lock.
    fn apply(&self, scan_id: &ScanId, event: PushEvent) {
        if let PushEvent::Other(kind) = &event {
            tracing::debug!(%scan_id, kind, "ignoring push event");
            return;
        }
        if let Some(snapshot) = event.snapshot() {
            self.store.lock().update(scan_id, snapshot);
        }
        let _ = self.events.send(MonitorEvent::ProgressChanged { scan_id: scan_id.clone() });
    }

    /// Close every channel and clear all snapshots.
    pub fn close_all(&self) {
        let mut channels = self.channels.lock();
        let count = channels.len();
        for (_, handle) in channels.drain() {
            handle.close();
        }
        self.store.lock().clear_snapshots();
        if count > 0 {
            tracing::info!(count, "closed all channels");
        }
    }

    /// Scans with a channel (connecting or open), sorted.
    pub fn open_ids(&self) -> Vec<ScanId> {
        let mut ids: Vec<ScanId> = self.channels.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn state(&self, scan_id: &ScanId) -> Option<ChannelState> {
        self.channels.lock().get(scan_id).map(|h| h.state)
    }

    pub fn generation(&self, scan_id: &ScanId) -> Option<u64> {
        self.channels.lock().get(scan_id).map(|h| h.generation)
    }

    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "channels_tests.rs"]
mod tests;
