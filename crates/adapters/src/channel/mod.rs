// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live progress channels: one push connection per active scan

mod ws;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use ws::WsConnector;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeConnector;

use sw_core::ScanId;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("connection dropped: {0}")]
    Dropped(String),
}

/// What a channel task reports back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Handshake finished
    Opened,
    /// One text frame, undecoded
    Frame(String),
    /// Connect or receive error; the task has exited
    Failed(ChannelError),
    /// Peer closed or the stream ended; the task has exited
    Closed,
}

/// A [`ChannelEvent`] tagged with the channel it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub scan_id: ScanId,
    pub generation: u64,
    pub event: ChannelEvent,
}

/// Sending half handed to a channel task.
///
/// The generation lets the owner tell a live channel apart from an earlier
/// one opened for the same scan.
#[derive(Debug, Clone)]
pub struct ChannelLink {
    pub scan_id: ScanId,
    pub generation: u64,
    tx: mpsc::Sender<ChannelMessage>,
}

impl ChannelLink {
    pub fn new(scan_id: ScanId, generation: u64, tx: mpsc::Sender<ChannelMessage>) -> Self {
        Self { scan_id, generation, tx }
    }

    /// Returns false once the owner has gone away.
    pub async fn send(&self, event: ChannelEvent) -> bool {
        self.tx.send(self.message(event)).await.is_ok()
    }

    /// Non-blocking send for callers outside an async context.
    pub fn try_send(&self, event: ChannelEvent) -> bool {
        self.tx.try_send(self.message(event)).is_ok()
    }

    fn message(&self, event: ChannelEvent) -> ChannelMessage {
        ChannelMessage { scan_id: self.scan_id.clone(), generation: self.generation, event }
    }
}

/// Opens live channels.
///
/// `open` must not block: it starts the connection in the background and
/// reports through `link`. The channel ends when `shutdown_rx` fires or its
/// sender is dropped.
pub trait ChannelConnector: Clone + Send + Sync + 'static {
    fn open(&self, target: Url, link: ChannelLink, shutdown_rx: oneshot::Receiver<()>);
}
