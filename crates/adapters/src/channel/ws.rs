// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket channel bridge: forwards a scan's push frames to the monitor.

use super::{ChannelConnector, ChannelError, ChannelEvent, ChannelLink};
use futures_util::StreamExt;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// Connector that speaks WebSocket (`ws://` or `wss://`).
#[derive(Clone, Copy, Debug, Default)]
pub struct WsConnector;

impl ChannelConnector for WsConnector {
    fn open(&self, target: Url, link: ChannelLink, shutdown_rx: oneshot::Receiver<()>) {
        tokio::spawn(channel_bridge(target, link, shutdown_rx));
    }
}

/// Background task owning one WebSocket connection.
async fn channel_bridge(target: Url, link: ChannelLink, shutdown_rx: oneshot::Receiver<()>) {
    let mut shutdown_rx = shutdown_rx;
    let scan_id = link.scan_id.clone();

    let connect = tokio_tungstenite::connect_async(target.as_str());
    let mut ws = tokio::select! {
        result = connect => match result {
            Ok((ws, _)) => ws,
            Err(e) => {
                tracing::warn!(%scan_id, url = %target, error = %e, "channel connect failed");
                link.send(ChannelEvent::Failed(ChannelError::Connect(e.to_string()))).await;
                return;
            }
        },
        _ = &mut shutdown_rx => return,
    };

    tracing::info!(%scan_id, url = %target, "channel connected");
    if !link.send(ChannelEvent::Opened).await {
        let _ = ws.close(None).await;
        return;
    }

    loop {
        tokio::select! {
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if !link.send(ChannelEvent::Frame(text.as_str().to_owned())).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(%scan_id, ?frame, "channel closed by server");
                        link.send(ChannelEvent::Closed).await;
                        break;
                    }
                    None => {
                        tracing::info!(%scan_id, "channel stream ended");
                        link.send(ChannelEvent::Closed).await;
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%scan_id, error = %e, "channel error");
                        link.send(ChannelEvent::Failed(ChannelError::Dropped(e.to_string()))).await;
                        break;
                    }
                    _ => {} // Ping/Pong/Binary
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!(%scan_id, "channel shutdown requested");
                let _ = ws.close(None).await;
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "ws_tests.rs"]
mod tests;
