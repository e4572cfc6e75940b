// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::ProgressStore;
use proptest::prelude::*;
use sw_adapters::FakeConnector;
use sw_core::test_support::strategies::arb_poll_sequence;
use sw_core::test_support::{completed_job, running_job};
use sw_core::Job;

const PROGRESS_4_OF_10: &str =
    r#"{"type":"progress","progress":{"completed_files":4,"total_files":10,"current_file":"a.yaml"}}"#;

struct Harness {
    manager: ChannelManager<FakeConnector>,
    connector: FakeConnector,
    store: SharedStore,
    inbox: mpsc::Receiver<ChannelMessage>,
    events: broadcast::Receiver<MonitorEvent>,
}

impl Harness {
    fn new() -> Self {
        Self::with_connector(FakeConnector::new())
    }

    fn with_connector(connector: FakeConnector) -> Self {
        let store = ProgressStore::shared();
        let (events_tx, events) = broadcast::channel(64);
        let endpoint = Endpoint::new("http://localhost:8099", "/").unwrap();
        let (manager, inbox) =
            ChannelManager::new(connector.clone(), endpoint, store.clone(), events_tx, 1024);
        Self { manager, connector, store, inbox, events }
    }

    /// Merge a poll result and reconcile, like the controller does.
    fn poll(&self, jobs: Vec<Job>) {
        let active = self.store.lock().merge(jobs).clone();
        self.manager.reconcile(&active);
    }

    /// Deliver everything queued in the inbox.
    fn pump(&mut self) {
        while let Ok(msg) = self.inbox.try_recv() {
            self.manager.deliver(msg);
        }
    }

    fn progress_events(&mut self) -> Vec<ScanId> {
        let mut ids = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let MonitorEvent::ProgressChanged { scan_id } = event {
                ids.push(scan_id);
            }
        }
        ids
    }

    fn completed_files(&self, id: &str) -> Option<u64> {
        self.store.lock().snapshot(&ScanId::from(id)).map(|s| s.completed_files)
    }
}

fn ids(list: &[&str]) -> Vec<ScanId> {
    list.iter().map(|s| ScanId::from(*s)).collect()
}

#[tokio::test]
async fn reconcile_opens_one_channel_per_active_scan() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1"), completed_job("2"), running_job("3")]);
    h.pump();

    assert_eq!(h.manager.open_ids(), ids(&["1", "3"]));
    assert_eq!(h.manager.state(&ScanId::from("1")), Some(ChannelState::Open));
    assert_eq!(h.connector.target("3").unwrap().as_str(), "ws://localhost:8099/ws/scan/3");
    assert_eq!(h.connector.open_count("2"), 0);
}

#[tokio::test]
async fn repeated_reconcile_never_reopens() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();
    h.poll(vec![running_job("1")]);
    h.poll(vec![running_job("1"), running_job("1")]);

    assert_eq!(h.connector.open_count("1"), 1);
    assert_eq!(h.connector.live_ids(), ids(&["1"]));
}

#[tokio::test]
async fn leaving_active_set_closes_channel_and_discards_snapshot() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();
    h.connector.push_frame("1", PROGRESS_4_OF_10).await;
    h.pump();
    assert_eq!(h.completed_files("1"), Some(4));

    h.poll(vec![completed_job("1")]);

    assert!(h.manager.is_empty());
    assert!(!h.connector.is_live("1"));
    assert_eq!(h.completed_files("1"), None);
}

#[tokio::test]
async fn frames_update_store_and_signal_rerender() {
    let mut h = Harness::new();
    h.poll(vec![running_job("5")]);
    h.pump();

    h.connector.push_frame("5", PROGRESS_4_OF_10).await;
    h.pump();

    let store = h.store.lock();
    let (job, snapshot) = store.get(&ScanId::from("5")).unwrap();
    assert_eq!(job.id, "5");
    let snapshot = snapshot.unwrap();
    assert_eq!((snapshot.completed_files, snapshot.total_files), (4, 10));
    assert_eq!(snapshot.current_file.as_deref(), Some("a.yaml"));
    drop(store);
    assert_eq!(h.progress_events(), ids(&["5"]));
}

#[tokio::test]
async fn latest_snapshot_wins() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();
    for n in [1, 2, 3] {
        let frame = format!(
            r#"{{"type":"progress","progress":{{"completed_files":{n},"total_files":3}}}}"#
        );
        h.connector.push_frame("1", &frame).await;
    }
    h.pump();
    assert_eq!(h.completed_files("1"), Some(3));
}

#[tokio::test]
async fn unknown_types_are_ignored() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();
    h.progress_events();

    h.connector.push_frame("1", r#"{"type":"status","message":"Connected"}"#).await;
    h.pump();

    assert_eq!(h.completed_files("1"), None);
    assert!(h.progress_events().is_empty());
}

#[tokio::test]
async fn bare_update_signals_without_snapshot() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();

    h.connector.push_frame("1", r#"{"type":"update","status":"completed"}"#).await;
    h.pump();

    assert_eq!(h.completed_files("1"), None);
    assert_eq!(h.progress_events(), ids(&["1"]));
}

#[tokio::test]
async fn malformed_frame_is_skipped_and_channel_stays() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();

    h.connector.push_frame("1", "not json").await;
    h.connector.push_frame("1", r#"{"type":"progress"}"#).await;
    h.connector.push_frame("1", PROGRESS_4_OF_10).await;
    h.pump();

    assert_eq!(h.manager.state(&ScanId::from("1")), Some(ChannelState::Open));
    assert_eq!(h.completed_files("1"), Some(4));
}

#[tokio::test]
async fn dispatch_requires_open_channel() {
    let mut h = Harness::with_connector(FakeConnector::new().manual_open());
    h.poll(vec![running_job("1")]);
    let id = ScanId::from("1");
    let event = sw_wire::decode_push(PROGRESS_4_OF_10).unwrap();

    h.manager.dispatch(&id, event.clone());
    assert_eq!(h.manager.state(&id), Some(ChannelState::Connecting));
    assert_eq!(h.completed_files("1"), None);

    h.connector.complete_open("1").await;
    h.pump();
    h.manager.dispatch(&id, event);
    assert_eq!(h.completed_files("1"), Some(4));

    h.manager.dispatch(&ScanId::from("9"), sw_wire::decode_push(PROGRESS_4_OF_10).unwrap());
    assert_eq!(h.completed_files("9"), None);
}

#[tokio::test]
async fn failed_channel_is_reopened_by_next_reconcile() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1")]);
    h.pump();
    h.connector.push_frame("1", PROGRESS_4_OF_10).await;
    let first = h.manager.generation(&ScanId::from("1")).unwrap();

    h.connector.fail("1", "reset by peer").await;
    h.pump();
    assert!(h.manager.is_empty());
    // Snapshots outlive a channel error
    assert_eq!(h.completed_files("1"), Some(4));

    h.poll(vec![running_job("1")]);
    h.pump();
    let second = h.manager.generation(&ScanId::from("1")).unwrap();
    assert!(second > first);
    assert_eq!(h.connector.open_count("1"), 2);

    // A late frame from the failed channel is a no-op
    let late = r#"{"type":"progress","progress":{"completed_files":1,"total_files":10}}"#;
    h.connector.emit_generation("1", first, ChannelEvent::Frame(late.to_string())).await;
    h.pump();
    assert_eq!(h.completed_files("1"), Some(4));
}

#[tokio::test]
async fn server_close_and_refused_connect_drop_the_channel() {
    let connector = FakeConnector::new();
    connector.refuse("2");
    let mut h = Harness::with_connector(connector);
    h.poll(vec![running_job("1"), running_job("2")]);
    h.pump();
    assert_eq!(h.manager.open_ids(), ids(&["1"]));

    h.connector.close_from_server("1").await;
    h.pump();
    assert!(h.manager.is_empty());

    h.connector.accept("2");
    h.poll(vec![running_job("1"), running_job("2")]);
    h.pump();
    assert_eq!(h.manager.open_ids(), ids(&["1", "2"]));
}

#[tokio::test]
async fn close_all_tears_everything_down() {
    let mut h = Harness::new();
    h.poll(vec![running_job("1"), running_job("2")]);
    h.pump();
    h.connector.push_frame("1", PROGRESS_4_OF_10).await;
    h.pump();

    h.manager.close_all();

    assert!(h.manager.is_empty());
    assert!(h.connector.live_ids().is_empty());
    assert!(h.store.lock().snapshot_ids().is_empty());

    h.connector.push_frame("2", PROGRESS_4_OF_10).await;
    h.pump();
    assert_eq!(h.completed_files("2"), None);
}

proptest! {
    #[test]
    fn open_channels_always_match_active_set(polls in arb_poll_sequence()) {
        let h = Harness::new();
        for jobs in polls {
            let mut expected: Vec<ScanId> =
                jobs.iter().filter(|j| j.is_active()).map(|j| j.id.clone()).collect();
            expected.sort();
            expected.dedup();

            h.poll(jobs);

            prop_assert_eq!(h.manager.open_ids(), expected.clone());
            prop_assert_eq!(h.connector.live_ids(), expected.clone());
            for id in h.store.lock().snapshot_ids() {
                prop_assert!(expected.contains(&id));
            }
        }
    }
}
