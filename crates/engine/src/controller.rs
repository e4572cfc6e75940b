// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle controller: attach, toggle polling, detach.
//!
//! ```text
//!   Idle --attach--> Polling <--toggle--> Paused
//!                      |                    |
//!                      +------detach--------+--> Detached
//! ```
//!
//! Polling owns a timer task whose first tick fetches immediately. Paused
//! keeps channels open and updating; only the timer stops. Detached is
//! terminal.

use crate::channels::ChannelManager;
use crate::config::MonitorConfig;
use crate::endpoint::Endpoint;
use crate::error::MonitorError;
use crate::events::MonitorEvent;
use crate::presentation::ScanView;
use crate::store::{ProgressStore, SharedStore};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sw_adapters::{ChannelConnector, ChannelMessage, ScanRegistry};
use sw_core::{ActiveSet, Clock, Job, ScanId};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Built but not attached yet
    Idle,
    Polling,
    Paused,
    Detached,
}

sw_core::simple_display! {
    MonitorState {
        Idle => "idle",
        Polling => "polling",
        Paused => "paused",
        Detached => "detached",
    }
}

/// What became of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Merged; carries the job count and active set size.
    Applied { jobs: usize, active: usize },
    /// The fetch failed; the store is unchanged.
    Failed,
    /// A newer poll was already applied.
    Stale,
    /// The monitor was detached while the fetch was in flight.
    Detached,
}

/// Guarded together so a poll cannot apply after teardown.
#[derive(Default)]
struct ApplyState {
    detached: bool,
    applied_seq: u64,
    last_update_ms: Option<u64>,
}

struct Shared<R: ScanRegistry, K: ChannelConnector, C: Clock> {
    registry: R,
    clock: C,
    store: SharedStore,
    channels: ChannelManager<K>,
    events: broadcast::Sender<MonitorEvent>,
    state: Mutex<MonitorState>,
    apply: Mutex<ApplyState>,
    next_seq: AtomicU64,
}

impl<R: ScanRegistry, K: ChannelConnector, C: Clock> Shared<R, K, C> {
    async fn poll_once(&self) -> PollOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        match self.registry.fetch().await {
            Ok(jobs) => self.apply_poll(seq, jobs),
            Err(e) => {
                tracing::warn!(seq, error = %e, "scan poll failed");
                if self.apply.lock().detached {
                    PollOutcome::Detached
                } else {
                    PollOutcome::Failed
                }
            }
        }
    }

    /// Merge, then reconcile channels against the new active set.
    fn apply_poll(&self, seq: u64, jobs: Vec<Job>) -> PollOutcome {
        let mut apply = self.apply.lock();
        if apply.detached {
            tracing::debug!(seq, "poll finished after detach");
            return PollOutcome::Detached;
        }
        if seq < apply.applied_seq {
            tracing::debug!(seq, applied = apply.applied_seq, "discarding stale poll");
            return PollOutcome::Stale;
        }
        apply.applied_seq = seq;
        apply.last_update_ms = Some(self.clock.epoch_ms());

        let active: ActiveSet = self.store.lock().merge(jobs.clone()).clone();
        self.channels.reconcile(&active);

        let outcome = PollOutcome::Applied { jobs: jobs.len(), active: active.len() };
        tracing::debug!(seq, jobs = jobs.len(), active = active.len(), "poll applied");
        let _ = self.events.send(MonitorEvent::ScansUpdated { jobs, active });
        outcome
    }

    fn set_state(&self, state: MonitorState) {
        let previous = std::mem::replace(&mut *self.state.lock(), state);
        if previous != state {
            tracing::info!(from = %previous, to = %state, "monitor state changed");
            let _ = self.events.send(MonitorEvent::StateChanged(state));
        }
    }
}

struct TimerTask {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Tasks {
    timer: Option<TimerTask>,
    pump: Option<JoinHandle<()>>,
    /// One-off fetch started by attach without auto-refresh
    kickoff: Option<JoinHandle<()>>,
}

/// One monitored view: a registry poller, its channels and their store.
///
/// Dropping a monitor detaches it.
pub struct Monitor<R: ScanRegistry, K: ChannelConnector, C: Clock> {
    shared: Arc<Shared<R, K, C>>,
    config: MonitorConfig,
    inbox: Mutex<Option<mpsc::Receiver<ChannelMessage>>>,
    tasks: Mutex<Tasks>,
}

impl<R: ScanRegistry, K: ChannelConnector, C: Clock> Monitor<R, K, C> {
    pub fn new(
        registry: R,
        connector: K,
        clock: C,
        endpoint: Endpoint,
        config: MonitorConfig,
    ) -> Self {
        let store = ProgressStore::shared();
        let (events, _) = broadcast::channel(config.event_capacity());
        let (channels, inbox) = ChannelManager::new(
            connector,
            endpoint,
            store.clone(),
            events.clone(),
            config.channel_buffer(),
        );
        let shared = Arc::new(Shared {
            registry,
            clock,
            store,
            channels,
            events,
            state: Mutex::new(MonitorState::Idle),
            apply: Mutex::new(ApplyState::default()),
            next_seq: AtomicU64::new(0),
        });
        Self { shared, config, inbox: Mutex::new(Some(inbox)), tasks: Mutex::new(Tasks::default()) }
    }

    /// Start the channel pump and either start polling or fetch once.
    ///
    /// Must be called inside a tokio runtime.
    pub fn attach(&self) -> Result<MonitorState, MonitorError> {
        let state = self.state();
        if state != MonitorState::Idle {
            return Err(MonitorError::InvalidTransition { op: "attach", state });
        }
        let mut tasks = self.tasks.lock();
        if let Some(inbox) = self.inbox.lock().take() {
            tasks.pump = Some(tokio::spawn(pump(Arc::clone(&self.shared), inbox)));
        }

        if self.config.auto_refresh() {
            tasks.timer = Some(self.start_timer());
            self.shared.set_state(MonitorState::Polling);
        } else {
            let shared = Arc::clone(&self.shared);
            tasks.kickoff = Some(tokio::spawn(async move {
                shared.poll_once().await;
            }));
            self.shared.set_state(MonitorState::Paused);
        }
        Ok(self.state())
    }

    /// Switch between polling and paused. Returns the new state.
    pub fn toggle(&self) -> Result<MonitorState, MonitorError> {
        let mut tasks = self.tasks.lock();
        match self.state() {
            MonitorState::Polling => {
                if let Some(timer) = tasks.timer.take() {
                    stop_timer(timer);
                }
                self.shared.set_state(MonitorState::Paused);
                Ok(MonitorState::Paused)
            }
            MonitorState::Paused => {
                if let Some(timer) = tasks.timer.take() {
                    stop_timer(timer);
                }
                tasks.timer = Some(self.start_timer());
                self.shared.set_state(MonitorState::Polling);
                Ok(MonitorState::Polling)
            }
            state @ (MonitorState::Idle | MonitorState::Detached) => {
                Err(MonitorError::InvalidTransition { op: "toggle", state })
            }
        }
    }

    /// Stop polling, close every channel and clear the store. Idempotent.
    pub fn detach(&self) {
        let mut tasks = self.tasks.lock();
        {
            let mut apply = self.shared.apply.lock();
            if apply.detached {
                return;
            }
            apply.detached = true;
            apply.last_update_ms = None;
            self.shared.channels.close_all();
            self.shared.store.lock().clear();
        }
        if let Some(timer) = tasks.timer.take() {
            stop_timer(timer);
        }
        for handle in [tasks.pump.take(), tasks.kickoff.take()].into_iter().flatten() {
            handle.abort();
        }
        self.inbox.lock().take();
        self.shared.set_state(MonitorState::Detached);
    }

    /// Run one poll cycle now, regardless of the timer.
    pub async fn refresh(&self) -> Result<PollOutcome, MonitorError> {
        match self.state() {
            state @ (MonitorState::Idle | MonitorState::Detached) => {
                Err(MonitorError::InvalidTransition { op: "refresh", state })
            }
            MonitorState::Polling | MonitorState::Paused => Ok(self.shared.poll_once().await),
        }
    }

    pub fn state(&self) -> MonitorState {
        *self.shared.state.lock()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.shared.events.subscribe()
    }

    /// Rows for every job, in poll order, from one consistent read.
    pub fn views(&self) -> Vec<ScanView> {
        let now_ms = self.shared.clock.epoch_ms();
        let store = self.shared.store.lock();
        store
            .jobs()
            .iter()
            .map(|job| ScanView::derive(job, store.snapshot(&job.id), now_ms))
            .collect()
    }

    pub fn view(&self, id: &ScanId) -> Option<ScanView> {
        let now_ms = self.shared.clock.epoch_ms();
        let store = self.shared.store.lock();
        store.get(id).map(|(job, snapshot)| ScanView::derive(job, snapshot, now_ms))
    }

    /// Time since the last applied poll; `None` before the first one.
    pub fn since_last_update(&self) -> Option<Duration> {
        let last = self.shared.apply.lock().last_update_ms?;
        Some(Duration::from_millis(self.shared.clock.epoch_ms().saturating_sub(last)))
    }

    pub fn store(&self) -> &SharedStore {
        &self.shared.store
    }

    pub fn channels(&self) -> &ChannelManager<K> {
        &self.shared.channels
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    fn start_timer(&self) -> TimerTask {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_timer(
            Arc::clone(&self.shared),
            self.config.refresh_interval(),
            shutdown_rx,
        ));
        TimerTask { shutdown_tx, handle }
    }
}

impl<R: ScanRegistry, K: ChannelConnector, C: Clock> Drop for Monitor<R, K, C> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn stop_timer(timer: TimerTask) {
    let _ = timer.shutdown_tx.send(());
    timer.handle.abort();
}

/// Poll on every tick until shut down. The first tick fires immediately.
async fn run_timer<R: ScanRegistry, K: ChannelConnector, C: Clock>(
    shared: Arc<Shared<R, K, C>>,
    period: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                shared.poll_once().await;
            }
            _ = &mut shutdown_rx => break,
        }
    }
}

/// Drain channel messages in receipt order.
async fn pump<R: ScanRegistry, K: ChannelConnector, C: Clock>(
    shared: Arc<Shared<R, K, C>>,
    mut inbox: mpsc::Receiver<ChannelMessage>,
) {
    while let Some(msg) = inbox.recv().await {
        shared.channels.deliver(msg);
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
