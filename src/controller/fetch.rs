//! Fetch-and-poll controller for a remote list.
//!
//! # State machine
//!
//! ```text
//! idle ──fetch──▶ loading ──ok──▶ success
//!                    │  ▲            │
//!                    │  └──refetch───┤
//!                    └──err──▶ error ┘
//! ```
//!
//! # Ordering
//!
//! Every fetch takes a sequence number from a monotonically increasing
//! counter. A successful response replaces the list only if its sequence is
//! newer than the one currently applied, so a slow response can never
//! overwrite a faster, newer one. Status and error settle only for the most
//! recently issued fetch; while a newer fetch is in flight the status stays
//! `loading`.
//!
//! A failed fetch never clears the list: the last known-good data stays
//! displayed next to the error. A fetch that is dropped before it settles
//! (for example when polling stops mid-request) puts back the status and
//! error it replaced, unless a newer fetch has been issued since.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::MissedTickBehavior;

use crate::api::{ApiError, CameraQuery, ParkingService, ZoneQuery};
use crate::error::MapError;
use crate::models::{Camera, Zone};

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Source of a full list. One call is one request; no partial results.
pub trait Loader: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    fn load(&self) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>> + Send;
}

/// Loads `GET /zones` with a fixed query.
pub struct ZoneLoader<S> {
    service: Arc<S>,
    query: ZoneQuery,
}

impl<S: ParkingService> ZoneLoader<S> {
    pub fn new(service: Arc<S>, query: ZoneQuery) -> Self {
        Self { service, query }
    }
}

impl<S: ParkingService> Loader for ZoneLoader<S> {
    type Item = Zone;

    fn load(&self) -> impl Future<Output = Result<Vec<Zone>, ApiError>> + Send {
        self.service.zones(&self.query)
    }
}

/// Loads `GET /cameras` with a fixed query.
pub struct CameraLoader<S> {
    service: Arc<S>,
    query: CameraQuery,
}

impl<S: ParkingService> CameraLoader<S> {
    pub fn new(service: Arc<S>, query: CameraQuery) -> Self {
        Self { service, query }
    }
}

impl<S: ParkingService> Loader for CameraLoader<S> {
    type Item = Camera;

    fn load(&self) -> impl Future<Output = Result<Vec<Camera>, ApiError>> + Send {
        self.service.cameras(&self.query)
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of a controller's state.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    /// Last successfully applied list. Shared, so snapshots are cheap.
    pub items: Arc<Vec<T>>,
    pub total: usize,
    pub status: LoadStatus,
    pub error: Option<MapError>,
    /// RFC 3339 time of the last applied list.
    pub updated_at: Option<String>,
    /// Sequence number of the fetch whose list is applied; 0 before any.
    pub applied_seq: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            total: 0,
            status: LoadStatus::Idle,
            error: None,
            updated_at: None,
            applied_seq: 0,
        }
    }
}

/// What happened to one fetch's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the owned list.
    Applied,
    /// A newer response had already been applied; this one was discarded.
    Stale,
    /// The load failed; the previous list was kept.
    Failed,
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct FetchController<L: Loader> {
    loader: Arc<L>,
    state: RwLock<FetchState<L::Item>>,
    issued: AtomicU64,
    revision: watch::Sender<u64>,
}

/// Aborts the wrapped task when dropped, so an abandoned fetch does not keep
/// its request running.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Puts back the status a fetch replaced if that fetch is dropped before it
/// settles and no newer fetch has been issued since.
struct RestoreOnDrop<'a, T> {
    state: &'a RwLock<FetchState<T>>,
    issued: &'a AtomicU64,
    seq: u64,
    previous: Option<(LoadStatus, Option<MapError>)>,
}

impl<T> RestoreOnDrop<'_, T> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl<T> Drop for RestoreOnDrop<'_, T> {
    fn drop(&mut self) {
        let Some((status, error)) = self.previous.take() else {
            return;
        };
        if self.seq != self.issued.load(Ordering::SeqCst) {
            return;
        }
        match self.state.try_write() {
            Ok(mut state) if state.status == LoadStatus::Loading => {
                state.status = status;
                state.error = error;
                tracing::debug!(seq = self.seq, "fetch cancelled; status restored");
            }
            Ok(_) => {}
            Err(_) => tracing::debug!(seq = self.seq, "fetch cancelled while state was locked"),
        }
    }
}

impl<L: Loader> FetchController<L> {
    pub fn new(loader: L) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            loader: Arc::new(loader),
            state: RwLock::new(FetchState::default()),
            issued: AtomicU64::new(0),
            revision,
        }
    }

    /// Request the full list and apply it if it is the newest response.
    pub async fn fetch(&self) -> FetchOutcome {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = {
            let mut state = self.state.write().await;
            let previous = (state.status, state.error.take());
            state.status = LoadStatus::Loading;
            previous
        };
        let restore = RestoreOnDrop {
            state: &self.state,
            issued: &self.issued,
            seq,
            previous: Some(previous),
        };
        tracing::debug!(seq, "fetch started");

        let loader = Arc::clone(&self.loader);
        let task = tokio::spawn(async move { loader.load().await });
        let _guard = AbortOnDrop(task.abort_handle());

        let result = match task.await {
            Ok(Ok(items)) => Ok(items),
            Ok(Err(e)) => Err(MapError::fetch(&e)),
            Err(e) => {
                tracing::error!(seq, error = %e, "load task did not complete");
                Err(MapError::unknown())
            }
        };
        let outcome = self.apply(seq, result).await;
        restore.disarm();
        outcome
    }

    /// Same as [`fetch`](Self::fetch); the entry point for manual refreshes.
    pub async fn refetch(&self) -> FetchOutcome {
        self.fetch().await
    }

    async fn apply(&self, seq: u64, result: Result<Vec<L::Item>, MapError>) -> FetchOutcome {
        let mut state = self.state.write().await;
        let latest = seq == self.issued.load(Ordering::SeqCst);

        match result {
            Ok(items) => {
                let outcome = if seq > state.applied_seq {
                    state.total = items.len();
                    state.items = Arc::new(items);
                    state.applied_seq = seq;
                    state.updated_at = Some(
                        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    );
                    self.revision.send_replace(seq);
                    tracing::debug!(seq, total = state.total, "list applied");
                    FetchOutcome::Applied
                } else {
                    tracing::debug!(seq, applied = state.applied_seq, "discarding stale response");
                    FetchOutcome::Stale
                };
                if latest {
                    state.status = LoadStatus::Success;
                    state.error = None;
                }
                outcome
            }
            Err(err) => {
                tracing::warn!(seq, code = ?err.code, message = %err.message, "fetch failed");
                if latest {
                    state.status = LoadStatus::Error;
                    state.error = Some(err);
                }
                FetchOutcome::Failed
            }
        }
    }

    pub async fn snapshot(&self) -> FetchState<L::Item> {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Arc<Vec<L::Item>> {
        Arc::clone(&self.state.read().await.items)
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status
    }

    /// Receiver that observes the applied sequence number each time the
    /// list is replaced.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Start the poll timer: fetch now, then every `period`.
    ///
    /// Polls never overlap each other; a slow fetch delays the next tick
    /// instead of stacking requests. Dropping the handle stops polling and
    /// aborts the fetch it is waiting on.
    pub fn start_polling(self: &Arc<Self>, period: Duration) -> PollHandle {
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                controller.refetch().await;
            }
        });
        tracing::info!(period_secs = period.as_secs_f64(), "polling started");
        PollHandle { task }
    }
}

/// Disposal handle for a poll timer.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
        tracing::info!("polling stopped");
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
