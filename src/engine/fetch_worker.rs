// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Producer/consumer fetch pipeline.
//!
//! A [`FetchWorker`] owns a work queue and a result queue and runs one
//! background task that moves items from the first to the second through a
//! [`Fetcher`].
//!
//! ## Lifecycle
//!
//! ```text
//! Running ──request_stop()──▶ StopRequested ──in-flight fetch done──▶ Stopped
//! ```
//!
//! Stopping finishes only the fetch already in flight. Items still queued
//! stay queued; callers that need the queue drained wait for `size()` to
//! reach zero before stopping.
//!
//! ## Failures
//!
//! A failed fetch is logged, counted and dropped. There is exactly one
//! attempt per item.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::observability::messages::workers::{FetchFailed, WorkerStopped};
use crate::observability::messages::StructuredLog;
use crate::traits::{Fetcher, Worker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    StopRequested,
    Stopped,
}

/// State shared between the handle and the background task.
struct Queues<I, O> {
    work: Mutex<VecDeque<I>>,
    results: Mutex<VecDeque<O>>,
    /// Queued plus in-flight items
    pending: AtomicUsize,
    wake: Notify,
    stopped: AtomicBool,
    processed: AtomicU64,
    failed: AtomicU64,
}

impl<I, O> Queues<I, O> {
    fn pop_work(&self) -> Option<I> {
        self.work
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn push_result(&self, result: O) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }
}

pub struct FetchWorker<I, O> {
    name: String,
    queues: Arc<Queues<I, O>>,
    token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<I, O> FetchWorker<I, O>
where
    I: Display + Send + 'static,
    O: Send + 'static,
{
    /// Start the background task. `idle` bounds how long an idle worker
    /// sleeps before re-checking its queue.
    pub fn spawn(name: &str, fetcher: Arc<dyn Fetcher<I, O>>, idle: Duration) -> Self {
        let queues = Arc::new(Queues {
            work: Mutex::new(VecDeque::new()),
            results: Mutex::new(VecDeque::new()),
            pending: AtomicUsize::new(0),
            wake: Notify::new(),
            stopped: AtomicBool::new(false),
            processed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        });
        let token = CancellationToken::new();

        let handle = tokio::spawn(run_worker(
            name.to_string(),
            queues.clone(),
            fetcher,
            token.clone(),
            idle,
        ));

        Self {
            name: name.to_string(),
            queues,
            token,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Enqueue an item without waiting.
    pub fn submit(&self, item: I) {
        self.queues.pending.fetch_add(1, Ordering::SeqCst);
        self.queues
            .work
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(item);
        self.queues.wake.notify_one();
    }

    /// Dequeue the oldest result, if any.
    pub fn try_take_result(&self) -> Option<O> {
        self.queues
            .results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Items submitted but not yet turned into a result or a failure.
    pub fn size(&self) -> usize {
        self.queues.pending.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> WorkerState {
        if self.queues.stopped.load(Ordering::SeqCst) {
            WorkerState::Stopped
        } else if self.token.is_cancelled() {
            WorkerState::StopRequested
        } else {
            WorkerState::Running
        }
    }

    pub fn failed(&self) -> u64 {
        self.queues.failed.load(Ordering::SeqCst)
    }

    /// Wait for the background task to exit. Only meaningful after
    /// `request_stop`.
    pub async fn join(&self) {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl<I, O> Worker for FetchWorker<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn request_stop(&self) {
        self.token.cancel();
    }

    fn is_stopped(&self) -> bool {
        self.queues.stopped.load(Ordering::SeqCst)
    }
}

async fn run_worker<I, O>(
    name: String,
    queues: Arc<Queues<I, O>>,
    fetcher: Arc<dyn Fetcher<I, O>>,
    token: CancellationToken,
    idle: Duration,
) where
    I: Display + Send + 'static,
    O: Send + 'static,
{
    while !token.is_cancelled() {
        let Some(item) = queues.pop_work() else {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = queues.wake.notified() => {}
                _ = tokio::time::sleep(idle) => {}
            }
            continue;
        };

        let label = item.to_string();
        let fetched = fetcher
            .fetch(item)
            .instrument(tracing::debug_span!("fetch", worker = %name, item = %label))
            .await;
        match fetched {
            Ok(result) => {
                queues.push_result(result);
                queues.processed.fetch_add(1, Ordering::SeqCst);
            }
            Err(error) => {
                FetchFailed {
                    worker: &name,
                    item: &label,
                    error: &error,
                }
                .log();
                queues.failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        queues.pending.fetch_sub(1, Ordering::SeqCst);
    }

    WorkerStopped {
        worker: &name,
        processed: queues.processed.load(Ordering::SeqCst),
        failed: queues.failed.load(Ordering::SeqCst),
    }
    .log();
    queues.stopped.store(true, Ordering::SeqCst);
}
