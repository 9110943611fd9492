// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered shutdown of an agent process.
//!
//! Components are stopped in three phases, each waiting for every member to
//! report stopped before the next begins:
//!
//! 1. fetch workers
//! 2. poll loops
//! 3. the log writer
//!
//! The log writer goes last so the lines describing the earlier phases are
//! still written.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::Instrument;

use crate::config::consts::{SHUTDOWN_PHASE_TIMEOUT, SHUTDOWN_POLL_INTERVAL};
use crate::observability::messages::agent::{ShutdownPhase, ShutdownTimedOut};
use crate::observability::messages::StructuredLog;
use crate::traits::Worker;

pub struct Supervisor {
    workers: Vec<Arc<dyn Worker>>,
    poll_loops: Vec<Arc<dyn Worker>>,
    log_writer: Option<Arc<dyn Worker>>,
    phase_timeout: Duration,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            workers: Vec::new(),
            poll_loops: Vec::new(),
            log_writer: None,
            phase_timeout: SHUTDOWN_PHASE_TIMEOUT,
        }
    }

    pub fn with_phase_timeout(mut self, timeout: Duration) -> Self {
        self.phase_timeout = timeout;
        self
    }

    pub fn add_worker(&mut self, worker: Arc<dyn Worker>) {
        self.workers.push(worker);
    }

    pub fn add_poll_loop(&mut self, poll_loop: Arc<dyn Worker>) {
        self.poll_loops.push(poll_loop);
    }

    pub fn set_log_writer(&mut self, writer: Arc<dyn Worker>) {
        self.log_writer = Some(writer);
    }

    /// Run the shutdown sequence. Returns `false` if any component failed to
    /// stop within the phase timeout; later phases still run.
    pub async fn shutdown(&self) -> bool {
        let workers = self.stop_phase("fetch_workers", &self.workers).await;
        let poll_loops = self.stop_phase("poll_loops", &self.poll_loops).await;
        let log_writer = match &self.log_writer {
            Some(writer) => self.stop_phase("log_writer", std::slice::from_ref(writer)).await,
            None => true,
        };
        workers && poll_loops && log_writer
    }

    async fn stop_phase(&self, phase: &str, group: &[Arc<dyn Worker>]) -> bool {
        let started = ShutdownPhase {
            phase,
            component_count: group.len(),
        };
        started.log();

        self.stop_group(phase, group)
            .instrument(started.span("shutdown_phase"))
            .await
    }

    async fn stop_group(&self, phase: &str, group: &[Arc<dyn Worker>]) -> bool {
        for component in group {
            component.request_stop();
        }

        let mut all_stopped = true;
        for component in group {
            if !wait_stopped(component.as_ref(), self.phase_timeout).await {
                ShutdownTimedOut {
                    phase,
                    component: component.name(),
                    timeout: self.phase_timeout,
                }
                .log();
                all_stopped = false;
            }
        }
        all_stopped
    }
}

/// Poll `is_stopped` until it holds or `timeout` elapses.
pub async fn wait_stopped(component: &dyn Worker, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while !component.is_stopped() {
        if Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(SHUTDOWN_POLL_INTERVAL).await;
    }
    true
}

/// Stop the run log, then hand back `result`.
///
/// Every exit path of the process goes through here so lines logged on the
/// way out, failures included, reach the file.
pub async fn close_run_log<T, E>(run_log: &dyn Worker, result: Result<T, E>) -> Result<T, E> {
    run_log.request_stop();
    if !wait_stopped(run_log, SHUTDOWN_PHASE_TIMEOUT).await {
        ShutdownTimedOut {
            phase: "exit",
            component: run_log.name(),
            timeout: SHUTDOWN_PHASE_TIMEOUT,
        }
        .log();
    }
    result
}
