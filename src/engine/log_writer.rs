// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Queue-backed, append-only run log.
//!
//! Callers append pre-timestamped lines to an in-memory pending list; one
//! background task wakes every flush interval, drains the whole list and
//! writes it to the file in a single bounded-time append. A flush that fails
//! or times out drops its batch and reports it once.
//!
//! After `request_stop` the task keeps draining until the list is empty and
//! then marks itself stopped. A failed write while stopping discards whatever
//! is still pending and stops at once. Appends are accepted until then and
//! silently ignored afterwards.
//!
//! [`LogWriter`] also implements [`MakeWriter`], so a `tracing-subscriber`
//! fmt layer can route formatted events into the file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Local;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::consts::{LOG_FLUSH_INTERVAL, LOG_WRITE_TIMEOUT};
use crate::observability::messages::workers::LogFlushFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::Worker;

const TIMESTAMP_FORMAT: &str = "[%d%b%y %H:%M] ";
const FILE_NAME_FORMAT: &str = "log_%Y%m%d_%H%M%S.txt";

struct Shared {
    path: PathBuf,
    pending: Mutex<Vec<String>>,
    stopped: AtomicBool,
    token: CancellationToken,
}

#[derive(Clone)]
pub struct LogWriter {
    shared: Arc<Shared>,
}

impl LogWriter {
    /// Start a writer appending to `path` with the default intervals.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        Self::with_intervals(path, LOG_FLUSH_INTERVAL, LOG_WRITE_TIMEOUT)
    }

    /// Start a writer on a fresh `log_YYYYMMDD_HHMMSS.txt` inside `dir`.
    pub fn spawn_in_dir(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let file_name = Local::now().format(FILE_NAME_FORMAT).to_string();
        Ok(Self::spawn(dir.join(file_name)))
    }

    pub fn with_intervals(path: impl Into<PathBuf>, flush: Duration, write_timeout: Duration) -> Self {
        let shared = Arc::new(Shared {
            path: path.into(),
            pending: Mutex::new(Vec::new()),
            stopped: AtomicBool::new(false),
            token: CancellationToken::new(),
        });

        tokio::spawn(flush_loop(shared.clone(), flush, write_timeout));

        Self { shared }
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Queue one line, prefixed with the current local time.
    pub fn append(&self, line: &str) {
        let stamped = format!("{}{}", Local::now().format(TIMESTAMP_FORMAT), line);
        let mut pending = self.shared.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if self.shared.stopped.load(Ordering::SeqCst) {
            return;
        }
        pending.push(stamped);
    }

    pub fn request_stop(&self) {
        self.shared.token.cancel();
    }

    /// True once the final flush after `request_stop` has completed.
    pub fn stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }
}

impl Worker for LogWriter {
    fn name(&self) -> &str {
        "log_writer"
    }

    fn request_stop(&self) {
        LogWriter::request_stop(self);
    }

    fn is_stopped(&self) -> bool {
        self.stopped()
    }
}

async fn flush_loop(shared: Arc<Shared>, flush: Duration, write_timeout: Duration) {
    let mut interval = tokio::time::interval(flush);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        let stopping = tokio::select! {
            _ = interval.tick() => shared.token.is_cancelled(),
            _ = shared.token.cancelled() => true,
        };

        let Some(lines) = take_pending(&shared, stopping) else {
            break;
        };
        let written = write_batch(&shared.path, lines, write_timeout).await;
        if stopping && !written {
            // one attempt per batch; nothing left to retry into
            abandon_pending(&shared);
            break;
        }
    }
}

/// Drain the pending list. Returns `None` (and marks the writer stopped
/// under the same lock) when stopping with nothing left to write.
fn take_pending(shared: &Shared, stopping: bool) -> Option<Vec<String>> {
    let mut pending = shared.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if pending.is_empty() && stopping {
        shared.stopped.store(true, Ordering::SeqCst);
        return None;
    }
    Some(std::mem::take(&mut *pending))
}

fn abandon_pending(shared: &Shared) {
    let mut pending = shared.pending.lock().unwrap_or_else(PoisonError::into_inner);
    pending.clear();
    shared.stopped.store(true, Ordering::SeqCst);
}

/// Returns `false` when the batch was dropped.
async fn write_batch(path: &Path, lines: Vec<String>, write_timeout: Duration) -> bool {
    if lines.is_empty() {
        return true;
    }

    let count = lines.len();
    let mut buffer = lines.join("\n");
    buffer.push('\n');

    let reason = match tokio::time::timeout(write_timeout, append_to_file(path, buffer.as_bytes())).await {
        Ok(Ok(())) => return true,
        Ok(Err(error)) => error.to_string(),
        Err(_) => format!("write timed out after {:?}", write_timeout),
    };

    LogFlushFailed {
        path: &path.display().to_string(),
        lines: count,
        reason: &reason,
    }
    .log();
    false
}

async fn append_to_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await
}

/// One formatted tracing event, appended line by line when dropped.
pub struct LogLine {
    writer: LogWriter,
    buffer: Vec<u8>,
}

impl io::Write for LogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.writer.append(line);
        }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogLine;

    fn make_writer(&'a self) -> Self::Writer {
        LogLine {
            writer: self.clone(),
            buffer: Vec::new(),
        }
    }
}
