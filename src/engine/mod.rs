// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod fetch_worker;
pub mod log_writer;
pub mod poll_loop;
pub mod supervisor;
#[cfg(test)]
pub mod integration_tests;

pub use fetch_worker::{FetchWorker, WorkerState};
pub use log_writer::{LogLine, LogWriter};
pub use poll_loop::{EventOutcome, PollLoop};
pub use supervisor::{close_run_log, wait_stopped, Supervisor};
