// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Every operational event the agent emits is a small message struct with a
//! `Display` implementation and a [`messages::StructuredLog`] implementation
//! that attaches the same data as structured `tracing` fields. This keeps log
//! wording in one place and out of the dispatch and worker code paths.
//!
//! # Organization
//!
//! * `messages::agent` - configuration, connection, poll loop and shutdown events
//! * `messages::dispatch` - rule matches, enrichment and posting
//! * `messages::workers` - fetch worker, log writer and article collection
//! * `messages::cache` - TTL cache refreshes and fetch failures
//!
//! # Usage
//!
//! ```rust
//! use leaguebot::observability::messages::agent::AgentConnected;
//! use leaguebot::observability::messages::StructuredLog;
//!
//! AgentConnected {
//!     agent: "squirtle",
//!     channel_count: 2,
//! }
//! .log();
//! ```

pub mod messages;
