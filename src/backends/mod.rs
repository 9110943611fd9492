// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator implementations behind the chat, league and article traits.
//!
//! # Available Backends
//!
//! ## Console
//! A terminal stand-in for the chat service: each stdin line is a message
//! in one configured channel and replies are printed to stdout.
//!
//! ## Fixture
//! File-backed data sources. League seasons are read from
//! `<fixture_dir>/<year>.json`; articles from local files.
//!
//! ## Stub Backend (Test-Only)
//! Scripted chat, counting league source, recording sink and canned article
//! source. Only compiled for tests.

pub mod console;
pub mod fixture;
#[cfg(test)]
pub mod stub;

pub use console::ConsoleChat;
pub use fixture::{FileArticleSource, FixtureLeagueSource};
