// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod chat;
pub mod fetcher;
pub mod handler;
pub mod source;
pub mod worker;

pub use chat::{ChatClient, InboundEvent, OutputSink, UserProfile};
pub use fetcher::Fetcher;
pub use handler::Handler;
pub use source::{ArticleSource, LeagueSource};
pub use worker::Worker;
