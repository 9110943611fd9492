// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Article collection: URLs in, fetched articles out, seen URLs remembered.

mod article;
mod collector;
mod store;

pub use article::Article;
pub use collector::{ArticleCollector, ArticleFetcher};
pub use store::ArticleStore;
