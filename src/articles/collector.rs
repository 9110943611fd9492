// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::articles::{Article, ArticleStore};
use crate::engine::FetchWorker;
use crate::errors::{FetchError, StoreError};
use crate::observability::messages::workers::ArticlesCollected;
use crate::observability::messages::StructuredLog;
use crate::traits::{ArticleSource, Fetcher, Worker};

/// Adapts an [`ArticleSource`] to the fetch worker.
pub struct ArticleFetcher {
    source: Arc<dyn ArticleSource>,
}

impl ArticleFetcher {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Fetcher<String, Article> for ArticleFetcher {
    async fn fetch(&self, url: String) -> Result<Article, FetchError> {
        let (content, title) = self.source.fetch_one(&url).await?;
        Ok(Article::new(&url, &title, &content))
    }

    fn name(&self) -> &str {
        "articles"
    }
}

/// Runs one collection pass over a list of URLs.
pub struct ArticleCollector {
    source: Arc<dyn ArticleSource>,
    idle: Duration,
    poll: Duration,
}

impl ArticleCollector {
    pub fn new(source: Arc<dyn ArticleSource>, idle: Duration) -> Self {
        Self {
            source,
            idle,
            poll: Duration::from_millis(20),
        }
    }

    /// Fetch every URL not already in `store`, persisting after each new
    /// article. Returns the number of articles added.
    ///
    /// The worker is stopped once nothing is pending, and the call returns
    /// only after it reports stopped.
    pub async fn collect<I>(&self, store: &mut ArticleStore, urls: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = String>,
    {
        let worker = FetchWorker::spawn(
            "articles",
            Arc::new(ArticleFetcher::new(self.source.clone())),
            self.idle,
        );
        for url in urls {
            if !store.contains(&url) {
                worker.submit(url);
            }
        }

        let mut added = 0;
        let outcome = 'collect: loop {
            // results are queued before `size` drops, so a zero read here
            // means the drain below sees everything
            let finished = worker.size() == 0;
            while let Some(article) = worker.try_take_result() {
                if store.insert(article) {
                    added += 1;
                    if let Err(error) = store.save() {
                        break 'collect Err(error);
                    }
                }
            }
            if finished {
                break Ok(());
            }
            tokio::time::sleep(self.poll).await;
        };

        worker.request_stop();
        worker.join().await;

        ArticlesCollected {
            new_articles: added,
            total_articles: store.len(),
        }
        .log();
        outcome.map(|_| added)
    }
}
