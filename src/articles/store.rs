// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::articles::Article;
use crate::errors::StoreError;

/// Previously seen articles keyed by URL, persisted as a JSON snapshot.
#[derive(Debug)]
pub struct ArticleStore {
    path: PathBuf,
    articles: BTreeMap<String, Article>,
}

impl ArticleStore {
    /// Load the snapshot at `path`. A missing or empty file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let articles = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&raw).map_err(|source| StoreError::Format {
                path: path.display().to_string(),
                source,
            })?
        };

        Ok(Self { path, articles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, url: &str) -> bool {
        self.articles.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&Article> {
        self.articles.get(url)
    }

    /// Returns `false` if the URL was already known; the stored article is kept.
    pub fn insert(&mut self, article: Article) -> bool {
        if self.contains(&article.url) {
            return false;
        }
        self.articles.insert(article.url.clone(), article);
        true
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(&self.articles).map_err(|source| StoreError::Format {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_error)
    }
}
