// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One retrieved article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub content: String,
    /// When the article was retrieved (UTC)
    pub fetched_at: DateTime<Utc>,
}

impl Article {
    pub fn new(url: &str, title: &str, content: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            fetched_at: Utc::now(),
        }
    }
}
