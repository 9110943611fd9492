// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::config::consts::CONSOLE_CHANNEL_ID;
use crate::errors::ChatError;
use crate::traits::{ChatClient, InboundEvent, UserProfile};

/// Terminal chat: stdin lines become events, posts go to stdout.
pub struct ConsoleChat {
    channel_name: String,
    user: UserProfile,
    lines: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
    seq: AtomicU64,
}

impl ConsoleChat {
    /// `channel_name` must be one of the agent's permitted channels for the
    /// bot to answer.
    pub fn new(channel_name: &str, user: UserProfile) -> Self {
        Self {
            channel_name: channel_name.to_string(),
            user,
            lines: Mutex::new(None),
            seq: AtomicU64::new(0),
        }
    }

    /// Use an existing line feed instead of stdin.
    pub fn with_feed(channel_name: &str, user: UserProfile, feed: mpsc::UnboundedReceiver<String>) -> Self {
        let chat = Self::new(channel_name, user);
        *chat.lines.lock().unwrap_or_else(PoisonError::into_inner) = Some(feed);
        chat
    }
}

#[async_trait]
impl ChatClient for ConsoleChat {
    async fn connect(&self) -> bool {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        if lines.is_none() {
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(async move {
                let mut stdin = BufReader::new(tokio::io::stdin()).lines();
                while let Ok(Some(line)) = stdin.next_line().await {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            });
            *lines = Some(rx);
        }
        true
    }

    async fn read_events(&self) -> Result<Vec<InboundEvent>, ChatError> {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(lines) = guard.as_mut() else {
            return Err(ChatError::Transport("console not connected".to_string()));
        };

        let mut events = Vec::new();
        while let Ok(line) = lines.try_recv() {
            let seq = self.seq.fetch_add(1, Ordering::SeqCst);
            events.push(InboundEvent::message(seq, CONSOLE_CHANNEL_ID, &self.user.id, &line));
        }
        Ok(events)
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), ChatError> {
        let name = self
            .resolve_channel_name(channel_id)
            .await?
            .unwrap_or_else(|| channel_id.to_string());
        let rendered = format!("[#{}] {}\n", name, text);

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(rendered.as_bytes())
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))
    }

    async fn resolve_channel_name(&self, channel_id: &str) -> Result<Option<String>, ChatError> {
        Ok((channel_id == CONSOLE_CHANNEL_ID).then(|| self.channel_name.clone()))
    }

    async fn resolve_user_name(&self, user_id: &str) -> Result<Option<UserProfile>, ChatError> {
        Ok((user_id == self.user.id).then(|| self.user.clone()))
    }
}
