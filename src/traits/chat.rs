// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The chat collaborator boundary.
//!
//! The agent only ever talks to a chat platform through these five
//! operations; transport details live in the implementation.

use async_trait::async_trait;

use crate::errors::ChatError;

/// One raw event as read from the chat service.
///
/// Events without text (joins, typing notifications, edits) still arrive here
/// and are filtered by the poll loop.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub text: Option<String>,
    pub channel_id: String,
    pub user_id: String,
    /// Arrival order within the agent's lifetime
    pub seq: u64,
}

impl InboundEvent {
    pub fn message(seq: u64, channel_id: &str, user_id: &str, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            seq,
        }
    }
}

/// A resolved chat user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub first_name: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Open the session. `false` means the agent must not start polling.
    async fn connect(&self) -> bool;

    /// Read the next batch of events; may return an empty batch.
    async fn read_events(&self) -> Result<Vec<InboundEvent>, ChatError>;

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), ChatError>;

    async fn resolve_channel_name(&self, channel_id: &str) -> Result<Option<String>, ChatError>;

    async fn resolve_user_name(&self, user_id: &str) -> Result<Option<UserProfile>, ChatError>;
}

/// Where dispatch output goes.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn post(&self, channel_id: &str, text: &str) -> Result<(), ChatError>;
}

#[async_trait]
impl<C: ChatClient + ?Sized> OutputSink for C {
    async fn post(&self, channel_id: &str, text: &str) -> Result<(), ChatError> {
        self.post_message(channel_id, text).await
    }
}
