// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-agent scheduler: read a batch of events, match, dispatch, sleep.
//!
//! Events are screened before matching. An event is ignored when it has no
//! text, when the bot itself or the system user wrote it, or when it arrived
//! in a channel the agent is not configured for. Every remaining event of a
//! batch is processed, in arrival order.
//!
//! A failure resolving names for one event is logged and skips that event;
//! a failure reading a batch is logged and the loop carries on at the next
//! interval.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::consts::SYSTEM_USER_ID;
use crate::dispatch::{ActionDispatcher, BaseContext, ChannelRef};
use crate::errors::{AgentError, ChatError};
use crate::observability::messages::agent::{
    AgentConnectFailed, AgentConnected, AgentStopped, ChatReadFailed, EventIgnored,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ChatClient, InboundEvent, UserProfile, Worker};

/// What happened to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored(&'static str),
    Unmatched,
    Dispatched { outputs: usize },
}

pub struct PollLoop {
    agent: String,
    chat: Arc<dyn ChatClient>,
    dispatcher: Arc<ActionDispatcher>,
    channels: HashSet<String>,
    interval: Duration,
    token: CancellationToken,
    stopped: AtomicBool,
    events_handled: AtomicU64,
}

impl PollLoop {
    pub fn new(
        agent: &str,
        chat: Arc<dyn ChatClient>,
        dispatcher: Arc<ActionDispatcher>,
        channels: &[String],
        interval: Duration,
    ) -> Self {
        Self {
            agent: agent.to_string(),
            chat,
            dispatcher,
            channels: channels.iter().map(|c| c.to_lowercase()).collect(),
            interval,
            token: CancellationToken::new(),
            stopped: AtomicBool::new(false),
            events_handled: AtomicU64::new(0),
        }
    }

    pub fn events_handled(&self) -> u64 {
        self.events_handled.load(Ordering::SeqCst)
    }

    /// Connect, then poll until stopped.
    pub async fn run(&self) -> Result<(), AgentError> {
        if !self.chat.connect().await {
            AgentConnectFailed { agent: &self.agent }.log();
            self.stopped.store(true, Ordering::SeqCst);
            return Err(AgentError::ConnectFailed(self.agent.clone()));
        }
        let connected = AgentConnected {
            agent: &self.agent,
            channel_count: self.channels.len(),
        };
        connected.log();

        self.poll_until_stopped()
            .instrument(connected.span("poll_loop"))
            .await;
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn poll_until_stopped(&self) {
        while !self.token.is_cancelled() {
            if let Err(error) = self.run_once().await {
                ChatReadFailed {
                    agent: &self.agent,
                    error: &error,
                }
                .log();
            }

            tokio::select! {
                _ = self.token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        AgentStopped {
            agent: &self.agent,
            events_handled: self.events_handled(),
        }
        .log();
    }

    /// One poll cycle over whatever batch the chat client returns.
    pub async fn run_once(&self) -> Result<Vec<EventOutcome>, ChatError> {
        let events = self.chat.read_events().await?;
        let mut outcomes = Vec::with_capacity(events.len());

        for event in events {
            match self.handle_event(event).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    ChatReadFailed {
                        agent: &self.agent,
                        error: &error,
                    }
                    .log();
                    outcomes.push(EventOutcome::Ignored("lookup failed"));
                }
            }
        }
        Ok(outcomes)
    }

    async fn handle_event(&self, event: InboundEvent) -> Result<EventOutcome, ChatError> {
        let text = match event.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(self.ignore(&event, "no text")),
        };
        if event.user_id == self.dispatcher.identity().user_id {
            return Ok(self.ignore(&event, "own message"));
        }
        if event.user_id == SYSTEM_USER_ID {
            return Ok(self.ignore(&event, "system user"));
        }

        let channel_name = self
            .chat
            .resolve_channel_name(&event.channel_id)
            .await?
            .unwrap_or_default();
        if !self.channels.contains(&channel_name.to_lowercase()) {
            return Ok(self.ignore(&event, "channel not permitted"));
        }

        let Some(matches) = self.dispatcher.match_text(text) else {
            return Ok(EventOutcome::Unmatched);
        };

        let user = self
            .chat
            .resolve_user_name(&event.user_id)
            .await?
            .unwrap_or_else(|| UserProfile {
                id: event.user_id.clone(),
                name: event.user_id.clone(),
                first_name: String::new(),
            });

        let base = BaseContext {
            text: text.to_string(),
            channel: ChannelRef {
                id: event.channel_id.clone(),
                name: channel_name,
            },
            user,
        };
        let outputs = self
            .dispatcher
            .dispatch(&matches, &base, self.chat.as_ref())
            .await;
        self.events_handled.fetch_add(1, Ordering::SeqCst);

        Ok(EventOutcome::Dispatched {
            outputs: outputs.len(),
        })
    }

    fn ignore(&self, event: &InboundEvent, reason: &'static str) -> EventOutcome {
        EventIgnored {
            agent: &self.agent,
            channel_id: &event.channel_id,
            reason,
        }
        .log();
        EventOutcome::Ignored(reason)
    }
}

impl Worker for PollLoop {
    fn name(&self) -> &str {
        &self.agent
    }

    fn request_stop(&self) {
        self.token.cancel();
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::ScriptedChat;
    use crate::dispatch::BotIdentity;

    fn dispatcher() -> Arc<ActionDispatcher> {
        Arc::new(ActionDispatcher::standard(BotIdentity::new("squirtle", "U0BOT"), true, None).unwrap())
    }

    fn poll_loop(chat: Arc<ScriptedChat>) -> PollLoop {
        PollLoop::new(
            "squirtle",
            chat,
            dispatcher(),
            &["Fantasy".to_string()],
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn test_screening_rules() {
        let chat = Arc::new(ScriptedChat::new());
        chat.push_batch(vec![
            InboundEvent {
                text: None,
                channel_id: "C1".to_string(),
                user_id: "U2".to_string(),
                seq: 0,
            },
            InboundEvent::message(1, "C1", "U0BOT", "brady"),
            InboundEvent::message(2, "C1", SYSTEM_USER_ID, "brady"),
            InboundEvent::message(3, "C9", "U2", "brady"),
            InboundEvent::message(4, "C1", "U2", "nothing here"),
            InboundEvent::message(5, "C1", "U2", "brady"),
        ]);
        let poll = poll_loop(chat.clone());

        let outcomes = poll.run_once().await.unwrap();

        assert_eq!(
            outcomes,
            vec![
                EventOutcome::Ignored("no text"),
                EventOutcome::Ignored("own message"),
                EventOutcome::Ignored("system user"),
                EventOutcome::Ignored("channel not permitted"),
                EventOutcome::Unmatched,
                EventOutcome::Dispatched { outputs: 1 },
            ]
        );
        assert_eq!(chat.posts(), vec![("C1".to_string(), "Tom Brady has deflated balls.".to_string())]);
        assert_eq!(poll.events_handled(), 1);
    }

    #[tokio::test]
    async fn test_whole_batch_processed_in_order() {
        let chat = Arc::new(ScriptedChat::new());
        chat.push_batch(vec![
            InboundEvent::message(0, "C1", "U2", "lacy"),
            InboundEvent::message(1, "C1", "U2", "brady"),
        ]);
        let poll = poll_loop(chat.clone());

        poll.run_once().await.unwrap();

        let texts: Vec<String> = chat.posts().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec!["Choo choo!", "Tom Brady has deflated balls."]);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let chat = Arc::new(ScriptedChat::new());
        chat.fail_next_read();
        let poll = poll_loop(chat);

        assert!(poll.run_once().await.is_err());
        assert!(poll.run_once().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_failure_aborts() {
        let chat = Arc::new(ScriptedChat::new());
        chat.set_connect(false);
        let poll = poll_loop(chat);

        assert!(matches!(poll.run().await, Err(AgentError::ConnectFailed(_))));
        assert!(poll.is_stopped());
    }

    #[tokio::test]
    async fn test_run_until_stopped() {
        let chat = Arc::new(ScriptedChat::new());
        chat.push_batch(vec![InboundEvent::message(0, "C1", "U2", "fumble")]);
        let poll = Arc::new(poll_loop(chat.clone()));

        let task = tokio::spawn({
            let poll = poll.clone();
            async move { poll.run().await }
        });
        tokio::time::timeout(Duration::from_secs(5), async {
            while chat.posts().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        poll.request_stop();
        task.await.unwrap().unwrap();
        assert!(poll.is_stopped());
        assert_eq!(chat.posts()[0].1, "GO JETS");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_polling_runs_inside_agent_span() {
        let captured = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer({
                let captured = captured.clone();
                move || captured.clone()
            })
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let chat = Arc::new(ScriptedChat::new());
        chat.push_batch(vec![InboundEvent::message(0, "C1", "U2", "lacy")]);
        let poll = Arc::new(poll_loop(chat.clone()));
        let task = tokio::spawn({
            let poll = poll.clone();
            async move { poll.run().await }
        });
        tokio::time::timeout(Duration::from_secs(5), async {
            while chat.posts().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        poll.request_stop();
        task.await.unwrap().unwrap();

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let stopped_line = log
            .lines()
            .find(|line| line.contains("squirtle exiting after 1 dispatched event(s)"))
            .unwrap();
        assert!(stopped_line.contains("agent{"), "no span: {}", stopped_line);
        assert!(stopped_line.contains("poll_loop"));
    }
}
