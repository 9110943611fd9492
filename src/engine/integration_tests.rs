// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::backends::stub::{ScriptedChat, StubLeagueSource};
use crate::config::LeagueAuth;
use crate::dispatch::{ActionDispatcher, BotIdentity};
use crate::engine::{LogWriter, PollLoop, Supervisor};
use crate::league::LeagueCache;
use crate::traits::{InboundEvent, Worker};

/// End-to-end tests: poll → match → enrich → dispatch → post
#[cfg(test)]
mod tests {
    use super::*;

    fn agent(chat: Arc<ScriptedChat>, source: Arc<StubLeagueSource>) -> PollLoop {
        let identity = BotIdentity::new("squirtle", "U0BOT");
        let cache = Arc::new(LeagueCache::with_ttls(
            source,
            336358,
            2017,
            LeagueAuth::default(),
            Duration::from_secs(30 * 60),
            Duration::from_secs(5 * 60),
        ));
        let dispatcher = ActionDispatcher::standard(identity, true, Some(cache)).unwrap();

        PollLoop::new(
            "squirtle",
            chat,
            Arc::new(dispatcher),
            &["fantasy".to_string()],
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn test_week_five_matchup_scenario() {
        let chat = Arc::new(ScriptedChat::new());
        let source = Arc::new(StubLeagueSource::sample(2017, 5));
        chat.push_batch(vec![InboundEvent::message(
            0,
            "C1",
            "U2",
            "<@U0BOT> show Alice's matchup",
        )]);
        let poll = agent(chat.clone(), source.clone());

        poll.run_once().await.unwrap();

        let posts = chat.posts();
        assert_eq!(posts.len(), 1);
        let (channel, reply) = &posts[0];
        assert_eq!(channel, "C1");
        assert!(reply.contains("Week 5"));
        assert!(reply.contains("Alpha Dogs"));
        assert!(reply.contains("Bob's Team"));
        assert!(reply.contains("105.0"));
        assert!(reply.contains("98.5"));
        assert_eq!(source.league_fetches(), 1);
        assert_eq!(source.week_fetches(), 1);
    }

    #[tokio::test]
    async fn test_second_query_is_served_from_cache() {
        let chat = Arc::new(ScriptedChat::new());
        let source = Arc::new(StubLeagueSource::sample(2017, 5));
        chat.push_batch(vec![
            InboundEvent::message(0, "C1", "U2", "<@U0BOT> show Alice's matchup"),
            InboundEvent::message(1, "C1", "U1", "<@U0BOT> show my matchup"),
        ]);
        let poll = agent(chat.clone(), source.clone());

        poll.run_once().await.unwrap();

        assert_eq!(chat.posts().len(), 2);
        assert!(chat.posts()[1].1.starts_with("Week 5: vs. Bob Jones (Bob's Team):"));
        assert_eq!(source.league_fetches(), 1);
        assert_eq!(source.week_fetches(), 1);
    }

    #[tokio::test]
    async fn test_my_matchup_from_unresolved_user_names_them() {
        let chat = Arc::new(ScriptedChat::new());
        let source = Arc::new(StubLeagueSource::sample(2017, 5));
        chat.push_batch(vec![InboundEvent::message(0, "C1", "U9", "<@U0BOT> show my matchup")]);
        let poll = agent(chat.clone(), source);

        poll.run_once().await.unwrap();

        assert_eq!(
            chat.posts()[0].1,
            "I don't know who U9 is, but I bet they suck at fantasy."
        );
    }

    #[tokio::test]
    async fn test_command_and_keyword_in_one_message() {
        let chat = Arc::new(ScriptedChat::new());
        let source = Arc::new(StubLeagueSource::sample(2017, 5));
        chat.push_batch(vec![InboundEvent::message(
            0,
            "C1",
            "U1",
            "<@U0BOT> tell me about bob's team, he fumbled again",
        )]);
        let poll = agent(chat.clone(), source);

        poll.run_once().await.unwrap();

        let texts: Vec<String> = chat.posts().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].starts_with("Bob's Team are terrible and Bob is totally clueless."));
        assert_eq!(texts[1], "GO JETS");
    }

    #[tokio::test]
    async fn test_outage_yields_fallback_then_recovers() {
        let chat = Arc::new(ScriptedChat::new());
        let source = Arc::new(StubLeagueSource::sample(2017, 5));
        source.set_available(false);
        chat.push_batch(vec![InboundEvent::message(0, "C1", "U2", "<@U0BOT> show all matchups")]);
        chat.push_batch(vec![InboundEvent::message(1, "C1", "U2", "<@U0BOT> show all matchups")]);
        let poll = agent(chat.clone(), source.clone());

        poll.run_once().await.unwrap();
        source.set_available(true);
        poll.run_once().await.unwrap();

        let posts = chat.posts();
        assert_eq!(posts[0].1, "League data is unavailable right now, try again later.");
        assert!(posts[1].1.starts_with("Week 5 matchups:"));
    }

    #[tokio::test]
    async fn test_supervised_shutdown_flushes_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path().join("run.txt");
        let writer = LogWriter::with_intervals(&log_path, Duration::from_millis(20), Duration::from_secs(1));

        let chat = Arc::new(ScriptedChat::new());
        chat.push_batch(vec![InboundEvent::message(0, "C1", "U2", "lacy")]);
        let poll = Arc::new(agent(chat.clone(), Arc::new(StubLeagueSource::sample(2017, 5))));
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
        writer.append("agent answered");

        let mut supervisor = Supervisor::new();
        supervisor.add_poll_loop(poll.clone());
        supervisor.set_log_writer(Arc::new(writer.clone()));

        assert!(supervisor.shutdown().await);
        task.await.unwrap().unwrap();
        assert!(poll.is_stopped());
        assert!(writer.stopped());
        assert!(std::fs::read_to_string(&log_path).unwrap().contains("agent answered"));
    }
}
