// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use leaguebot::articles::{ArticleCollector, ArticleStore};
use leaguebot::backends::{ConsoleChat, FileArticleSource, FixtureLeagueSource};
use leaguebot::config::consts::{CONSOLE_USER_ID, FETCH_IDLE_INTERVAL};
use leaguebot::config::{load_config, validate_config, ArticlesConfig, Config};
use leaguebot::dispatch::{ActionDispatcher, BotIdentity};
use leaguebot::engine::{close_run_log, LogWriter, PollLoop, Supervisor};
use leaguebot::errors::AgentError;
use leaguebot::league::LeagueCache;
use leaguebot::logging::init_logging;
use leaguebot::traits::UserProfile;

struct Args {
    config_path: String,
    agent: Option<String>,
    debug: bool,
}

fn parse_args() -> Option<Args> {
    let mut debug = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--debug" {
            debug = true;
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let config_path = positional.next()?;
    Some(Args {
        config_path,
        agent: positional.next(),
        debug,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args() else {
        eprintln!("Usage: leaguebot <config.yaml> [agent-name] [--debug]");
        eprintln!("Example: leaguebot configs/leaguebot.yaml squirtle");
        std::process::exit(1);
    };

    let config = load_config(&args.config_path)
        .with_context(|| format!("loading {}", args.config_path))?;

    let run_log = LogWriter::spawn_in_dir(&config.logging.dir)
        .with_context(|| format!("creating log directory {}", config.logging.dir.display()))?;
    init_logging(args.debug || config.logging.debug, Some(run_log.clone()));

    let result = run_agent(&args, &config, &run_log).await;
    close_run_log(&run_log, result).await
}

/// Everything after the run log exists; returning ends the process.
async fn run_agent(args: &Args, config: &Config, run_log: &LogWriter) -> Result<()> {
    validate_config(config).map_err(AgentError::Config)?;

    let (agent_name, agent) = match &args.agent {
        Some(name) => config
            .agents
            .get_key_value(name)
            .ok_or_else(|| anyhow!("no agent named '{}' in {}", name, args.config_path))?,
        None => config
            .agents
            .iter()
            .next()
            .ok_or_else(|| anyhow!("{} defines no agents", args.config_path))?,
    };
    let Some(channel) = agent.channels.first() else {
        bail!("agent '{}' has no channels", agent_name);
    };

    let source = Arc::new(FixtureLeagueSource::new(agent.league.fixture_dir.clone()));
    let cache = Arc::new(LeagueCache::new(source, &agent.league));
    let identity = BotIdentity::from_agent(agent_name, agent);
    let dispatcher = ActionDispatcher::standard(identity, agent.cheeky, Some(cache))?;

    let console_user = UserProfile {
        id: CONSOLE_USER_ID.to_string(),
        name: env::var("USER").unwrap_or_else(|_| "console".to_string()),
        first_name: env::var("LEAGUEBOT_FIRST_NAME").unwrap_or_else(|_| "Console".to_string()),
    };
    let chat = Arc::new(ConsoleChat::new(channel, console_user));
    let poll_loop = Arc::new(PollLoop::new(
        agent_name,
        chat,
        Arc::new(dispatcher),
        &agent.channels,
        agent.poll_interval(),
    ));
    let mut poll_task = tokio::spawn({
        let poll_loop = poll_loop.clone();
        async move { poll_loop.run().await }
    });

    let mut supervisor = Supervisor::new();
    supervisor.add_poll_loop(poll_loop);
    supervisor.set_log_writer(Arc::new(run_log.clone()));

    let outcome = async {
        if let Some(articles) = &config.articles {
            collect_articles(articles).await?;
        }
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.context("waiting for ctrl-c"),
            finished = &mut poll_task => match finished {
                Ok(stopped) => stopped.map_err(anyhow::Error::from),
                Err(join_error) => Err(anyhow!("poll loop panicked: {}", join_error)),
            },
        }
    }
    .await;

    let clean = supervisor.shutdown().await;
    outcome?;
    if !clean {
        bail!("shutdown did not complete cleanly");
    }
    Ok(())
}

async fn collect_articles(articles: &ArticlesConfig) -> Result<()> {
    let mut store = ArticleStore::load(&articles.snapshot_path)?;
    let collector = ArticleCollector::new(Arc::new(FileArticleSource), FETCH_IDLE_INTERVAL);
    collector
        .collect(&mut store, articles.urls.iter().cloned())
        .await?;
    Ok(())
}
