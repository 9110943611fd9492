// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in handlers.
//!
//! Every league handler renders a non-empty reply for lookups that find
//! nothing; only cheeky handlers and help are allowed to stay quiet.

use std::collections::HashSet;

use rand::Rng;

use crate::dispatch::format::{format_matchup, ordinal};
use crate::dispatch::{BotIdentity, DispatchContext};
use crate::league::{LeagueSnapshot, Matchup, Team};
use crate::rules::capitalize;
use crate::traits::Handler;

pub const UNAVAILABLE_MESSAGE: &str = "League data is unavailable right now, try again later.";

pub fn unknown_person(first_name: &str) -> String {
    format!(
        "I don't know who {} is, but I bet they suck at fantasy.",
        capitalize(first_name)
    )
}

pub(crate) fn about_bot(identity: &BotIdentity) -> impl Handler {
    let reply = match (&identity.author, &identity.website) {
        (Some(author), Some(site)) => format!(
            "{} is a chatbot created by {}. Please visit '{}'!",
            identity.name, author, site
        ),
        (Some(author), None) => format!("{} is a chatbot created by {}.", identity.name, author),
        _ => format!("{} is a chatbot.", identity.name),
    };
    move |_: &DispatchContext| Some(reply.clone())
}

pub(crate) fn about_author(author: &str, website: Option<&str>) -> impl Handler {
    let reply = match website {
        Some(site) => format!("{} is the author of this bot. Please visit '{}'!", author, site),
        None => format!("{} is the author of this bot.", author),
    };
    move |_: &DispatchContext| Some(reply.clone())
}

/// Renders the help lines captured when the dispatcher was built.
pub(crate) fn help(lines: Vec<String>) -> impl Handler {
    move |_: &DispatchContext| {
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

pub(crate) fn matchup(ctx: &DispatchContext) -> Option<String> {
    let subject = ctx.subject()?;
    let (Some(league), Some(week)) = (ctx.league.as_deref(), ctx.week) else {
        return Some(UNAVAILABLE_MESSAGE.to_string());
    };

    let Some(team) = league
        .player_by_first_name(&subject.first_name)
        .and_then(|player| league.team_owned_by(&player.player_id))
    else {
        return Some(unknown_person(&subject.first_name));
    };

    let Some(game) = league.matchup(team, week) else {
        return Some(format!("{} has no matchup in week {}.", team.team_name, week));
    };

    Some(format!(
        "Week {}: vs. {} ({}):\n{}",
        week,
        game.opponent.owner,
        game.opponent.team_name,
        score_table(&game)
    ))
}

pub(crate) fn matchups_all(ctx: &DispatchContext) -> Option<String> {
    let (Some(league), Some(week)) = (ctx.league.as_deref(), ctx.week) else {
        return Some(UNAVAILABLE_MESSAGE.to_string());
    };

    let games = pairings(league, week);
    if games.is_empty() {
        return Some(format!("No matchups scheduled for week {}.", week));
    }

    let mut reply = format!("Week {} matchups:\n", week);
    for game in games {
        reply.push_str(&score_table(&game));
        reply.push('\n');
    }
    Some(reply)
}

pub(crate) fn tell(ctx: &DispatchContext) -> Option<String> {
    let subject = ctx.subject()?;
    let Some(league) = ctx.league.as_deref() else {
        return Some(UNAVAILABLE_MESSAGE.to_string());
    };

    let Some(team) = league.team_by_owner_first_name(&subject.first_name) else {
        return Some(unknown_person(&subject.first_name));
    };

    let mut reply = if subject.is_requester {
        format!("{} are terrible and you are totally clueless.", team.team_name)
    } else {
        format!(
            "{} are terrible and {} is totally clueless.",
            team.team_name,
            capitalize(&subject.first_name)
        )
    };

    let last_place = ctx
        .previous_league
        .as_deref()
        .and_then(|previous| previous.team_by_owner_first_name(&subject.first_name))
        .and_then(|previous| previous.overall_standing);
    if let Some(place) = last_place {
        let (who, will) = if subject.is_requester {
            ("You", "you'll")
        } else {
            ("They", "they'll")
        };
        reply.push_str(&format!(
            " {} somehow came in {} last year, but {} manage to do worse this year.",
            who,
            ordinal(place),
            will
        ));
    }

    Some(reply)
}

pub(crate) fn brady(_: &DispatchContext) -> Option<String> {
    Some("Tom Brady has deflated balls.".to_string())
}

/// "GENO" with a random number of each letter.
pub(crate) fn geno(_: &DispatchContext) -> Option<String> {
    let mut rng = rand::thread_rng();
    let mut shout = String::new();
    for (letter, min, max) in [('G', 1, 1), ('E', 2, 3), ('N', 1, 2), ('O', 2, 4)] {
        let count = rng.gen_range(min..=max);
        shout.extend(std::iter::repeat(letter).take(count));
    }
    Some(shout)
}

pub(crate) fn jets(_: &DispatchContext) -> Option<String> {
    Some("GO JETS".to_string())
}

pub(crate) fn lacy(_: &DispatchContext) -> Option<String> {
    Some("Choo choo!".to_string())
}

fn score_table(game: &Matchup<'_>) -> String {
    let (line1, line2) = format_matchup(
        &game.team.team_name,
        &game.opponent.team_name,
        game.score,
        game.opponent_score,
    );
    format!(
        "{} vs. {}:\n```{}\n{}```",
        game.team.owner, game.opponent.owner, line1, line2
    )
}

/// Every game of `week` exactly once, in team order.
fn pairings(league: &LeagueSnapshot, week: u32) -> Vec<Matchup<'_>> {
    let mut seen = HashSet::new();
    league
        .teams
        .iter()
        .filter_map(|team: &Team| league.matchup(team, week))
        .filter(|game| {
            if seen.contains(&game.team.team_id) {
                return false;
            }
            seen.insert(game.team.team_id);
            seen.insert(game.opponent.team_id);
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::sample_league;
    use crate::dispatch::{BaseContext, ChannelRef};
    use crate::rules::{Rule, RuleSpec};
    use crate::traits::UserProfile;
    use std::sync::Arc;

    fn context(pattern: &str, text: &str, week: Option<u32>, with_league: bool) -> DispatchContext {
        let rule = Rule::compile(RuleSpec::prefix("test", pattern)).unwrap();
        let matched = rule.find(text).unwrap();
        let base = BaseContext {
            text: text.to_string(),
            channel: ChannelRef {
                id: "C1".to_string(),
                name: "fantasy".to_string(),
            },
            user: UserProfile {
                id: "U2".to_string(),
                name: "bjones".to_string(),
                first_name: "Bob".to_string(),
            },
        };
        let mut ctx = DispatchContext::new(&base, &matched);
        if with_league {
            ctx.league = Some(Arc::new(sample_league(2017)));
            ctx.previous_league = Some(Arc::new(sample_league(2016)));
        }
        ctx.week = week;
        ctx
    }

    const MATCHUP: &str = r"@bot show (\w+)(?:'s|')? matchup\b";
    const TELL: &str = r"@bot (?:tell me|what|how) about (\w+)(?:'s|')? team";

    #[test]
    fn test_matchup_renders_both_teams_and_scores() {
        let ctx = context(MATCHUP, "@bot show Alice's matchup", Some(5), true);
        let reply = matchup(&ctx).unwrap();

        assert!(reply.starts_with("Week 5: vs. Bob Jones (Bob's Team):\n"));
        assert!(reply.contains("Alice Smith vs. Bob Jones:"));
        assert!(reply.contains("Alpha Dogs"));
        assert!(reply.contains("105.0"));
        assert!(reply.contains("98.5"));
    }

    #[test]
    fn test_matchup_my_uses_requester() {
        let ctx = context(MATCHUP, "@bot show my matchup", Some(5), true);
        let reply = matchup(&ctx).unwrap();

        assert!(reply.starts_with("Week 5: vs. Alice Smith (Alpha Dogs):"));
    }

    #[test]
    fn test_matchup_unknown_person() {
        let ctx = context(MATCHUP, "@bot show zed's matchup", Some(5), true);
        assert_eq!(
            matchup(&ctx).unwrap(),
            "I don't know who Zed is, but I bet they suck at fantasy."
        );
    }

    #[test]
    fn test_matchup_week_without_game() {
        let ctx = context(MATCHUP, "@bot show Alice's matchup", Some(40), true);
        assert_eq!(matchup(&ctx).unwrap(), "Alpha Dogs has no matchup in week 40.");
    }

    #[test]
    fn test_matchup_without_league_reports_unavailable() {
        let ctx = context(MATCHUP, "@bot show Alice's matchup", None, false);
        assert_eq!(matchup(&ctx).unwrap(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_matchups_all_lists_each_game_once() {
        let ctx = context(r"@bot show all matchups", "@bot show all matchups", Some(5), true);
        let reply = matchups_all(&ctx).unwrap();

        assert!(reply.starts_with("Week 5 matchups:\n"));
        assert_eq!(reply.matches("```").count(), 4);
        assert_eq!(reply.matches(" vs. ").count(), 2);
    }

    #[test]
    fn test_tell_about_someone_else() {
        let ctx = context(TELL, "@bot tell me about alice's team", None, true);
        assert_eq!(
            tell(&ctx).unwrap(),
            "Alpha Dogs are terrible and Alice is totally clueless. \
             They somehow came in 1st last year, but they'll manage to do worse this year."
        );
    }

    #[test]
    fn test_tell_about_requester() {
        let ctx = context(TELL, "@bot what about my team", None, true);
        let reply = tell(&ctx).unwrap();

        assert!(reply.starts_with("Bob's Team are terrible and you are totally clueless."));
        assert!(reply.contains("You somehow came in 2nd last year, but you'll"));
    }

    #[test]
    fn test_tell_unknown_person() {
        let ctx = context(TELL, "@bot how about zed's team", None, true);
        assert_eq!(
            tell(&ctx).unwrap(),
            "I don't know who Zed is, but I bet they suck at fantasy."
        );
    }

    #[test]
    fn test_geno_shape() {
        let ctx = context("@bot", "@bot", None, false);
        for _ in 0..50 {
            let shout = geno(&ctx).unwrap();
            let re = regex::Regex::new("^G{1}E{2,3}N{1,2}O{2,4}$").unwrap();
            assert!(re.is_match(&shout), "unexpected shout {}", shout);
        }
    }

    #[test]
    fn test_about_bot_credits() {
        let ctx = context("@bot", "@bot", None, false);
        let identity = BotIdentity::new("squirtle", "U1")
            .with_credits(Some("Jane Doe".to_string()), None);

        assert_eq!(
            about_bot(&identity).handle(&ctx).unwrap(),
            "squirtle is a chatbot created by Jane Doe."
        );
    }

    #[test]
    fn test_help_is_silent_without_lines() {
        let ctx = context("@bot", "@bot", None, false);
        assert!(help(Vec::new()).handle(&ctx).is_none());
        assert_eq!(
            help(vec!["a".to_string(), "b".to_string()]).handle(&ctx).unwrap(),
            "a\nb"
        );
    }
}
