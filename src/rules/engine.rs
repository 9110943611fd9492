// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ordered keyword matching.
//!
//! The engine tests every rule independently; it is not a first-match-wins
//! scan. A single message can therefore trigger several actions in one
//! cycle, e.g. a bot command plus a cheeky keyword further along the text.
//!
//! # Name collisions
//!
//! Several rules may share one name (the cheeky `jets` action fires on two
//! different spellings). Such rules coexist; at match time results are keyed
//! by name and the *last* matching rule in declaration order supplies the
//! match for that name. The name keeps the position of its first declaration
//! in the result ordering.
//!
//! Registering a rule whose name, pattern and mode equal an existing rule is
//! a no-op.

use crate::errors::RuleError;
use crate::rules::{Rule, RuleMatch, RuleSpec};

/// An immutable-after-construction, ordered set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Compile and register every spec, in order.
    pub fn from_specs<I>(specs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = RuleSpec>,
    {
        let mut engine = Self::new();
        for spec in specs {
            engine.register(spec)?;
        }
        Ok(engine)
    }

    /// Add a rule at the end of the declaration order.
    ///
    /// Returns `Ok(false)` when an identical declaration already exists.
    pub fn register(&mut self, spec: RuleSpec) -> Result<bool, RuleError> {
        if self.rules.iter().any(|rule| rule.same_declaration(&spec)) {
            return Ok(false);
        }
        self.rules.push(Rule::compile(spec)?);
        Ok(true)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Match `text` against every rule.
    ///
    /// Returns `None` when nothing matched, including for empty text.
    pub fn match_text(&self, text: &str) -> Option<RuleMatches> {
        if text.is_empty() {
            return None;
        }

        let mut matches = RuleMatches::default();
        for rule in &self.rules {
            if let Some(found) = rule.find(text) {
                matches.insert(found);
            }
        }

        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }

    /// Help lines for every rule carrying display metadata, in declaration order.
    pub fn help_lines(&self) -> Vec<String> {
        self.rules.iter().filter_map(Rule::help_line).collect()
    }
}

/// Matches keyed by rule name, in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleMatches(Vec<RuleMatch>);

impl RuleMatches {
    fn insert(&mut self, found: RuleMatch) {
        match self.0.iter_mut().find(|m| m.rule_name == found.rule_name) {
            Some(existing) => *existing = found,
            None => self.0.push(found),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuleMatch> {
        self.0.iter().find(|m| m.rule_name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.rule_name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleMatch> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RuleMatches {
    type Item = RuleMatch;
    type IntoIter = std::vec::IntoIter<RuleMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
