// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::ops::Range;

use regex::Regex;

use crate::errors::RuleError;

/// Where a rule's pattern is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The match must start at the first byte of the text.
    Prefix,
    /// The match may start anywhere.
    Any,
}

/// An uncompiled rule declaration.
///
/// Rule sets are written as specs so they can be composed and compared
/// before anything is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    pub mode: MatchMode,
    pub display_name: Option<String>,
    pub examples: Vec<String>,
}

impl RuleSpec {
    pub fn prefix(name: &str, pattern: impl Into<String>) -> Self {
        Self::new(name, pattern, MatchMode::Prefix)
    }

    pub fn any(name: &str, pattern: impl Into<String>) -> Self {
        Self::new(name, pattern, MatchMode::Any)
    }

    fn new(name: &str, pattern: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            name: name.to_lowercase(),
            pattern: pattern.into(),
            mode,
            display_name: None,
            examples: Vec::new(),
        }
    }

    /// Attach help metadata; only rules with a display name show up in help.
    pub fn with_help<I, S>(mut self, display_name: &str, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_name = Some(display_name.to_string());
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }
}

/// A compiled, immutable rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    mode: MatchMode,
    display_name: Option<String>,
    examples: Vec<String>,
}

impl Rule {
    pub fn compile(spec: RuleSpec) -> Result<Self, RuleError> {
        if spec.name.trim().is_empty() {
            return Err(RuleError::EmptyName {
                pattern: spec.pattern,
            });
        }
        let pattern = Regex::new(&spec.pattern).map_err(|source| RuleError::InvalidPattern {
            name: spec.name.clone(),
            source,
        })?;

        Ok(Self {
            name: spec.name.to_lowercase(),
            pattern,
            mode: spec.mode,
            display_name: spec.display_name,
            examples: spec.examples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Two rules are the same declaration when name, pattern and mode agree.
    pub fn same_declaration(&self, spec: &RuleSpec) -> bool {
        self.name == spec.name.to_lowercase()
            && self.pattern.as_str() == spec.pattern
            && self.mode == spec.mode
    }

    /// Test the rule against `text`.
    ///
    /// The regex engine reports the leftmost match, so a prefix rule matches
    /// exactly when the leftmost match starts at offset 0.
    pub fn find(&self, text: &str) -> Option<RuleMatch> {
        let captures = self.pattern.captures(text)?;
        let whole = captures.get(0)?;
        if self.mode == MatchMode::Prefix && whole.start() != 0 {
            return None;
        }

        let span = whole.range();
        let mut residual = String::with_capacity(text.len() - span.len());
        residual.push_str(&text[..span.start]);
        residual.push_str(&text[span.end..]);

        Some(RuleMatch {
            rule_name: self.name.clone(),
            matched: whole.as_str().to_string(),
            span,
            groups: captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
            residual,
        })
    }

    /// One help line, or `None` for rules without display metadata.
    pub fn help_line(&self) -> Option<String> {
        let display = self.display_name.as_deref()?;
        if self.examples.is_empty() {
            return Some(format!("*{}*", capitalize(display)));
        }
        let examples = self
            .examples
            .iter()
            .map(|e| format!("`{}`", e))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("*{}*: {}", capitalize(display), examples))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The result of one rule matching one text.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub rule_name: String,
    /// The full matched substring
    pub matched: String,
    pub span: Range<usize>,
    /// Capture groups 1..n; `None` for groups that did not participate
    pub groups: Vec<Option<String>>,
    /// The input with the matched substring removed (first occurrence only)
    pub residual: String,
}

impl RuleMatch {
    /// Capture group `index` (1-based, like the regex).
    pub fn group(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .and_then(|g| g.as_deref())
    }
}

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}
