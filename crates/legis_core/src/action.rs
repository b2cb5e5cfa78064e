use std::cmp::Reverse;
use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::{Chamber, CommitteeTable};

/// How an [`ActionRule`] matches action text. Both forms ignore case.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Stored lowercased; matched against lowercased text.
    Substring(String),
    Regex(Regex),
}

impl Pattern {
    fn source_len(&self) -> usize {
        match self {
            Pattern::Substring(s) => s.chars().count(),
            Pattern::Regex(re) => re.as_str().chars().count(),
        }
    }

    fn matches(&self, text: &str, lowered: &str) -> bool {
        match self {
            Pattern::Substring(s) => !s.is_empty() && lowered.contains(s.as_str()),
            Pattern::Regex(re) => re.is_match(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionRule {
    pattern: Pattern,
    tags: Vec<String>,
    priority: u32,
}

impl ActionRule {
    pub fn substring(pattern: &str, tags: &[&str]) -> Self {
        Self {
            pattern: Pattern::Substring(pattern.to_lowercase()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            priority: 0,
        }
    }

    pub fn regex(pattern: &str, tags: &[&str]) -> Result<Self, regex::Error> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern: Pattern::Regex(re),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            priority: 0,
        })
    }

    /// Lower values are tried first; ties go to the longer pattern.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }
}

/// An ordered group of rules where only the first match contributes tags.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ActionRule>,
}

impl RuleSet {
    /// Orders rules by priority, then by descending pattern length.
    /// The sort is stable, so equal rules keep their declaration order.
    pub fn new(mut rules: Vec<ActionRule>) -> Self {
        rules.sort_by_key(|rule| (rule.priority, Reverse(rule.pattern.source_len())));
        Self { rules }
    }

    fn first_match(&self, text: &str, lowered: &str) -> Option<&ActionRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(text, lowered))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionAnalysis {
    pub classification: BTreeSet<String>,
    pub committees: Vec<String>,
}

/// Maps free-text action descriptions to classification tags.
#[derive(Debug, Clone)]
pub struct ActionClassifier {
    sets: Vec<RuleSet>,
}

impl ActionClassifier {
    pub fn new(sets: Vec<RuleSet>) -> Self {
        Self { sets }
    }

    /// Union of the tags of every set's first matching rule.
    pub fn classify(&self, action_text: &str) -> BTreeSet<String> {
        let text = action_text.trim();
        let mut tags = BTreeSet::new();
        if text.is_empty() {
            return tags;
        }
        let lowered = text.to_lowercase();
        for set in &self.sets {
            if let Some(rule) = set.first_match(text, &lowered) {
                tags.extend(rule.tags.iter().cloned());
            }
        }
        tags
    }

    /// Classification plus the committees the action refers to.
    pub fn analyze(
        &self,
        chamber: Chamber,
        action_text: &str,
        committees: &CommitteeTable,
    ) -> ActionAnalysis {
        ActionAnalysis {
            classification: self.classify(action_text),
            committees: committees
                .committees_in(chamber, action_text)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
