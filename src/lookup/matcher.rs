// Lexicon matcher - resolves a query to entries using exact-then-prefix key matching

use super::lexicon::{Entry, Lexicon};
use super::normalize::normalize;
use serde::{Deserialize, Serialize};

/// Configuration for the matcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Key whose entries answer any non-empty query that matches nothing else.
    /// None designates the lexicon's first key.
    pub fallback_key: Option<String>,
}

/// Matches normalized queries against lexicon keys
///
/// Resolution order, first hit wins:
/// 1. empty query -> nothing
/// 2. exact key
/// 3. first key (in lexicon order) that is a prefix of the query, or that the query is a prefix of
/// 4. the fallback key: the configured one, else the lexicon's first key
///
/// There is no scoring: an exact key always beats a prefix key, and among
/// prefix keys lexicon order decides.
#[derive(Debug, Clone, Default)]
pub struct LexiconMatcher {
    /// Configured fallback key, normalized once at construction
    fallback_key: Option<String>,
}

impl LexiconMatcher {
    /// Create a matcher falling back to the lexicon's first key
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            fallback_key: config
                .fallback_key
                .map(|key| normalize(&key))
                .filter(|key| !key.is_empty()),
        }
    }

    /// Resolve an already-normalized query to lexicon entries
    pub fn find_matches<'a>(&self, lexicon: &'a Lexicon, query: &str) -> &'a [Entry] {
        if query.is_empty() {
            return &[];
        }

        if let Some(entries) = lexicon.get(query) {
            crate::trace!("Exact key match for '{}'", query);
            return entries;
        }

        if let Some(matched) = lexicon
            .iter()
            .find(|k| k.key.starts_with(query) || query.starts_with(k.key.as_str()))
        {
            crate::trace!("Prefix match '{}' for '{}'", matched.key, query);
            return &matched.entries;
        }

        let fallback = match self.fallback_key.as_deref() {
            Some(key) => lexicon.get(key),
            None => lexicon.iter().next().map(|k| k.entries.as_slice()),
        };
        crate::trace!("No key matched '{}', using fallback entries", query);
        fallback.unwrap_or(&[])
    }

    /// Normalize raw input and resolve it
    pub fn search<'a>(&self, lexicon: &'a Lexicon, raw_query: &str) -> &'a [Entry] {
        self.find_matches(lexicon, &normalize(raw_query))
    }
}

/// Normalize and match raw input with the default matcher
pub fn search<'a>(lexicon: &'a Lexicon, raw_query: &str) -> &'a [Entry] {
    LexiconMatcher::new().search(lexicon, raw_query)
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
