// Lexicon - ordered lookup keys mapping to dictionary entries
// Loaded once from JSON (or the built-in demo set) and read-only afterwards

use super::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A single dictionary record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Written form, usually kanji (e.g., "日本")
    #[serde(alias = "kanji")]
    pub headword: String,
    /// Kana reading (e.g., "にほん")
    #[serde(alias = "hiragana")]
    pub reading: String,
    /// Meaning in the learner's language
    #[serde(alias = "meaning")]
    pub gloss: String,
}

impl Entry {
    pub fn new(
        headword: impl Into<String>,
        reading: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            headword: headword.into(),
            reading: reading.into(),
            gloss: gloss.into(),
        }
    }
}

/// One lookup key with its entries, in stored order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconKey {
    pub key: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Error types for lexicon loading
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexiconError {
    /// Failed to read the lexicon source
    #[error("Failed to load lexicon: {0}")]
    LoadError(String),
    /// Lexicon source is not valid JSON in the expected shape
    #[error("Failed to parse lexicon: {0}")]
    ParseError(String),
    /// Key is empty after normalization
    #[error("Lexicon key is empty after normalization")]
    EmptyKey,
    /// Two keys normalize to the same value
    #[error("Lexicon key '{0}' is defined more than once")]
    DuplicateKey(String),
}

/// Searchable collection of lookup keys
///
/// Keys are stored normalized and keep their insertion order, which is the
/// order the matcher scans when falling back to prefix matching.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    keys: Vec<LexiconKey>,
    /// Normalized key -> position in `keys`
    index: HashMap<String, usize>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lookup key with its entries
    ///
    /// The key is normalized before storage.
    #[must_use = "this returns a Result that should be handled"]
    pub fn insert(&mut self, key: &str, entries: Vec<Entry>) -> Result<(), LexiconError> {
        let key = normalize(key);
        if key.is_empty() {
            return Err(LexiconError::EmptyKey);
        }
        if self.index.contains_key(&key) {
            return Err(LexiconError::DuplicateKey(key));
        }

        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(LexiconKey { key, entries });
        Ok(())
    }

    /// Entries stored under an already-normalized key
    pub fn get(&self, key: &str) -> Option<&[Entry]> {
        self.index
            .get(key)
            .map(|&position| self.keys[position].entries.as_slice())
    }

    /// Keys with their entries, in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &LexiconKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse a lexicon from its JSON form: `[{"key": ..., "entries": [...]}]`
    pub fn from_json_str(content: &str) -> Result<Self, LexiconError> {
        let keys: Vec<LexiconKey> =
            serde_json::from_str(content).map_err(|e| LexiconError::ParseError(e.to_string()))?;

        let mut lexicon = Self::new();
        for LexiconKey { key, entries } in keys {
            lexicon.insert(&key, entries)?;
        }
        Ok(lexicon)
    }

    /// Load a lexicon file from disk
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        crate::debug!("Loading lexicon from {:?}", path);

        let content =
            fs::read_to_string(path).map_err(|e| LexiconError::LoadError(e.to_string()))?;
        let lexicon = Self::from_json_str(&content)?;

        crate::info!("Loaded lexicon with {} keys", lexicon.len());
        Ok(lexicon)
    }

    /// Built-in sample lexicon used by the console host and tests
    ///
    /// Keys in order: "hi", "youni", "nhật". With the default matcher,
    /// unmatched queries fall back to "hi".
    pub fn demo() -> Self {
        let keys = vec![
            LexiconKey {
                key: "hi".to_string(),
                entries: vec![
                    Entry::new("火", "ひ", "lửa, ngọn lửa, đám cháy"),
                    Entry::new("日", "ひ", "ngày, các ngày"),
                    Entry::new("灯", "ひ", "ánh sáng, đèn"),
                    Entry::new("妃", "ひ", "công chúa, phi tần"),
                    Entry::new("比", "ひ", "tỷ lệ, tỉ lệ"),
                ],
            },
            LexiconKey {
                key: "youni".to_string(),
                entries: vec![
                    Entry::new("ように", "N3", "Hãy làm.../Đừng làm"),
                    Entry::new("ように", "N3", "Như/Theo như..."),
                    Entry::new("ように", "N4", "Để/Để tránh"),
                    Entry::new(
                        "ようにする・ようにしている",
                        "N4",
                        "Chắc chắn làm..., cố gắng làm...",
                    ),
                    Entry::new("ようになている", "N4", "Được, để"),
                ],
            },
            LexiconKey {
                key: "nhật".to_string(),
                entries: vec![
                    Entry::new("日本", "にほん", "nhật bản"),
                    Entry::new("日本", "にっぽん", "nhật bản"),
                    Entry::new("日本化", "にほんか", "nhật bản hóa"),
                    Entry::new("日本語", "にほんご", "tiếng nhật"),
                    Entry::new("日本学", "にほんがく", "nhật bản học"),
                ],
            },
        ];

        let index = keys
            .iter()
            .enumerate()
            .map(|(position, k)| (k.key.clone(), position))
            .collect();
        Self { keys, index }
    }
}

#[cfg(test)]
#[path = "lexicon_test.rs"]
mod tests;
