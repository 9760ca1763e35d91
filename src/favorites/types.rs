// Favorite item, id and category types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::collection::Identified;

/// Identity of a favorite item, scoped to its category
///
/// Integer and text ids never compare equal, so `7` and `"7"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FavoriteId {
    Number(i64),
    Text(String),
}

impl From<i64> for FavoriteId {
    fn from(id: i64) -> Self {
        FavoriteId::Number(id)
    }
}

impl From<i32> for FavoriteId {
    fn from(id: i32) -> Self {
        FavoriteId::Number(i64::from(id))
    }
}

impl From<&str> for FavoriteId {
    fn from(id: &str) -> Self {
        FavoriteId::Text(id.to_string())
    }
}

impl From<String> for FavoriteId {
    fn from(id: String) -> Self {
        FavoriteId::Text(id)
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteId::Number(id) => write!(f, "{}", id),
            FavoriteId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// A favorited vocabulary word or kanji
///
/// Only `id` matters to the store; everything else is display data kept
/// as-is (e.g. `kanji`, `hiragana`, `meaning`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: FavoriteId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FavoriteItem {
    /// Create an item with no display fields
    pub fn new(id: impl Into<FavoriteId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style display field
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// String display field, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

impl Identified for FavoriteItem {
    type Id = FavoriteId;

    fn id(&self) -> &FavoriteId {
        &self.id
    }
}

/// Favorites category; each has its own independent collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteCategory {
    Vocabulary,
    Kanji,
}

impl FavoriteCategory {
    pub const ALL: [FavoriteCategory; 2] = [FavoriteCategory::Vocabulary, FavoriteCategory::Kanji];

    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteCategory::Vocabulary => "vocabulary",
            FavoriteCategory::Kanji => "kanji",
        }
    }
}

impl fmt::Display for FavoriteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown favorites category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for FavoriteCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" | "vocab" => Ok(FavoriteCategory::Vocabulary),
            "kanji" => Ok(FavoriteCategory::Kanji),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_text_ids_are_distinct() {
        assert_ne!(FavoriteId::from(7), FavoriteId::from("7"));
        assert_eq!(FavoriteId::from(7).to_string(), "7");
    }

    #[test]
    fn test_item_round_trips_with_flattened_fields() {
        let json = r#"{"id": 3, "kanji": "日", "hiragana": "ひ", "meaning": "ngày"}"#;
        let item: FavoriteItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, FavoriteId::Number(3));
        assert_eq!(item.field("kanji"), Some("日"));
        assert_eq!(item.field("missing"), None);

        let text_id: FavoriteItem = serde_json::from_str(r#"{"id": "n5-12"}"#).unwrap();
        assert_eq!(text_id.id, FavoriteId::from("n5-12"));
    }

    #[test]
    fn test_category_parsing() {
        let parse = |raw: &str| raw.parse::<FavoriteCategory>();
        assert_eq!(parse("kanji"), Ok(FavoriteCategory::Kanji));
        assert_eq!(parse(" Vocabulary "), Ok(FavoriteCategory::Vocabulary));
        assert_eq!(parse("vocab"), Ok(FavoriteCategory::Vocabulary));
        assert_eq!(
            "grammar".parse::<FavoriteCategory>(),
            Err(ParseCategoryError("grammar".to_string()))
        );
    }
}
