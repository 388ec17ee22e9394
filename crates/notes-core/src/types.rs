//! Canonical domain types shared by the store and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note as exposed by the API.
///
/// `owner_id` is fixed at creation and never changes. `tags` preserves the
/// order in which tags were submitted and permits duplicates. `updated_at`
/// equals `created_at` until the first partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the top-tags aggregation: a tag value and how many times it
/// occurs across all notes (counting repeated occurrences within one note).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note() -> Note {
        Note {
            id: Uuid::nil(),
            owner_id: Uuid::nil(),
            title: "T".to_string(),
            content: "C".to_string(),
            is_public: false,
            tags: vec!["x".to_string(), "x".to_string()],
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn note_serializes_expected_fields() {
        let json = serde_json::to_value(sample_note()).unwrap();
        for key in [
            "id",
            "owner_id",
            "title",
            "content",
            "is_public",
            "tags",
            "created_at",
            "updated_at",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
    }

    #[test]
    fn note_tags_keep_order_and_duplicates() {
        let json = serde_json::to_string(&sample_note()).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tags, vec!["x", "x"]);
    }

    #[test]
    fn tag_count_serializes() {
        let count = TagCount {
            tag: "rust".to_string(),
            count: 3,
        };
        let json = serde_json::to_string(&count).unwrap();
        assert!(json.contains("\"tag\":\"rust\""));
        assert!(json.contains("\"count\":3"));
    }
}
