//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx queries.
//! They are separate from the domain types in notes-core so the wire shape
//! and the storage shape can evolve independently.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use notes_core::Note;

/// Database row for the `users` table.
///
/// `password_hash` is an argon2 PHC string; the plaintext password never
/// reaches this layer.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            content: row.content,
            is_public: row.is_public,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One row of the top-tags aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct TagCountRow {
    pub tag: String,
    pub count: i64,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
        }
    }
}

/// Input for creating a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: String::new(),
            content: String::new(),
            is_public: false,
            tags: Vec::new(),
        }
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update for a note.
///
/// Each field is present-or-absent; absent fields keep their stored value.
/// The update statement binds absent fields as NULL and coalesces against
/// the existing column, so `updated_at` is refreshed even when no field is
/// present.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl NoteChanges {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.is_public.is_none()
            && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_builder_sets_fields() {
        let owner = Uuid::new_v4();
        let note = NewNote::new(owner)
            .title("T".to_string())
            .content("C".to_string())
            .is_public(true)
            .tags(vec!["a".to_string(), "a".to_string()]);

        assert_eq!(note.owner_id, owner);
        assert_eq!(note.title, "T");
        assert_eq!(note.content, "C");
        assert!(note.is_public);
        assert_eq!(note.tags, vec!["a", "a"]);
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        let owner = Uuid::new_v4();
        assert_ne!(NewNote::new(owner).id, NewNote::new(owner).id);
    }

    #[test]
    fn note_row_converts_to_domain_note() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let row = NoteRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            is_public: true,
            tags: vec!["x".to_string()],
            created_at: at,
            updated_at: at,
        };
        let note = Note::from(row.clone());
        assert_eq!(note.id, row.id);
        assert_eq!(note.owner_id, row.owner_id);
        assert!(note.is_public);
        assert_eq!(note.tags, vec!["x"]);
    }

    #[test]
    fn default_changes_are_empty() {
        assert!(NoteChanges::default().is_empty());
        let changes = NoteChanges {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
