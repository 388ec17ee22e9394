//! notes-store: PostgreSQL storage layer for the notes sharing service.
//!
//! This crate provides:
//! - Connection pooling with a bounded acquire timeout
//! - Embedded idempotent migrations
//! - Typed row models and type-safe operations via sqlx
//! - User, note, and tag-aggregation queries
//!
//! All shared mutable state lives in the database; the [`Store`] handle is
//! cheap to clone and safe to share across request tasks. Single-row writes
//! rely on PostgreSQL's native atomicity — there are no multi-statement
//! transactions here, and the unique index on `users.email` is the final
//! authority for duplicate registration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let note = store.insert_note(&new_note).await?;
//! let mine = store.list_notes_by_owner(owner_id, window).await?;
//! ```

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{NewNote, NewUser, NoteChanges, NoteRow, TagCountRow, UserRow};
pub use store::{Store, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
