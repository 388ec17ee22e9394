//! notes-core: domain types and access rules for the notes sharing service.
//!
//! This crate holds the parts of the system that are independent of both the
//! HTTP layer and the storage backend:
//!
//! - [`Note`] and [`TagCount`], the canonical JSON shapes of the API
//! - [`PageRequest`], the normalized pagination window for list queries
//! - the ownership access policy ([`policy`]), which decides who may read
//!   and who may mutate a note
//!
//! No I/O happens here; everything is pure data and pure functions so the
//! rules can be tested without a database or a server.

pub mod pagination;
pub mod policy;
pub mod types;

pub use pagination::PageRequest;
pub use types::{Note, TagCount};
