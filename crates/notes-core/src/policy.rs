//! Ownership access policy for notes.
//!
//! Handlers apply these rules after fetching a note; the store itself does
//! not filter by requester. A nonexistent note is reported as not-found
//! before any ownership check runs, so these functions always receive an
//! existing note.

use uuid::Uuid;

use crate::types::Note;

/// Whether `requester` may read `note`.
///
/// Public notes are readable by anyone, authenticated or not. Private notes
/// are readable only by their owner.
pub fn can_view(note: &Note, requester: Option<Uuid>) -> bool {
    note.is_public || requester == Some(note.owner_id)
}

/// Whether `requester` may update or delete `note`.
///
/// Mutation is owner-only regardless of visibility; a public note is still
/// writable only by its owner.
pub fn can_mutate(note: &Note, requester: Uuid) -> bool {
    note.owner_id == requester
}
