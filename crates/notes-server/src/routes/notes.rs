//! Note CRUD routes with ownership enforcement.
//!
//! The store fetches and mutates rows without looking at the requester;
//! every access decision is made here with the notes-core policy, after a
//! nonexistent id has already been reported as not-found.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notes_core::{Note, PageRequest, policy};
use notes_store::{NewNote, NoteChanges};

use crate::auth::{AuthenticatedUser, MaybeUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update body. Absent fields leave the stored value unchanged;
/// unrecognized fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(request: UpdateNoteRequest) -> Self {
        NoteChanges {
            title: request.title,
            content: request.content,
            is_public: request.is_public,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    fn window(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Response for GET /api/notes.
#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
}

/// Response for DELETE /api/notes/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub message: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/notes - Create a note owned by the authenticated user.
async fn create_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let new_note = NewNote::new(user.user_id)
        .title(request.title)
        .content(request.content)
        .is_public(request.is_public)
        .tags(request.tags);

    let row = state.store().insert_note(&new_note).await?;

    tracing::info!(note_id = %row.id, owner_id = %row.owner_id, "note created");

    Ok((StatusCode::CREATED, Json(Note::from(row))))
}

/// GET /api/notes - One page of the authenticated user's notes, newest
/// first. Private and public notes both appear; they all belong to the
/// requester.
async fn list_my_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListNotesResponse>> {
    let rows = state
        .store()
        .list_notes_by_owner(user.user_id, query.window())
        .await?;

    Ok(Json(ListNotesResponse {
        notes: rows.into_iter().map(Note::from).collect(),
    }))
}

/// GET /api/notes/public - One page of public notes, newest first. No
/// authentication required.
async fn list_public_notes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Note>>> {
    let rows = state.store().list_public_notes(query.window()).await?;

    Ok(Json(rows.into_iter().map(Note::from).collect()))
}

/// GET /api/notes/{id} - Fetch one note.
///
/// Auth is optional here: public notes are served to anyone, private notes
/// only to their owner. Not-found wins over forbidden for a missing id.
async fn get_note(
    State(state): State<AppState>,
    requester: MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let row = state
        .store()
        .get_note(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("note not found".to_string()))?;

    let note = Note::from(row);
    if !policy::can_view(&note, requester.user_id()) {
        return Err(ApiError::Forbidden("not the note owner".to_string()));
    }

    Ok(Json(note))
}

/// PUT /api/notes/{id} - Apply a partial update. Owner only.
async fn update_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let store = state.store();

    let row = store
        .get_note(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("note not found".to_string()))?;

    if !policy::can_mutate(&Note::from(row), user.user_id) {
        return Err(ApiError::Forbidden("not the note owner".to_string()));
    }

    // The note can disappear between the ownership check and the update.
    let updated = store
        .update_note(id, &NoteChanges::from(request))
        .await?
        .ok_or_else(|| ApiError::NotFound("note not found".to_string()))?;

    tracing::info!(note_id = %id, "note updated");

    Ok(Json(Note::from(updated)))
}

/// DELETE /api/notes/{id} - Permanently delete a note. Owner only.
async fn delete_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteNoteResponse>> {
    let store = state.store();

    let row = store
        .get_note(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("note not found".to_string()))?;

    if !policy::can_mutate(&Note::from(row), user.user_id) {
        return Err(ApiError::Forbidden("not the note owner".to_string()));
    }

    if !store.delete_note(id).await? {
        return Err(ApiError::NotFound("note not found".to_string()));
    }

    tracing::info!(note_id = %id, "note deleted");

    Ok(Json(DeleteNoteResponse {
        message: "note deleted".to_string(),
    }))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_my_notes).post(create_note))
        .route("/api/notes/public", get(list_public_notes))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateNoteRequest = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(request.title, "T");
        assert_eq!(request.content, "");
        assert!(!request.is_public);
        assert!(request.tags.is_empty());
    }

    #[test]
    fn test_update_request_absent_fields_stay_absent() {
        let request: UpdateNoteRequest = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("x"));
        assert!(request.content.is_none());
        assert!(request.is_public.is_none());
        assert!(request.tags.is_none());

        let changes = NoteChanges::from(request);
        assert!(!changes.is_empty());
        assert!(changes.content.is_none());
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let request: UpdateNoteRequest =
            serde_json::from_str(r#"{"title": "x", "owner_id": "hijack", "rank": 3}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("x"));
    }

    #[test]
    fn test_empty_update_body_is_valid() {
        let request: UpdateNoteRequest = serde_json::from_str("{}").unwrap();
        assert!(NoteChanges::from(request).is_empty());
    }

    #[test]
    fn test_list_query_window() {
        let query = ListQuery {
            page: Some(2),
            limit: Some(2),
        };
        let window = query.window();
        assert_eq!(window.offset(), 2);
        assert_eq!(window.limit(), 2);
    }
}
