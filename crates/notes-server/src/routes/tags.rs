//! Tag aggregation route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use notes_core::TagCount;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Limit applied when the query string gives none.
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct TopTagsQuery {
    pub limit: Option<i64>,
}

/// GET /api/tags/top - Most-used tags across all notes, count descending.
///
/// The limit has no upper bound; a large enough value returns the entire
/// tag universe. Tie order among equal counts is unspecified.
async fn top_tags(
    State(state): State<AppState>,
    Query(query): Query<TopTagsQuery>,
) -> ApiResult<Json<Vec<TagCount>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 0 {
        return Err(ApiError::BadRequest(
            "limit must not be negative".to_string(),
        ));
    }

    let rows = state.store().top_tags(limit).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| TagCount {
                tag: row.tag,
                count: row.count,
            })
            .collect(),
    ))
}

/// Build tag routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/tags/top", get(top_tags))
}
