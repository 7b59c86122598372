use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    posts::{
        dto::{HistoryItem, HistoryQuery, TransformRequest, TransformResponse},
        services,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/posts", post(create_post).get(list_posts))
}

/// Strip all markup from submitted text; tags are dropped, text content kept.
fn sanitize_text(input: &str) -> String {
    ammonia::Builder::empty().clean(input).to_string()
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<TransformRequest>,
) -> Result<(StatusCode, Json<TransformResponse>), ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::validation("The 'text' field is required"));
    }

    let text = sanitize_text(&payload.text);
    let out = services::transform_and_archive(&state, user_id, text).await?;

    info!(user_id = %user_id, "post generated");
    Ok((StatusCode::CREATED, Json(TransformResponse { post: out })))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryItem>>, ApiError> {
    let (page, page_size) = q.clamp();
    let posts = services::history(&state, user_id, page, page_size).await?;
    Ok(Json(posts.into_iter().map(HistoryItem::from).collect()))
}
