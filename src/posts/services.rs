use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::repo_types::{GeneratedPost, NewPost};
use crate::state::AppState;

/// Transform `text` and archive the input/output pair.
///
/// The cache is consulted first; a hit skips the upstream call. The archive
/// write happens unconditionally, so repeated identical submissions keep
/// growing the history. The archive is the source of truth: a cache entry
/// filled here is not rolled back if the save below fails, so a later call
/// with the same text will cache-hit and attempt to archive again.
pub async fn transform_and_archive(
    state: &AppState,
    user_id: Uuid,
    text: String,
) -> Result<String, ApiError> {
    let output = match state.cache.get(&text) {
        Some(hit) => {
            debug!(user_id = %user_id, "transform cache hit");
            hit
        }
        None => {
            let out = state.transformer.transform(&text).await?;
            state.cache.put(&text, &out);
            out
        }
    };

    let post = state
        .posts
        .save(NewPost {
            id: Uuid::new_v4(),
            user_id,
            input_text: text,
            output_text: output,
        })
        .await?;

    Ok(post.output_text)
}

pub async fn history(
    state: &AppState,
    user_id: Uuid,
    page: i64,
    page_size: i64,
) -> Result<Vec<GeneratedPost>, ApiError> {
    state.posts.list_by_user(user_id, page, page_size).await
}
