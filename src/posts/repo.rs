use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::repo_types::{GeneratedPost, NewPost};

/// Post archive contract. `page` and `page_size` arrive already clamped by
/// the request-handling layer (page >= 1, 1 <= page_size <= 100).
#[async_trait]
pub trait PostArchive: Send + Sync {
    async fn save(&self, post: NewPost) -> Result<GeneratedPost, ApiError>;

    /// Newest first. A page past the end returns an empty vec, not an error.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<GeneratedPost>, ApiError>;
}

pub struct PgPostArchive {
    db: PgPool,
}

impl PgPostArchive {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostArchive for PgPostArchive {
    async fn save(&self, post: NewPost) -> Result<GeneratedPost, ApiError> {
        let row = sqlx::query_as::<_, GeneratedPost>(
            r#"
            INSERT INTO generated_posts (id, user_id, input_text, output_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, input_text, output_text, created_at
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.input_text)
        .bind(&post.output_text)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<GeneratedPost>, ApiError> {
        let offset = (page - 1) * page_size;
        let rows = sqlx::query_as::<_, GeneratedPost>(
            r#"
            SELECT id, user_id, input_text, output_text, created_at
            FROM generated_posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
