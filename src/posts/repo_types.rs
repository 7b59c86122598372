use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One archived transform: the submitted text and what came back.
/// Rows are append-only; nothing updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub output_text: String,
    pub created_at: OffsetDateTime,
}

/// Fields needed to insert a post; `created_at` is defaulted by the DB.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub output_text: String,
}
