use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::posts::repo_types::GeneratedPost;

/// Request body for a transform. Defaults to empty so an absent `text` field
/// takes the same 400 path as an empty one.
#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub post: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub input: String,
    pub post: String,
}

impl From<GeneratedPost> for HistoryItem {
    fn from(p: GeneratedPost) -> Self {
        Self {
            id: p.id,
            input: p.input_text,
            post: p.output_text,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw query parameters. Kept as strings so a non-numeric value falls back to
/// the default instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl HistoryQuery {
    /// Clamp to the bounds the archive expects: page defaults to 1 when
    /// absent, non-numeric or < 1; pageSize defaults to 10 when absent,
    /// non-numeric or outside [1, 100].
    pub fn clamp(&self) -> (i64, i64) {
        let page = self
            .page
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let page_size = self
            .page_size
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        (page, page_size)
    }
}
