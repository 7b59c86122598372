use axum::async_trait;

use crate::error::ApiError;

pub mod openai;

/// Rewrites a plain statement into an exaggerated promotional post.
///
/// Implementations do not retry and do not enforce their own timeout; the
/// request deadline governs. Failures surface as `ApiError::Upstream` and
/// propagate to the caller as-is.
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(&self, text: &str) -> Result<String, ApiError>;
}
