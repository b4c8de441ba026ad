/// Comment service - listing and creating comments on thoughts
use crate::db::ThoughtStore;
use crate::error::{AppError, Result};
use crate::metrics::activity::COMMENTS_CREATED_TOTAL;
use crate::models::Comment;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub author_id: Option<Uuid>,
}

pub struct CommentService {
    store: Arc<dyn ThoughtStore>,
    max_content_chars: usize,
}

impl CommentService {
    pub fn new(store: Arc<dyn ThoughtStore>, max_content_chars: usize) -> Self {
        Self {
            store,
            max_content_chars,
        }
    }

    /// Comments of a thought, oldest first. Unknown thoughts have none.
    pub async fn list_comments(&self, thought_id: Uuid) -> Result<Vec<Comment>> {
        self.store.list_comments(thought_id).await
    }

    pub async fn create_comment(
        &self,
        thought_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<Comment> {
        let (content, author_id) = match (request.content.as_deref(), request.author_id) {
            (Some(content), Some(author_id)) if !content.trim().is_empty() => (content, author_id),
            _ => {
                return Err(AppError::ValidationError(
                    "Missing required fields".to_string(),
                ))
            }
        };
        if content.chars().count() > self.max_content_chars {
            return Err(AppError::ValidationError(format!(
                "Content must be at most {} characters",
                self.max_content_chars
            )));
        }

        if self.store.find_author(author_id).await?.is_none() {
            return Err(AppError::NotFound("Author not found".to_string()));
        }

        // Insert and existence check run as one statement
        let comment = self
            .store
            .insert_comment(thought_id, author_id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Thought not found".to_string()))?;

        COMMENTS_CREATED_TOTAL.inc();
        tracing::info!(
            comment_id = %comment.id,
            thought_id = %thought_id,
            author_id = %author_id,
            "comment created"
        );

        Ok(comment)
    }
}
