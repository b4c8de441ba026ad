use super::{comment_repo, thought_repo, user_repo, ThoughtStore};
use crate::error::Result;
use crate::geo::BoundingBox;
use crate::models::{Author, Comment, NewThought, Thought};
use crate::SERVICE_NAME;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// PostgreSQL-backed [`ThoughtStore`]
#[derive(Clone)]
pub struct PgThoughtStore {
    pool: PgPool,
}

impl PgThoughtStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThoughtStore for PgThoughtStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = db_pool::acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    async fn find_author(&self, author_id: Uuid) -> Result<Option<Author>> {
        Ok(user_repo::find_author_by_id(&self.pool, author_id).await?)
    }

    async fn create_guest(&self, username: &str) -> Result<Option<Author>> {
        Ok(user_repo::insert_guest(&self.pool, username).await?)
    }

    async fn find_or_create_guest(&self, username: &str) -> Result<Option<Author>> {
        Ok(user_repo::upsert_guest(&self.pool, username).await?)
    }

    async fn insert_thought(&self, new_thought: NewThought) -> Result<Thought> {
        Ok(thought_repo::create_thought(&self.pool, &new_thought).await?)
    }

    async fn recent_public_thoughts(&self, limit: i64) -> Result<Vec<Thought>> {
        Ok(thought_repo::find_recent_public(&self.pool, limit).await?)
    }

    async fn public_thoughts_in_box(&self, bbox: &BoundingBox, cap: i64) -> Result<Vec<Thought>> {
        Ok(thought_repo::find_public_in_box(&self.pool, bbox, cap).await?)
    }

    async fn latest_comments(
        &self,
        thought_ids: &[Uuid],
        per_thought: i64,
    ) -> Result<Vec<Comment>> {
        Ok(comment_repo::find_latest_for_thoughts(&self.pool, thought_ids, per_thought).await?)
    }

    async fn comment_counts(&self, thought_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        Ok(comment_repo::count_for_thoughts(&self.pool, thought_ids).await?)
    }

    async fn list_comments(&self, thought_id: Uuid) -> Result<Vec<Comment>> {
        Ok(comment_repo::find_by_thought(&self.pool, thought_id).await?)
    }

    async fn insert_comment(
        &self,
        thought_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>> {
        Ok(comment_repo::create_comment(&self.pool, thought_id, author_id, content).await?)
    }
}
