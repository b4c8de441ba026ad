/// Database access layer
///
/// - `ThoughtStore`: storage boundary used by the services
/// - `PgThoughtStore`: PostgreSQL implementation over the `*_repo` query modules
/// - `MIGRATOR`: embedded schema migrations
pub mod comment_repo;
pub mod pg_store;
mod rows;
pub mod thought_repo;
pub mod user_repo;

pub use pg_store::PgThoughtStore;

use crate::error::Result;
use crate::geo::BoundingBox;
use crate::models::{Author, Comment, NewThought, Thought};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use std::collections::HashMap;
use uuid::Uuid;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Storage contract for thoughts, comments and authors.
///
/// Guest creation and comment insertion are single atomic operations at this
/// boundary; callers never check-then-act.
#[async_trait]
pub trait ThoughtStore: Send + Sync {
    /// Cheap liveness probe of the backing store
    async fn ping(&self) -> Result<()>;

    async fn find_author(&self, author_id: Uuid) -> Result<Option<Author>>;

    /// Insert a new guest; `None` when the username is already taken.
    async fn create_guest(&self, username: &str) -> Result<Option<Author>>;

    /// Return the guest with this username, creating it if absent.
    /// `None` when the username belongs to a registered (non-guest) user.
    async fn find_or_create_guest(&self, username: &str) -> Result<Option<Author>>;

    async fn insert_thought(&self, new_thought: NewThought) -> Result<Thought>;

    /// Newest public thoughts first
    async fn recent_public_thoughts(&self, limit: i64) -> Result<Vec<Thought>>;

    /// Public thoughts inside `bbox` (inclusive), nearest to its origin first, at most `cap`
    async fn public_thoughts_in_box(&self, bbox: &BoundingBox, cap: i64) -> Result<Vec<Thought>>;

    /// Up to `per_thought` newest comments of each thought, newest first
    async fn latest_comments(&self, thought_ids: &[Uuid], per_thought: i64)
        -> Result<Vec<Comment>>;

    /// Total comments per thought; thoughts without comments are absent
    async fn comment_counts(&self, thought_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>>;

    /// All comments of a thought, oldest first
    async fn list_comments(&self, thought_id: Uuid) -> Result<Vec<Comment>>;

    /// Insert a comment; `None` (and no row) when the thought does not exist.
    async fn insert_comment(
        &self,
        thought_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>>;
}
