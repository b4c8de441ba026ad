use crate::models::{Author, Comment, Thought};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Thought joined with its author (`author_*` columns)
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ThoughtRow {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_name: Option<String>,
    pub author_is_guest: bool,
    pub author_created_at: DateTime<Utc>,
}

impl From<ThoughtRow> for Thought {
    fn from(row: ThoughtRow) -> Self {
        Thought {
            id: row.id,
            content: row.content,
            author_id: row.author_id,
            latitude: row.latitude,
            longitude: row.longitude,
            is_public: row.is_public,
            created_at: row.created_at,
            author: Author {
                id: row.author_id,
                username: row.author_username,
                name: row.author_name,
                is_guest: row.author_is_guest,
                created_at: row.author_created_at,
            },
        }
    }
}

/// Comment joined with its author (`author_*` columns)
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub thought_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_name: Option<String>,
    pub author_is_guest: bool,
    pub author_created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            content: row.content,
            thought_id: row.thought_id,
            author_id: row.author_id,
            created_at: row.created_at,
            author: Author {
                id: row.author_id,
                username: row.author_username,
                name: row.author_name,
                is_guest: row.author_is_guest,
                created_at: row.author_created_at,
            },
        }
    }
}
