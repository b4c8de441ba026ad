/// Data models for thought-service
///
/// - Author: registered user or lazily created guest
/// - Thought: geotagged short text post
/// - Comment: reply to a thought
/// - ThoughtView: thought as returned by the API, with comment preview and distance
use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Username used when an unauthenticated poster gives none
pub const ANONYMOUS_USERNAME: &str = "Anonim";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

impl Thought {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub thought_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

/// Insert payload for a thought; author already resolved
#[derive(Debug, Clone)]
pub struct NewThought {
    pub content: String,
    pub author_id: Uuid,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentCount {
    pub comments: i64,
}

/// Thought with its latest comments, total comment count and distance in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ThoughtView {
    #[serde(flatten)]
    pub thought: Thought,
    pub comments: Vec<Comment>,
    #[serde(rename = "_count")]
    pub count: CommentCount,
    pub distance: i64,
}

impl ThoughtView {
    pub fn new(thought: Thought, distance: i64) -> Self {
        Self {
            thought,
            comments: Vec::new(),
            count: CommentCount::default(),
            distance,
        }
    }
}
