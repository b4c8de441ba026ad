//! In-memory ThoughtStore for HTTP tests
//!
//! Mirrors the PostgreSQL store semantics (atomic guest upsert, comment insert
//! guarded by thought existence) without a database. Batch calls are counted
//! so tests can assert that comment previews are not fetched per thought.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use thought_service::db::ThoughtStore;
use thought_service::geo::BoundingBox;
use thought_service::models::{Author, Comment, NewThought, Thought};
use thought_service::{AppError, Result};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    users: Vec<Author>,
    thoughts: Vec<Thought>,
    comments: Vec<Comment>,
    comment_batch_calls: usize,
    clock: i64,
}

impl Inner {
    /// Strictly increasing timestamps keep ordering deterministic.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        base_time() + Duration::milliseconds(self.clock)
    }
}

fn base_time() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    failing: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a lost database connection.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check(&self) -> Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn add_registered_user(&self, username: &str) -> Author {
        let mut inner = self.inner.lock().unwrap();
        let author = Author {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: Some(username.to_string()),
            is_guest: false,
            created_at: inner.tick(),
        };
        inner.users.push(author.clone());
        author
    }

    /// Insert a public thought `age_minutes` old.
    pub fn add_thought(
        &self,
        author: &Author,
        content: &str,
        latitude: f64,
        longitude: f64,
        age_minutes: i64,
    ) -> Thought {
        let mut inner = self.inner.lock().unwrap();
        let thought = Thought {
            id: Uuid::new_v4(),
            content: content.to_string(),
            author_id: author.id,
            latitude,
            longitude,
            is_public: true,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            author: author.clone(),
        };
        inner.thoughts.push(thought.clone());
        thought
    }

    pub fn comment_total(&self) -> usize {
        self.inner.lock().unwrap().comments.len()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn comment_batch_calls(&self) -> usize {
        self.inner.lock().unwrap().comment_batch_calls
    }
}

fn newest_first(thoughts: &mut [Thought]) {
    thoughts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl ThoughtStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn find_author(&self, author_id: Uuid) -> Result<Option<Author>> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == author_id).cloned())
    }

    async fn create_guest(&self, username: &str) -> Result<Option<Author>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.username == username) {
            return Ok(None);
        }
        let guest = Author {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: Some(username.to_string()),
            is_guest: true,
            created_at: inner.tick(),
        };
        inner.users.push(guest.clone());
        Ok(Some(guest))
    }

    async fn find_or_create_guest(&self, username: &str) -> Result<Option<Author>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.users.iter().find(|u| u.username == username) {
            return Ok(existing.is_guest.then(|| existing.clone()));
        }
        let guest = Author {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: None,
            is_guest: true,
            created_at: inner.tick(),
        };
        inner.users.push(guest.clone());
        Ok(Some(guest))
    }

    async fn insert_thought(&self, new_thought: NewThought) -> Result<Thought> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        let author = inner
            .users
            .iter()
            .find(|u| u.id == new_thought.author_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Referenced resource not found".to_string()))?;
        let thought = Thought {
            id: Uuid::new_v4(),
            content: new_thought.content,
            author_id: author.id,
            latitude: new_thought.coordinates.latitude,
            longitude: new_thought.coordinates.longitude,
            is_public: true,
            created_at: Utc::now(),
            author,
        };
        inner.thoughts.push(thought.clone());
        Ok(thought)
    }

    async fn recent_public_thoughts(&self, limit: i64) -> Result<Vec<Thought>> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        let mut thoughts: Vec<Thought> = inner.thoughts.iter().filter(|t| t.is_public).cloned().collect();
        newest_first(&mut thoughts);
        thoughts.truncate(limit as usize);
        Ok(thoughts)
    }

    async fn public_thoughts_in_box(&self, bbox: &BoundingBox, cap: i64) -> Result<Vec<Thought>> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        let mut thoughts: Vec<Thought> = inner
            .thoughts
            .iter()
            .filter(|t| t.is_public && bbox.contains(t.coordinates()))
            .cloned()
            .collect();
        newest_first(&mut thoughts);
        // Stable sort keeps newer first among equal planar distances.
        thoughts.sort_by(|a, b| {
            bbox.planar_distance_sq(a.coordinates())
                .total_cmp(&bbox.planar_distance_sq(b.coordinates()))
        });
        thoughts.truncate(cap as usize);
        Ok(thoughts)
    }

    async fn latest_comments(
        &self,
        thought_ids: &[Uuid],
        per_thought: i64,
    ) -> Result<Vec<Comment>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.comment_batch_calls += 1;

        let mut result = Vec::new();
        for id in thought_ids {
            let mut comments: Vec<Comment> = inner
                .comments
                .iter()
                .filter(|c| c.thought_id == *id)
                .cloned()
                .collect();
            comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            comments.truncate(per_thought as usize);
            result.extend(comments);
        }
        Ok(result)
    }

    async fn comment_counts(&self, thought_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.comment_batch_calls += 1;

        let mut counts = HashMap::new();
        for comment in inner.comments.iter().filter(|c| thought_ids.contains(&c.thought_id)) {
            *counts.entry(comment.thought_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn list_comments(&self, thought_id: Uuid) -> Result<Vec<Comment>> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.thought_id == thought_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn insert_comment(
        &self,
        thought_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.thoughts.iter().any(|t| t.id == thought_id) {
            return Ok(None);
        }
        let author = inner
            .users
            .iter()
            .find(|u| u.id == author_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Referenced resource not found".to_string()))?;
        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            thought_id,
            author_id,
            created_at: inner.tick(),
            author,
        };
        inner.comments.push(comment.clone());
        Ok(Some(comment))
    }
}
