/// Guest accounts, created on demand for unauthenticated posters
use crate::db::ThoughtStore;
use crate::error::{AppError, Result};
use crate::models::Author;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateGuestRequest {
    pub username: Option<String>,
}

/// Trim a username and enforce its length.
pub fn normalize_username(raw: &str, max_chars: usize) -> Result<String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::ValidationError("Username is required".to_string()));
    }
    if username.chars().count() > max_chars {
        return Err(AppError::ValidationError(format!(
            "Username must be at most {} characters",
            max_chars
        )));
    }
    Ok(username.to_string())
}

pub struct GuestService {
    store: Arc<dyn ThoughtStore>,
    max_username_chars: usize,
}

impl GuestService {
    pub fn new(store: Arc<dyn ThoughtStore>, max_username_chars: usize) -> Self {
        Self {
            store,
            max_username_chars,
        }
    }

    /// Register a new guest. Fails with `Conflict` when the username is taken.
    pub async fn create_guest(&self, request: CreateGuestRequest) -> Result<Author> {
        let username = normalize_username(
            request.username.as_deref().unwrap_or_default(),
            self.max_username_chars,
        )?;

        let guest = self
            .store
            .create_guest(&username)
            .await?
            .ok_or_else(|| AppError::Conflict("Username already exists".to_string()))?;

        tracing::info!(author_id = %guest.id, username = %guest.username, "guest created");
        Ok(guest)
    }

    /// Existing guest with this username, or a new one. Conflict if a
    /// registered user owns the name.
    pub async fn find_or_create_guest(&self, username: &str) -> Result<Author> {
        let username = normalize_username(username, self.max_username_chars)?;
        self.store
            .find_or_create_guest(&username)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!("Username '{}' belongs to a registered user", username))
            })
    }
}
