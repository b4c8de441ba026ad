/// Thought service - thought creation and author resolution
use crate::config::ContentConfig;
use crate::db::ThoughtStore;
use crate::error::{AppError, Result};
use crate::geo::Coordinates;
use crate::metrics::activity::{author_kind, THOUGHTS_CREATED_TOTAL};
use crate::models::{Author, NewThought, ThoughtView, ANONYMOUS_USERNAME};
use crate::services::guests::GuestService;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Embedded author reference accepted in place of `authorUsername`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtRequest {
    pub content: Option<String>,
    /// Existing author; wins over any username
    pub author_id: Option<Uuid>,
    pub author: Option<AuthorRef>,
    pub author_username: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl CreateThoughtRequest {
    /// Username to post under when no author id is given.
    fn requested_username(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|author| author.username.as_deref())
            .or(self.author_username.as_deref())
    }
}

pub struct ThoughtService {
    store: Arc<dyn ThoughtStore>,
    config: ContentConfig,
}

impl ThoughtService {
    pub fn new(store: Arc<dyn ThoughtStore>, config: ContentConfig) -> Self {
        Self { store, config }
    }

    /// Create a public thought. The response carries an empty comment
    /// preview and a zero distance.
    pub async fn create_thought(&self, request: CreateThoughtRequest) -> Result<ThoughtView> {
        let content = request
            .content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
            .ok_or(AppError::MissingContent)?;
        if content.chars().count() > self.config.max_content_chars {
            return Err(AppError::ValidationError(format!(
                "Content must be at most {} characters",
                self.config.max_content_chars
            )));
        }

        request.validate()?;
        let coordinates = Coordinates::new(
            request.latitude.unwrap_or(0.0),
            request.longitude.unwrap_or(0.0),
        );

        let author = self.resolve_author(&request).await?;

        let thought = self
            .store
            .insert_thought(NewThought {
                content: content.to_string(),
                author_id: author.id,
                coordinates,
            })
            .await?;

        THOUGHTS_CREATED_TOTAL
            .with_label_values(&[author_kind(author.is_guest)])
            .inc();
        tracing::info!(
            thought_id = %thought.id,
            author_id = %author.id,
            has_location = !coordinates.is_unset(),
            "thought created"
        );

        Ok(ThoughtView::new(thought, 0))
    }

    async fn resolve_author(&self, request: &CreateThoughtRequest) -> Result<Author> {
        if let Some(author_id) = request.author_id {
            return self
                .store
                .find_author(author_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Author not found".to_string()));
        }

        let username = request
            .requested_username()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(ANONYMOUS_USERNAME);

        GuestService::new(self.store.clone(), self.config.max_username_chars)
            .find_or_create_guest(username)
            .await
    }
}
