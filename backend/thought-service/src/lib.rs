/// Fısıltı Thought Service Library
///
/// Location-based short posts ("thoughts"): nearby lookup ranked by
/// great-circle distance, comments, guest authors and the cloud layout.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: route table and extractor error handling
/// - `models`: authors, thoughts, comments and response views
/// - `services`: business logic layer
/// - `db`: storage trait and PostgreSQL repositories
/// - `geo`: haversine distance and bounding boxes
/// - `error`: error types and handling
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use db::ThoughtStore;
use services::{CloudService, CommentService, GuestService, ProximityService, ThoughtService};
use std::sync::Arc;

pub const SERVICE_NAME: &str = "thought-service";

/// Shared request state: the store and immutable configuration
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ThoughtStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn ThoughtStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn proximity_service(&self) -> ProximityService {
        ProximityService::new(self.store.clone(), self.config.proximity.clone())
    }

    pub fn thought_service(&self) -> ThoughtService {
        ThoughtService::new(self.store.clone(), self.config.content.clone())
    }

    pub fn comment_service(&self) -> CommentService {
        CommentService::new(self.store.clone(), self.config.content.max_content_chars)
    }

    pub fn guest_service(&self) -> GuestService {
        GuestService::new(self.store.clone(), self.config.content.max_username_chars)
    }

    pub fn cloud_service(&self) -> CloudService {
        CloudService::new(
            self.proximity_service(),
            self.config.layout.to_layout_config(),
        )
    }
}
