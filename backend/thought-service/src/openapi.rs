/// OpenAPI documentation for Fısıltı Thought Service
use crate::error::ErrorResponse;
use crate::geo::Coordinates;
use crate::handlers;
use crate::models::{Author, Comment, CommentCount, Thought, ThoughtView};
use crate::services::cloud::{CloudPlacement, CloudResponse, CloudView};
use crate::services::comments::CreateCommentRequest;
use crate::services::guests::CreateGuestRequest;
use crate::services::thoughts::{AuthorRef, CreateThoughtRequest};
use actix_web::HttpResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fısıltı Thought Service API",
        version = "1.0.0",
        description = "Location-based short thoughts. Post a thought at a coordinate, list thoughts near a point ranked by great-circle distance, comment on them, and lay them out as a floating cloud.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        handlers::thoughts::get_thoughts,
        handlers::thoughts::create_thought,
        handlers::thoughts::get_thought_cloud,
        handlers::comments::get_comments,
        handlers::comments::create_comment,
        handlers::users::create_guest,
        handlers::health::health_summary,
        handlers::health::readiness_check,
        handlers::health::liveness_check,
    ),
    components(schemas(
        Author,
        Thought,
        Comment,
        CommentCount,
        ThoughtView,
        Coordinates,
        CreateThoughtRequest,
        AuthorRef,
        CreateCommentRequest,
        CreateGuestRequest,
        CloudPlacement,
        CloudView,
        CloudResponse,
        ErrorResponse,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "thoughts", description = "Nearby thoughts, creation and the cloud view"),
        (name = "comments", description = "Comments on thoughts"),
        (name = "users", description = "Guest accounts"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> actix_web::Result<HttpResponse> {
    let body = ApiDoc::openapi().to_json().map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
