/// Comment handlers - HTTP endpoints for comments on a thought
use crate::error::{ErrorResponse, Result};
use crate::models::Comment;
use crate::services::comments::CreateCommentRequest;
use crate::AppState;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// Comments of a thought, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/thoughts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Thought ID")),
    responses(
        (status = 200, description = "Comments", body = [Comment])
    )
)]
pub async fn get_comments(
    state: web::Data<AppState>,
    thought_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let comments = state
        .comment_service()
        .list_comments(thought_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Add a comment to a thought
#[utoipa::path(
    post,
    path = "/api/v1/thoughts/{id}/comments",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Thought ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Thought or author not found", body = ErrorResponse)
    )
)]
pub async fn create_comment(
    state: web::Data<AppState>,
    thought_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = state
        .comment_service()
        .create_comment(thought_id.into_inner(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}
