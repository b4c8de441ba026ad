/// User handlers - guest account creation
use crate::error::{ErrorResponse, Result};
use crate::models::Author;
use crate::services::guests::CreateGuestRequest;
use crate::AppState;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/v1/users/guest",
    tag = "users",
    request_body = CreateGuestRequest,
    responses(
        (status = 201, description = "Guest created", body = Author),
        (status = 400, description = "Username is required", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn create_guest(
    state: web::Data<AppState>,
    req: web::Json<CreateGuestRequest>,
) -> Result<HttpResponse> {
    let guest = state.guest_service().create_guest(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(guest))
}
