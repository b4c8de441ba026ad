/// Thought handlers - nearby listing, creation and the cloud view
use crate::error::{ErrorResponse, Result};
use crate::models::ThoughtView;
use crate::services::cloud::{CloudParams, CloudResponse};
use crate::services::proximity::ProximityParams;
use crate::services::thoughts::CreateThoughtRequest;
use crate::services::ProximityQuery;
use crate::AppState;
use actix_web::{web, HttpResponse};

/// List public thoughts near a point, nearest first
#[utoipa::path(
    get,
    path = "/api/v1/thoughts",
    tag = "thoughts",
    params(ProximityParams),
    responses(
        (status = 200, description = "Nearby thoughts", body = [ThoughtView]),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn get_thoughts(
    state: web::Data<AppState>,
    params: web::Query<ProximityParams>,
) -> Result<HttpResponse> {
    let query = ProximityQuery::from_params(&params, &state.config.proximity)?;
    let thoughts = state.proximity_service().nearby_thoughts(&query).await?;
    Ok(HttpResponse::Ok().json(thoughts))
}

/// Post a new thought, as an existing author or a guest
#[utoipa::path(
    post,
    path = "/api/v1/thoughts",
    tag = "thoughts",
    request_body = CreateThoughtRequest,
    responses(
        (status = 201, description = "Thought created", body = ThoughtView),
        (status = 400, description = "Missing content or invalid input", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 409, description = "Username belongs to a registered user", body = ErrorResponse)
    )
)]
pub async fn create_thought(
    state: web::Data<AppState>,
    req: web::Json<CreateThoughtRequest>,
) -> Result<HttpResponse> {
    let thought = state
        .thought_service()
        .create_thought(req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(thought))
}

/// Nearby thoughts with their cloud placements
#[utoipa::path(
    get,
    path = "/api/v1/thoughts/cloud",
    tag = "thoughts",
    params(CloudParams),
    responses(
        (status = 200, description = "Thoughts and placements", body = CloudResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn get_thought_cloud(
    state: web::Data<AppState>,
    params: web::Query<CloudParams>,
) -> Result<HttpResponse> {
    let query = ProximityQuery::from_params(&params.proximity(), &state.config.proximity)?;
    let view = params.view()?;
    let seed = params.seed()?;

    let cloud = state.cloud_service().build_cloud(&query, view, seed).await?;
    Ok(HttpResponse::Ok().json(cloud))
}
