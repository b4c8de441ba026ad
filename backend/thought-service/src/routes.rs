/// Route table shared by the server binary and the HTTP tests
use crate::error::AppError;
use crate::handlers;
use crate::openapi::openapi_json;
use actix_web::{web, HttpResponse};

/// Mount `/api/v1` routes and the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .route("/api/v1/openapi.json", web::get().to(openapi_json))
        .route("/api/v1/health", web::get().to(handlers::health_summary))
        .route("/api/v1/health/ready", web::get().to(handlers::readiness_check))
        .route("/api/v1/health/live", web::get().to(handlers::liveness_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/thoughts")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::get_thoughts))
                                .route(web::post().to(handlers::create_thought)),
                        )
                        .route("/cloud", web::get().to(handlers::get_thought_cloud))
                        .service(
                            web::resource("/{id}/comments")
                                .route(web::get().to(handlers::get_comments))
                                .route(web::post().to(handlers::create_comment)),
                        ),
                )
                .route("/users/guest", web::post().to(handlers::create_guest)),
        );
}

/// Fallback for unknown routes
pub async fn not_found() -> actix_web::Result<HttpResponse> {
    Err(AppError::NotFound("Not found".to_string()).into())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
        })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Not found".to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidQuery(err.to_string()).into())
}
