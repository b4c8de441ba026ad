#![allow(dead_code)]

pub mod memory_store;

use actix_web::{web, App};
use std::sync::Arc;
use thought_service::metrics::serve_metrics;
use thought_service::{routes, AppState, Config};

pub use memory_store::MemoryStore;

/// App wired like the server binary, backed by `store`.
pub fn test_app(
    store: Arc<MemoryStore>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(AppState::new(store, Config::default()));
    App::new()
        .app_data(state)
        .route("/metrics", web::get().to(serve_metrics))
        .configure(routes::configure)
        .default_service(web::route().to(routes::not_found))
}
