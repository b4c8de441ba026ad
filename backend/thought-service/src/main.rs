use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use thought_service::db::{PgThoughtStore, MIGRATOR};
use thought_service::metrics::serve_metrics;
use thought_service::openapi::ApiDoc;
use thought_service::{routes, AppState, Config, SERVICE_NAME};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Thought Service
///
/// HTTP API of Fısıltı: location-tagged thoughts, comments and guest authors.
///
/// # Routes
///
/// - `/api/v1/thoughts` - Nearby thoughts, thought creation
/// - `/api/v1/thoughts/cloud` - Nearby thoughts with cloud placements
/// - `/api/v1/thoughts/{id}/comments` - Comment listing and creation
/// - `/api/v1/users/guest` - Guest creation
/// - `/api/v1/health*`, `/metrics`, `/swagger-ui/`
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Container healthcheck: `thought-service healthcheck`
    {
        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "healthcheck" || cmd == "healthcheck-http" {
                let port = std::env::var("THOUGHT_SERVICE_PORT").unwrap_or_else(|_| "8080".into());
                let url = format!("http://127.0.0.1:{}/api/v1/health", port);
                match reqwest::Client::new().get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => return Ok(()),
                    Ok(resp) => {
                        eprintln!("healthcheck HTTP status: {}", resp.status());
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"));
                    }
                    Err(e) => {
                        eprintln!("healthcheck HTTP error: {}", e);
                        return Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"));
                    }
                }
            }
        }
    }

    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    tracing::info!(
        env = %config.app.env,
        "Starting {} v{}",
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let mut db_config = db_pool::DbConfig::from_env(SERVICE_NAME, &config.database.url);
    if std::env::var("DB_MAX_CONNECTIONS").is_err() {
        db_config.max_connections = config.database.max_connections;
    }
    db_config.log_config();

    let pool = db_pool::create_pool(db_config).await.map_err(|e| {
        tracing::error!("Database connection failed: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    if config.database.run_migrations {
        db_pool::run_migrations(&pool, &MIGRATOR).await.map_err(|e| {
            tracing::error!("Database migration failed: {}", e);
            io::Error::new(io::ErrorKind::Other, e.to_string())
        })?;
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let allowed_origins = config.cors.allowed_origins.clone();
    let state = web::Data::new(AppState::new(
        Arc::new(PgThoughtStore::new(pool.clone())),
        config,
    ));

    tracing::info!("Starting HTTP server on {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", ApiDoc::openapi()),
            )
            .route("/metrics", web::get().to(serve_metrics))
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    })
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            pool.close().await;
            return match result {
                Ok(result) => result,
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            };
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    server_handle.stop(true).await;
    if let Err(e) = server_task.await {
        tracing::error!("HTTP server task failed: {}", e);
    }

    pool.close().await;
    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}
