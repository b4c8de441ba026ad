//! Prometheus collectors of thought-service.
//!
//! `proximity` times nearby/recent lookups; `activity` counts what users create.

pub mod activity;
pub mod proximity;

use crate::error::{AppError, Result};
use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

/// `/metrics`: text exposition of every registered collector.
pub async fn serve_metrics() -> Result<HttpResponse> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| AppError::Internal(format!("metrics encoding failed: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer))
}
