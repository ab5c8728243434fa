use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;

use crate::db::CustomerRepository;

const SERVICE_NAME: &str = "customer-api";

/// Start the metrics HTTP server
/// Serves `/metrics` for scraping and `/health` for liveness probes.
pub async fn start_metrics_server(
    registry: Arc<Registry>,
    repository: Arc<dyn CustomerRepository>,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!("📊 Starting metrics server on http://0.0.0.0:{}/metrics", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(repository.clone()))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .workers(1)
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn metrics_handler(registry: web::Data<Arc<Registry>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler(repository: web::Data<Arc<dyn CustomerRepository>>) -> impl Responder {
    match repository.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "storage": "reachable",
            "checked_at": Utc::now(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed: storage unreachable");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "storage": "unreachable",
                "checked_at": Utc::now(),
            }))
        }
    }
}
