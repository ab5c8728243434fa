use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod db;
mod domain;
mod metrics;
mod models;

use config::AppConfig;
use db::{CustomerRepository, InMemoryCustomerRepository, PgCustomerRepository};
use domain::customer::CustomerService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_api=debug")),
        )
        .init();

    tracing::info!("🚀 Starting Customer API");

    let config = AppConfig::from_env()?;

    // === 1. Data store ===
    let repository: Arc<dyn CustomerRepository> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL...");
            let repository =
                PgCustomerRepository::connect(url, config.database_max_connections).await?;
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(InMemoryCustomerRepository::new())
        }
    };

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    let metrics_registry = Arc::new(metrics.registry().clone());
    let health_repository = repository.clone();
    let metrics_port = config.metrics_port;
    actix_web::rt::spawn(async move {
        if let Err(e) =
            metrics::start_metrics_server(metrics_registry, health_repository, metrics_port).await
        {
            tracing::error!("Metrics server error: {}", e);
        }
    });

    // === 3. Service + HTTP API ===
    let service = Arc::new(CustomerService::new(repository).with_metrics(metrics.clone()));
    let state = web::Data::new(api::AppState::new(service, metrics));

    tracing::info!(
        "🌐 Serving /api/customers on http://{}:{}",
        config.http_host,
        config.http_port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))?
    .run()
    .await?;

    tracing::info!("👋 Customer API stopped");
    Ok(())
}
