// Private module declaration
mod server;

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// - Customer creation requests (counted before the uniqueness check, so
//   rejected duplicates are included)
// - API requests by operation and outcome
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Request outcome label values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    NotFound,
    ServerError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ClientError => "client_error",
            Outcome::NotFound => "not_found",
            Outcome::ServerError => "server_error",
        }
    }
}

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    pub customer_creation_requests: IntCounter,
    pub api_requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let customer_creation_requests = IntCounter::new(
            "customer_creation_requests_total",
            "Total customer creation requests, including rejected ones",
        )?;
        registry.register(Box::new(customer_creation_requests.clone()))?;

        let api_requests = IntCounterVec::new(
            Opts::new("customer_api_requests_total", "Total customer API requests"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(api_requests.clone()))?;

        Ok(Self {
            registry,
            customer_creation_requests,
            api_requests,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_creation_request(&self) {
        self.customer_creation_requests.inc();
    }

    /// Helper to record the outcome of one API call
    pub fn record_request(&self, operation: &str, outcome: Outcome) {
        self.api_requests
            .with_label_values(&[operation, outcome.as_str()])
            .inc();
    }
}
