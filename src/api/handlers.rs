use actix_web::{web, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use super::error::ApiError;
use super::payload::CustomerPayload;
use crate::domain::customer::CustomerService;
use crate::metrics::{Metrics, Outcome};

/// Shared state handed to every request handler
pub struct AppState {
    pub service: Arc<CustomerService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(service: Arc<CustomerService>, metrics: Arc<Metrics>) -> Self {
        Self { service, metrics }
    }

    /// Count the outcome of `operation` and hand the result back.
    fn observe<T>(&self, operation: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        let outcome = match &result {
            Ok(_) => Outcome::Success,
            Err(e) => e.outcome(),
        };
        self.metrics.record_request(operation, outcome);
        result
    }
}

pub async fn create_customer(
    state: web::Data<AppState>,
    payload: web::Json<CustomerPayload>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!(email = ?payload.email_address, "Creating customer");

    let result = match payload.into_inner().into_customer() {
        Ok(customer) => state.service.create(customer).await.map_err(ApiError::from),
        Err(fields) => {
            tracing::debug!(?fields, "Rejected customer payload");
            Err(ApiError::Validation(fields))
        }
    };

    state
        .observe("create", result)
        .map(|created| HttpResponse::Created().json(created))
}

pub async fn get_all_customers(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    tracing::info!("Fetching all customers");

    let result = state.service.get_all().await.map_err(ApiError::from);
    state
        .observe("get_all", result)
        .map(|customers| HttpResponse::Ok().json(customers))
}

pub async fn get_customer_by_id(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    tracing::info!(customer_id = %id, "Fetching customer");

    let result = state.service.get_by_id(id).await.map_err(ApiError::from);
    state
        .observe("get_by_id", result)
        .map(|customer| HttpResponse::Ok().json(customer))
}

pub async fn update_customer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: web::Json<CustomerPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    tracing::info!(customer_id = %id, "Updating customer");

    // The path id is authoritative; any id in the body is dropped here.
    let result = match payload.into_inner().into_customer() {
        Ok(details) => state.service.update(id, details).await.map_err(ApiError::from),
        Err(fields) => {
            tracing::debug!(customer_id = %id, ?fields, "Rejected customer payload");
            Err(ApiError::Validation(fields))
        }
    };

    state
        .observe("update", result)
        .map(|updated| HttpResponse::Ok().json(updated))
}

pub async fn delete_customer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    tracing::info!(customer_id = %id, "Deleting customer");

    let result = state.service.delete(id).await.map_err(ApiError::from);
    state
        .observe("delete", result)
        .map(|()| HttpResponse::NoContent().finish())
}
