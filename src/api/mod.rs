// ============================================================================
// API Layer - HTTP/JSON surface under /api/customers
// ============================================================================
//
//   POST   /api/customers        → 201 + created customer
//   GET    /api/customers        → 200 + all customers
//   GET    /api/customers/{id}   → 200 + customer
//   PUT    /api/customers/{id}   → 200 + updated customer
//   DELETE /api/customers/{id}   → 204
//
// Request bodies are validated before the service is called.
//
// ============================================================================

mod error;
mod handlers;
mod payload;

use actix_web::web;

use error::ApiError;

pub use handlers::AppState;

/// Register the customer routes. Shared by `main` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/customers")
            .app_data(json_config())
            .app_data(path_config())
            .service(
                web::resource("")
                    .route(web::get().to(handlers::get_all_customers))
                    .route(web::post().to(handlers::create_customer)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::get_customer_by_id))
                    .route(web::put().to(handlers::update_customer))
                    .route(web::delete().to(handlers::delete_customer)),
            ),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Unexpected(format!("unreadable request body: {err}")).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        let raw = req.match_info().get("id").unwrap_or_default();
        ApiError::Unexpected(format!("unparseable customer id {raw:?}: {err}")).into()
    })
}

// ============================================================================
// HTTP contract tests
// ============================================================================
