// ============================================================================
// Customer Domain
// ============================================================================
//
// - Errors (CustomerError enum)
// - Service (CustomerService, the only entry point for customer operations)
//
// ============================================================================

pub mod errors;
pub mod service;

// Re-export for convenience
pub use errors::*;
pub use service::*;
