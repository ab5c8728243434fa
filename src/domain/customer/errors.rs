use uuid::Uuid;

// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Email address must be unique: {0}")]
    DuplicateEmail(String),

    #[error("Customer not found with ID: {0}")]
    NotFound(Uuid),

    /// Any failure reported by the data store
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
