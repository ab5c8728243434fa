use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Customer;

/// Storage contract for customer records.
///
/// Every method fails only for store-level problems (connectivity, constraint
/// violations); those are opaque to callers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert `customer` when its id is unset, otherwise overwrite the record
    /// with that id. Returns the persisted record with its id populated.
    async fn save(&self, customer: Customer) -> Result<Customer>;

    /// Every stored record, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Customer>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    /// Exact match on the email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn delete(&self, customer: &Customer) -> Result<()>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
