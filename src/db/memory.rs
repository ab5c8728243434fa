use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repository::CustomerRepository;
use crate::models::Customer;

/// Process-local customer store.
///
/// Used when no database is configured and as the backing store in tests.
/// It applies no uniqueness constraint of its own.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    records: RwLock<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, mut customer: Customer) -> Result<Customer> {
        let id = *customer.id.get_or_insert_with(Uuid::new_v4);
        self.records.write().await.insert(id, customer.clone());
        Ok(customer)
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|c| c.email_address == email)
            .cloned())
    }

    async fn delete(&self, customer: &Customer) -> Result<()> {
        if let Some(id) = customer.id {
            self.records.write().await.remove(&id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
