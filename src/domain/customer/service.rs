use std::sync::Arc;
use uuid::Uuid;

use super::errors::CustomerError;
use crate::db::CustomerRepository;
use crate::metrics::Metrics;
use crate::models::Customer;

pub type CustomerResult<T> = Result<T, CustomerError>;

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: lookup → rule check → repository write
//
// Email uniqueness is checked with a read followed by a separate write, so
// two concurrent creates with the same address can both pass the check.
// Updates do not re-check uniqueness.
//
// ============================================================================

pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
    metrics: Option<Arc<Metrics>>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self {
            repository,
            metrics: None,
        }
    }

    /// Attach the metrics sink that counts creation requests.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Persist a new customer. Any id on `customer` is discarded.
    pub async fn create(&self, mut customer: Customer) -> CustomerResult<Customer> {
        if let Some(metrics) = &self.metrics {
            metrics.record_creation_request();
        }

        if self
            .repository
            .find_by_email(&customer.email_address)
            .await?
            .is_some()
        {
            tracing::warn!(
                email = %customer.email_address,
                "Rejected customer with duplicate email"
            );
            return Err(CustomerError::DuplicateEmail(customer.email_address));
        }

        customer.id = None;
        tracing::info!(email = %customer.email_address, "Saving customer to the database");
        let saved = self.repository.save(customer).await?;

        tracing::info!(customer_id = ?saved.id, "✅ Customer created");
        Ok(saved)
    }

    pub async fn get_all(&self) -> CustomerResult<Vec<Customer>> {
        tracing::info!("Retrieving all customers from the database");
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> CustomerResult<Customer> {
        tracing::info!(customer_id = %id, "Retrieving customer");

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::error!(customer_id = %id, "Customer not found");
            CustomerError::NotFound(id)
        })
    }

    /// Replace every mutable field of customer `id` with `details`.
    pub async fn update(&self, id: Uuid, details: Customer) -> CustomerResult<Customer> {
        tracing::info!(customer_id = %id, "Updating customer");

        let mut customer = self.get_by_id(id).await?;
        customer.replace_details(details);
        let saved = self.repository.save(customer).await?;

        tracing::info!(customer_id = %id, "✅ Customer updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> CustomerResult<()> {
        tracing::info!(customer_id = %id, "Deleting customer");

        let customer = self.get_by_id(id).await?;
        self.repository.delete(&customer).await?;

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCustomerRepository;
    use crate::models::sample_customer;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps the in-memory store and counts calls, optionally failing them.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryCustomerRepository,
        saves: AtomicUsize,
        deletes: AtomicUsize,
        email_lookups: AtomicUsize,
        fail: bool,
    }

    impl RecordingRepository {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CustomerRepository for RecordingRepository {
        async fn save(&self, customer: Customer) -> Result<Customer> {
            self.check()?;
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(customer).await
        }

        async fn find_all(&self) -> Result<Vec<Customer>> {
            self.check()?;
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
            self.check()?;
            self.inner.find_by_id(id).await
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
            self.check()?;
            self.email_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_email(email).await
        }

        async fn delete(&self, customer: &Customer) -> Result<()> {
            self.check()?;
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(customer).await
        }

        async fn ping(&self) -> Result<()> {
            self.check()
        }
    }

    fn service_with(repo: Arc<RecordingRepository>) -> CustomerService {
        CustomerService::new(repo)
    }

    #[tokio::test]
    async fn test_create_customer() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        let created = service
            .create(sample_customer("John", "john.doe@example.com"))
            .await
            .unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.first_name, "John");
        assert_eq!(repo.email_lookups.load(Ordering::SeqCst), 1);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_ignores_caller_supplied_id() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        let supplied = Uuid::new_v4();
        let mut customer = sample_customer("John", "john.doe@example.com");
        customer.id = Some(supplied);

        let created = service.create(customer).await.unwrap();

        assert!(created.id.is_some());
        assert_ne!(created.id, Some(supplied));
    }

    #[tokio::test]
    async fn test_create_customer_not_unique_email() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());
        service
            .create(sample_customer("John", "john.doe@example.com"))
            .await
            .unwrap();

        let result = service
            .create(sample_customer("Jack", "john.doe@example.com"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CustomerError::DuplicateEmail(_)));
        assert_eq!(
            err.to_string(),
            "Email address must be unique: john.doe@example.com"
        );
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
        assert_eq!(repo.inner.len().await, 1);
    }

    #[tokio::test]
    async fn test_creation_counter_includes_rejected_duplicates() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let service = CustomerService::new(Arc::new(InMemoryCustomerRepository::new()))
            .with_metrics(metrics.clone());

        service.create(sample_customer("John", "john@x.com")).await.unwrap();
        let _ = service.create(sample_customer("Jack", "john@x.com")).await;

        assert_eq!(metrics.customer_creation_requests.get(), 2);
    }

    #[tokio::test]
    async fn test_get_all_customers() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        service.create(sample_customer("John", "john@x.com")).await.unwrap();
        service.create(sample_customer("Jane", "jane@x.com")).await.unwrap();

        let customers = service.get_all().await.unwrap();

        assert_eq!(customers.len(), 2);
    }

    #[tokio::test]
    async fn test_get_customer_by_id() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        let created = service.create(sample_customer("John", "john@x.com")).await.unwrap();

        let found = service.get_by_id(created.id.unwrap()).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_customer_by_id_not_found() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        let id = Uuid::new_v4();

        let err = service.get_by_id(id).await.unwrap_err();

        assert!(matches!(err, CustomerError::NotFound(missing) if missing == id));
        assert_eq!(err.to_string(), format!("Customer not found with ID: {id}"));
    }

    #[tokio::test]
    async fn test_update_customer() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());
        let created = service.create(sample_customer("John", "john@x.com")).await.unwrap();
        let id = created.id.unwrap();

        let mut details = sample_customer("Johnny", "johnny.does@example.com");
        details.id = Some(Uuid::new_v4());
        details.middle_name = Some("Middle".to_string());
        details.last_name = "Does".to_string();
        details.phone_number = "+9876543210".to_string();

        let updated = service.update(id, details).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.first_name, "Johnny");
        assert_eq!(updated.middle_name.as_deref(), Some("Middle"));
        assert_eq!(updated.last_name, "Does");
        assert_eq!(updated.email_address, "johnny.does@example.com");
        assert_eq!(updated.phone_number, "+9876543210");
        assert_eq!(service.get_by_id(id).await.unwrap(), updated);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_does_not_recheck_email_uniqueness() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());
        service.create(sample_customer("John", "john@x.com")).await.unwrap();
        let jane = service.create(sample_customer("Jane", "jane@x.com")).await.unwrap();

        let updated = service
            .update(jane.id.unwrap(), sample_customer("Jane", "john@x.com"))
            .await
            .unwrap();

        assert_eq!(updated.email_address, "john@x.com");
        assert_eq!(repo.email_lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_customer_not_found_performs_no_write() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        let err = service
            .update(Uuid::new_v4(), sample_customer("John", "john@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::NotFound(_)));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
        assert_eq!(repo.inner.len().await, 0);
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());
        let created = service.create(sample_customer("John", "john@x.com")).await.unwrap();
        let id = created.id.unwrap();

        service.delete(id).await.unwrap();

        assert_eq!(repo.deletes.load(Ordering::SeqCst), 1);
        assert!(matches!(
            service.get_by_id(id).await.unwrap_err(),
            CustomerError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_customer_not_found() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());
        let id = Uuid::new_v4();

        let err = service.delete(id).await.unwrap_err();

        assert_eq!(err.to_string(), format!("Customer not found with ID: {id}"));
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_opaque() {
        let service = service_with(Arc::new(RecordingRepository::failing()));

        let err = service.get_all().await.unwrap_err();

        assert!(matches!(err, CustomerError::Storage(_)));
    }
}
