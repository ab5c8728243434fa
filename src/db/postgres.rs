use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::repository::CustomerRepository;
use crate::models::Customer;

// ============================================================================
// PostgreSQL Customer Repository
// ============================================================================
//
// One table, `customers`. Ids are v4 UUIDs generated here on first save, so
// inserts and overwrites share a single upsert statement.
//
// ============================================================================

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    first_name VARCHAR(50) NOT NULL,
    middle_name TEXT,
    last_name VARCHAR(50) NOT NULL,
    email_address TEXT NOT NULL UNIQUE,
    phone_number VARCHAR(16) NOT NULL
)";

const COLUMNS: &str = "id, first_name, middle_name, last_name, email_address, phone_number";

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email_address: String,
    phone_number: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: Some(row.id),
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            email_address: row.email_address,
            phone_number: row.phone_number,
        }
    }
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Create the `customers` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("customers table ready");
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn save(&self, customer: Customer) -> Result<Customer> {
        let id = customer.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                middle_name = EXCLUDED.middle_name,
                last_name = EXCLUDED.last_name,
                email_address = EXCLUDED.email_address,
                phone_number = EXCLUDED.phone_number
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&customer.first_name)
        .bind(&customer.middle_name)
        .bind(&customer.last_name)
        .bind(&customer.email_address)
        .bind(&customer.phone_number)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(customer_id = %row.id, "Saved customer row");
        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!("SELECT {COLUMNS} FROM customers"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE email_address = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, customer: &Customer) -> Result<()> {
        let Some(id) = customer.id else {
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(customer_id = %id, rows = result.rows_affected(), "Deleted customer row");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Statement execution needs a live PostgreSQL instance; only the row mapping
// is covered here.
//
// ============================================================================
