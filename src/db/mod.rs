// ============================================================================
// Data Store Gateway
// ============================================================================
//
// Persistence for Customer records behind the `CustomerRepository` trait.
//
// - repository - the gateway contract
// - postgres   - sqlx/PostgreSQL implementation used in deployments
// - memory     - in-process implementation for local runs and tests
//
// Absence is always an empty `Option`, never an error. Turning absence into
// "not found" is the service layer's job.
//
// ============================================================================

mod memory;
mod postgres;
mod repository;

pub use memory::InMemoryCustomerRepository;
pub use postgres::PgCustomerRepository;
pub use repository::CustomerRepository;
