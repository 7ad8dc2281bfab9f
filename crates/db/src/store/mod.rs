//! The storage collaborator consumed by the repository.
//!
//! Implementations only move rows; they never validate or re-encode. A
//! missing row is reported as `Ok(None)` / `Ok(false)`, distinct from every
//! failure, which surfaces as `sqlx::Error`.

use async_trait::async_trait;
use registry_core::types::DbId;

use crate::models::customer::{CustomerColumnChanges, CustomerRow, NewCustomerRow};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCustomerStore;
pub use postgres::PgCustomerStore;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a row and return it with its generated `id`.
    async fn insert(&self, row: &NewCustomerRow) -> Result<CustomerRow, sqlx::Error>;

    async fn fetch_by_id(&self, id: DbId) -> Result<Option<CustomerRow>, sqlx::Error>;

    /// All rows, in whatever order the backend yields them.
    async fn fetch_all(&self) -> Result<Vec<CustomerRow>, sqlx::Error>;

    /// Write only the `Some` columns. Returns `None` if no row has this `id`.
    async fn update_columns(
        &self,
        id: DbId,
        changes: &CustomerColumnChanges,
    ) -> Result<Option<CustomerRow>, sqlx::Error>;

    /// Hard delete. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Confirm the backend is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
