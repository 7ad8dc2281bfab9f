//! Repository for customers.
//!
//! Sequences every operation as validate -> map to row -> storage call ->
//! map back, and owns the translation of string identifiers and storage
//! failures into [`CoreError`]. Nothing is retried here.

use std::sync::Arc;

use registry_core::customer::{Customer, CustomerPatch, NewCustomer, ENTITY};
use registry_core::error::CoreError;
use registry_core::types::{parse_db_id, DbId};

use crate::models::customer::{new_customer_to_row, patch_to_column_changes, row_to_domain};
use crate::store::CustomerStore;

#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<dyn CustomerStore>,
}

impl CustomerRepository {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Validate and insert a new customer, returning it with its assigned id.
    ///
    /// A validation failure returns before the store is touched.
    pub async fn create(&self, customer: NewCustomer) -> Result<Customer, CoreError> {
        customer.ensure_valid()?;

        let row = new_customer_to_row(&customer);
        let created = self.store.insert(&row).await.map_err(storage_error)?;
        let created = row_to_domain(created)?;

        tracing::info!(customer_id = created.id, "Customer created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Customer, CoreError> {
        let id = parse_db_id(id)?;
        self.find(id).await
    }

    /// All customers. Order is whatever the store yields; none is imposed.
    pub async fn get_all(&self) -> Result<Vec<Customer>, CoreError> {
        let rows = self.store.fetch_all().await.map_err(storage_error)?;
        rows.into_iter().map(row_to_domain).collect()
    }

    /// Apply a sparse update to the customer addressed by `id`.
    ///
    /// The patch is merged over the current row and the merged entity is
    /// validated before anything is written; the write itself only touches
    /// the supplied columns. An empty patch writes nothing.
    pub async fn update(&self, id: &str, patch: CustomerPatch) -> Result<Customer, CoreError> {
        let id = parse_db_id(id)?;
        let current = self.find(id).await?;

        if patch.is_empty() {
            return Ok(current);
        }

        let changes = patch_to_column_changes(&patch);
        let merged = patch.apply(current);
        merged.ensure_valid()?;

        let updated = self
            .store
            .update_columns(id, &changes)
            .await
            .map_err(storage_error)?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        tracing::info!(
            customer_id = id,
            columns = ?changes.changed_columns(),
            "Customer updated"
        );
        row_to_domain(updated)
    }

    /// Hard delete. A missing row is `NotFound`, an unparsable id is
    /// `InvalidIdentifier`.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let id = parse_db_id(id)?;
        let deleted = self.store.delete_by_id(id).await.map_err(storage_error)?;
        if !deleted {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }

        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Whether the underlying store answers.
    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Customer store health check failed");
                false
            }
        }
    }

    async fn find(&self, id: DbId) -> Result<Customer, CoreError> {
        let row = self
            .store
            .fetch_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        row_to_domain(row)
    }
}

/// Translate a storage failure into the domain taxonomy.
///
/// Connectivity problems become `StorageUnavailable`; anything else is an
/// internal error whose details are logged here and not exposed further.
fn storage_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::WorkerCrashed => {
            tracing::error!(error = %err, "Customer store unavailable");
            CoreError::StorageUnavailable(err.to_string())
        }
        other => {
            tracing::error!(error = %other, "Customer store error");
            CoreError::Internal(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn connectivity_errors_are_unavailable() {
        assert_matches!(
            storage_error(sqlx::Error::PoolTimedOut),
            CoreError::StorageUnavailable(_)
        );
        assert_matches!(
            storage_error(sqlx::Error::PoolClosed),
            CoreError::StorageUnavailable(_)
        );
        assert_matches!(
            storage_error(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused"
            ))),
            CoreError::StorageUnavailable(_)
        );
    }

    #[test]
    fn other_errors_are_internal() {
        assert_matches!(
            storage_error(sqlx::Error::RowNotFound),
            CoreError::Internal(_)
        );
        assert_matches!(
            storage_error(sqlx::Error::ColumnNotFound("gender".into())),
            CoreError::Internal(_)
        );
    }
}
