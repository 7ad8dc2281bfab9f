//! [`CustomerStore`] backed by a process-local map.
//!
//! Used by tests and by `STORAGE=memory` runs. Ids start at 1 and are never
//! reused, matching a `BIGSERIAL` sequence.

use std::collections::BTreeMap;

use async_trait::async_trait;
use registry_core::types::DbId;
use tokio::sync::RwLock;

use super::CustomerStore;
use crate::models::customer::{CustomerColumnChanges, CustomerRow, NewCustomerRow};

#[derive(Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    last_id: DbId,
    rows: BTreeMap<DbId, CustomerRow>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn insert(&self, row: &NewCustomerRow) -> Result<CustomerRow, sqlx::Error> {
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let stored = CustomerRow {
            id: table.last_id,
            name: row.name.clone(),
            surname: row.surname.clone(),
            number: row.number,
            gender: row.gender.to_string(),
            country: row.country.clone(),
            dependants: row.dependants,
            birth_date: row.birth_date,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn fetch_by_id(&self, id: DbId) -> Result<Option<CustomerRow>, sqlx::Error> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<CustomerRow>, sqlx::Error> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn update_columns(
        &self,
        id: DbId,
        changes: &CustomerColumnChanges,
    ) -> Result<Option<CustomerRow>, sqlx::Error> {
        let mut table = self.inner.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            changes.apply_to_row(row);
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn new_row(name: &str) -> NewCustomerRow {
        NewCustomerRow {
            name: name.to_string(),
            surname: "Smith".into(),
            number: 1,
            gender: "Female",
            country: "UK".into(),
            dependants: 0,
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = InMemoryCustomerStore::new();

        let first = store.insert(&new_row("A")).await.unwrap();
        let second = store.insert(&new_row("B")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(store.delete_by_id(second.id).await.unwrap());
        let third = store.insert(&new_row("C")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn missing_rows_are_none_or_false() {
        let store = InMemoryCustomerStore::new();

        assert!(store.fetch_by_id(999).await.unwrap().is_none());
        assert!(store
            .update_columns(999, &CustomerColumnChanges::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_by_id(999).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_columns_writes_only_present_columns() {
        let store = InMemoryCustomerStore::new();
        let created = store.insert(&new_row("Alice")).await.unwrap();

        let changes = CustomerColumnChanges {
            country: Some("France".into()),
            ..Default::default()
        };
        let updated = store
            .update_columns(created.id, &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.country, "France");
        assert_eq!(updated.name, "Alice");
        assert_eq!(store.fetch_by_id(created.id).await.unwrap(), Some(updated));
    }
}
