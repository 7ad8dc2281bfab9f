//! [`CustomerStore`] over the `customers` table.

use async_trait::async_trait;
use registry_core::types::DbId;

use super::CustomerStore;
use crate::models::customer::{CustomerColumnChanges, CustomerRow, NewCustomerRow};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, surname, number, gender, country, dependants, birth_date";

#[derive(Clone)]
pub struct PgCustomerStore {
    pool: DbPool,
}

impl PgCustomerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn insert(&self, row: &NewCustomerRow) -> Result<CustomerRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, surname, number, gender, country, dependants, birth_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerRow>(&query)
            .bind(&row.name)
            .bind(&row.surname)
            .bind(row.number)
            .bind(row.gender)
            .bind(&row.country)
            .bind(row.dependants)
            .bind(row.birth_date)
            .fetch_one(&self.pool)
            .await
    }

    async fn fetch_by_id(&self, id: DbId) -> Result<Option<CustomerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// No `ORDER BY`: callers get the planner's natural order.
    async fn fetch_all(&self) -> Result<Vec<CustomerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers");
        sqlx::query_as::<_, CustomerRow>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_columns(
        &self,
        id: DbId,
        changes: &CustomerColumnChanges,
    ) -> Result<Option<CustomerRow>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                number = COALESCE($4, number),
                gender = COALESCE($5, gender),
                country = COALESCE($6, country),
                dependants = COALESCE($7, dependants),
                birth_date = COALESCE($8, birth_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.surname)
            .bind(changes.number)
            .bind(changes.gender)
            .bind(&changes.country)
            .bind(changes.dependants)
            .bind(changes.birth_date)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
