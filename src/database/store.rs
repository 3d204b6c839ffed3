//! The supervision store seam.
//!
//! The main and staging databases hold identically-shaped tables, so both
//! are driven through the same [`SupervisionStore`] trait, one handle per
//! database. Handlers and the reconciliation engine receive the handles
//! explicitly; there is no ambient connection state anywhere in the crate.
//!
//! Rows are dynamic per module, so they travel as jsonb: reads go through
//! `to_jsonb(t)` and the promotion INSERT goes through
//! `jsonb_populate_record`, which consumes exactly the columns present on
//! the fetched row with one bound parameter. Table and column identifiers
//! come only from the static [`TableSpec`] registry; every request-supplied
//! value is a bind parameter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::query::{ListPage, ListQuery};
use crate::registry::TableSpec;

/// One row, keyed by column name.
pub type Record = serde_json::Map<String, Value>;

/// Supervisory lifecycle of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupervisionStatus {
    Pendiente,
    Aprobado,
    Rechazado,
}

impl SupervisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Aprobado => "aprobado",
            Self::Rechazado => "rechazado",
        }
    }

    /// The reporting flag that travels next to the status: set only once a
    /// record is approved.
    pub fn check_flag(&self) -> bool {
        matches!(self, Self::Aprobado)
    }
}

impl std::fmt::Display for SupervisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-level failures. Inside the reconciliation sequence these become
/// warnings; elsewhere they map to HTTP errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("row decode error: {0}")]
    Decode(String),
}

/// Data access for one database (main or staging).
#[async_trait]
pub trait SupervisionStore: Send + Sync {
    /// Set `supervision` and `check` on the row with the given id.
    /// Returns the affected row count (0 when the id is absent).
    async fn update_supervision(
        &self,
        spec: &TableSpec,
        id: &str,
        status: SupervisionStatus,
    ) -> Result<u64, StoreError>;

    /// Fetch the full row by id, as a column-name map.
    async fn fetch_record(&self, spec: &TableSpec, id: &str)
        -> Result<Option<Record>, StoreError>;

    /// Insert a row using exactly the columns present on `record`.
    async fn insert_record(&self, spec: &TableSpec, record: &Record) -> Result<u64, StoreError>;

    /// Delete the row with the given id. Returns the affected row count.
    async fn delete_record(&self, spec: &TableSpec, id: &str) -> Result<u64, StoreError>;

    /// One page of rows plus the filtered total.
    async fn list_records(&self, spec: &TableSpec, query: &ListQuery)
        -> Result<ListPage, StoreError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed store over one connection pool.
#[derive(Debug, Clone)]
pub struct PgSupervisionStore {
    pool: PgPool,
    name: &'static str,
}

impl PgSupervisionStore {
    pub fn new(pool: PgPool, name: &'static str) -> Self {
        Self { pool, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl SupervisionStore for PgSupervisionStore {
    async fn update_supervision(
        &self,
        spec: &TableSpec,
        id: &str,
        status: SupervisionStatus,
    ) -> Result<u64, StoreError> {
        // Ids arrive as strings; comparing the key as text covers both
        // integer and varchar primary keys.
        let sql = format!(
            "UPDATE \"{}\" SET \"supervision\" = $1, \"check\" = $2 WHERE \"{}\"::text = $3",
            spec.table, spec.primary_key
        );

        let result = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(status.check_flag())
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(
            store = self.name,
            table = spec.table,
            id = id,
            status = %status,
            rows = result.rows_affected(),
            "Supervision update executed"
        );

        Ok(result.rows_affected())
    }

    async fn fetch_record(
        &self,
        spec: &TableSpec,
        id: &str,
    ) -> Result<Option<Record>, StoreError> {
        let sql = format!(
            "SELECT to_jsonb(t) FROM \"{}\" t WHERE t.\"{}\"::text = $1",
            spec.table, spec.primary_key
        );

        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(Value::Object(record)) => Ok(Some(record)),
            Some(other) => Err(StoreError::Decode(format!(
                "expected a jsonb object for {}.{}, got {other}",
                spec.table, id
            ))),
            None => Ok(None),
        }
    }

    async fn insert_record(&self, spec: &TableSpec, record: &Record) -> Result<u64, StoreError> {
        // jsonb_populate_record maps the row by column name, so the insert
        // uses exactly the columns present on the fetched record and no
        // identifier is ever built from it.
        let sql = format!(
            "INSERT INTO \"{table}\" SELECT * FROM jsonb_populate_record(NULL::\"{table}\", $1)",
            table = spec.table
        );

        let result = sqlx::query(&sql)
            .bind(Value::Object(record.clone()))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_record(&self, spec: &TableSpec, id: &str) -> Result<u64, StoreError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE \"{}\"::text = $1",
            spec.table, spec.primary_key
        );

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        debug!(
            store = self.name,
            table = spec.table,
            id = id,
            rows = result.rows_affected(),
            "Row delete executed"
        );

        Ok(result.rows_affected())
    }

    async fn list_records(
        &self,
        spec: &TableSpec,
        query: &ListQuery,
    ) -> Result<ListPage, StoreError> {
        let (select, binds) = query.select_sql(spec);
        let mut select_query = sqlx::query_scalar::<_, Value>(&select);
        for needle in &binds {
            select_query = select_query.bind(needle);
        }
        let datos = select_query.fetch_all(&self.pool).await?;

        let (count, count_binds) = query.count_sql(spec);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count);
        for needle in &count_binds {
            count_query = count_query.bind(needle);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        Ok(ListPage { datos, total })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
